//! Commands, the timer queue, and the program driver.
//!
//! Nothing here sleeps or spawns. `Update` handlers return a [`Cmd`]
//! describing what should happen next; [`Program`] turns timers into queued
//! messages against a virtual clock that the host (or a test) advances.

use super::messages::Msg;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::time::Duration;

/// A side effect requested by an update handler.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    #[default]
    None,
    /// Deliver a message right after the current one is handled.
    Emit(Msg),
    /// Deliver a message once `Duration` has elapsed.
    After(Duration, Msg),
    Batch(Vec<Cmd>),
    Quit,
    SetTitle(String),
}

impl Cmd {
    pub fn none() -> Self {
        Cmd::None
    }

    pub fn emit(msg: Msg) -> Self {
        Cmd::Emit(msg)
    }

    pub fn after(delay: Duration, msg: Msg) -> Self {
        Cmd::After(delay, msg)
    }

    /// Combine commands, dropping empty ones. A batch of one collapses to
    /// that command and an empty batch to `Cmd::None`.
    pub fn batch(cmds: impl IntoIterator<Item = Cmd>) -> Self {
        let mut kept: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match kept.len() {
            0 => Cmd::None,
            1 => kept.remove(0),
            _ => Cmd::Batch(kept),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Leaf commands in order, with batches flattened.
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_quit),
            _ => false,
        }
    }

    /// Whether this command (or any part of a batch) would deliver `msg`.
    pub fn delivers(&self, msg: &Msg) -> bool {
        match self {
            Cmd::Emit(m) | Cmd::After(_, m) => m == msg,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.delivers(msg)),
            _ => false,
        }
    }
}

#[derive(Debug)]
struct Timer {
    due: Duration,
    seq: u64,
    msg: Msg,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    // Reversed so the max-heap pops the earliest deadline, ties in
    // scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual-time timer queue plus the FIFO of immediate messages.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    seq: u64,
    timers: BinaryHeap<Timer>,
    ready: VecDeque<Msg>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, msg: Msg) {
        self.seq += 1;
        self.timers.push(Timer {
            due: self.now + delay,
            seq: self.seq,
            msg,
        });
    }

    pub fn push_ready(&mut self, msg: Msg) {
        self.ready.push_back(msg);
    }

    pub fn pop_ready(&mut self) -> Option<Msg> {
        self.ready.pop_front()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.peek().map(|t| t.due)
    }

    /// Pop the earliest timer if it is due by `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Msg> {
        if self.timers.peek().is_some_and(|t| t.due <= until) {
            let timer = self.timers.pop()?;
            self.now = self.now.max(timer.due);
            return Some(timer.msg);
        }
        None
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

/// The Elm-style contract the root controller implements.
pub trait Model {
    fn init(&mut self) -> Cmd;
    fn update(&mut self, msg: Msg) -> Cmd;
    fn view(&self) -> String;
}

/// Drives a [`Model`]: applies commands, fires timers in deadline order and
/// remembers quit and title requests for the host.
pub struct Program<M: Model> {
    model: M,
    scheduler: Scheduler,
    quit: bool,
    title: Option<String>,
}

impl<M: Model> Program<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            scheduler: Scheduler::new(),
            quit: false,
            title: None,
        }
    }

    /// Run the model's `init` and everything it triggers immediately.
    pub fn start(&mut self) {
        let cmd = self.model.init();
        self.apply(cmd);
        self.drain();
    }

    /// Handle one external message plus any messages it emits.
    pub fn send(&mut self, msg: Msg) {
        if self.quit {
            return;
        }
        let cmd = self.model.update(msg);
        self.apply(cmd);
        self.drain();
    }

    /// Advance the virtual clock by `delta`, firing due timers in order.
    pub fn advance(&mut self, delta: Duration) {
        let target = self.scheduler.now() + delta;
        self.advance_to(target);
    }

    /// Advance the virtual clock to `target`, firing due timers in order.
    pub fn advance_to(&mut self, target: Duration) {
        while !self.quit {
            let Some(msg) = self.scheduler.pop_due(target) else {
                break;
            };
            let cmd = self.model.update(msg);
            self.apply(cmd);
            self.drain();
        }
        self.scheduler.set_now(target);
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_timers()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The most recent title request, once.
    pub fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    pub fn view(&self) -> String {
        self.model.view()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    fn apply(&mut self, cmd: Cmd) {
        for leaf in cmd.flatten() {
            match leaf {
                Cmd::Emit(msg) => self.scheduler.push_ready(msg),
                Cmd::After(delay, msg) => self.scheduler.schedule(delay, msg),
                Cmd::Quit => self.quit = true,
                Cmd::SetTitle(title) => self.title = Some(title),
                Cmd::None | Cmd::Batch(_) => {}
            }
        }
    }

    fn drain(&mut self) {
        while !self.quit {
            let Some(msg) = self.scheduler.pop_ready() else {
                break;
            };
            let cmd = self.model.update(msg);
            self.apply(cmd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::messages::{AnimId, Section};

    /// Records every message it sees; a tick re-arms itself three times.
    struct Recorder {
        seen: Vec<Msg>,
        id: AnimId,
        ticks: usize,
    }

    impl Model for Recorder {
        fn init(&mut self) -> Cmd {
            Cmd::batch([
                Cmd::SetTitle("hello".into()),
                Cmd::after(Duration::from_millis(10), Msg::Tick(self.id)),
            ])
        }

        fn update(&mut self, msg: Msg) -> Cmd {
            self.seen.push(msg.clone());
            match msg {
                Msg::Tick(id) if id == self.id => {
                    self.ticks += 1;
                    if self.ticks < 3 {
                        Cmd::after(Duration::from_millis(10), Msg::Tick(self.id))
                    } else {
                        Cmd::emit(Msg::TransitionDone)
                    }
                }
                Msg::Navigate(_) => Cmd::Quit,
                _ => Cmd::none(),
            }
        }

        fn view(&self) -> String {
            format!("{} ticks", self.ticks)
        }
    }

    fn recorder() -> Program<Recorder> {
        Program::new(Recorder {
            seen: Vec::new(),
            id: AnimId::next(),
            ticks: 0,
        })
    }

    #[test]
    fn batch_collapses() {
        assert!(Cmd::batch([Cmd::none(), Cmd::none()]).is_none());
        assert_eq!(Cmd::batch([Cmd::none(), Cmd::Quit]), Cmd::Quit);
        assert!(Cmd::batch([Cmd::Quit, Cmd::emit(Msg::IntroDone)]).is_quit());
    }

    #[test]
    fn flatten_nested_batches() {
        let cmd = Cmd::Batch(vec![
            Cmd::Batch(vec![Cmd::Quit, Cmd::None]),
            Cmd::emit(Msg::IntroDone),
        ]);
        assert_eq!(cmd.flatten(), vec![Cmd::Quit, Cmd::emit(Msg::IntroDone)]);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(30), Msg::IdleCheck);
        scheduler.schedule(Duration::from_millis(10), Msg::IntroDone);
        scheduler.schedule(Duration::from_millis(10), Msg::TransitionDone);

        let until = Duration::from_millis(100);
        assert_eq!(scheduler.pop_due(until), Some(Msg::IntroDone));
        assert_eq!(scheduler.pop_due(until), Some(Msg::TransitionDone));
        assert_eq!(scheduler.pop_due(until), Some(Msg::IdleCheck));
        assert_eq!(scheduler.pop_due(until), None);
        assert_eq!(scheduler.now(), Duration::from_millis(30));
    }

    #[test]
    fn program_runs_ticks_on_virtual_clock() {
        let mut program = recorder();
        program.start();
        assert_eq!(program.take_title().as_deref(), Some("hello"));
        assert_eq!(program.take_title(), None);
        assert_eq!(program.next_deadline(), Some(Duration::from_millis(10)));

        program.advance(Duration::from_millis(15));
        assert_eq!(program.model().ticks, 1);

        program.advance(Duration::from_millis(100));
        assert_eq!(program.model().ticks, 3);
        // The emitted message is handled right after the third tick.
        assert_eq!(program.model().seen.last(), Some(&Msg::TransitionDone));
        assert_eq!(program.pending_timers(), 0);
        assert_eq!(program.view(), "3 ticks");
    }

    #[test]
    fn quit_stops_processing() {
        let mut program = recorder();
        program.start();
        program.send(Msg::Navigate(Section::Work));
        assert!(program.quit_requested());
        program.advance(Duration::from_secs(1));
        assert_eq!(program.model().ticks, 0);
    }
}
