use crate::tui::messages::{AnimId, Msg};
use crate::tui::runtime::Cmd;
use std::time::Duration;

/// Reveals a fixed string a few characters per tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    id: AnimId,
    text: Vec<char>,
    pos: usize,
    chars_per_tick: usize,
    interval: Duration,
    done: bool,
}

impl Typewriter {
    /// `chars_per_tick` below 1 is raised to 1. Empty text starts out done.
    pub fn new(text: &str, chars_per_tick: usize) -> Self {
        let text: Vec<char> = text.chars().collect();
        Self {
            id: AnimId::next(),
            done: text.is_empty(),
            text,
            pos: 0,
            chars_per_tick: chars_per_tick.max(1),
            interval: Duration::from_millis(50),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn id(&self) -> AnimId {
        self.id
    }

    /// First tick. A finished typewriter asks for nothing.
    pub fn start(&self) -> Cmd {
        if self.done {
            return Cmd::none();
        }
        self.tick()
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if self.done || *msg != Msg::Tick(self.id) {
            return Cmd::none();
        }
        self.pos += self.chars_per_tick;
        if self.pos >= self.text.len() {
            self.pos = self.text.len();
            self.done = true;
            return Cmd::emit(Msg::TypewriterDone(self.id));
        }
        self.tick()
    }

    /// The revealed prefix.
    pub fn view(&self) -> String {
        self.text[..self.pos].iter().collect()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn done(&self) -> bool {
        self.done
    }

    /// Reveal everything now. No done message is sent.
    pub fn skip(&mut self) {
        self.pos = self.text.len();
        self.done = true;
    }

    fn tick(&self) -> Cmd {
        Cmd::after(self.interval, Msg::Tick(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_done(tw: &mut Typewriter) -> usize {
        let mut ticks = 0;
        while !tw.done() {
            let cmd = tw.update(&Msg::Tick(tw.id()));
            ticks += 1;
            assert!(tw.position() <= tw.len());
            if tw.done() {
                assert!(cmd.delivers(&Msg::TypewriterDone(tw.id())));
            }
        }
        ticks
    }

    #[test]
    fn empty_text_is_done() {
        let tw = Typewriter::new("", 1);
        assert!(tw.done());
        assert!(tw.start().is_none());
        assert_eq!(tw.view(), "");
    }

    #[test]
    fn finishes_in_ceil_ticks() {
        for (text, k) in [("hello", 1), ("hello", 2), ("hello", 5), ("hello", 7), ("日本語テキスト", 3)] {
            let mut tw = Typewriter::new(text, k);
            let len = text.chars().count();
            assert_eq!(run_to_done(&mut tw), len.div_ceil(k), "{text} by {k}");
            assert_eq!(tw.view(), text);
        }
    }

    #[test]
    fn zero_speed_means_one() {
        let mut tw = Typewriter::new("abc", 0);
        assert_eq!(run_to_done(&mut tw), 3);
    }

    #[test]
    fn ignores_foreign_ticks() {
        let mut tw = Typewriter::new("abc", 1);
        let other = AnimId::next();
        assert!(tw.update(&Msg::Tick(other)).is_none());
        assert!(tw.update(&Msg::IdleCheck).is_none());
        assert_eq!(tw.position(), 0);
    }

    #[test]
    fn skip_reveals_all() {
        let mut tw = Typewriter::new("skip me", 1);
        tw.update(&Msg::Tick(tw.id()));
        tw.skip();
        assert!(tw.done());
        assert_eq!(tw.view(), "skip me");
        assert!(tw.update(&Msg::Tick(tw.id())).is_none());
    }

    #[test]
    fn start_schedules_with_interval() {
        let tw = Typewriter::new("x", 1).with_interval(Duration::from_millis(7));
        assert_eq!(tw.start(), Cmd::after(Duration::from_millis(7), Msg::Tick(tw.id())));
    }
}
