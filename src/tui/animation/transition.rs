//! Animated hand-off between two sections.
//!
//! Both views slide at once: the outgoing one drifts away while the incoming
//! one slides in from the other side. Each row crosses over from old to new
//! at its own progress point, top rows first, so the switch cascades down
//! the screen.

use super::ease_in_out;
use crate::tui::messages::{AnimId, Msg, Section};
use crate::tui::runtime::Cmd;
use crate::tui::text;
use std::time::Duration;

/// Steps for a move to an adjacent section.
const BASE_STEPS: u32 = 10;
/// Extra steps for every section skipped.
const STEPS_PER_DISTANCE: u32 = 2;
/// Below this width the incoming view is shown as-is.
const MIN_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards a higher ordinal; content moves right.
    Forward,
    Backward,
}

impl Direction {
    fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    id: AnimId,
    active: bool,
    from: Section,
    to: Section,
    direction: Direction,
    step: u32,
    steps: u32,
    interval: Duration,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

impl Transition {
    pub fn new(frame: Duration) -> Self {
        Self {
            id: AnimId::next(),
            active: false,
            from: Section::Home,
            to: Section::Home,
            direction: Direction::Forward,
            step: 0,
            steps: 0,
            interval: frame,
        }
    }

    /// Total steps for a jump across `distance` ordinals. Adjacent moves get
    /// the minimum; every extra section adds a little.
    pub fn steps_for_distance(distance: usize) -> u32 {
        let extra = u32::try_from(distance.saturating_sub(1)).unwrap_or(u32::MAX / STEPS_PER_DISTANCE);
        BASE_STEPS.saturating_add(extra.saturating_mul(STEPS_PER_DISTANCE))
    }

    /// Arm the transition and return its first tick.
    pub fn start(&mut self, from: Section, to: Section) -> Cmd {
        self.active = true;
        self.from = from;
        self.to = to;
        self.step = 0;
        self.steps = Self::steps_for_distance(from.distance(to));
        self.direction = if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Cmd::after(self.interval, Msg::Tick(self.id))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn id(&self) -> AnimId {
        self.id
    }

    pub fn from(&self) -> Section {
        self.from
    }

    pub fn to(&self) -> Section {
        self.to
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Advance one step; the last one deactivates and emits
    /// `Msg::TransitionDone`.
    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.active || *msg != Msg::Tick(self.id) {
            return Cmd::none();
        }
        self.step += 1;
        if self.step >= self.steps {
            self.active = false;
            return Cmd::emit(Msg::TransitionDone);
        }
        Cmd::after(self.interval, Msg::Tick(self.id))
    }

    /// Blend the outgoing and incoming views for the current step. Every
    /// row comes back exactly `width` columns wide.
    pub fn view(&self, from_view: &str, to_view: &str, width: usize) -> String {
        if width < MIN_WIDTH || self.steps == 0 {
            return to_view.to_string();
        }

        let progress = f64::from(self.step) / f64::from(self.steps);
        let eased = ease_in_out(progress);
        let max_slide = (width / 5).max(2) as f64;
        let from_offset = (eased * max_slide) as usize;
        let to_offset = ((1.0 - eased) * max_slide) as usize;

        let from_lines: Vec<&str> = from_view.split('\n').collect();
        let to_lines: Vec<&str> = to_view.split('\n').collect();
        let rows = from_lines.len().max(to_lines.len());
        let sign = self.direction.sign();

        let mut out = Vec::with_capacity(rows);
        for i in 0..rows {
            let ratio = i as f64 / rows.saturating_sub(1).max(1) as f64;
            let switch_point = 0.35 + ratio * 0.30;
            let line = if eased < switch_point {
                shift_line(from_lines.get(i).copied().unwrap_or(""), from_offset, sign, width)
            } else {
                shift_line(to_lines.get(i).copied().unwrap_or(""), to_offset, -sign, width)
            };
            out.push(line);
        }
        out.join("\n")
    }
}

/// Shift one line by `offset` columns and clamp it to exactly `width`.
///
/// A positive direction pushes the content right, cutting off its tail. A
/// negative one lets it shrink away to the left: the content is truncated to
/// `width - offset` columns and the freed space is padded on the right.
pub fn shift_line(line: &str, offset: usize, direction: i8, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if offset == 0 {
        return text::fit(line, width);
    }
    if direction > 0 {
        return text::fit(&format!("{}{}", " ".repeat(offset), line), width);
    }
    let remaining = width.saturating_sub(offset);
    if remaining == 0 {
        return " ".repeat(width);
    }
    format!("{}{}", text::fit(line, remaining), " ".repeat(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(t: &mut Transition) -> u32 {
        let mut ticks = 0;
        while t.is_active() {
            let cmd = t.update(&Msg::Tick(t.id()));
            ticks += 1;
            if !t.is_active() {
                assert_eq!(cmd, Cmd::emit(Msg::TransitionDone));
            }
        }
        ticks
    }

    #[test]
    fn steps_grow_with_distance() {
        assert_eq!(Transition::steps_for_distance(1), 10);
        assert_eq!(Transition::steps_for_distance(2), 12);
        assert_eq!(Transition::steps_for_distance(3), 14);
        for d in 1..3 {
            assert!(Transition::steps_for_distance(d) < Transition::steps_for_distance(d + 1));
        }
    }

    #[test]
    fn direction_follows_ordinals() {
        let mut t = Transition::default();
        t.start(Section::Home, Section::Cv);
        assert_eq!(t.direction(), Direction::Forward);
        assert_eq!(t.steps(), 12);
        t.start(Section::Links, Section::Work);
        assert_eq!(t.direction(), Direction::Backward);
    }

    #[test]
    fn runs_for_its_step_count() {
        let mut t = Transition::default();
        t.start(Section::Home, Section::Links);
        assert_eq!(run(&mut t), 14);
        assert!(t.update(&Msg::Tick(t.id())).is_none());
    }

    #[test]
    fn ignores_other_ids() {
        let mut t = Transition::default();
        t.start(Section::Home, Section::Work);
        assert!(t.update(&Msg::Tick(AnimId::next())).is_none());
        assert_eq!(t.step(), 0);
    }

    #[test]
    fn every_row_is_exact_width() {
        let mut t = Transition::default();
        t.start(Section::Home, Section::Work);
        let from = "from one\n\x1b[1mbold from\x1b[0m\n漢字漢字漢字漢字漢字漢字漢字";
        let to = "to\nto two\nto three\nto four";
        for _ in 0..t.steps() {
            let frame = t.view(from, to, 30);
            assert_eq!(frame.split('\n').count(), 4);
            for line in frame.split('\n') {
                assert_eq!(text::width(line), 30, "{line:?}");
            }
            t.update(&Msg::Tick(t.id()));
        }
    }

    #[test]
    fn top_rows_switch_first() {
        let mut t = Transition::default();
        t.start(Section::Home, Section::Work);
        let from = (0..10).map(|_| "old").collect::<Vec<_>>().join("\n");
        let to = (0..10).map(|_| "new").collect::<Vec<_>>().join("\n");
        for _ in 0..5 {
            t.update(&Msg::Tick(t.id()));
        }
        // Halfway: eased = 0.5, rows up to ratio 0.5 have switched.
        let frame = t.view(&from, &to, 40);
        let rows: Vec<&str> = frame.split('\n').collect();
        assert!(rows[0].contains("new"));
        assert!(rows[9].contains("old"));
    }

    #[test]
    fn narrow_terminal_shows_target() {
        let mut t = Transition::default();
        t.start(Section::Home, Section::Work);
        assert_eq!(t.view("from", "to", 19), "to");
    }

    #[test]
    fn shift_line_directions() {
        assert_eq!(shift_line("abc", 2, 1, 6), "  abc ");
        assert_eq!(shift_line("abcdef", 2, -1, 6), "abcd  ");
        assert_eq!(shift_line("abc", 8, -1, 6), "      ");
        assert_eq!(shift_line("abc", 0, 1, 4), "abc ");
    }

    #[test]
    fn shift_never_splits_wide_glyphs() {
        let out = shift_line("漢字漢字", 1, 1, 6);
        assert_eq!(text::width(&out), 6);
        assert_eq!(out, " 漢字 ");
    }
}
