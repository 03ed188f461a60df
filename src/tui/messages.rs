//! Messages flowing through the engine.

use super::palette::PaletteAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// One of the four top-level content views, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Home,
    Work,
    Cv,
    Links,
}

impl Section {
    pub const COUNT: usize = 4;
    pub const ALL: [Section; Section::COUNT] = [Section::Home, Section::Work, Section::Cv, Section::Links];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Work => "work",
            Section::Cv => "cv",
            Section::Links => "links",
        }
    }

    /// Two-letter label for cramped navigation bars.
    pub fn short_name(self) -> &'static str {
        match self {
            Section::Home => "hm",
            Section::Work => "wk",
            Section::Cv => "cv",
            Section::Links => "lk",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.ordinal() + 1) % Self::COUNT]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.ordinal() + Self::COUNT - 1) % Self::COUNT]
    }

    /// Ordinal distance, used to scale transition length.
    pub fn distance(self, other: Section) -> usize {
        self.ordinal().abs_diff(other.ordinal())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Identity of one timer owner.
///
/// Every animator instance draws a fresh id when it is built and only reacts
/// to ticks carrying it, so instances sharing a message shape never trigger
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimId(u64);

impl AnimId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        AnimId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AnimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal (or, for sections, content area) size in cells.
    Resize { width: usize, height: usize },
    Focus,
    Blur,
    /// A scheduled timer owned by the animator with this id fired.
    Tick(AnimId),
    TypewriterDone(AnimId),
    TransitionDone,
    IntroDone,
    IdleCheck,
    Navigate(Section),
    PaletteResult(PaletteAction),
}

impl Msg {
    /// A key press with no modifiers.
    pub fn key(code: KeyCode) -> Self {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// A printable character key press.
    pub fn char(c: char) -> Self {
        Msg::key(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Msg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    pub fn wheel(up: bool) -> Self {
        Msg::Mouse(MouseEvent {
            kind: if up {
                MouseEventKind::ScrollUp
            } else {
                MouseEventKind::ScrollDown
            },
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    pub fn resize(width: usize, height: usize) -> Self {
        Msg::Resize { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_cycle_wraps() {
        assert_eq!(Section::Links.next(), Section::Home);
        assert_eq!(Section::Home.prev(), Section::Links);
        assert_eq!(Section::Work.next(), Section::Cv);
    }

    #[test]
    fn section_distance_is_symmetric() {
        assert_eq!(Section::Home.distance(Section::Links), 3);
        assert_eq!(Section::Links.distance(Section::Home), 3);
        assert_eq!(Section::Cv.distance(Section::Cv), 0);
    }

    #[test]
    fn ordinals_round_trip() {
        for s in Section::ALL {
            assert_eq!(Section::from_ordinal(s.ordinal()), Some(s));
        }
        assert_eq!(Section::from_ordinal(4), None);
    }

    #[test]
    fn anim_ids_are_unique() {
        let a = AnimId::next();
        let b = AnimId::next();
        assert_ne!(a, b);
    }
}
