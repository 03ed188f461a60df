//! The four content sections.
//!
//! Each section owns a [`Viewport`], renders its slice of the content into
//! it whenever something changes, and only reacts to input while focused.
//! The root controller talks to them through [`SectionView`] and asks for the
//! optional status-bar capabilities separately.

mod cv;
mod home;
mod links;
mod work;

pub use cv::CvSection;
pub use home::{HomeSection, PORTRAIT};
pub use links::LinksSection;
pub use work::WorkSection;

use super::borders::VERTICAL;
use super::hyperlink;
use super::keys::NavKey;
use super::messages::{AnimId, Msg};
use super::runtime::Cmd;
use super::statusbar::ScrollInfo;
use super::theme::Theme;
use super::viewport::Viewport;
use crossterm::event::MouseEventKind;
use std::cell::Cell;
use std::time::Duration;

/// Status-bar text describing the keys a section understands.
pub trait KeyHinter {
    fn key_hints(&self) -> String;
}

/// Scroll position for the status-bar indicator.
pub trait ScrollReporter {
    fn scroll_info(&self) -> ScrollInfo;
}

/// One section as seen by the root controller.
pub trait SectionView {
    fn init(&mut self) -> Cmd {
        Cmd::none()
    }

    fn update(&mut self, msg: &Msg) -> Cmd;

    fn view(&self) -> String;

    fn set_theme(&mut self, theme: &Theme);

    fn key_hinter(&self) -> Option<&dyn KeyHinter> {
        None
    }

    fn scroll_reporter(&self) -> Option<&dyn ScrollReporter> {
        None
    }
}

/// `j/k scroll │ ...`, the hints shared by the scrolling sections.
pub(crate) fn scroll_hints() -> String {
    ["j/k scroll", "pgup/dn page", "^u/^d half", "1-4 nav", "? help"].join(&format!(" {VERTICAL} "))
}

/// Hints for the cursor sections.
pub(crate) fn list_hints() -> String {
    ["j/k navigate", "enter copy URL", "1-4 nav", "? help"].join(&format!(" {VERTICAL} "))
}

/// Apply a paging key to a viewport. Line keys move `line_step` rows.
/// Returns false for keys that are not about scrolling.
pub(crate) fn scroll_viewport(viewport: &mut Viewport, key: NavKey, line_step: usize) -> bool {
    let page = viewport.visible_lines();
    match key {
        NavKey::Up => viewport.scroll_up(line_step),
        NavKey::Down => viewport.scroll_down(line_step),
        NavKey::PageUp => viewport.scroll_up(page),
        NavKey::PageDown => viewport.scroll_down(page),
        NavKey::HalfUp => viewport.scroll_up(page / 2),
        NavKey::HalfDown => viewport.scroll_down(page / 2),
        NavKey::Top => viewport.scroll_to_top(),
        NavKey::Bottom => viewport.scroll_to_bottom(),
        NavKey::Activate => return false,
    }
    true
}

/// Wheel direction of a mouse message: `Some(true)` up, `Some(false)` down.
pub(crate) fn wheel(msg: &Msg) -> Option<bool> {
    match msg {
        Msg::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(true),
            MouseEventKind::ScrollDown => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Move a list cursor by `delta`, clamped to `[0, len - 1]`.
pub(crate) fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

/// Copy-to-clipboard state for the list sections.
///
/// Activating an item queues an OSC 52 sequence that the next render
/// carries exactly once, and shows a short confirmation that clears itself
/// on a timer.
pub(crate) struct Clipboard {
    id: AnimId,
    pending: Cell<Option<String>>,
    feedback: Option<&'static str>,
    delay: Duration,
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("id", &self.id)
            .field("feedback", &self.feedback)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl Clipboard {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            id: AnimId::next(),
            pending: Cell::new(None),
            feedback: None,
            delay,
        }
    }

    /// Queue `text` for the clipboard and schedule the feedback to clear.
    pub(crate) fn copy(&mut self, text: &str) -> Cmd {
        self.pending.set(Some(hyperlink::osc52(text)));
        self.feedback = Some("Copied!");
        Cmd::after(self.delay, Msg::Tick(self.id))
    }

    /// Drop a sequence that has not been rendered yet. Called at the top of
    /// every update so a copy never outlives one render cycle.
    pub(crate) fn discard_pending(&self) {
        self.pending.set(None);
    }

    /// Handle this clipboard's own clear timer. True when the feedback went.
    pub(crate) fn handle_tick(&mut self, msg: &Msg) -> bool {
        match msg {
            Msg::Tick(id) if *id == self.id && self.feedback.is_some() => {
                self.feedback = None;
                true
            }
            _ => false,
        }
    }

    /// The queued sequence, at most once.
    pub(crate) fn take(&self) -> String {
        self.pending.take().unwrap_or_default()
    }

    pub(crate) fn feedback(&self) -> Option<&'static str> {
        self.feedback
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::content::Content;
    use std::sync::Arc;

    pub(crate) fn content() -> Arc<Content> {
        Arc::new(Content::fixture())
    }

    pub(crate) fn theme() -> Theme {
        Theme::dark()
    }

    /// Size the section and give it focus, discarding the commands.
    pub(crate) fn focused<S: SectionView>(mut section: S, width: usize, height: usize) -> S {
        section.update(&Msg::resize(width, height));
        section.update(&Msg::Focus);
        section
    }

    pub(crate) fn plain<S: SectionView>(section: &S) -> String {
        crate::tui::text::strip_ansi(&section.view()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::hyperlink::OSC52_PREFIX;
    use crossterm::event::KeyCode;

    #[test]
    fn cursor_clamps() {
        assert_eq!(step_cursor(0, -1, 3), 0);
        assert_eq!(step_cursor(1, 1, 3), 2);
        assert_eq!(step_cursor(2, 1, 3), 2);
        assert_eq!(step_cursor(2, 10, 3), 2);
        assert_eq!(step_cursor(0, 1, 0), 0);
    }

    #[test]
    fn clipboard_emits_once() {
        let mut clip = Clipboard::new(Duration::from_secs(2));
        let cmd = clip.copy("https://example.com");
        assert!(matches!(cmd, Cmd::After(d, Msg::Tick(_)) if d == Duration::from_secs(2)));
        assert_eq!(clip.feedback(), Some("Copied!"));
        assert!(clip.take().starts_with(OSC52_PREFIX));
        assert_eq!(clip.take(), "");
    }

    #[test]
    fn clipboard_discarded_before_render() {
        let mut clip = Clipboard::new(Duration::from_secs(2));
        clip.copy("x");
        clip.discard_pending();
        assert_eq!(clip.take(), "");
    }

    #[test]
    fn clipboard_feedback_clears_on_own_tick() {
        let mut clip = Clipboard::new(Duration::from_secs(2));
        let Cmd::After(_, tick) = clip.copy("x") else {
            panic!("expected a timer");
        };
        assert!(!clip.handle_tick(&Msg::Tick(AnimId::next())));
        assert!(clip.handle_tick(&tick));
        assert_eq!(clip.feedback(), None);
        assert!(!clip.handle_tick(&tick));
    }

    #[test]
    fn paging_keys() {
        let mut vp = Viewport::new(20, 4);
        vp.set_content(&(0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n"));
        assert!(scroll_viewport(&mut vp, NavKey::PageDown, 1));
        assert_eq!(vp.y_offset(), 4);
        scroll_viewport(&mut vp, NavKey::HalfUp, 1);
        assert_eq!(vp.y_offset(), 2);
        scroll_viewport(&mut vp, NavKey::Bottom, 1);
        assert_eq!(vp.y_offset(), 16);
        scroll_viewport(&mut vp, NavKey::Up, 3);
        assert_eq!(vp.y_offset(), 13);
        assert!(!scroll_viewport(&mut vp, NavKey::Activate, 1));
    }

    #[test]
    fn wheel_direction() {
        assert_eq!(wheel(&Msg::wheel(true)), Some(true));
        assert_eq!(wheel(&Msg::wheel(false)), Some(false));
        assert_eq!(wheel(&Msg::key(KeyCode::Up)), None);
    }
}
