use crate::tui::messages::{AnimId, Msg};
use crate::tui::runtime::Cmd;
use crate::tui::style::paint;
use crate::tui::theme::Theme;
use ratatui::style::Style;
use std::time::Duration;

pub const CURSOR_GLYPH: &str = "█";

/// A blinking block cursor. Hidden renders as one space so the line keeps
/// its width.
#[derive(Debug, Clone)]
pub struct Cursor {
    id: AnimId,
    active: bool,
    visible: bool,
    interval: Duration,
    style: Style,
}

impl Cursor {
    pub fn new(theme: &Theme) -> Self {
        Self {
            id: AnimId::next(),
            active: false,
            visible: true,
            interval: Duration::from_millis(530),
            style: theme.accent(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn start(&mut self) -> Cmd {
        self.active = true;
        self.visible = true;
        self.tick()
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.active || *msg != Msg::Tick(self.id) {
            return Cmd::none();
        }
        self.visible = !self.visible;
        self.tick()
    }

    pub fn view(&self) -> String {
        if self.visible {
            paint(self.style, CURSOR_GLYPH)
        } else {
            " ".to_string()
        }
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.style = theme.accent();
    }

    fn tick(&self) -> Cmd {
        Cmd::after(self.interval, Msg::Tick(self.id))
    }

    #[cfg(test)]
    pub(crate) fn id(&self) -> AnimId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::text;

    #[test]
    fn blinks_only_once_started() {
        let mut cursor = Cursor::new(&Theme::dark());
        assert!(cursor.update(&Msg::Tick(cursor.id())).is_none());
        assert!(cursor.is_visible());

        let first = cursor.start();
        assert_eq!(first, Cmd::after(Duration::from_millis(530), Msg::Tick(cursor.id())));
        cursor.update(&Msg::Tick(cursor.id()));
        assert!(!cursor.is_visible());
        cursor.update(&Msg::Tick(cursor.id()));
        assert!(cursor.is_visible());
    }

    #[test]
    fn hidden_keeps_width() {
        let mut cursor = Cursor::new(&Theme::dark());
        cursor.start();
        assert_eq!(text::width(&cursor.view()), 1);
        cursor.update(&Msg::Tick(cursor.id()));
        assert_eq!(cursor.view(), " ");
    }

    #[test]
    fn stop_ends_the_loop() {
        let mut cursor = Cursor::new(&Theme::dark()).with_interval(Duration::from_millis(5));
        cursor.start();
        cursor.stop();
        assert!(cursor.update(&Msg::Tick(cursor.id())).is_none());
    }
}
