//! Links: a selectable list of external profiles.

use super::{list_hints, scroll_viewport, step_cursor, wheel, Clipboard, KeyHinter, ScrollReporter, SectionView};
use crate::content::Content;
use crate::tui::animation::Timings;
use crate::tui::hyperlink::hyperlink;
use crate::tui::keys::NavKey;
use crate::tui::messages::Msg;
use crate::tui::runtime::Cmd;
use crate::tui::statusbar::ScrollInfo;
use crate::tui::style::paint;
use crate::tui::text;
use crate::tui::theme::Theme;
use crate::tui::viewport::Viewport;
use std::sync::Arc;
use tracing::debug;

/// Blank rows above the first link.
const TOP_PADDING: usize = 1;
/// Label row, address row and the blank row after them.
const ROWS_PER_LINK: usize = 3;
const MARKER: &str = "> ";

pub struct LinksSection {
    content: Arc<Content>,
    theme: Theme,
    viewport: Viewport,
    focused: bool,
    cursor: usize,
    clipboard: Clipboard,
}

impl LinksSection {
    pub fn new(content: Arc<Content>, theme: &Theme, timings: &Timings) -> Self {
        Self {
            content,
            theme: *theme,
            viewport: Viewport::new(0, 0),
            focused: false,
            cursor: 0,
            clipboard: Clipboard::new(timings.copy_feedback),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.content.links.links.len()
    }

    fn refresh(&mut self) {
        let content = self.render_content();
        self.viewport.set_content_preserve_scroll(&content);
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.len() == 0 {
            return;
        }
        self.cursor = step_cursor(self.cursor, delta, self.len());
        self.refresh();
        let start = TOP_PADDING + self.cursor * ROWS_PER_LINK;
        self.viewport.ensure_visible(start, start + 1);
    }

    fn activate(&mut self) -> Cmd {
        let Some(url) = self
            .content
            .links
            .links
            .get(self.cursor)
            .map(|link| link.url.clone())
            .filter(|url| !url.is_empty())
        else {
            return Cmd::none();
        };
        debug!(url = %url, "copying link");
        let cmd = self.clipboard.copy(&url);
        self.refresh();
        cmd
    }

    fn handle_key(&mut self, nav: NavKey) -> Cmd {
        match nav {
            NavKey::Down => self.move_cursor(1),
            NavKey::Up => self.move_cursor(-1),
            NavKey::Top => {
                self.cursor = 0;
                self.refresh();
                self.viewport.scroll_to_top();
            }
            NavKey::Bottom => {
                self.cursor = self.len().saturating_sub(1);
                self.refresh();
                self.viewport.scroll_to_bottom();
            }
            NavKey::Activate => return self.activate(),
            other => {
                scroll_viewport(&mut self.viewport, other, 1);
            }
        }
        Cmd::none()
    }

    fn render_content(&self) -> String {
        let links = &self.content.links.links;
        if links.is_empty() {
            return paint(self.theme.muted(), "No links to display.");
        }

        let width = self.viewport.content_width();
        let max_text = width.saturating_sub(MARKER.len());

        let mut lines = vec![String::new(); TOP_PADDING];
        for (i, link) in links.iter().enumerate() {
            let label = if max_text > 0 {
                text::truncate_with_ellipsis(&link.label, max_text)
            } else {
                link.label.clone()
            };
            if i == self.cursor {
                lines.push(format!(
                    "{}{}",
                    paint(self.theme.accent(), MARKER),
                    paint(self.theme.accent_bold(), &label)
                ));
            } else {
                lines.push(format!("  {}", paint(self.theme.body(), &label)));
            }

            let shown = if max_text > 0 {
                text::truncate_with_ellipsis(link.display(), max_text)
            } else {
                link.display().to_string()
            };
            lines.push(format!("  {}", hyperlink(&link.url, &paint(self.theme.muted(), &shown))));

            if i + 1 < links.len() {
                lines.push(String::new());
            }
        }
        text::pad_lines(&lines.join("\n"), width)
    }
}

impl SectionView for LinksSection {
    fn update(&mut self, msg: &Msg) -> Cmd {
        self.clipboard.discard_pending();

        match msg {
            Msg::Resize { width, height } => {
                self.viewport.set_size(*width, *height);
                self.refresh();
            }
            Msg::Focus => {
                self.focused = true;
                self.cursor = 0;
                let content = self.render_content();
                self.viewport.set_content(&content);
                self.viewport.scroll_to_top();
            }
            Msg::Blur => self.focused = false,
            Msg::Tick(_) => {
                if self.clipboard.handle_tick(msg) {
                    self.refresh();
                }
            }
            Msg::Key(key) if self.focused => {
                if let Some(nav) = NavKey::from_key(key) {
                    return self.handle_key(nav);
                }
            }
            Msg::Mouse(_) if self.focused => match wheel(msg) {
                Some(true) => self.move_cursor(-1),
                Some(false) => self.move_cursor(1),
                None => {}
            },
            _ => {}
        }
        Cmd::none()
    }

    fn view(&self) -> String {
        let clipboard = self.clipboard.take();
        format!("{clipboard}{}", self.viewport.view_with_scrollbar(&self.theme))
    }

    fn set_theme(&mut self, theme: &Theme) {
        self.theme = *theme;
        self.refresh();
    }

    fn key_hinter(&self) -> Option<&dyn KeyHinter> {
        Some(self)
    }

    fn scroll_reporter(&self) -> Option<&dyn ScrollReporter> {
        Some(self)
    }
}

impl KeyHinter for LinksSection {
    fn key_hints(&self) -> String {
        match self.clipboard.feedback() {
            Some(feedback) => feedback.to_string(),
            None => list_hints(),
        }
    }
}

impl ScrollReporter for LinksSection {
    fn scroll_info(&self) -> ScrollInfo {
        self.viewport.scroll_info()
    }
}
