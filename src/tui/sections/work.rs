//! Work: the project list, featured projects first.
//!
//! One entry per project: title, wrapped description, tags and links. The
//! cursor picks a project; Enter copies its site (or repository) address.

use super::{list_hints, scroll_viewport, step_cursor, wheel, Clipboard, KeyHinter, ScrollReporter, SectionView};
use crate::content::{Content, Project};
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
use std::cell::RefCell;
use std::sync::Arc;
use tracing::debug;

/// Widest a project entry is laid out.
const MAX_ENTRY_WIDTH: usize = 78;
const MIN_ENTRY_WIDTH: usize = 10;
const INDENT: &str = "    ";

/// Where each project landed in the last render.
#[derive(Debug, Default, Clone)]
struct Layout {
    /// First and last line of every project, in display order.
    spans: Vec<(usize, usize)>,
}

pub struct WorkSection {
    content: Arc<Content>,
    theme: Theme,
    viewport: Viewport,
    focused: bool,
    cursor: usize,
    clipboard: Clipboard,
    layout: RefCell<Layout>,
}

impl WorkSection {
    pub fn new(content: Arc<Content>, theme: &Theme, timings: &Timings) -> Self {
        Self {
            content,
            theme: *theme,
            viewport: Viewport::new(0, 0),
            focused: false,
            cursor: 0,
            clipboard: Clipboard::new(timings.copy_feedback),
            layout: RefCell::new(Layout::default()),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn projects(&self) -> Vec<&Project> {
        self.content.work.sorted_projects()
    }

    fn len(&self) -> usize {
        self.content.work.projects.len()
    }

    /// Selected project's display span, from the last render.
    fn selected_span(&self) -> Option<(usize, usize)> {
        self.layout.borrow().spans.get(self.cursor).copied()
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.len() == 0 {
            return;
        }
        self.cursor = step_cursor(self.cursor, delta, self.len());
        self.refresh();
        if let Some((start, end)) = self.selected_span() {
            self.viewport.ensure_visible(start, end);
        }
    }

    fn refresh(&mut self) {
        let content = self.render_content();
        self.viewport.set_content_preserve_scroll(&content);
    }

    fn activate(&mut self) -> Cmd {
        let link = self
            .projects()
            .get(self.cursor)
            .and_then(|p| p.link())
            .map(str::to_string);
        let Some(link) = link else {
            return Cmd::none();
        };
        debug!(url = %link, "copying project link");
        let cmd = self.clipboard.copy(&link);
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
        let projects = self.projects();
        if projects.is_empty() {
            self.layout.borrow_mut().spans.clear();
            return paint(self.theme.muted(), "No projects to display.");
        }

        let width = self
            .viewport
            .content_width()
            .clamp(MIN_ENTRY_WIDTH, MAX_ENTRY_WIDTH);

        // Leading blank line as top padding.
        let mut lines = vec![String::new()];
        let mut spans = Vec::with_capacity(projects.len());
        for (i, project) in projects.iter().enumerate() {
            let entry = self.render_project(project, width, i == self.cursor);
            let start = lines.len();
            spans.push((start, start + entry.len() - 1));
            lines.extend(entry);
            if i + 1 < projects.len() {
                lines.push(String::new());
            }
        }
        self.layout.borrow_mut().spans = spans;
        text::pad_lines(&lines.join("\n"), width)
    }

    fn render_project(&self, project: &Project, width: usize, selected: bool) -> Vec<String> {
        let accent = self.theme.accent();
        let muted = self.theme.muted();
        let prefix = if selected {
            format!("{} ", paint(accent, "▸"))
        } else {
            "  ".to_string()
        };
        let mut lines = vec![format!("{prefix}{}", paint(accent, &project.title))];

        let inner = width.saturating_sub(INDENT.len());
        if !project.description.is_empty() {
            for line in text::wrap(&project.description, inner.max(MIN_ENTRY_WIDTH)) {
                lines.push(format!("{INDENT}{}", paint(self.theme.body(), &line)));
            }
        }
        if !project.tags.is_empty() {
            lines.push(format!("{INDENT}{}", paint(muted, &project.tags.join(" · "))));
        }
        if !project.url.is_empty() {
            let shown = text::truncate_with_ellipsis(&project.url, inner);
            lines.push(format!("{INDENT}{}", hyperlink(&project.url, &paint(muted, &shown))));
        }
        if !project.repo.is_empty() && project.repo != project.url {
            let shown = text::truncate_with_ellipsis(&project.repo, inner);
            lines.push(format!("{INDENT}{}", hyperlink(&project.repo, &paint(muted, &shown))));
        }
        lines
    }
}

impl SectionView for WorkSection {
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

impl KeyHinter for WorkSection {
    fn key_hints(&self) -> String {
        match self.clipboard.feedback() {
            Some(feedback) => feedback.to_string(),
            None => list_hints(),
        }
    }
}

impl ScrollReporter for WorkSection {
    fn scroll_info(&self) -> ScrollInfo {
        self.viewport.scroll_info()
    }
}
