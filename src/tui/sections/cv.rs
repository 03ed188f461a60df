//! CV: a single scrolling column.
//!
//! Name and contact line, summary, then experience, skills and education,
//! each under a reverse-video heading.

use super::{scroll_hints, scroll_viewport, wheel, KeyHinter, ScrollReporter, SectionView};
use crate::content::Content;
use crate::tui::animation::gradient_text;
use crate::tui::density::Density;
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

const MIN_WIDTH: usize = 10;
/// Rows moved per wheel notch.
const WHEEL_STEP: usize = 3;

pub struct CvSection {
    content: Arc<Content>,
    theme: Theme,
    viewport: Viewport,
    height: usize,
    focused: bool,
}

impl CvSection {
    pub fn new(content: Arc<Content>, theme: &Theme) -> Self {
        Self {
            content,
            theme: *theme,
            viewport: Viewport::new(0, 0),
            height: 0,
            focused: false,
        }
    }

    fn refresh(&mut self) {
        let content = self.render_content();
        self.viewport.set_content_preserve_scroll(&content);
    }

    fn heading(&self, title: &str) -> String {
        paint(self.theme.badge(), &format!(" {title} "))
    }

    fn render_content(&self) -> String {
        let cv = &self.content.cv;
        let width = self.viewport.content_width().max(MIN_WIDTH);
        let muted = self.theme.muted();

        let mut blocks = vec![gradient_text(
            &self.content.meta.name,
            self.theme.colors.accent,
            self.theme.colors.fg,
        )];

        let mut contact = Vec::new();
        if !cv.contact.email.is_empty() {
            let mailto = format!("mailto:{}", cv.contact.email);
            contact.push(hyperlink(&mailto, &paint(muted, &cv.contact.email)));
        }
        if !cv.contact.location.is_empty() {
            contact.push(paint(muted, &cv.contact.location));
        }
        if !contact.is_empty() {
            blocks.push(contact.join(&paint(muted, " · ")));
        }

        if !cv.summary.is_empty() {
            let wrapped = text::wrap(&cv.summary, width.saturating_sub(2).max(MIN_WIDTH));
            blocks.push(paint(self.theme.body(), &wrapped.join("\n")));
        }

        blocks.push(self.render_experience(width));
        blocks.push(self.render_skills(width));
        let education = self.render_education();
        if !education.is_empty() {
            blocks.push(education);
        }

        let sep = Density::for_height(self.height).separator();
        text::pad_lines(&format!("\n{}", blocks.join(sep)), width)
    }

    fn render_experience(&self, width: usize) -> String {
        let strong = self.theme.accent_bold();
        let body = self.theme.body();
        let muted = self.theme.muted();

        let mut lines = vec![String::new(), self.heading("EXPERIENCE"), String::new()];
        let experience = &self.content.cv.experience;
        for (i, exp) in experience.iter().enumerate() {
            let left = format!(
                "  {}{}",
                paint(strong, &exp.role),
                paint(muted, &format!(" @ {}", exp.company))
            );
            let dates = paint(strong, &exp.date_range());
            let gap = width
                .saturating_sub(text::width(&left) + text::width(&dates))
                .max(2);
            lines.push(format!("{left}{}{dates}", " ".repeat(gap)));

            for bullet in &exp.bullets {
                for (j, line) in text::wrap(bullet, width.saturating_sub(6).max(MIN_WIDTH)).iter().enumerate() {
                    if j == 0 {
                        lines.push(format!("    {}", paint(body, &format!("- {line}"))));
                    } else {
                        lines.push(format!("      {}", paint(body, line)));
                    }
                }
            }
            if i + 1 < experience.len() {
                lines.push(String::new());
            }
        }
        lines.join("\n")
    }

    fn render_skills(&self, width: usize) -> String {
        let accent = self.theme.accent();
        let body = self.theme.body();
        let skills = &self.content.cv.skills;

        let label_width = skills.iter().map(|s| text::width(&s.category)).max().unwrap_or(0);
        let available = width.saturating_sub(label_width + 4);

        let mut lines = vec![self.heading("SKILLS"), String::new()];
        for skill in skills {
            let label = paint(accent, &text::pad_right(&skill.category, label_width));
            let items = skill.items.join(", ");
            if text::width(&items) > available && available > MIN_WIDTH {
                for (j, line) in text::wrap(&items, available).iter().enumerate() {
                    if j == 0 {
                        lines.push(format!("  {label}{}", paint(body, &format!("  {line}"))));
                    } else {
                        lines.push(format!("{}{}", " ".repeat(label_width + 4), paint(body, line)));
                    }
                }
            } else {
                lines.push(format!("  {label}{}", paint(body, &format!("  {items}"))));
            }
        }
        lines.join("\n")
    }

    fn render_education(&self) -> String {
        let education = &self.content.cv.education;
        if education.is_empty() {
            return String::new();
        }
        let strong = self.theme.accent_bold();
        let muted = self.theme.muted();

        let mut lines = vec![self.heading("EDUCATION"), String::new()];
        for edu in education {
            lines.push(format!(
                "  {}{}  {}",
                paint(strong, &edu.degree),
                paint(muted, &format!(" @ {}", edu.institution)),
                paint(muted, &edu.year)
            ));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

impl SectionView for CvSection {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Resize { width, height } => {
                self.height = *height;
                self.viewport.set_size(*width, *height);
                self.refresh();
            }
            Msg::Focus => {
                self.focused = true;
                self.viewport.scroll_to_top();
            }
            Msg::Blur => self.focused = false,
            Msg::Key(key) if self.focused => {
                if let Some(nav) = NavKey::from_key(key) {
                    scroll_viewport(&mut self.viewport, nav, 1);
                }
            }
            Msg::Mouse(_) if self.focused => match wheel(msg) {
                Some(true) => self.viewport.scroll_up(WHEEL_STEP),
                Some(false) => self.viewport.scroll_down(WHEEL_STEP),
                None => {}
            },
            _ => {}
        }
        Cmd::none()
    }

    fn view(&self) -> String {
        self.viewport.view_with_scrollbar(&self.theme)
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

impl KeyHinter for CvSection {
    fn key_hints(&self) -> String {
        scroll_hints()
    }
}

impl ScrollReporter for CvSection {
    fn scroll_info(&self) -> ScrollInfo {
        self.viewport.scroll_info()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{content, focused, plain, theme};
    use super::*;
    use crossterm::event::KeyCode;

    fn cv() -> CvSection {
        CvSection::new(content(), &theme())
    }

    #[test]
    fn renders_at_common_sizes() {
        for (w, h) in [(40, 15), (60, 20), (80, 24), (120, 40)] {
            let section = focused(cv(), w, h);
            let view = plain(&section);
            assert_eq!(view.split('\n').count(), h);
            assert!(view.split('\n').all(|l| text::width(l) <= w));
        }
    }

    #[test]
    fn header_is_a_gradient() {
        let section = focused(cv(), 80, 24);
        let raw = section.render_content();
        let content = content();
        let name = content.meta.name.as_str();
        let header = raw
            .split('\n')
            .find(|l| text::strip_ansi(l).contains(name))
            .unwrap_or_default();
        assert!(header.matches("38;2;").count() > 1, "{header:?}");
    }

    #[test]
    fn all_headings_present() {
        let section = focused(cv(), 100, 300);
        let view = plain(&section);
        for heading in [" EXPERIENCE ", " SKILLS ", " EDUCATION "] {
            assert!(view.contains(heading), "{heading}");
        }
        for exp in &content().cv.experience {
            assert!(view.contains(&exp.role));
        }
    }

    #[test]
    fn dates_are_right_aligned() {
        let section = focused(cv(), 100, 300);
        let raw = section.render_content();
        let width = section.viewport.content_width();
        let content = content();
        let exp = &content.cv.experience[0];
        let row = raw
            .split('\n')
            .map(|l| text::strip_ansi(l).into_owned())
            .find(|l| l.contains(&exp.role))
            .unwrap_or_default();
        assert!(row.trim_end().ends_with(&exp.date_range()));
        assert_eq!(row.trim_end().chars().count(), width);
    }

    #[test]
    fn skills_reachable_by_scrolling() {
        let mut section = focused(cv(), 80, 10);
        assert!(!plain(&section).contains(" SKILLS "));
        section.update(&Msg::key(KeyCode::End));
        let mut seen = plain(&section).contains(" SKILLS ");
        for _ in 0..200 {
            if seen {
                break;
            }
            section.update(&Msg::char('k'));
            seen = plain(&section).contains(" SKILLS ");
        }
        assert!(seen);
    }

    #[test]
    fn bullets_wrap_when_narrow() {
        let section = focused(cv(), 40, 200);
        let raw = section.render_content();
        assert!(raw.split('\n').all(|l| text::width(l) <= 40));
        assert!(text::strip_ansi(&raw).contains("      "));
    }

    #[test]
    fn wheel_scrolls_three_lines() {
        let mut section = focused(cv(), 60, 10);
        section.update(&Msg::wheel(false));
        assert_eq!(section.viewport.y_offset(), WHEEL_STEP);
        section.update(&Msg::char('k'));
        assert_eq!(section.viewport.y_offset(), WHEEL_STEP - 1);
    }

    #[test]
    fn blurred_section_ignores_input() {
        let mut section = focused(cv(), 60, 10);
        section.update(&Msg::Blur);
        section.update(&Msg::wheel(false));
        section.update(&Msg::char('j'));
        assert_eq!(section.viewport.y_offset(), 0);
    }
}
