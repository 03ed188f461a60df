//! The tab bar across the top of the screen.
//!
//! ```text
//! ┌[1:home]─[2:work]─[3:cv]─[4:links]──────────┐
//! ```
//!
//! Labels shrink to two-letter names and then to bare numbers when the
//! terminal is too narrow. The active tab pulses briefly when it changes.

use super::animation::{TabGlow, Timings};
use super::borders::{HORIZONTAL, TOP_LEFT, TOP_RIGHT};
use super::messages::{Msg, Section};
use super::runtime::Cmd;
use super::style::{fg, paint};
use super::text;
use super::theme::Theme;
use ratatui::style::Modifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelStyle {
    Full,
    Short,
    Number,
}

impl LabelStyle {
    fn label(self, section: Section) -> String {
        let n = section.ordinal() + 1;
        match self {
            LabelStyle::Full => format!("[{n}:{}]", section.name()),
            LabelStyle::Short => format!("[{n}:{}]", section.short_name()),
            LabelStyle::Number => format!("[{n}]"),
        }
    }

    /// Columns the corners and all tabs with their separators take up.
    fn min_width(self) -> usize {
        let tabs: usize = Section::ALL.iter().map(|s| self.label(*s).len()).sum();
        tabs + (Section::COUNT - 1) + 2
    }
}

#[derive(Debug, Clone)]
pub struct NavBar {
    theme: Theme,
    width: usize,
    active: Section,
    glow: TabGlow,
}

impl NavBar {
    pub fn new(theme: &Theme, timings: &Timings) -> Self {
        Self {
            theme: *theme,
            width: 0,
            active: Section::Home,
            glow: TabGlow::new(theme, timings.tab_glow, timings.frame),
        }
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.theme = *theme;
        self.glow.set_theme(theme);
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Highlight `section` and start the glow pulse on its tab.
    pub fn set_active(&mut self, section: Section) -> Cmd {
        self.active = section;
        self.glow.start()
    }

    pub fn glowing(&self) -> bool {
        self.glow.is_active()
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        self.glow.update(msg)
    }

    pub fn view(&self) -> String {
        let style = [LabelStyle::Full, LabelStyle::Short, LabelStyle::Number]
            .into_iter()
            .find(|s| s.min_width() <= self.width)
            .unwrap_or(LabelStyle::Number);

        let border = self.theme.border();
        let active = fg(self.glow.brightened_accent()).add_modifier(Modifier::BOLD);
        let inactive = self.theme.muted();

        let mut bar = paint(border, TOP_LEFT);
        let mut used = 1;
        for section in Section::ALL {
            if section.ordinal() > 0 {
                bar.push_str(&paint(border, HORIZONTAL));
                used += 1;
            }
            let label = style.label(section);
            used += label.len();
            let tab_style = if section == self.active { active } else { inactive };
            bar.push_str(&paint(tab_style, &label));
        }

        let fill = self.width.saturating_sub(used + 1);
        bar.push_str(&paint(border, &format!("{}{TOP_RIGHT}", HORIZONTAL.repeat(fill))));
        text::truncate(&bar, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bar(width: usize) -> NavBar {
        let mut nav = NavBar::new(&Theme::dark(), &Timings::default());
        nav.set_width(width);
        nav
    }

    #[test]
    fn full_labels_when_wide() {
        let nav = bar(60);
        let plain = text::strip_ansi(&nav.view()).into_owned();
        assert!(plain.starts_with("┌[1:home]─[2:work]─[3:cv]─[4:links]─"));
        assert!(plain.ends_with('┐'));
        assert_eq!(text::width(&nav.view()), 60);
    }

    #[test]
    fn labels_degrade() {
        let plain = text::strip_ansi(&bar(30).view()).into_owned();
        assert!(plain.starts_with("┌[1:hm]─[2:wk]─[3:cv]─[4:lk]"), "{plain}");
        let plain = text::strip_ansi(&bar(20).view()).into_owned();
        assert!(plain.starts_with("┌[1]─[2]─[3]─[4]"), "{plain}");
    }

    #[test]
    fn never_wider_than_terminal() {
        for width in 0..50 {
            assert!(text::width(&bar(width).view()) <= width);
        }
    }

    #[test]
    fn set_active_starts_glow() {
        let mut nav = bar(60);
        let cmd = nav.set_active(Section::Cv);
        assert!(!cmd.is_none());
        assert!(nav.glowing());
        assert_eq!(nav.active(), Section::Cv);
    }

    #[test]
    fn min_widths() {
        assert_eq!(LabelStyle::Full.min_width(), 8 + 8 + 6 + 9 + 3 + 2);
        assert_eq!(LabelStyle::Number.min_width(), 3 * 4 + 3 + 2);
    }
}
