//! Bottom status bar: path on the left, key hints in the middle, section
//! name and scroll position on the right.
//!
//! Narrow terminals lose zones progressively: below 30 columns the hints go,
//! below 15 only the right zone is left.

use super::messages::Section;
use super::style::paint;
use super::text;
use super::theme::Theme;

/// Hints for sections that do not supply their own.
pub const DEFAULT_KEY_HINTS: &str = "j/k scroll · 1-4 nav · ? help";

const HINTS_MIN_WIDTH: usize = 30;
const LEFT_MIN_WIDTH: usize = 15;

/// Scroll state of a section's viewport as the status bar shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollInfo {
    pub at_top: bool,
    pub at_bottom: bool,
    /// Whole percent, meaningful only when the content scrolls.
    pub percent: u8,
    /// Everything fits; no indicator is shown.
    pub fits: bool,
}

impl Default for ScrollInfo {
    fn default() -> Self {
        Self {
            at_top: true,
            at_bottom: true,
            percent: 100,
            fits: true,
        }
    }
}

impl ScrollInfo {
    /// `TOP`, `BOT` or a percentage; `None` when the content fits.
    pub fn indicator(&self) -> Option<String> {
        if self.fits {
            return None;
        }
        Some(if self.at_top {
            "TOP".to_string()
        } else if self.at_bottom {
            "BOT".to_string()
        } else {
            format!("{}%", self.percent)
        })
    }
}

#[derive(Debug, Clone)]
pub struct StatusBar {
    theme: Theme,
    width: usize,
}

impl StatusBar {
    pub fn new(theme: &Theme) -> Self {
        Self {
            theme: *theme,
            width: 0,
        }
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.theme = *theme;
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// The bar for `section`, exactly as wide as the terminal.
    pub fn render(&self, section: Section, hints: Option<&str>, scroll: ScrollInfo) -> String {
        let width = self.width;
        let left = format!(" ~/{}", section.name());
        let right = right_zone(section, scroll);
        let hints = hints.filter(|h| !h.is_empty()).unwrap_or(DEFAULT_KEY_HINTS);

        let left_w = text::width(&left);
        let right_w = text::width(&right);

        let bar = if width < LEFT_MIN_WIDTH {
            let right = text::truncate(&right, width);
            let pad = width.saturating_sub(text::width(&right));
            format!("{}{right}", " ".repeat(pad))
        } else if width < HINTS_MIN_WIDTH || left_w + right_w >= width {
            let gap = width.saturating_sub(left_w + right_w);
            format!("{left}{}{right}", " ".repeat(gap))
        } else {
            let room = width - left_w - right_w;
            let hints = text::truncate(hints, room);
            let spare = room - text::width(&hints);
            let before = spare / 2;
            format!("{left}{}{hints}{}{right}", " ".repeat(before), " ".repeat(spare - before))
        };

        paint(self.theme.status_bar(), &text::fit(&bar, width))
    }
}

fn right_zone(section: Section, scroll: ScrollInfo) -> String {
    let name = section.name().to_uppercase();
    match scroll.indicator() {
        Some(indicator) => format!("{name} {indicator} "),
        None => format!("{name} "),
    }
}
