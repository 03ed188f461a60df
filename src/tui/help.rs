//! Keyboard shortcut overlay.

use super::borders::render_card;
use super::style::paint;
use super::text;
use super::theme::Theme;

const TITLE: &str = "Keyboard Shortcuts";
const CARD_WIDTH: usize = 50;
const KEY_COLUMN: usize = 10;
/// Below this many columns or rows the card is dropped for plain text.
const MIN_CARD_AREA: usize = 10;

pub const SHORTCUTS: [(&str, &str); 11] = [
    ("← / →", "Previous / next section"),
    ("1-4", "Jump to section"),
    ("j / k", "Scroll down / up"),
    ("g / G", "Jump to top / bottom"),
    ("PgUp", "Page up"),
    ("PgDn", "Page down"),
    ("^u / ^d", "Half-page up / down"),
    ("Enter", "Copy selected link"),
    (":", "Command palette"),
    ("q", "Quit"),
    ("?", "Toggle help"),
];

fn body(theme: &Theme) -> String {
    let mut lines: Vec<String> = SHORTCUTS
        .iter()
        .map(|(key, desc)| {
            format!(
                "{}{}",
                paint(theme.accent(), &text::pad_right(key, KEY_COLUMN)),
                paint(theme.body(), desc)
            )
        })
        .collect();
    lines.push(String::new());
    lines.push(paint(theme.muted(), "Press any key to dismiss"));
    lines.join("\n")
}

/// The help screen for a `width` x `height` terminal: a titled card in the
/// middle of a dotted field, or plain text when there is no room for one.
pub fn render(theme: &Theme, width: usize, height: usize) -> String {
    let card_width = CARD_WIDTH.min(width);
    if card_width < MIN_CARD_AREA || width < MIN_CARD_AREA || height < MIN_CARD_AREA {
        return format!("{}\n\n{}", paint(theme.title(), TITLE), body(theme));
    }

    let card = render_card(theme, TITLE, &body(theme), card_width);
    let dots = theme.border();
    text::place_with(&card, width, height, |n| paint(dots, &"·".repeat(n)))
}
