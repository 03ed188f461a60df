//! Box-drawing glyphs and the titled card used by overlays.

use super::style::paint;
use super::text;
use super::theme::Theme;

pub const TOP_LEFT: &str = "┌";
pub const TOP_RIGHT: &str = "┐";
pub const BOTTOM_LEFT: &str = "└";
pub const BOTTOM_RIGHT: &str = "┘";
pub const HORIZONTAL: &str = "─";
pub const VERTICAL: &str = "│";

/// Render `content` inside a bordered card with `title` set into the top
/// border.
///
/// ```text
/// ┌─ Title ──────────┐
/// │ content line 1   │
/// └──────────────────┘
/// ```
///
/// Below 10 columns there is no room for a frame and `content` comes back
/// untouched.
pub fn render_card(theme: &Theme, title: &str, content: &str, width: usize) -> String {
    if width < 10 {
        return content.to_string();
    }

    let border = theme.border();
    let inner = width - 4;

    let title_w = text::width(title);
    let top_fill = width.saturating_sub(3 + title_w + 2).max(1);
    let top = format!(
        "{}{}{}",
        paint(border, &format!("{TOP_LEFT}{HORIZONTAL} ")),
        paint(theme.accent(), title),
        paint(border, &format!(" {}{TOP_RIGHT}", HORIZONTAL.repeat(top_fill))),
    );

    let side = paint(border, VERTICAL);
    let mut lines = vec![top];
    for raw in content.split('\n') {
        // Styled lines are laid out as-is; plain ones may wrap.
        let wrapped = if text::strip_ansi(raw).len() == raw.len() {
            text::wrap(raw, inner)
        } else {
            vec![raw.to_string()]
        };
        for line in wrapped {
            lines.push(format!("{side} {} {side}", text::fit(&line, inner)));
        }
    }

    let bottom = format!("{BOTTOM_LEFT}{}{BOTTOM_RIGHT}", HORIZONTAL.repeat(width - 2));
    lines.push(paint(border, &bottom));
    lines.join("\n")
}

/// A horizontal rule `width` columns wide in the border color.
pub fn render_divider(theme: &Theme, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    paint(theme.border(), &HORIZONTAL.repeat(width))
}
