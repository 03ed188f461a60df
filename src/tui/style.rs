//! Turning ratatui styles into ANSI text.
//!
//! Components describe looks with `ratatui::style::Style` and render to
//! plain strings; this is the one place those styles become SGR sequences.

use crossterm::style::{Attribute, Attributes, Color as TermColor, ContentStyle};
use ratatui::style::{Color, Modifier, Style};

/// Paint `text` with `style`. Empty text and the default style produce no
/// escape sequences at all.
pub fn paint(style: Style, text: &str) -> String {
    if text.is_empty() || style == Style::default() {
        return text.to_string();
    }
    to_content_style(style).apply(text).to_string()
}

/// Shorthand for a foreground-only style.
pub fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

fn to_content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(term_color);
    content.background_color = style.bg.map(term_color);
    content.attributes = attributes(style.add_modifier);
    content
}

fn attributes(modifier: Modifier) -> Attributes {
    let mut attrs = Attributes::default();
    let table = [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::SLOW_BLINK, Attribute::SlowBlink),
        (Modifier::RAPID_BLINK, Attribute::RapidBlink),
        (Modifier::REVERSED, Attribute::Reverse),
        (Modifier::HIDDEN, Attribute::Hidden),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ];
    for (flag, attr) in table {
        if modifier.contains(flag) {
            attrs.set(attr);
        }
    }
    attrs
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Indexed(i) => TermColor::AnsiValue(i),
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
    }
}
