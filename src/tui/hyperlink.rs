//! Escape sequences embedded directly in rendered text.
//!
//! Terminals without support for either sequence ignore it: OSC 8 degrades
//! to the bare display text and OSC 52 to nothing at all.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Prefix shared by every clipboard write; handy for spotting one in a frame.
pub const OSC52_PREFIX: &str = "\x1b]52;c;";

/// Wrap `display` in an OSC 8 hyperlink pointing at `url`.
pub fn hyperlink(url: &str, display: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", sanitize_osc_param(url), display)
}

/// An OSC 52 sequence that sets the system clipboard to `text`.
///
/// The payload is base64, so the text itself cannot break out of the
/// sequence; it is still sanitized so no control bytes reach the clipboard.
pub fn osc52(text: &str) -> String {
    let encoded = STANDARD.encode(sanitize_osc_param(text).as_bytes());
    format!("{OSC52_PREFIX}{encoded}\x07")
}

/// Strip bytes that could terminate or escape an OSC sequence: ESC, BEL,
/// CR and LF.
pub fn sanitize_osc_param(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\x1b' | '\x07' | '\r' | '\n'))
        .collect()
}
