//! Width-aware text primitives.
//!
//! Everything here measures display columns rather than bytes or chars, and
//! treats terminal escape sequences (SGR styling, OSC 8 hyperlinks, OSC 52
//! clipboard writes) as zero-width tokens that are never split. Truncation
//! keeps every escape sequence it walks past so that resets and hyperlink
//! terminators stay balanced even when the visible text is cut.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

fn escape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // CSI sequences, OSC sequences (BEL or ST terminated), then bare
        // two-byte escapes.
        Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]")
            .expect("escape pattern is valid")
    })
}

/// A zero-width escape sequence or one grapheme cluster with its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Escape(&'a str),
    Grapheme(&'a str, usize),
}

fn pieces(s: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in escape_pattern().find_iter(s) {
        push_graphemes(&s[last..m.start()], &mut out);
        out.push(Piece::Escape(m.as_str()));
        last = m.end();
    }
    push_graphemes(&s[last..], &mut out);
    out
}

fn push_graphemes<'a>(text: &'a str, out: &mut Vec<Piece<'a>>) {
    for g in text.graphemes(true) {
        out.push(Piece::Grapheme(g, UnicodeWidthStr::width(g)));
    }
}

/// Remove every escape sequence, leaving only the printable text.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    escape_pattern().replace_all(s, "")
}

fn line_width(line: &str) -> usize {
    strip_ansi(line)
        .graphemes(true)
        .map(UnicodeWidthStr::width)
        .sum()
}

/// Display width in terminal columns. For multi-line input this is the
/// width of the widest line.
pub fn width(s: &str) -> usize {
    s.split('\n').map(line_width).max().unwrap_or(0)
}

/// Cut a single line to at most `max` columns.
///
/// A wide glyph that would straddle the limit is dropped whole. Escape
/// sequences after the cut are kept.
pub fn truncate(s: &str, max: usize) -> String {
    if line_width(s) <= max {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut full = false;
    for piece in pieces(s) {
        match piece {
            Piece::Escape(seq) => out.push_str(seq),
            Piece::Grapheme(g, w) => {
                if full {
                    continue;
                }
                if used + w > max {
                    full = true;
                    continue;
                }
                used += w;
                out.push_str(g);
            }
        }
    }
    out
}

/// Right-pad a line with spaces up to `target` columns. Never truncates.
pub fn pad_right(s: &str, target: usize) -> String {
    let current = line_width(s);
    if current >= target {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + target - current);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(target - current));
    out
}

/// Clamp and pad a line to exactly `target` columns.
pub fn fit(s: &str, target: usize) -> String {
    pad_right(&truncate(s, target), target)
}

/// Center a line within `target` columns. Lines already at least that wide
/// are returned unchanged.
pub fn center(s: &str, target: usize) -> String {
    let w = line_width(s);
    if w >= target {
        return s.to_string();
    }
    let gap = target - w;
    let left = gap / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(gap - left))
}

/// Word-wrap plain text to `max` columns.
///
/// Breaks only at whitespace. A single word wider than `max` gets a line of
/// its own and is never split. Embedded newlines start new paragraphs.
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    if max == 0 {
        return vec![text.to_string()];
    }

    let mut result = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_w = 0;
        let mut any = false;

        for word in paragraph.split_whitespace() {
            let word_w = line_width(word);
            if !any {
                line.push_str(word);
                line_w = word_w;
                any = true;
                continue;
            }
            if line_w + 1 + word_w > max {
                result.push(std::mem::take(&mut line));
                line.push_str(word);
                line_w = word_w;
            } else {
                line.push(' ');
                line.push_str(word);
                line_w += 1 + word_w;
            }
        }

        result.push(line);
    }
    result
}

/// Shorten plain text to `max` columns, ending in an ellipsis when cut.
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if line_width(s) <= max {
        return s.to_string();
    }
    match max {
        0 => String::new(),
        1 => "…".to_string(),
        _ => format!("{}…", truncate(s, max - 1)),
    }
}

/// Pad every line of a block to `target` columns so the block keeps a
/// straight right edge when it is centered as a whole.
pub fn pad_lines(s: &str, target: usize) -> String {
    s.split('\n')
        .map(|line| pad_right(line, target))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join blocks side by side, each vertically centered against the tallest.
pub fn join_horizontal(blocks: &[&str]) -> String {
    let split: Vec<Vec<&str>> = blocks.iter().map(|b| b.split('\n').collect()).collect();
    let widths: Vec<usize> = split
        .iter()
        .map(|lines| lines.iter().map(|l| line_width(l)).max().unwrap_or(0))
        .collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(0);

    let mut rows = vec![String::new(); height];
    for (lines, &block_w) in split.iter().zip(&widths) {
        let top = (height - lines.len()) / 2;
        for (r, row) in rows.iter_mut().enumerate() {
            let line = r
                .checked_sub(top)
                .and_then(|i| lines.get(i))
                .copied()
                .unwrap_or("");
            row.push_str(&pad_right(line, block_w));
        }
    }
    rows.join("\n")
}

/// Place a block in the middle of a `cols` x `rows` area, filling the
/// surrounding whitespace with whatever `fill(n)` returns for `n` columns.
pub fn place_with(block: &str, cols: usize, rows: usize, fill: impl Fn(usize) -> String) -> String {
    let lines: Vec<&str> = block.split('\n').collect();
    let block_w = lines.iter().map(|l| line_width(l)).max().unwrap_or(0);
    let top = rows.saturating_sub(lines.len()) / 2;
    let left = cols.saturating_sub(block_w) / 2;

    let total = rows.max(lines.len());
    let mut out = Vec::with_capacity(total);
    for r in 0..total {
        let row = match r.checked_sub(top).and_then(|i| lines.get(i)) {
            Some(line) => {
                let right = cols.saturating_sub(left + line_width(line));
                format!("{}{}{}", fill(left), line, fill(right))
            }
            None => fill(cols),
        };
        out.push(row);
    }
    out.join("\n")
}

/// Place a block in the middle of a `cols` x `rows` area of spaces.
pub fn place(block: &str, cols: usize, rows: usize) -> String {
    place_with(block, cols, rows, |n| " ".repeat(n))
}

/// Force a block to exactly `rows` lines of exactly `cols` columns.
pub fn fit_block(s: &str, cols: usize, rows: usize) -> String {
    let mut out: Vec<String> = s.split('\n').take(rows).map(|l| fit(l, cols)).collect();
    while out.len() < rows {
        out.push(" ".repeat(cols));
    }
    out.join("\n")
}
