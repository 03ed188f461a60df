//! A scrollable window over pre-rendered text.
//!
//! The viewport never styles or wraps anything itself: sections render
//! their content to lines, hand it over, and get back the visible slice,
//! optionally with a scrollbar column on the right edge.

use super::statusbar::ScrollInfo;
use super::style::paint;
use super::text;
use super::theme::Theme;

pub const SCROLL_TRACK: &str = "░";
pub const SCROLL_THUMB: &str = "█";
pub const SCROLL_UP: &str = "▲";
pub const SCROLL_DOWN: &str = "▼";

/// Widest content a section lays out, whatever the terminal width.
pub const MAX_CONTENT_WIDTH: usize = 88;

#[derive(Debug, Clone, Default)]
pub struct Viewport {
    lines: Vec<String>,
    width: usize,
    height: usize,
    y_offset: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            lines: Vec::new(),
            width,
            height,
            y_offset: 0,
        }
    }

    /// Replace the content and scroll back to the top.
    pub fn set_content(&mut self, content: &str) {
        self.lines = split_lines(content);
        self.y_offset = 0;
    }

    /// Replace the content keeping the reader's place: the top stays the
    /// top, the bottom stays the bottom, anything between keeps its
    /// proportional position.
    pub fn set_content_preserve_scroll(&mut self, content: &str) {
        let was_top = self.at_top();
        let was_bottom = self.at_bottom();
        let ratio = self.scroll_ratio();

        self.lines = split_lines(content);
        self.y_offset = if was_top {
            0
        } else if was_bottom {
            self.max_offset()
        } else {
            (ratio * self.max_offset() as f64) as usize
        };
        self.clamp_offset();
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.clamp_offset();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns available to content: one is reserved for the scrollbar and
    /// the rest is capped at [`MAX_CONTENT_WIDTH`].
    pub fn content_width(&self) -> usize {
        self.width.saturating_sub(1).min(MAX_CONTENT_WIDTH)
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_add(n);
        self.clamp_offset();
    }

    pub fn scroll_to_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.y_offset = self.max_offset();
    }

    /// Scroll just far enough that rows `start..=end` are on screen,
    /// preferring `start` when the range is taller than the viewport.
    pub fn ensure_visible(&mut self, start: usize, end: usize) {
        if self.height == 0 {
            return;
        }
        if end >= self.y_offset + self.height {
            self.y_offset = end + 1 - self.height;
        }
        if start < self.y_offset {
            self.y_offset = start;
        }
        self.clamp_offset();
    }

    pub fn at_top(&self) -> bool {
        self.y_offset == 0
    }

    /// True at the last page, and whenever everything fits.
    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_offset()
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn visible_lines(&self) -> usize {
        self.height
    }

    pub fn fits(&self) -> bool {
        self.lines.len() <= self.height
    }

    /// Scroll position in `[0, 1]`; content that does not scroll counts as
    /// fully scrolled.
    pub fn scroll_ratio(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            return 1.0;
        }
        self.y_offset as f64 / max as f64
    }

    /// Scroll position as a whole percentage.
    pub fn scroll_percent(&self) -> u8 {
        (self.scroll_ratio() * 100.0).round() as u8
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        if self.fits() {
            return ScrollInfo {
                at_top: true,
                at_bottom: true,
                percent: 100,
                fits: true,
            };
        }
        ScrollInfo {
            at_top: self.at_top(),
            at_bottom: self.at_bottom(),
            percent: self.scroll_percent(),
            fits: false,
        }
    }

    /// The visible lines exactly as given, unstyled and unpadded.
    pub fn view(&self) -> String {
        if self.height == 0 {
            return String::new();
        }
        self.visible_slice().join("\n")
    }

    /// The visible lines with a scrollbar column. Content that fits gets no
    /// scrollbar and is centered both ways instead.
    pub fn view_with_scrollbar(&self, theme: &Theme) -> String {
        if self.height == 0 {
            return String::new();
        }
        if self.fits() {
            return self.view_centered();
        }

        let (thumb_height, thumb_start) = self.scrollbar_metrics();
        let in_thumb = |i: usize| i >= thumb_start && i < thumb_start + thumb_height;

        let thumb = paint(theme.muted(), SCROLL_THUMB);
        let track = paint(theme.border(), SCROLL_TRACK);
        let mut indicator: Vec<String> = (0..self.height)
            .map(|i| if in_thumb(i) { thumb.clone() } else { track.clone() })
            .collect();

        // Arrows only ever replace track cells.
        let last = self.height - 1;
        if !self.at_top() && !in_thumb(0) {
            indicator[0] = paint(theme.accent(), SCROLL_UP);
        }
        if !self.at_bottom() && !in_thumb(last) {
            indicator[last] = paint(theme.accent(), SCROLL_DOWN);
        }

        let visible = self.visible_slice();
        let content_width = self.width.saturating_sub(1);
        (0..self.height)
            .map(|i| {
                let line = visible.get(i).map(String::as_str).unwrap_or("");
                format!("{}{}", text::fit(&text::center(line, content_width), content_width), indicator[i])
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Thumb height and first thumb row. The thumb is proportional to the
    /// visible share of the content, at least one row tall.
    pub fn scrollbar_metrics(&self) -> (usize, usize) {
        let total = self.lines.len();
        if total <= self.height || self.height == 0 {
            return (self.height, 0);
        }

        let thumb_height = (self.height * self.height / total).max(1);
        let max = self.max_offset();
        let offset = self.y_offset.min(max);
        let track_space = self.height - thumb_height;
        let thumb_start = if max > 0 && track_space > 0 {
            offset * track_space / max
        } else {
            0
        };
        (thumb_height, thumb_start)
    }

    fn view_centered(&self) -> String {
        let visible = self.visible_slice();
        let top = self.height.saturating_sub(visible.len()) / 2;
        (0..self.height)
            .map(|i| {
                let line = i
                    .checked_sub(top)
                    .and_then(|idx| visible.get(idx))
                    .map(String::as_str)
                    .unwrap_or("");
                text::fit(&text::center(line, self.width), self.width)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn visible_slice(&self) -> &[String] {
        let start = self.y_offset.min(self.lines.len());
        let end = (start + self.height).min(self.lines.len());
        &self.lines[start..end]
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    fn clamp_offset(&mut self) {
        self.y_offset = self.y_offset.min(self.max_offset());
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}
