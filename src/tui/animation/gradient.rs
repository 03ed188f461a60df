use crate::tui::color::Rgb;
use crate::tui::messages::{AnimId, Msg};
use crate::tui::runtime::Cmd;
use crate::tui::style::{fg, paint};
use crate::tui::theme::Theme;
use ratatui::style::{Color, Modifier};
use std::time::Duration;

/// Bold text blended from `start` to `end` across its characters in OkLab.
///
/// Colors that are not RGB cannot be blended; the text is then painted bold
/// in `start` as a whole.
pub fn gradient_text(text: &str, start: Color, end: Color) -> String {
    match (Rgb::from_color(start), Rgb::from_color(end)) {
        (Some(a), Some(b)) => blend_chars(text, a, b, 0.0),
        _ => paint(fg(start).add_modifier(Modifier::BOLD), text),
    }
}

fn blend_chars(text: &str, start: Rgb, end: Rgb, offset: f64) -> String {
    let count = text.chars().count();
    if count == 0 {
        return String::new();
    }
    let last = (count - 1).max(1) as f64;
    let mut out = String::with_capacity(text.len() * 20);
    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        let t = (i as f64 / last + offset).clamp(0.0, 1.0);
        let color = start.lerp_oklab(end, t).to_color();
        out.push_str(&paint(fg(color).add_modifier(Modifier::BOLD), ch.encode_utf8(&mut buf)));
    }
    out
}

/// A gradient whose sweep drifts over time, from the accent color to the
/// foreground.
#[derive(Debug, Clone)]
pub struct GradientAnim {
    id: AnimId,
    active: bool,
    frame: u64,
    interval: Duration,
    start_color: Color,
    end_color: Color,
}

impl GradientAnim {
    pub fn new(theme: &Theme) -> Self {
        Self {
            id: AnimId::next(),
            active: false,
            frame: 0,
            interval: Duration::from_millis(50),
            start_color: theme.colors.accent,
            end_color: theme.colors.fg,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn id(&self) -> AnimId {
        self.id
    }

    pub fn start(&mut self) -> Cmd {
        self.active = true;
        self.frame = 0;
        Cmd::after(self.interval, Msg::Tick(self.id))
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.active || *msg != Msg::Tick(self.id) {
            return Cmd::none();
        }
        self.frame += 1;
        Cmd::after(self.interval, Msg::Tick(self.id))
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.start_color = theme.colors.accent;
        self.end_color = theme.colors.fg;
    }

    /// Phase shift of the sweep; three incommensurate sines so it never
    /// visibly repeats.
    pub fn offset(&self) -> f64 {
        let f = self.frame as f64;
        0.3 * (f * 0.012).sin() + 0.2 * (f * 0.007).sin() + 0.1 * (f * 0.019).sin()
    }

    pub fn render(&self, text: &str) -> String {
        match (Rgb::from_color(self.start_color), Rgb::from_color(self.end_color)) {
            (Some(a), Some(b)) => blend_chars(text, a, b, self.offset()),
            _ => paint(fg(self.start_color).add_modifier(Modifier::BOLD), text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::text;

    #[test]
    fn static_gradient_runs_end_to_end() {
        let red = Color::Rgb(255, 0, 0);
        let blue = Color::Rgb(0, 0, 255);
        let out = gradient_text("abc", red, blue);
        assert_eq!(text::strip_ansi(&out), "abc");
        assert!(out.contains("38;2;255;0;0"));
        assert!(out.contains("38;2;0;0;255"));
    }

    #[test]
    fn unblendable_colors_fall_back() {
        let out = gradient_text("name", Color::Red, Color::Rgb(0, 0, 0));
        assert_eq!(text::strip_ansi(&out), "name");
        assert_eq!(out, paint(fg(Color::Red).add_modifier(Modifier::BOLD), "name"));
    }

    #[test]
    fn empty_text() {
        assert_eq!(gradient_text("", Color::Rgb(1, 2, 3), Color::Rgb(4, 5, 6)), "");
        assert_eq!(GradientAnim::new(&Theme::dark()).render(""), "");
    }

    #[test]
    fn single_char_uses_start_color() {
        let out = gradient_text("x", Color::Rgb(10, 20, 30), Color::Rgb(200, 200, 200));
        assert!(out.contains("38;2;10;20;30"));
    }

    #[test]
    fn animation_drifts_offset() {
        let mut anim = GradientAnim::new(&Theme::dark());
        assert_eq!(anim.offset(), 0.0);
        anim.start();
        for _ in 0..40 {
            anim.update(&Msg::Tick(anim.id()));
        }
        assert!(anim.offset() != 0.0);
        assert!(anim.offset().abs() <= 0.6);
    }

    #[test]
    fn inactive_ignores_ticks() {
        let mut anim = GradientAnim::new(&Theme::dark());
        assert!(anim.update(&Msg::Tick(anim.id())).is_none());
        anim.start();
        anim.stop();
        assert!(anim.update(&Msg::Tick(anim.id())).is_none());
    }
}
