use super::shimmer::lattice_hash;
use super::smoothstep;
use crate::tui::messages::{AnimId, Msg};
use crate::tui::runtime::Cmd;
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

/// Replacement glyphs, all one column wide.
pub const GLITCH_GLYPHS: [char; 16] = [
    '░', '▒', '▓', '█', '▚', '▞', '#', '%', '&', '@', '$', '?', '/', '\\', '<', '>',
];

/// Offset into the lattice for the second hash that picks a glyph.
const GLYPH_SALT: i64 = 7919;

/// A one-shot scramble: at first a share of glyphs is swapped for block
/// characters, decaying to clean text by the last step.
#[derive(Debug, Clone)]
pub struct Glitch {
    id: AnimId,
    active: bool,
    step: u32,
    steps: u32,
    interval: Duration,
    /// Replacement probability at step zero.
    intensity: f64,
}

impl Glitch {
    pub fn new(steps: u32, interval: Duration) -> Self {
        Self {
            id: AnimId::next(),
            active: false,
            step: 0,
            steps,
            interval,
            intensity: 0.6,
        }
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity.clamp(0.0, 1.0);
        self
    }

    pub fn id(&self) -> AnimId {
        self.id
    }

    pub fn start(&mut self) -> Cmd {
        if self.steps == 0 {
            return Cmd::none();
        }
        self.active = true;
        self.step = 0;
        Cmd::after(self.interval, Msg::Tick(self.id))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.active || *msg != Msg::Tick(self.id) {
            return Cmd::none();
        }
        self.step += 1;
        if self.step >= self.steps {
            self.active = false;
            return Cmd::none();
        }
        Cmd::after(self.interval, Msg::Tick(self.id))
    }

    /// Chance that a given glyph is replaced at the current step.
    pub fn probability(&self) -> f64 {
        if !self.active || self.steps == 0 {
            return 0.0;
        }
        let progress = f64::from(self.step) / f64::from(self.steps);
        (1.0 - smoothstep(progress)) * self.intensity
    }

    /// Scramble plain `text`. Spaces and wide glyphs are left alone so the
    /// line never changes width.
    pub fn render(&self, text: &str) -> String {
        let p = self.probability();
        if p <= 0.0 {
            return text.to_string();
        }
        let step = i64::from(self.step);
        text.split('\n')
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        if ch.is_whitespace() || ch.width() != Some(1) {
                            return ch;
                        }
                        let (x, y) = (col as i64, row as i64);
                        if lattice_hash(x, y, step) + 0.5 >= p {
                            return ch;
                        }
                        let pick = lattice_hash(x, y, step + GLYPH_SALT) + 0.5;
                        let index = ((pick * GLITCH_GLYPHS.len() as f64) as usize).min(GLITCH_GLYPHS.len() - 1);
                        GLITCH_GLYPHS[index]
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::text;

    #[test]
    fn inactive_leaves_text_alone() {
        let glitch = Glitch::new(10, Duration::from_millis(40));
        assert_eq!(glitch.render("hello world"), "hello world");
    }

    #[test]
    fn scrambles_then_settles() {
        let line = "All systems operational. Welcome aboard, traveller.";
        let mut glitch = Glitch::new(12, Duration::from_millis(40)).with_intensity(1.0);
        glitch.start();
        let first = glitch.render(line);
        assert_ne!(first, line);
        assert_eq!(text::width(&first), text::width(line));
        assert_eq!(first.matches(' ').count(), line.matches(' ').count());

        while glitch.is_active() {
            glitch.update(&Msg::Tick(glitch.id()));
        }
        assert_eq!(glitch.render(line), line);
    }

    #[test]
    fn probability_decays() {
        let mut glitch = Glitch::new(8, Duration::from_millis(40));
        glitch.start();
        let mut last = glitch.probability();
        for _ in 1..8 {
            glitch.update(&Msg::Tick(glitch.id()));
            assert!(glitch.probability() <= last);
            last = glitch.probability();
        }
    }

    #[test]
    fn deterministic_per_step() {
        let mut glitch = Glitch::new(8, Duration::from_millis(40));
        glitch.start();
        assert_eq!(glitch.render("deterministic"), glitch.render("deterministic"));
    }

    #[test]
    fn zero_steps_never_starts() {
        let mut glitch = Glitch::new(0, Duration::from_millis(40));
        assert!(glitch.start().is_none());
        assert!(!glitch.is_active());
    }
}
