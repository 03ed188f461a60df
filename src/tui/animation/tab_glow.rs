use crate::tui::color::Rgb;
use crate::tui::messages::{AnimId, Msg};
use crate::tui::runtime::Cmd;
use crate::tui::theme::Theme;
use ratatui::style::Color;
use std::f64::consts::PI;
use std::time::Duration;

/// Largest HSL lightness boost, reached halfway through the pulse.
const MAX_BOOST: f64 = 0.4;

/// A one-shot brightness pulse on the accent color.
#[derive(Debug, Clone)]
pub struct TabGlow {
    id: AnimId,
    active: bool,
    step: u32,
    steps: u32,
    interval: Duration,
    accent: Color,
}

impl TabGlow {
    /// A pulse lasting `duration`, advanced every `frame`.
    pub fn new(theme: &Theme, duration: Duration, frame: Duration) -> Self {
        let steps = if frame.is_zero() {
            0
        } else {
            (duration.as_nanos() / frame.as_nanos()) as u32
        };
        Self {
            id: AnimId::next(),
            active: false,
            step: 0,
            steps,
            interval: frame,
            accent: theme.colors.accent,
        }
    }

    pub fn id(&self) -> AnimId {
        self.id
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Restart the pulse from the beginning.
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

    /// Current pulse height, a half sine over the run.
    pub fn pulse(&self) -> f64 {
        if !self.active || self.steps == 0 {
            return 0.0;
        }
        (f64::from(self.step) / f64::from(self.steps) * PI).sin()
    }

    /// The accent with its lightness raised by the current pulse. Inactive,
    /// or with a non-RGB accent, the accent itself.
    pub fn brightened_accent(&self) -> Color {
        if !self.active {
            return self.accent;
        }
        match Rgb::from_color(self.accent) {
            Some(rgb) => rgb.lighten(MAX_BOOST * self.pulse()).to_color(),
            None => self.accent,
        }
    }

    pub fn set_theme(&mut self, theme: &Theme) {
        self.accent = theme.colors.accent;
    }
}
