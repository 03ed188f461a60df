//! Color theme for the TUI - a five-color palette in dark and light variants
//!
//! A `Theme` is a plain value. Components receive it when they are built and
//! again whenever the theme changes; nothing reads it from global state.

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::fmt;

/// The five palette slots every component draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        bg: Color::Rgb(0x0d, 0x0d, 0x0d),
        fg: Color::Rgb(0xc8, 0xc0, 0xb8),
        accent: Color::Rgb(0xe8, 0x53, 0x6d),
        muted: Color::Rgb(0x55, 0x52, 0x50),
        border: Color::Rgb(0x2a, 0x28, 0x26),
    };

    pub const LIGHT: Palette = Palette {
        bg: Color::Rgb(0xf5, 0xf2, 0xed),
        fg: Color::Rgb(0x1a, 0x1a, 0x1a),
        accent: Color::Rgb(0xc9, 0x3d, 0x57),
        muted: Color::Rgb(0x88, 0x85, 0x80),
        border: Color::Rgb(0xd4, 0xd0, 0xcb),
    };
}

/// Which palette variant is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors: Palette,
    pub mode: ThemeMode,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            colors: Palette::DARK,
            mode: ThemeMode::Dark,
        }
    }

    pub fn light() -> Self {
        Self {
            colors: Palette::LIGHT,
            mode: ThemeMode::Light,
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// A theme with a caller-supplied palette.
    pub fn custom(colors: Palette, mode: ThemeMode) -> Self {
        Self { colors, mode }
    }

    /// The opposite variant.
    pub fn toggled(&self) -> Self {
        match self.mode {
            ThemeMode::Dark => Self::light(),
            ThemeMode::Light => Self::dark(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    // Semantic styles
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.colors.fg)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.colors.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.title()
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.colors.border)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().bg(self.colors.border).fg(self.colors.muted)
    }

    pub fn nav_active(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_inactive(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }

    // Badge styles
    /// Background text on an accent fill, used for dividers and warnings.
    pub fn badge(&self) -> Style {
        Style::default()
            .bg(self.colors.accent)
            .fg(self.colors.bg)
            .add_modifier(Modifier::BOLD)
    }
}
