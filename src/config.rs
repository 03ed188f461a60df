//! Configuration for portfolio-tui
//!
//! Resolved in layers: built-in defaults, then an optional TOML file, then
//! `PORTFOLIO_TUI_*` environment variables. Command-line flags are applied
//! last by the binary through the `with_*` builders.

use crate::tui::animation::Timings;
use crate::tui::theme::{Theme, ThemeMode};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const ENV_DATA_DIR: &str = "PORTFOLIO_TUI_DATA_DIR";
pub const ENV_IDLE_TIMEOUT: &str = "PORTFOLIO_TUI_IDLE_TIMEOUT";
pub const ENV_THEME: &str = "PORTFOLIO_TUI_THEME";
pub const ENV_DEBUG: &str = "PORTFOLIO_TUI_DEBUG";

/// Interval settings in milliseconds, as written in the `[timings]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    pub frame_ms: u64,
    pub cursor_blink_ms: u64,
    pub typewriter_ms: u64,
    pub gradient_ms: u64,
    pub intro_line_ms: u64,
    pub intro_final_ms: u64,
    pub intro_hold_ms: u64,
    pub reveal_ms: u64,
    pub idle_check_ms: u64,
    pub idle_warning_ms: u64,
    pub copy_feedback_ms: u64,
    pub tab_glow_ms: u64,
    pub glitch_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        let t = Timings::default();
        let ms = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            frame_ms: ms(t.frame),
            cursor_blink_ms: ms(t.cursor_blink),
            typewriter_ms: ms(t.typewriter),
            gradient_ms: ms(t.gradient),
            intro_line_ms: ms(t.intro_line),
            intro_final_ms: ms(t.intro_final),
            intro_hold_ms: ms(t.intro_hold),
            reveal_ms: ms(t.reveal),
            idle_check_ms: ms(t.idle_check),
            idle_warning_ms: ms(t.idle_warning),
            copy_feedback_ms: ms(t.copy_feedback),
            tab_glow_ms: ms(t.tab_glow),
            glitch_ms: ms(t.glitch),
        }
    }
}

impl TimingsConfig {
    fn entries(&self) -> [(&'static str, u64); 13] {
        [
            ("frame_ms", self.frame_ms),
            ("cursor_blink_ms", self.cursor_blink_ms),
            ("typewriter_ms", self.typewriter_ms),
            ("gradient_ms", self.gradient_ms),
            ("intro_line_ms", self.intro_line_ms),
            ("intro_final_ms", self.intro_final_ms),
            ("intro_hold_ms", self.intro_hold_ms),
            ("reveal_ms", self.reveal_ms),
            ("idle_check_ms", self.idle_check_ms),
            ("idle_warning_ms", self.idle_warning_ms),
            ("copy_feedback_ms", self.copy_feedback_ms),
            ("tab_glow_ms", self.tab_glow_ms),
            ("glitch_ms", self.glitch_ms),
        ]
    }

    pub fn to_timings(&self) -> Timings {
        let ms = Duration::from_millis;
        Timings {
            frame: ms(self.frame_ms),
            cursor_blink: ms(self.cursor_blink_ms),
            typewriter: ms(self.typewriter_ms),
            gradient: ms(self.gradient_ms),
            intro_line: ms(self.intro_line_ms),
            intro_final: ms(self.intro_final_ms),
            intro_hold: ms(self.intro_hold_ms),
            reveal: ms(self.reveal_ms),
            idle_check: ms(self.idle_check_ms),
            idle_warning: ms(self.idle_warning_ms),
            copy_feedback: ms(self.copy_feedback_ms),
            tab_glow: ms(self.tab_glow_ms),
            glitch: ms(self.glitch_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `content/*.json`
    pub data_dir: PathBuf,

    /// Seconds of inactivity before the session ends; 0 disables
    pub idle_timeout_secs: u64,

    pub theme: ThemeMode,

    /// Whether to play the boot intro
    pub show_intro: bool,

    /// Where logs go; none means no logging
    pub log_file: Option<PathBuf>,

    pub debug: bool,

    pub timings: TimingsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            idle_timeout_secs: 30 * 60,
            theme: ThemeMode::Dark,
            show_intro: true,
            log_file: None,
            debug: false,
            timings: TimingsConfig::default(),
        }
    }
}

impl Config {
    /// `<config dir>/portfolio-tui/config.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("portfolio-tui").join("config.toml"))
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&source)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Read `explicit` if given (it must exist), else the default path if
    /// it exists, else defaults. Environment overrides are applied on top.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_from(std::env::vars());
        config.validate()?;
        Ok(config)
    }

    /// Apply `PORTFOLIO_TUI_*` overrides from `vars`. Unparsable values are
    /// logged and ignored.
    pub fn apply_env_from<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let value = value.as_ref().trim();
            match key.as_ref() {
                ENV_DATA_DIR if !value.is_empty() => self.data_dir = PathBuf::from(value),
                ENV_IDLE_TIMEOUT => match value.parse() {
                    Ok(secs) => self.idle_timeout_secs = secs,
                    Err(_) => warn!(var = ENV_IDLE_TIMEOUT, value, "ignoring non-numeric value"),
                },
                ENV_THEME => match value.to_ascii_lowercase().as_str() {
                    "dark" => self.theme = ThemeMode::Dark,
                    "light" => self.theme = ThemeMode::Light,
                    _ => warn!(var = ENV_THEME, value, "ignoring unknown theme"),
                },
                ENV_DEBUG => self.debug = matches!(value, "1" | "true" | "TRUE" | "yes"),
                _ => {}
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::Config("data_dir must not be empty".into()));
        }
        if let Some((name, _)) = self.timings.entries().iter().find(|(_, ms)| *ms == 0) {
            return Err(Error::Config(format!("timings.{name} must be positive")));
        }
        if self.idle_timeout_secs > 0
            && self.timings.idle_warning_ms >= self.idle_timeout_secs.saturating_mul(1000)
        {
            return Err(Error::Config(format!(
                "timings.idle_warning_ms ({}) must be shorter than the idle timeout ({}s)",
                self.timings.idle_warning_ms, self.idle_timeout_secs
            )));
        }
        Ok(())
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    pub fn with_idle_timeout_secs(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_show_intro(mut self, show: bool) -> Self {
        self.show_intro = show;
        self
    }

    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn timings(&self) -> Timings {
        self.timings.to_timings()
    }

    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.theme)
    }
}
