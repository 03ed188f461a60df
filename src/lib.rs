//! portfolio-tui - an animated terminal portfolio
//!
//! A message-driven TUI engine that renders a personal portfolio:
//! - Boot-log intro, four scrollable content sections and animated transitions
//! - Procedural shimmer, gradient, glow and glitch effects advanced by timer ticks
//! - Command palette, help overlay and idle-timeout warning
//!
//! The engine is synchronous and deterministic; [`tui::Terminal`] hosts it on a
//! real terminal.

pub mod config;
pub mod content;
pub mod tui;

pub use config::Config;
pub use content::Content;

use std::path::PathBuf;

/// Result type for portfolio-tui operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading content or configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Content directory {}: {source}", path.display())]
    ContentDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {file}: {source}")]
    Read {
        file: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {file}: {reason}")]
    Invalid { file: &'static str, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
