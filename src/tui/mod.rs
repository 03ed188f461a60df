//! Terminal user interface
//!
//! A message-driven engine: components handle [`Msg`]s, return [`Cmd`]s and
//! render to styled strings. [`Program`] runs them against a virtual clock
//! and [`Terminal`] hosts a program on a real terminal.

pub mod animation;
mod app;
pub mod borders;
pub mod color;
pub mod density;
pub mod help;
pub mod hyperlink;
pub mod idle;
pub mod intro;
pub mod keys;
pub mod messages;
pub mod navbar;
pub mod palette;
pub mod runtime;
pub mod sections;
pub mod statusbar;
pub mod style;
mod terminal;
pub mod text;
pub mod theme;
pub mod viewport;

pub use app::{App, AppOptions, CHROME_HEIGHT, MIN_HEIGHT, MIN_WIDTH};
pub use messages::{Msg, Section};
pub use runtime::{Cmd, Model, Program};
pub use terminal::Terminal;
pub use theme::Theme;
