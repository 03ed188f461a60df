//! portfolio-tui CLI
//!
//! Loads the portfolio content and runs the TUI in the current terminal.

use anyhow::Context;
use clap::Parser;
use portfolio_tui::content::load_all;
use portfolio_tui::tui::idle::SystemClock;
use portfolio_tui::tui::theme::ThemeMode;
use portfolio_tui::tui::{App, AppOptions, Program, Terminal};
use portfolio_tui::Config;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// portfolio-tui - an animated terminal portfolio
#[derive(Parser, Debug)]
#[command(name = "portfolio-tui")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing content/*.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/portfolio-tui/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Idle timeout in seconds; 0 disables it
    #[arg(long)]
    idle_timeout: Option<u64>,

    /// Start with the light theme
    #[arg(long)]
    light: bool,

    /// Skip the boot intro
    #[arg(long)]
    no_intro: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long)]
    debug: bool,

    /// Validate the content and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(path) = &config.log_file {
        init_logging(path, config.debug)?;
    }

    let content = load_all(&config.data_dir)
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;

    if cli.check {
        println!(
            "{} v{}: {} projects, {} roles, {} links",
            content.meta.name,
            content.meta.version,
            content.work.projects.len(),
            content.cv.experience.len(),
            content.links.links.len()
        );
        return Ok(());
    }

    info!(data_dir = %config.data_dir.display(), theme = %config.theme, "starting portfolio-tui");

    let app = App::new(
        Arc::new(content),
        AppOptions {
            theme: config.theme(),
            timings: config.timings(),
            idle_timeout: config.idle_timeout(),
            show_intro: config.show_intro,
            clock: Box::new(SystemClock),
        },
    );
    let mut program = Program::new(app);

    let mut terminal = Terminal::new().context("setting up the terminal")?;
    terminal.run(&mut program).await?;

    Ok(())
}

/// Defaults, then config file and environment, then flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    if let Some(secs) = cli.idle_timeout {
        config = config.with_idle_timeout_secs(secs);
    }
    if cli.light {
        config = config.with_theme(ThemeMode::Light);
    }
    if cli.no_intro {
        config = config.with_show_intro(false);
    }
    if let Some(path) = &cli.log_file {
        config = config.with_log_file(path.clone());
    }
    if cli.debug {
        config = config.with_debug(true);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Log to a file; the terminal itself belongs to the UI.
fn init_logging(path: &Path, debug: bool) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
