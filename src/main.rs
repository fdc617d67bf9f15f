// keepsake - a cinematic, single-session love story for the terminal
//
// One viewer walks a fixed sequence of full-screen stages: a passphrase
// gate, an intro, a staged "loading" pause, a photo gallery, a timeline,
// the question, and the celebration. Everything lives in memory and ends
// with the process.
//
// Architecture:
// - engine: clock-driven primitives (typewriter, countdown, particles,
//   evasive target), free of terminal concerns
// - sequencer: the linear stage progression
// - tui (ratatui): event loop, per-stage components, effect layers
// - config/content: TOML-backed settings and prose

mod cli;
mod config;
mod content;
mod engine;
mod logging;
mod sequencer;
mod theme;
mod tui;

use anyhow::{Context, Result};
use config::Config;
use content::Content;

#[tokio::main]
async fn main() -> Result<()> {
    // Subcommands (config management) run and exit before any setup.
    if cli::handle_cli() {
        return Ok(());
    }

    Config::ensure_config_exists();
    let config = Config::load()?;

    // Keep the guard alive for the whole session so logs flush on exit.
    let _log_guard = logging::init(&config.log_dir)?;

    let content = match &config.content_path {
        Some(path) => Content::load(path)
            .with_context(|| format!("loading content pack {}", path.display()))?,
        None => Content::default(),
    };

    tracing::info!(
        version = config::VERSION,
        theme = %config.theme,
        "starting keepsake"
    );

    tui::run_tui(config, content).await
}
