mod anim;
mod app;
mod care;
mod config;
mod input;
mod model;
mod mood;
mod needs;
mod render;
mod sim;
mod sink;
mod tray;

use anyhow::{Context, Result};
use clap::Parser;
use config::{load_settings, project_paths, save_settings_atomic, Args};
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = project_paths()?;
    init_logging(&paths.log_path, &args.log_level)?;

    if !paths.settings_path.exists() {
        // first launch: leave an editable copy of the defaults behind
        save_settings_atomic(&paths.settings_path, &config::Settings::default())?;
    }
    let settings = load_settings(&paths.settings_path).with_overrides(&args);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), ?settings, "starting");

    app::run(settings)
}

// stdout is the drawing surface
fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
