// Driftfield: ambient particle-field background animation for the terminal

mod cli;
mod runner;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::error;
use tracing_subscriber::EnvFilter;

use driftfield_render::ThemeName;

fn main() {
    let args = cli::CliArgs::parse();
    if let Err(err) = run(args) {
        // One fatal report; there is no recovery or retry path.
        error!("Driftfield: fatal: {:#}", err);
        eprintln!("driftfield: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: cli::CliArgs) -> Result<()> {
    init_logging(args.log_file.as_deref())?;

    let theme = ThemeName::from_str(&args.theme)
        .ok_or_else(|| {
            anyhow!(
                "unknown theme '{}' (expected midnight, ember, or aurora)",
                args.theme
            )
        })?
        .theme();

    runner::run(runner::RunOptions {
        fps: args.fps,
        seed: args.seed,
        theme,
        scale: args.scale,
        duration: args.duration,
        hud: !args.no_hud,
    })
}

/// Logs go to a file or nowhere: stdout is the drawing surface and stderr
/// shares the terminal with it.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
