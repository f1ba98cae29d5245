//! Interactive XInput monitor: prints availability, then redraws a live dashboard for one
//! controller whenever its packet number changes. Ctrl-C exits cleanly.
//!
//! `cargo run --example monitor -- --json`

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use xinput_bridge::harness::{self, Options};
use xinput_bridge::{Loader, LoaderConfig};

#[derive(Parser)]
#[command(name = "xinput-monitor", about = "Poll an Xbox controller through XInput")]
struct Cli {
    /// Controller slot to watch (0-3). Defaults to the first connected controller.
    #[arg(long, value_name = "N")]
    index: Option<u32>,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "16", value_name = "MS")]
    interval_ms: u64,

    /// TOML file with loader search paths
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print each changed snapshot as a JSON line instead of the dashboard
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => LoaderConfig::default(),
    }
    .with_env();

    let pads = Loader::new(config).load().backend;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop_clone = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop_clone.store(true, Ordering::Relaxed);
        })
        .context("failed to install Ctrl-C handler")?;
    }

    let opts = Options {
        index: cli.index,
        interval: Duration::from_millis(cli.interval_ms),
        json: cli.json,
    };
    let mut out = std::io::stdout().lock();
    harness::run(&pads, pads.describe(), &opts, &stop, &mut out)
        .context("failed to write to stdout")?;
    Ok(())
}
