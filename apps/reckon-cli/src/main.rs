use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use reckon_kernel::History;

mod config;
mod observers;
mod repl;
mod validate;

use config::Config;
use observers::{AutoSaveObserver, LogObserver};
use repl::Repl;

#[derive(Parser)]
#[command(
    name = "reckon",
    about = "Interactive calculator with undoable, persistent history"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the configured history directory
    #[arg(long)]
    history_dir: Option<PathBuf>,

    /// Override the configured history file name
    #[arg(long)]
    history_file: Option<String>,

    /// Override the configured rounding precision (decimal places)
    #[arg(long)]
    precision: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = Config::from_env().context("reading configuration")?;
    if let Some(dir) = cli.history_dir {
        cfg.history_dir = dir;
    }
    if let Some(file) = cli.history_file {
        cfg.history_file = file;
    }
    if let Some(precision) = cli.precision {
        cfg.precision = precision;
    }
    tracing::debug!(?cfg, "configuration resolved");

    let mut history = History::new(cfg.max_history_size);
    let log_observer = LogObserver::create(cfg.log_path())
        .with_context(|| format!("opening audit log at {}", cfg.log_path().display()))?;
    history.attach(Box::new(log_observer));
    if cfg.auto_save {
        history.attach(Box::new(AutoSaveObserver::new(cfg.history_path())));
    }

    let mut repl = Repl::new(history, cfg);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    repl.run(stdin.lock(), &mut stdout)?;
    Ok(())
}
