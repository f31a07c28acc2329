mod config;
mod store;
mod tui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tarefas", about = "A terminal to-do list for the current session")]
struct Cli {
    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the TUI (default)
    Run,
    /// Initialize the tarefas config directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Init => {
            config::ensure_dirs()?;
            let path = config::write_default_config()?;
            println!("tarefas initialized, config at {}", path.display());
            Ok(())
        }
        Commands::Run => {
            let cfg = match cli.config {
                Some(ref path) => config::load_from(path)?,
                None => config::load()?,
            };
            init_tracing(&cfg)?;

            let store = store::TaskStore::new();
            tui::run(store, &cfg)
        }
    }
}

/// Route tracing to the configured log file. The terminal belongs to the
/// TUI, so without a `log_file` there is nowhere to write and logging
/// stays off.
fn init_tracing(cfg: &config::Config) -> Result<()> {
    if let Some(ref path) = cfg.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {path}"))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}
