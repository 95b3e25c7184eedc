//! HEXCAPE CLI - Command-line host for the hex escape puzzle
//!
//! Commands:
//! - show: Print a freshly generated board
//! - play: Play interactively from stdin
//! - autoplay: Let the autopilot play consecutive levels
//! - bench: Run many seeded autopilot games in parallel

mod autoplay;
mod bench;
mod play;
mod render;
mod show;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexcape_core::GameConfig;

#[derive(Parser)]
#[command(name = "hexcape")]
#[command(about = "Hex grid escape puzzle")]
struct Cli {
    /// Game config JSON file (defaults when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log turn-by-turn detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a freshly generated board
    Show(show::ShowArgs),
    /// Play interactively from stdin
    Play,
    /// Let the autopilot play consecutive levels
    Autoplay(autoplay::AutoplayArgs),
    /// Run many seeded autopilot games in parallel
    Bench(bench::BenchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Show(args) => show::run(args, config),
        Commands::Play => play::run(config),
        Commands::Autoplay(args) => autoplay::run(args, config),
        Commands::Bench(args) => bench::run(args, config),
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}
