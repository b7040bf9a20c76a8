//! Command-line encounter harness.
//!
//! Loads combat content, builds the player from the profile and auto-plays
//! encounters on a seeded stream. Every flag can also come from the
//! environment (or a `.env` file); see [`config::SimConfig`].
//!
//! ```bash
//! # One forest encounter with a fixed seed
//! encounter-sim --seed 42 --zone forest --zone-level 3 run
//!
//! # Win rate against the crypt boss over 500 seeds
//! encounter-sim --zone crypt --zone-level 6 --boss batch --count 500
//! ```

mod commands;
mod config;
mod logging;
mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Batch, Check, Run};
use config::SimConfig;

/// Turn-based combat simulator
#[derive(Parser)]
#[command(name = "encounter-sim")]
#[command(about = "Auto-play combat encounters from the content tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: SimConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play one encounter and print its event log
    Run(Run),

    /// Play many seeded encounters and summarize the outcomes
    Batch(Batch),

    /// Load and validate the content tables
    Check(Check),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::setup_logging(cli.config.verbose)?;

    match cli.command {
        Command::Run(cmd) => cmd.execute(&cli.config),
        Command::Batch(cmd) => cmd.execute(&cli.config),
        Command::Check(cmd) => cmd.execute(&cli.config),
    }
}
