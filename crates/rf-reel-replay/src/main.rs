//! Reel Replay: audit tool for rf-reel-math paytables
//!
//! Usage:
//!   reel-replay <paytable> spin --seed 42          - Spin once from a seed
//!   reel-replay <paytable> replay --stops 1,14,23  - Rebuild a recorded spin
//!   reel-replay <paytable> simulate --spins 100000 - Batch statistics

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use rf_reel_math::{PaytableLoader, ReelSet, RngStops, replay, simulate, spin};

#[derive(Parser)]
#[command(name = "reel-replay", about = "Replay and audit slot spins")]
struct Cli {
    /// Paytable document (.json, .yaml or .yml)
    paytable: PathBuf,

    /// Use the free games reels instead of the base reels
    #[arg(long, global = true)]
    free_games: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin once with stops drawn from a seeded generator
    Spin {
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
    /// Rebuild the outcome of recorded stops
    Replay {
        /// Comma-separated stops, one per reel
        #[arg(short = 'S', long, value_delimiter = ',', required = true)]
        stops: Vec<usize>,
    },
    /// Run a batch of seeded spins and report statistics
    Simulate {
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(short = 'n', long, default_value_t = 10_000)]
        spins: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let paytable = PaytableLoader::new()
        .from_path(&cli.paytable)
        .with_context(|| format!("loading paytable {}", cli.paytable.display()))?;
    let reel_set = if cli.free_games {
        ReelSet::FreeGames
    } else {
        ReelSet::Base
    };

    match cli.command {
        Commands::Spin { seed } => {
            log::info!("Spinning {:?} reels with seed {}", reel_set, seed);
            let outcome = spin(&paytable, reel_set, &mut RngStops::seeded(seed))?;
            print_json(&outcome, cli.pretty)
        }
        Commands::Replay { stops } => {
            log::info!("Replaying stops {:?} on {:?} reels", stops, reel_set);
            let outcome = replay(&paytable, reel_set, &stops)?;
            print_json(&outcome, cli.pretty)
        }
        Commands::Simulate { seed, spins } => {
            let report = simulate(&paytable, reel_set, seed, spins)?;
            print_json(&report, cli.pretty)
        }
    }
}

fn print_json(value: &impl Serialize, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
