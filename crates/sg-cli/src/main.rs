//! Scratch Game: play one round from the command line
//!
//! Usage:
//!   scratch-game --config demos/config.json --betting-amount 100
//!   scratch-game --config demos/config.yaml --betting-amount 5 --seed 42 --compact
//!
//! The round result is printed as JSON on stdout. Set `RUST_LOG=debug` to
//! trace grid generation and win evaluation on stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sg_engine::{GameConfig, RulesModel, play_round};

#[derive(Parser)]
#[command(name = "scratch-game", about = "Play a single scratch card round", version)]
struct Cli {
    /// Rules document (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, value_name = "FILE")]
    config: PathBuf,

    /// Bet for this round (positive integer)
    #[arg(long, value_name = "AMOUNT", value_parser = clap::value_parser!(u64).range(1..))]
    betting_amount: u64,

    /// Seed for a reproducible round (OS entropy otherwise)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = GameConfig::load(&cli.config)
        .with_context(|| format!("Failed to load rules from {}", cli.config.display()))?;
    let rules = RulesModel::prepare(&config)
        .with_context(|| format!("Invalid rules in {}", cli.config.display()))?;

    let mut rng = match cli.seed {
        Some(seed) => {
            log::info!("Seeding round with {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_os_rng(),
    };

    let result = play_round(&rules, cli.betting_amount, &mut rng).context("Round failed")?;

    let output = if cli.compact {
        result.to_json()
    } else {
        result.to_json_pretty()
    }
    .context("Failed to serialize round result")?;

    println!("{output}");
    Ok(())
}
