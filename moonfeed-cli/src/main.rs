//! Moonfeed CLI — fetch and generate commands.
//!
//! Commands:
//! - `fetch` — run an asset through the provider fallback chain and print
//!   the resulting series with its provenance notice
//! - `generate` — produce a synthetic series directly, optionally seeded

use anyhow::Result;
use clap::{Parser, Subcommand};
use moonfeed_core::config::FeedConfig;
use moonfeed_core::data::{ProviderHealth, SourceSelector, SyntheticGenerator};
use moonfeed_core::domain::{Asset, PriceSeries};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "moonfeed",
    about = "Moonfeed CLI — crypto price history with fallback and synthetic demo data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily price history through the provider fallback chain.
    Fetch {
        /// Asset name, ticker, or symbol (e.g. bitcoin, ETH, SOLUSDT).
        asset: String,

        /// Number of trailing daily points to request.
        #[arg(long, default_value_t = 30)]
        limit: usize,

        /// Path to a TOML feed config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Offline mode: skip all live providers and go straight to
        /// synthetic data.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Emit the full result as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate a synthetic series without touching the network.
    Generate {
        /// Asset name, ticker, or symbol.
        asset: String,

        /// Number of trailing daily points to generate.
        #[arg(long, default_value_t = 30)]
        limit: usize,

        /// RNG seed for a reproducible series.
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the series as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch {
            asset,
            limit,
            config,
            offline,
            json,
        } => run_fetch(&asset, limit, config, offline, json),
        Commands::Generate {
            asset,
            limit,
            seed,
            json,
        } => run_generate(&asset, limit, seed, json),
    }
}

fn run_fetch(
    asset: &str,
    limit: usize,
    config_path: Option<PathBuf>,
    offline: bool,
    json: bool,
) -> Result<()> {
    let asset: Asset = asset.parse()?;

    let mut config = match config_path {
        Some(path) => FeedConfig::from_toml_file(&path)?,
        None => FeedConfig::default(),
    };
    if offline {
        // An empty chain exhausts immediately, forcing the synthetic path.
        config.providers.clear();
    }

    let health = Arc::new(ProviderHealth::new());
    let selector = SourceSelector::from_config(&config, health);
    let result = selector.fetch(asset, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_series(&result.candles);
    println!();
    println!(
        "{} ({} points from '{}')",
        result.provenance.notice(),
        result.candles.len(),
        result.provider
    );
    Ok(())
}

fn run_generate(asset: &str, limit: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let asset: Asset = asset.parse()?;
    let generator = SyntheticGenerator::default();

    let series = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generator.generate_with_rng(asset, limit, &mut rng)
        }
        None => generator.generate(asset, limit),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    print_series(&series);
    println!();
    println!("Generated {} synthetic points for {asset}", series.len());
    Ok(())
}

fn print_series(candles: &PriceSeries) {
    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>14} {:>8}",
        "date", "open", "high", "low", "close", "volume", "chg%"
    );
    for (i, candle) in candles.iter().enumerate() {
        let change = if i == 0 {
            0.0
        } else {
            candle.change_pct(candles[i - 1].close)
        };
        println!(
            "{:<12} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.0} {:>8.2}",
            candle.date, candle.open, candle.high, candle.low, candle.close, candle.volume, change
        );
    }
}
