//! Packforge command-line tool.
//!
//! Usage:
//!   packforge [--catalog <FILE>] <COMMAND>
//!
//! Examples:
//!   packforge init-catalog catalog.json
//!   packforge validate core-booster
//!   packforge price "Premium Booster"
//!   packforge open core-booster --seed 42
//!   packforge simulate core-booster -n 1000 --json

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use packforge::build_info::{BUILD_COMMIT, BUILD_DATE};
use packforge::catalog::Catalog;
use packforge::draw::{allocate, open_pack};
use packforge::rarity::{ensure_savable, validate_configuration};
use packforge::settings::Settings;
use packforge::simulator::{run_simulation, SimConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "packforge")]
#[command(about = "Validate, price and simulate collectible card packs", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PACKFORGE_BUILD_STAMP"), ")"))]
struct Cli {
    /// Catalog JSON file (defaults to the path in settings)
    #[arg(long, global = true, env = "PACKFORGE_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample catalog to get started
    InitCatalog {
        /// Output path
        path: PathBuf,
    },

    /// Check a pack's rarity configuration
    Validate {
        /// Pack id or name
        pack: String,
    },

    /// Show the implied value of one card per rarity
    Price {
        /// Pack id or name
        pack: String,
    },

    /// Open a single pack
    Open {
        /// Pack id or name
        pack: String,

        /// Random seed for a reproducible opening
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Open many packs and report the rarity distribution
    Simulate {
        /// Pack id or name
        pack: String,

        /// Number of packs to open
        #[arg(short = 'n', long)]
        runs: Option<u32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Also save a JSON report
        #[arg(long)]
        json: bool,

        /// Log every opening
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "packforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    debug!(commit = BUILD_COMMIT, date = BUILD_DATE, "Starting packforge");

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable settings: {}", e);
        Settings::default()
    });
    let catalog_path = cli.catalog.unwrap_or_else(|| settings.catalog_path.clone());

    let load_catalog = || {
        Catalog::load(&catalog_path)
            .with_context(|| format!("Failed to load catalog from {}", catalog_path.display()))
    };

    match cli.command {
        Commands::InitCatalog { path } => {
            Catalog::sample()
                .save(&path)
                .with_context(|| format!("Failed to write catalog to {}", path.display()))?;
            println!("Sample catalog written to {}", path.display());
        }
        Commands::Validate { pack } => {
            let catalog = load_catalog()?;
            let pack = catalog.pack(&pack)?;
            let report = validate_configuration(&pack.rarity);
            let breakdown = allocate(&pack.rarity);

            println!("{} ({})", pack.name, pack.id);
            println!(
                "  Slots: {} fixed, {} special, {} basic",
                breakdown.fixed_slots, breakdown.special_slots, breakdown.basic_slots
            );
            println!("  Base total:    {:.4}%", report.base_total * 100.0);
            if pack.rarity.mode.is_advanced() {
                println!("  Special total: {:.4}%", report.special_total * 100.0);
            }
            for message in report.messages() {
                println!("  ⚠️  {}", message);
            }
            if let Err(e) = ensure_savable(&pack.rarity) {
                bail!("Configuration cannot be saved: {}", e);
            }
            println!("  OK");
        }
        Commands::Price { pack } => {
            let catalog = load_catalog()?;
            let pack = catalog.pack(&pack)?;
            println!("{} ({})", pack.name, pack.id);
            print!("{}", catalog.price_table(pack).to_text());
        }
        Commands::Open { pack, seed } => {
            let catalog = load_catalog()?;
            let pack = catalog.pack(&pack)?;
            let pool = catalog.card_pool();
            let mut rng = match seed.or(settings.default_seed) {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_entropy(),
            };

            let opening = open_pack(pack, &pool, &mut rng)?;
            println!("Opened {}:", pack.name);
            for (card_id, count) in &opening.results {
                let name = catalog
                    .card(card_id)
                    .map(|c| format!("{} [{}]", c.name, c.rarity))
                    .unwrap_or_else(|| card_id.clone());
                println!("  {}x {}", count, name);
            }
            if let Some(warning) = opening.warning() {
                println!("⚠️  {}", warning);
            }
        }
        Commands::Simulate {
            pack,
            runs,
            seed,
            json,
            verbose,
        } => {
            let catalog = load_catalog()?;
            let pack = catalog.pack(&pack)?;
            let pool = catalog.card_pool();
            let config = SimConfig {
                num_runs: runs.unwrap_or(settings.default_runs),
                seed: seed.or(settings.default_seed),
                verbosity: if verbose { 2 } else { 1 },
            };

            let report = run_simulation(pack, &pool, &config)?;
            println!("{}", report.to_text());

            if json {
                let filename = format!(
                    "sim_report_{}.json",
                    chrono::Utc::now().format("%Y%m%d_%H%M%S")
                );
                std::fs::write(&filename, report.to_json())
                    .with_context(|| format!("Failed to write {}", filename))?;
                println!("JSON report saved to: {}", filename);
            }
        }
    }

    Ok(())
}
