//! Marble table simulator
//!
//! Usage:
//!   marble-sim run --scenario snap            # Run a scripted scenario
//!   marble-sim run --scenario marbles --json  # Print the report as JSON
//!   marble-sim config --config table.toml     # Print the effective config

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use marble_xr::MarbleConfig;
use marble_xr_app::{run_scenario, Scenario};

#[derive(Parser)]
#[command(name = "marble-sim")]
#[command(about = "Headless simulator for the XR marble table", long_about = None)]
struct Cli {
    /// TOML file with tunables; defaults are used for anything missing
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted scenario
    Run {
        /// snap, rotate, clap or marbles
        #[arg(short, long)]
        scenario: Scenario,

        /// Number of fixed ticks (scenario default if omitted)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective config as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => MarbleConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MarbleConfig::default(),
    };

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            json,
        } => {
            let report = run_scenario(scenario, config, ticks);
            if json {
                let rendered =
                    serde_json::to_string_pretty(&report).context("Failed to encode report")?;
                println!("{rendered}");
            } else {
                println!("{report}");
            }
        }
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config).context("Failed to encode config")?;
            print!("{rendered}");
        }
    }

    Ok(())
}
