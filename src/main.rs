//! # Main — CLI Entry Point
//!
//! Routes subcommands to the library:
//!
//! - `nth <INDEX>...`: the prime at each 0-based rank (`--verify`, `--json`).
//! - `sieve --limit L`: every prime up to L, or only their count.
//! - `estimate <INDEX>`: the analytic sieve limit for a rank.
//!
//! ## Global Options
//!
//! - `--config` / `NTHPRIME_CONFIG`: TOML finder configuration.
//! - `--strategy`, `--segment-size`, `--max-limit`, `--threads`: override the
//!   corresponding config keys.
//!
//! Logging goes to stderr; `LOG_FORMAT=json` switches to JSON lines and
//! `RUST_LOG` sets the filter (default `info`).

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use nthprime::SieveStrategy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nthprime",
    about = "Find the n-th prime with an adaptive Sieve of Eratosthenes"
)]
struct Cli {
    /// TOML config file (or set NTHPRIME_CONFIG env var)
    #[arg(long, env = "NTHPRIME_CONFIG")]
    config: Option<PathBuf>,

    /// Sieve strategy: simple, wheel or segmented
    #[arg(long)]
    strategy: Option<SieveStrategy>,

    /// Integers per segment for the segmented strategy
    #[arg(long)]
    segment_size: Option<usize>,

    /// Largest sieve limit a lookup may reach before failing
    #[arg(long)]
    max_limit: Option<u64>,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prime at each 0-based rank (rank 0 = 2)
    Nth {
        /// One or more ranks
        #[arg(required = true, allow_negative_numbers = true)]
        index: Vec<i64>,
        /// Cross-check each result with Miller-Rabin
        #[arg(long)]
        verify: bool,
        /// Emit one JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Print every prime up to a limit
    Sieve {
        /// Upper limit (inclusive)
        #[arg(long)]
        limit: u64,
        /// Print only the number of primes found
        #[arg(long)]
        count: bool,
    },
    /// Print the prime-number-theorem sieve limit for a rank
    Estimate {
        /// Rank (must be at least 2)
        index: u64,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    let config = cli::resolve_config(&cli)?;
    cli::configure_rayon(config.threads);

    match &cli.command {
        Commands::Nth {
            index,
            verify,
            json,
        } => cli::run_nth(&config, index, *verify, *json),
        Commands::Sieve { limit, count } => cli::run_sieve(&config, *limit, *count),
        Commands::Estimate { index } => cli::run_estimate(*index),
    }
}
