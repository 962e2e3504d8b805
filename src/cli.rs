//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim: config resolution,
//! rayon setup, and one function per subcommand.

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use nthprime::{estimate_upper_bound, verify, FinderConfig, PrimeFinder};
use tracing::{info, warn};

use super::Cli;

/// Load the config file (if any), then apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<FinderConfig> {
    let mut config = match &cli.config {
        Some(path) => FinderConfig::load(path)?,
        None => FinderConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if let Some(size) = cli.segment_size {
        config.segment_size = size;
    }
    if let Some(limit) = cli.max_limit {
        config.max_limit = limit;
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }
    config.validate().context("Invalid command-line options")?;
    Ok(config)
}

/// Configure the global rayon pool. `None` or 0 keeps rayon's default of one
/// thread per logical core.
pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}

pub fn run_nth(
    config: &FinderConfig,
    indices: &[i64],
    cross_check: bool,
    json: bool,
) -> Result<()> {
    info!(
        strategy = %config.strategy,
        max_limit = config.max_limit,
        threads = rayon::current_num_threads(),
        "nthprime starting"
    );
    let finder = PrimeFinder::new(config.clone());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for &n in indices {
        let start = std::time::Instant::now();
        let prime = finder.nth(n)?;
        if cross_check {
            // n is non-negative once nth succeeded
            verify::check_nth(n as u64, prime)?;
        }
        info!(
            index = n,
            prime,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lookup complete"
        );
        if json {
            let record =
                serde_json::json!({ "index": n, "prime": prime, "verified": cross_check });
            writeln!(out, "{}", record)?;
        } else {
            writeln!(out, "{}", prime)?;
        }
    }
    Ok(())
}

pub fn run_sieve(config: &FinderConfig, limit: u64, count: bool) -> Result<()> {
    if limit > config.max_limit {
        anyhow::bail!(
            "--limit {} exceeds max_limit {}",
            limit,
            config.max_limit
        );
    }
    let mut out = BufWriter::new(std::io::stdout().lock());
    if count {
        let found = config.strategy.count_up_to(limit, config.segment_size);
        info!(limit, found, strategy = %config.strategy, "count complete");
        writeln!(out, "{}", found)?;
    } else {
        let primes = config.strategy.primes_up_to(limit, config.segment_size);
        info!(limit, found = primes.len(), strategy = %config.strategy, "sieve complete");
        for p in primes {
            writeln!(out, "{}", p)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn run_estimate(index: u64) -> Result<()> {
    let bound = estimate_upper_bound(index).with_context(|| {
        format!(
            "no estimate for rank {}: defined for ranks >= 2 with a result below 2^64",
            index
        )
    })?;
    println!("{}", bound);
    Ok(())
}
