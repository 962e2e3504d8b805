//! Finder configuration: TOML parsing, defaults, and validation.
//!
//! Every field is optional in the file; a missing key takes the default.
//!
//! ```toml
//! strategy = "segmented"   # simple | wheel | segmented
//! segment_size = 262144    # integers per segment (segmented only)
//! max_limit = 4294967296
//! threads = 8              # rayon pool size, omit for all cores
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::segmented::{DEFAULT_SEGMENT_SIZE, MIN_SEGMENT_SIZE};
use crate::sieve::SieveStrategy;

/// Largest sieve limit a lookup may reach unless configured otherwise (2^32).
///
/// At this limit the simple strategy holds 4 GiB of marks plus ~1.6 GiB of
/// primes; wheel and segmented stay well below that.
pub const DEFAULT_MAX_LIMIT: u64 = 1 << 32;

/// Smallest accepted `max_limit`: the largest small-table prime.
pub const MIN_MAX_LIMIT: u64 = 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinderConfig {
    pub strategy: SieveStrategy,
    pub segment_size: usize,
    /// Lookups needing a sieve limit above this fail with `OutOfRange`.
    pub max_limit: u64,
    pub threads: Option<usize>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            strategy: SieveStrategy::default(),
            segment_size: DEFAULT_SEGMENT_SIZE,
            max_limit: DEFAULT_MAX_LIMIT,
            threads: None,
        }
    }
}

impl FinderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: FinderConfig = toml::from_str(s).context("Failed to parse finder config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.segment_size < MIN_SEGMENT_SIZE {
            anyhow::bail!(
                "segment_size must be at least {} (got {})",
                MIN_SEGMENT_SIZE,
                self.segment_size
            );
        }
        if self.max_limit < MIN_MAX_LIMIT {
            anyhow::bail!(
                "max_limit must be at least {} (got {})",
                MIN_MAX_LIMIT,
                self.max_limit
            );
        }
        Ok(())
    }
}
