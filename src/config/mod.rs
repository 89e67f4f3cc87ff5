//! Configuration management for forkjoin
//!
//! Settings are layered with figment: the embedded `default-config.toml`, then the
//! user config, the repository config, an explicit `--config` file, `FORKJOIN_*`
//! environment variables and finally command-line overrides.

use serde::{Deserialize, Serialize};

use crate::error::{ForkJoinError, Result};
use crate::parallel::PoolConfig;
use crate::reduce::WordCountConfig;
use crate::sequence;
use crate::task::Threshold;

pub mod core;
pub mod overrides;
pub mod smart_load;

pub use self::core::ForkJoinConfig;

/// Fully merged, typed configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Worker pool sizing
    pub pool: PoolConfig,

    /// Fork/join summation workload
    pub sum: SumConfig,

    /// Parallel word count tuning
    pub word_count: WordCountConfig,

    /// Performance harness
    pub bench: BenchConfig,
}

/// Summation workload configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SumConfig {
    /// Sum the natural numbers `1..=n`
    pub n: u64,

    /// Ranges at or below this size are summed sequentially
    pub threshold: usize,
}

/// Performance harness configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Runs per strategy; the fastest is reported
    pub runs: usize,
}

impl Default for SumConfig {
    fn default() -> Self {
        Self {
            n: 10_000_000,
            threshold: 10_000,
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { runs: 10 }
    }
}

impl Settings {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.pool.validate()?;

        Threshold::new(self.sum.threshold)?;
        if self.sum.n > i64::MAX as u64 {
            return Err(ForkJoinError::InvalidConfig(format!(
                "sum.n must not exceed {}, got {}",
                i64::MAX,
                self.sum.n
            )));
        }

        sequence::check_min_split(self.word_count.min_split)?;
        Threshold::new(self.word_count.threshold)?;

        if self.bench.runs == 0 {
            return Err(ForkJoinError::InvalidConfig(
                "bench.runs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
