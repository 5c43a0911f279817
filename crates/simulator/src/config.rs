use std::thread;

use crate::error::ConfigError;
use crate::masks::MAX_WIDTH;

/// Maximum fault multiplicity used when none is given.
pub const DEFAULT_MAX_BITS: u32 = 3;

/// Parameters of one fault calculation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Architecture whose catalog is simulated.
    pub arch: String,
    /// Number of parallel workers, one partition each.
    pub jobs: usize,
    /// Maximum number of simultaneously flipped bits.
    pub max_bits: u32,
}

impl SimConfig {
    /// Validates the run parameters. `jobs = None` uses the available
    /// parallelism of the host.
    pub fn new(arch: impl Into<String>, jobs: Option<usize>, max_bits: u32) -> Result<Self, ConfigError> {
        let arch = arch.into();
        if arch.trim().is_empty() {
            return Err(ConfigError::MissingArch);
        }
        let jobs = jobs.unwrap_or_else(default_jobs);
        if jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        if max_bits == 0 {
            return Err(ConfigError::ZeroBits);
        }
        if max_bits > MAX_WIDTH {
            return Err(ConfigError::TooManyBits(max_bits));
        }
        Ok(Self { arch, jobs, max_bits })
    }
}

/// Worker count used when none is configured.
pub fn default_jobs() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
