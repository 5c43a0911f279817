pub mod config;
pub mod error;
pub mod masks;
pub mod matcher;
pub mod classifier;
pub mod simulate;
pub mod partition;
pub mod report;
pub mod runner;

pub use classifier::classify;
pub use config::SimConfig;
pub use error::{ConfigError, SimError};
pub use masks::{error_masks, masks_for, MaskTable};
pub use matcher::find_target;
pub use partition::{partition_range, partition_ranges, split};
pub use report::{EffectCounts, RunSummary, WorkerFailure, WorkerReport};
pub use runner::{calculate_faults, Runner};
pub use simulate::{simulate_and_commit, simulate_faults};
