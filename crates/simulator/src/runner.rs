use catalog::ArchCatalog;
use rayon::prelude::*;
use storage::FaultStore;
use types::Instruction;

use std::ops::Range;

use crate::config::SimConfig;
use crate::error::{ConfigError, SimError};
use crate::masks::MaskTable;
use crate::partition::partition_ranges;
use crate::report::{RunSummary, WorkerFailure, WorkerReport};
use crate::simulate::simulate_and_commit;

/// Fork-join driver for one fault calculation run.
///
/// SCHEDULING: a dedicated thread pool with exactly `jobs` threads runs
/// one worker per partition of the catalog. Workers share the catalog and
/// the mask table read-only and never talk to each other; the only shared
/// mutable resource is the store, written one instruction batch at a time.
/// `run` returns once every worker has finished.
pub struct Runner<'a> {
    instructions: &'a [Instruction],
    masks: &'a MaskTable,
    jobs: usize,
}

impl<'a> Runner<'a> {
    pub fn new(instructions: &'a [Instruction], masks: &'a MaskTable, jobs: usize) -> Self {
        Self {
            instructions,
            masks,
            jobs,
        }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Fails with [`ConfigError::ZeroJobs`] before any work starts when the
    /// runner was built with no workers.
    pub fn run<S: FaultStore + ?Sized>(&self, store: &S) -> Result<RunSummary, SimError> {
        if self.jobs == 0 {
            return Err(ConfigError::ZeroJobs.into());
        }
        let ranges = partition_ranges(self.instructions.len(), self.jobs);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("fault-worker-{}", i))
            .build()?;

        tracing::info!(
            instructions = self.instructions.len(),
            workers = self.jobs,
            max_bits = self.masks.limit(),
            "starting fault calculation"
        );

        let outcomes: Vec<Result<WorkerReport, WorkerFailure>> = pool.install(|| {
            ranges
                .into_par_iter()
                .enumerate()
                .map(|(partition, range)| self.run_worker(partition, range, store))
                .collect()
        });

        let mut summary = RunSummary::default();
        for outcome in outcomes {
            match outcome {
                Ok(report) => summary.workers.push(report),
                Err(failure) => summary.failures.push(failure),
            }
        }
        Ok(summary)
    }

    /// Processes one partition in catalog order, committing one batch per
    /// instruction. Stops at the first failed commit.
    fn run_worker<S: FaultStore + ?Sized>(
        &self,
        partition: usize,
        range: Range<usize>,
        store: &S,
    ) -> Result<WorkerReport, WorkerFailure> {
        let mut report = WorkerReport::new(partition, range.clone());
        tracing::debug!(partition, start = range.start, end = range.end, "worker started");

        for insn in &self.instructions[range] {
            tracing::info!("Calculating fault effects for instruction '{}'.", insn.name);
            let masks = self.masks.for_width(insn.bits);
            match simulate_and_commit(insn, self.instructions, masks, store) {
                Ok(counts) => {
                    report.instructions += 1;
                    report.counts += counts;
                }
                Err(error) => {
                    tracing::error!(
                        partition,
                        instruction = %insn.id,
                        name = %insn.name,
                        %error,
                        "commit failed, worker stopping"
                    );
                    return Err(WorkerFailure {
                        report,
                        instruction: insn.id,
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            partition,
            instructions = report.instructions,
            faults = report.counts.faults,
            "worker finished"
        );
        Ok(report)
    }
}

/// Runs a complete calculation for one architecture: builds the mask table
/// once, partitions the catalog over `config.jobs` workers and commits
/// every batch to `store`.
pub fn calculate_faults<S: FaultStore + ?Sized>(
    config: &SimConfig,
    arch: &ArchCatalog,
    store: &S,
) -> Result<RunSummary, SimError> {
    let masks = MaskTable::new(config.max_bits);
    tracing::debug!(
        arch = arch.name(),
        half = masks.for_width(types::EncodingWidth::Half).len(),
        word = masks.for_width(types::EncodingWidth::Word).len(),
        "generated error masks"
    );
    Runner::new(arch.as_slice(), &masks, config.jobs).run(store)
}
