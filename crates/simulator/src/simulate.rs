use storage::{FaultStore, StoreError};
use types::{ErrorMask, Fault, Instruction};

use crate::classifier::classify;
use crate::report::EffectCounts;

/// Classifies every error mask against one source instruction.
///
/// The batch has one fault per mask, in the order of `masks`.
pub fn simulate_faults(
    source: &Instruction,
    candidates: &[Instruction],
    masks: &[ErrorMask],
) -> Vec<Fault> {
    masks
        .iter()
        .map(|&mask| classify(source, mask, candidates))
        .collect()
}

/// Simulates `source` and commits the resulting batch as one transaction.
///
/// Nothing is written until the whole batch has been built; the store then
/// makes it visible all at once. On a store error the batch is dropped.
pub fn simulate_and_commit<S: FaultStore + ?Sized>(
    source: &Instruction,
    candidates: &[Instruction],
    masks: &[ErrorMask],
    store: &S,
) -> Result<EffectCounts, StoreError> {
    let batch = simulate_faults(source, candidates, masks);
    let counts = EffectCounts::from_faults(&batch);
    store.commit(source.id, batch)?;
    Ok(counts)
}
