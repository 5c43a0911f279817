use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use types::{Fault, InstructionId};

use crate::{check_batch, FaultStore, StoreError};

/// In-memory fault store.
///
/// Batches are kept in an ordered map keyed by source instruction, so
/// iteration is deterministic regardless of the order workers committed
/// in. The map lives behind a mutex; a batch is inserted while the lock is
/// held, which is what makes the commit atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    batches: Mutex<BTreeMap<InstructionId, Vec<Fault>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recovers a poisoned lock. Every write is a single map insert, so the
    /// map is never left half-updated.
    fn guard(&self) -> MutexGuard<'_, BTreeMap<InstructionId, Vec<Fault>>> {
        self.batches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the batch committed for `source`, if any.
    pub fn batch(&self, source: InstructionId) -> Option<Vec<Fault>> {
        self.guard().get(&source).cloned()
    }

    /// Source instructions with a committed batch, ascending.
    pub fn committed(&self) -> Vec<InstructionId> {
        self.guard().keys().copied().collect()
    }

    /// Total number of fault records across all batches.
    pub fn fault_count(&self) -> usize {
        self.guard().values().map(Vec::len).sum()
    }

    /// Visits every batch in source order while holding the lock.
    pub fn for_each_batch(&self, mut f: impl FnMut(InstructionId, &[Fault])) {
        for (source, batch) in self.guard().iter() {
            f(*source, batch);
        }
    }

    /// Consumes the store and returns every batch.
    pub fn into_batches(self) -> BTreeMap<InstructionId, Vec<Fault>> {
        self.batches
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl FaultStore for MemoryStore {
    fn commit(&self, source: InstructionId, batch: Vec<Fault>) -> Result<(), StoreError> {
        check_batch(source, &batch)?;
        self.guard().insert(source, batch);
        Ok(())
    }
}
