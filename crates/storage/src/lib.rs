//! Fault result stores.
//!
//! A store receives one batch of [`Fault`] records per source instruction.
//! The batch is the unit of atomicity: after `commit` returns either every
//! record of the batch is visible or none is. Batches from different
//! workers may arrive in any order.

pub mod error;
pub mod memory;
pub mod dir;

pub use dir::DirStore;
pub use error::StoreError;
pub use memory::MemoryStore;

use types::{Fault, InstructionId};

/// Persistent destination for fault batches.
///
/// Implementations must be safe to share between worker threads; each
/// `commit` call is one instruction-scoped transaction.
pub trait FaultStore: Send + Sync {
    /// Atomically stores the fault batch of `source`, replacing any batch
    /// previously committed for it.
    ///
    /// Every fault in `batch` must name `source` as its source instruction;
    /// otherwise the whole batch is rejected.
    fn commit(&self, source: InstructionId, batch: Vec<Fault>) -> Result<(), StoreError>;
}

impl<S: FaultStore + ?Sized> FaultStore for &S {
    fn commit(&self, source: InstructionId, batch: Vec<Fault>) -> Result<(), StoreError> {
        (**self).commit(source, batch)
    }
}

/// Checks that a batch only contains faults of `source`.
pub fn check_batch(source: InstructionId, batch: &[Fault]) -> Result<(), StoreError> {
    match batch.iter().find(|f| f.source != source) {
        Some(f) => Err(StoreError::ForeignFault {
            scope: source,
            found: f.source,
        }),
        None => Ok(()),
    }
}
