use std::io;
use std::path::PathBuf;

use thiserror::Error;
use types::InstructionId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("batch for instruction {scope} contains a fault of instruction {found}")]
    ForeignFault {
        scope: InstructionId,
        found: InstructionId,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fault batch encoding: {0}")]
    Json(#[from] serde_json::Error),
}
