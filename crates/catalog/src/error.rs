use std::io;
use std::path::PathBuf;

use thiserror::Error;
use types::InstructionId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown architecture '{0}'")]
    UnknownArchitecture(String),

    #[error("architecture '{0}' has no instructions")]
    NoInstructions(String),

    #[error("duplicate instruction id {0}")]
    DuplicateId(InstructionId),

    #[error("instruction '{name}' ({id}): opcode {opcode:#x} has bits outside mask {mask:#x}")]
    OpcodeOutsideMask {
        id: InstructionId,
        name: String,
        opcode: u32,
        mask: u32,
    },

    #[error("instruction '{name}' ({id}): {what} {value:#x} exceeds the {width} encoding")]
    OutsideWidth {
        id: InstructionId,
        name: String,
        what: &'static str,
        value: u32,
        width: types::EncodingWidth,
    },
}
