use core::fmt;

use serde::{Deserialize, Serialize};

/// Catalog-wide identity of an instruction.
///
/// Two instructions are the same instruction if and only if their ids are
/// equal; names are for display only and may repeat across subsets.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionId(pub u32);

impl InstructionId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for InstructionId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
