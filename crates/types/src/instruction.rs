use serde::{Deserialize, Serialize};

use crate::{EncodingWidth, InstructionId, Operand};

/// Tag carried by instructions that alter control flow (branches, jumps,
/// calls, returns).
pub const CONTROL_TRANSFER: &str = "control-transfer";

/// Static description of one instruction encoding.
///
/// ENCODING MODEL: an instruction word `w` decodes to this instruction when
/// `w & mask == opcode`. The mask covers the fixed fields (major opcode,
/// funct3, funct7, ...); operand fields are left out of the mask and are
/// described separately by [`Operand`] masks.
///
/// INVARIANT: `opcode & mask == opcode`. Bits of `opcode` outside `mask`
/// would make the instruction unmatchable, so the catalog rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: InstructionId,
    pub name: String,
    /// Extension or subset the instruction belongs to (e.g. `rv32i`).
    #[serde(default)]
    pub subset: String,
    pub bits: EncodingWidth,
    pub opcode: u32,
    pub mask: u32,
    /// Behavioral tags such as [`CONTROL_TRANSFER`].
    #[serde(default)]
    pub kind: Vec<String>,
    #[serde(default)]
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// True if `word` decodes to this instruction.
    pub fn matches(&self, word: u32) -> bool {
        word & self.mask == self.opcode
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.kind.iter().any(|k| k == tag)
    }

    pub fn is_control_transfer(&self) -> bool {
        self.has_tag(CONTROL_TRANSFER)
    }

    /// True if `opcode` carries no bits outside `mask`.
    pub fn opcode_within_mask(&self) -> bool {
        self.opcode & self.mask == self.opcode
    }
}
