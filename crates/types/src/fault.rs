use serde::{Deserialize, Serialize};

use crate::{ErrorMask, InstructionId, OperandClass};

/// Opcode-level effect of a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpcodeEffect {
    /// The corrupted word decodes to no instruction.
    Illegal,
    /// The corrupted word decodes to a different instruction; control flow
    /// is unaffected.
    #[serde(rename = "newop")]
    NewOp,
    /// The corrupted word decodes to a different instruction and either the
    /// original or the new instruction is a control transfer.
    #[serde(rename = "cfchange")]
    CfChange,
    /// The corrupted word still decodes to the original instruction; only
    /// operand fields changed.
    Unchanged,
}

impl OpcodeEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            OpcodeEffect::Illegal => "illegal",
            OpcodeEffect::NewOp => "newop",
            OpcodeEffect::CfChange => "cfchange",
            OpcodeEffect::Unchanged => "unchanged",
        }
    }
}

/// Operand classes touched by a fault. Each flag only ever goes from
/// `false` to `true` while a fault is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperandEffects {
    pub effect_gpr: bool,
    pub effect_fpr: bool,
    pub effect_csr: bool,
    pub effect_imm: bool,
}

impl OperandEffects {
    pub fn mark(&mut self, class: OperandClass) {
        match class {
            OperandClass::GeneralRegister => self.effect_gpr = true,
            OperandClass::FloatRegister => self.effect_fpr = true,
            OperandClass::ControlStatusRegister => self.effect_csr = true,
            OperandClass::Immediate => self.effect_imm = true,
        }
    }

    pub fn any(&self) -> bool {
        self.effect_gpr || self.effect_fpr || self.effect_csr || self.effect_imm
    }
}

/// Outcome of flipping `error_mask` in the encoding of `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub source: InstructionId,
    /// Instruction the corrupted word decodes to, if any.
    pub target: Option<InstructionId>,
    pub error_mask: ErrorMask,
    pub distance: u32,
    pub effect_opcode: OpcodeEffect,
    #[serde(flatten)]
    pub effects: OperandEffects,
}
