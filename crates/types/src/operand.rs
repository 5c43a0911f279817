use serde::{Deserialize, Serialize};

/// Category of an operand field inside an instruction encoding.
///
/// Catalogs name the class with a short tag (`gpr`, `fpr`, `csr`). Every
/// tag that is not one of the three register classes is read as
/// [`OperandClass::Immediate`], which covers immediates, offsets, shift
/// amounts, rounding modes and any other non-register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandClass {
    /// General purpose integer register (x0-x31).
    #[serde(rename = "gpr")]
    GeneralRegister,
    /// Floating point register (f0-f31).
    #[serde(rename = "fpr")]
    FloatRegister,
    /// Control and status register address.
    #[serde(rename = "csr")]
    ControlStatusRegister,
    /// Immediate or any other field.
    #[serde(rename = "imm", other)]
    Immediate,
}

/// One operand field of an instruction: its class and the encoding bits it
/// occupies. Operand masks of one instruction may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    #[serde(rename = "optype")]
    pub class: OperandClass,
    pub mask: u32,
}

impl Operand {
    pub fn new(class: OperandClass, mask: u32) -> Self {
        Self { class, mask }
    }

    /// True if any bit of `bits` falls inside this operand's field.
    pub fn overlaps(&self, bits: u32) -> bool {
        bits & self.mask != 0
    }
}
