pub mod id;
pub use id::InstructionId;

pub mod width;
pub use width::EncodingWidth;

pub mod operand;
pub use operand::{Operand, OperandClass};

pub mod instruction;
pub use instruction::{Instruction, CONTROL_TRANSFER};

pub mod error_mask;
pub use error_mask::ErrorMask;

pub mod fault;
pub use fault::{Fault, OpcodeEffect, OperandEffects};
