#![allow(dead_code)]

use std::path::PathBuf;

use types::{EncodingWidth, Instruction, InstructionId, Operand, OperandClass, CONTROL_TRANSFER};

pub fn insn(id: u32, opcode: u32, mask: u32) -> Instruction {
    Instruction {
        id: InstructionId(id),
        name: format!("i{}", id),
        subset: "test".to_string(),
        bits: EncodingWidth::Half,
        opcode,
        mask,
        kind: Vec::new(),
        operands: Vec::new(),
    }
}

pub fn control_transfer(mut i: Instruction) -> Instruction {
    i.kind.push(CONTROL_TRANSFER.to_string());
    i
}

pub fn with_operand(mut i: Instruction, class: OperandClass, mask: u32) -> Instruction {
    i.operands.push(Operand::new(class, mask));
    i
}

pub fn demo_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/rv32imc.json")
}
