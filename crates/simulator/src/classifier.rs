use types::{ErrorMask, Fault, Instruction, OpcodeEffect, OperandEffects};

use crate::matcher::find_target;

/// Classifies the effect of flipping `mask` in the encoding of `source`.
///
/// STEPS:
/// 1. Corrupt the opcode: `source.opcode ^ mask`.
/// 2. Decode the corrupted word against `candidates` (first match wins).
/// 3. Derive the opcode effect from source and target, see
///    [`opcode_effect`].
/// 4. If the word decodes to something, mark every operand class of the
///    target whose field contains a flipped bit, see [`operand_effects`].
///
/// An illegal result therefore always carries four `false` flags.
pub fn classify(source: &Instruction, mask: ErrorMask, candidates: &[Instruction]) -> Fault {
    let corrupted = mask.apply(source.opcode);
    let target = find_target(corrupted, candidates);

    Fault {
        source: source.id,
        target: target.map(|t| t.id),
        error_mask: mask,
        distance: mask.distance(),
        effect_opcode: opcode_effect(source, target),
        effects: target
            .map(|t| operand_effects(mask, t))
            .unwrap_or_default(),
    }
}

/// Opcode-level effect for a decoded target.
///
/// - no target: [`OpcodeEffect::Illegal`]
/// - target is the source itself: [`OpcodeEffect::Unchanged`]
/// - different target, neither is a control transfer: [`OpcodeEffect::NewOp`]
/// - different target, either is a control transfer: [`OpcodeEffect::CfChange`]
pub fn opcode_effect(source: &Instruction, target: Option<&Instruction>) -> OpcodeEffect {
    match target {
        None => OpcodeEffect::Illegal,
        Some(t) if t.id == source.id => OpcodeEffect::Unchanged,
        Some(t) if source.is_control_transfer() || t.is_control_transfer() => {
            OpcodeEffect::CfChange
        }
        Some(_) => OpcodeEffect::NewOp,
    }
}

/// Operand classes of `target` hit by at least one flipped bit of `mask`.
///
/// The mask is split into single bits and every (bit, operand) pair is
/// checked; overlapping operand fields can mark several classes for one
/// bit.
pub fn operand_effects(mask: ErrorMask, target: &Instruction) -> OperandEffects {
    let mut effects = OperandEffects::default();
    for bit in mask.bits() {
        for operand in target.operands.iter().filter(|o| o.overlaps(bit)) {
            effects.mark(operand.class);
        }
    }
    effects
}
