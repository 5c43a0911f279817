use std::collections::HashMap;
use std::ops::Range;

use types::{Instruction, InstructionId};

/// Ordered instruction list of a single architecture.
///
/// Iteration order is fixed at construction and never changes, so a count
/// taken once and ranges computed from it stay valid for the whole run.
#[derive(Debug, Clone)]
pub struct ArchCatalog {
    name: String,
    instructions: Vec<Instruction>,
    by_id: HashMap<InstructionId, usize>,
}

impl ArchCatalog {
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        let by_id = instructions
            .iter()
            .enumerate()
            .map(|(i, insn)| (insn.id, i))
            .collect();
        Self {
            name: name.into(),
            instructions,
            by_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Contiguous sub-range in catalog order. Out-of-range bounds are
    /// clamped to the catalog length.
    pub fn slice(&self, range: Range<usize>) -> &[Instruction] {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        &self.instructions[start..end]
    }

    pub fn get(&self, id: InstructionId) -> Option<&Instruction> {
        self.by_id.get(&id).map(|&i| &self.instructions[i])
    }
}

impl<'a> IntoIterator for &'a ArchCatalog {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
