use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use types::Instruction;

use crate::{ArchCatalog, CatalogError};

/// Instruction catalog covering one or more architectures.
///
/// STRUCTURE: architecture → subsets → instructions. The order of subsets
/// and of instructions inside each subset is preserved exactly as read;
/// it is the canonical order used for opcode matching and partitioning.
///
/// FORMAT (JSON):
/// ```json
/// { "architectures": [ { "name": "rv32imc", "subsets": [
///     { "name": "rv32i", "instructions": [
///         { "id": 1, "name": "addi", "bits": 32, "opcode": 19, "mask": 28799,
///           "kind": [], "operands": [ { "optype": "gpr", "mask": 3968 } ] } ] } ] } ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub architectures: Vec<Architecture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    pub name: String,
    #[serde(default)]
    pub subsets: Vec<Subset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subset {
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

impl Catalog {
    /// Reads and validates a catalog file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog = text.parse()?;
        tracing::debug!(
            path = %path.display(),
            architectures = catalog.architectures.len(),
            "loaded instruction catalog"
        );
        Ok(catalog)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_reader(reader)?;
        catalog.normalize();
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn architecture_names(&self) -> impl Iterator<Item = &str> {
        self.architectures.iter().map(|a| a.name.as_str())
    }

    /// Returns the ordered instruction list of one architecture.
    ///
    /// An unknown name, or an architecture without any instruction, is an
    /// error: there is nothing to simulate.
    pub fn architecture(&self, name: &str) -> Result<ArchCatalog, CatalogError> {
        let arch = self
            .architectures
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| CatalogError::UnknownArchitecture(name.to_string()))?;

        let instructions: Vec<Instruction> = arch
            .subsets
            .iter()
            .flat_map(|s| s.instructions.iter().cloned())
            .collect();

        if instructions.is_empty() {
            return Err(CatalogError::NoInstructions(name.to_string()));
        }
        Ok(ArchCatalog::new(arch.name.clone(), instructions))
    }

    /// Fills in each instruction's subset name from its enclosing subset
    /// when the instruction does not carry one.
    fn normalize(&mut self) {
        for arch in &mut self.architectures {
            for subset in &mut arch.subsets {
                for insn in &mut subset.instructions {
                    if insn.subset.is_empty() {
                        insn.subset = subset.name.clone();
                    }
                }
            }
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for insn in self
            .architectures
            .iter()
            .flat_map(|a| a.subsets.iter())
            .flat_map(|s| s.instructions.iter())
        {
            if !seen.insert(insn.id) {
                return Err(CatalogError::DuplicateId(insn.id));
            }
            validate_instruction(insn)?;
        }
        Ok(())
    }
}

impl FromStr for Catalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

fn validate_instruction(insn: &Instruction) -> Result<(), CatalogError> {
    let full = insn.bits.full_mask();
    let outside = |what: &'static str, value: u32| CatalogError::OutsideWidth {
        id: insn.id,
        name: insn.name.clone(),
        what,
        value,
        width: insn.bits,
    };

    if !insn.opcode_within_mask() {
        return Err(CatalogError::OpcodeOutsideMask {
            id: insn.id,
            name: insn.name.clone(),
            opcode: insn.opcode,
            mask: insn.mask,
        });
    }
    if insn.mask & !full != 0 {
        return Err(outside("mask", insn.mask));
    }
    for op in &insn.operands {
        if op.mask & !full != 0 {
            return Err(outside("operand mask", op.mask));
        }
    }
    Ok(())
}
