mod common;

use std::collections::BTreeSet;
use std::sync::Mutex;

use catalog::{ArchCatalog, Catalog};
use common::{control_transfer, demo_catalog_path, insn, with_operand};
use simulator::{calculate_faults, ConfigError, MaskTable, Runner, SimConfig, SimError};
use storage::{DirStore, FaultStore, MemoryStore, StoreError};
use types::{EncodingWidth, Fault, Instruction, InstructionId, OpcodeEffect, OperandClass};

fn toy_catalog(n: u32) -> Vec<Instruction> {
    (0..n)
        .map(|i| {
            let base = insn(i + 1, i << 12, 0xf000);
            let base = with_operand(base, OperandClass::GeneralRegister, 0x0f00);
            if i % 3 == 0 {
                control_transfer(base)
            } else {
                base
            }
        })
        .collect()
}

/// Store that refuses one instruction and records the commit order.
struct FlakyStore {
    inner: MemoryStore,
    refuse: InstructionId,
    order: Mutex<Vec<InstructionId>>,
}

impl FaultStore for FlakyStore {
    fn commit(&self, source: InstructionId, batch: Vec<Fault>) -> Result<(), StoreError> {
        if source == self.refuse {
            return Err(StoreError::Unavailable("constraint violation".to_string()));
        }
        self.order.lock().unwrap().push(source);
        self.inner.commit(source, batch)
    }
}

#[test]
fn every_instruction_is_committed_once() {
    let catalog = toy_catalog(10);
    let masks = MaskTable::new(2);
    let store = MemoryStore::new();

    let summary = Runner::new(&catalog, &masks, 3).run(&store).unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.workers.len(), 3);
    let ranges: Vec<_> = summary.workers.iter().map(|w| w.range.clone()).collect();
    assert_eq!(ranges, vec![0..4, 4..7, 7..10]);

    let expected: Vec<InstructionId> = catalog.iter().map(|i| i.id).collect();
    assert_eq!(store.committed(), expected);

    let per_insn = masks.for_width(EncodingWidth::Half).len();
    assert_eq!(store.fault_count(), 10 * per_insn);
    assert_eq!(summary.instructions(), 10);
    assert_eq!(summary.totals().faults, 10 * per_insn);
}

#[test]
fn totals_agree_with_stored_records() {
    let catalog = toy_catalog(7);
    let masks = MaskTable::new(3);
    let store = MemoryStore::new();
    let summary = Runner::new(&catalog, &masks, 2).run(&store).unwrap();

    let totals = summary.totals();
    let batches = store.into_batches();
    let all: Vec<&Fault> = batches.values().flatten().collect();
    for effect in [
        OpcodeEffect::Illegal,
        OpcodeEffect::NewOp,
        OpcodeEffect::CfChange,
        OpcodeEffect::Unchanged,
    ] {
        let stored = all.iter().filter(|f| f.effect_opcode == effect).count();
        assert_eq!(totals.of(effect), stored, "{:?}", effect);
    }
    assert_eq!(totals.gpr, all.iter().filter(|f| f.effects.effect_gpr).count());
    assert!(totals.cfchange > 0);
    assert!(totals.newop > 0);
    assert!(totals.unchanged > 0);
}

#[test]
fn result_is_independent_of_worker_count() {
    let catalog = toy_catalog(9);
    let masks = MaskTable::new(2);

    let one = MemoryStore::new();
    Runner::new(&catalog, &masks, 1).run(&one).unwrap();
    let many = MemoryStore::new();
    Runner::new(&catalog, &masks, 5).run(&many).unwrap();

    assert_eq!(one.into_batches(), many.into_batches());
}

#[test]
fn more_workers_than_instructions() {
    let catalog = toy_catalog(2);
    let masks = MaskTable::new(1);
    let store = MemoryStore::new();
    let summary = Runner::new(&catalog, &masks, 4).run(&store).unwrap();
    assert_eq!(summary.workers.len(), 4);
    assert_eq!(summary.workers.iter().filter(|w| w.instructions == 0).count(), 2);
    assert_eq!(store.committed().len(), 2);
}

#[test]
fn zero_workers_are_rejected_before_any_commit() {
    let catalog = toy_catalog(4);
    let masks = MaskTable::new(1);
    let store = MemoryStore::new();
    let result = Runner::new(&catalog, &masks, 0).run(&store);
    assert!(matches!(result, Err(SimError::Config(ConfigError::ZeroJobs))));
    assert!(store.committed().is_empty());
}

#[test]
fn worker_reports_serialize_with_ranges_and_counts() {
    let catalog = toy_catalog(5);
    let masks = MaskTable::new(1);
    let store = MemoryStore::new();
    let summary = Runner::new(&catalog, &masks, 2).run(&store).unwrap();

    let reports: Vec<_> = summary.reports().collect();
    let json = serde_json::to_value(&reports).unwrap();
    let first = &json[0];
    assert_eq!(first["partition"], 0);
    assert_eq!(first["range"]["start"], 0);
    assert_eq!(first["range"]["end"], 3);
    assert_eq!(first["instructions"], 3);
    assert_eq!(first["counts"]["faults"], 3 * 16);
    assert_eq!(json[1]["range"]["start"], 3);

    let totals = serde_json::to_value(summary.totals()).unwrap();
    assert_eq!(totals["faults"], 5 * 16);
    let by_effect: u64 = ["illegal", "newop", "cfchange", "unchanged"]
        .iter()
        .map(|k| totals[*k].as_u64().unwrap())
        .sum();
    assert_eq!(by_effect, 5 * 16);
}

#[test]
fn failed_commit_stops_only_that_worker() {
    let catalog = toy_catalog(9);
    let masks = MaskTable::new(1);
    // Partitions of 9 over 3 workers: [1,2,3] [4,5,6] [7,8,9].
    let store = FlakyStore {
        inner: MemoryStore::new(),
        refuse: InstructionId(5),
        order: Mutex::new(Vec::new()),
    };

    let summary = Runner::new(&catalog, &masks, 3).run(&store).unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.failures.len(), 1);
    let failure = &summary.failures[0];
    assert_eq!(failure.report.partition, 1);
    assert_eq!(failure.instruction, InstructionId(5));
    assert_eq!(failure.report.instructions, 1);

    let committed: BTreeSet<u32> = store.inner.committed().iter().map(|i| i.get()).collect();
    assert_eq!(committed, [1, 2, 3, 4, 7, 8, 9].into_iter().collect::<BTreeSet<u32>>());

    // Within one worker, commits follow partition order.
    let order = store.order.lock().unwrap();
    let third: Vec<u32> = order.iter().map(|i| i.get()).filter(|&i| i >= 7).collect();
    assert_eq!(third, vec![7, 8, 9]);
    assert_eq!(summary.instructions(), 7);
}

#[test]
fn demo_catalog_end_to_end_into_directory_store() {
    let catalog = Catalog::open(demo_catalog_path()).unwrap();
    let arch: ArchCatalog = catalog.architecture("rv32imc").unwrap();
    let config = SimConfig::new("rv32imc", Some(4), 1).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::open(dir.path()).unwrap();

    let summary = calculate_faults(&config, &arch, &store).unwrap();
    assert!(summary.is_success());

    let ids: Vec<InstructionId> = arch.iter().map(|i| i.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(store.committed().unwrap(), sorted);

    // addi with bit 12 flipped lands on funct3 = 001 (slli), which this
    // catalog lacks; bit 7 is inside rd.
    let addi = store.load(InstructionId(5)).unwrap().unwrap();
    assert_eq!(addi.len(), 32);
    let bit12 = addi.iter().find(|f| f.error_mask.get() == 1 << 12).unwrap();
    assert_eq!(bit12.effect_opcode, OpcodeEffect::Illegal);
    let bit7 = addi.iter().find(|f| f.error_mask.get() == 1 << 7).unwrap();
    assert_eq!(bit7.effect_opcode, OpcodeEffect::Unchanged);
    assert!(bit7.effects.effect_gpr);

    // add with bit 30 flipped decodes to sub.
    let add = store.load(InstructionId(6)).unwrap().unwrap();
    let bit30 = add.iter().find(|f| f.error_mask.get() == 1 << 30).unwrap();
    assert_eq!(bit30.target, Some(InstructionId(7)));
    assert_eq!(bit30.effect_opcode, OpcodeEffect::NewOp);

    // jal with bit 1 cleared loses the 32-bit marker and decodes as
    // c.addi; jal is a control transfer.
    let jal = store.load(InstructionId(2)).unwrap().unwrap();
    let bit1 = jal.iter().find(|f| f.error_mask.get() == 1 << 1).unwrap();
    assert_eq!(bit1.target, Some(InstructionId(10)));
    assert_eq!(bit1.effect_opcode, OpcodeEffect::CfChange);
    assert!(!bit1.effects.any());

    // c.addi has 16 single-bit faults; bit 2 sits in its immediate.
    let c_addi = store.load(InstructionId(10)).unwrap().unwrap();
    assert_eq!(c_addi.len(), 16);
    let bit2 = c_addi.iter().find(|f| f.error_mask.get() == 1 << 2).unwrap();
    assert_eq!(bit2.effect_opcode, OpcodeEffect::Unchanged);
    assert!(bit2.effects.effect_imm);
}

#[test]
fn config_rejects_out_of_range_values() {
    assert_eq!(SimConfig::new("rv32i", Some(0), 3), Err(ConfigError::ZeroJobs));
    assert_eq!(SimConfig::new("rv32i", Some(1), 0), Err(ConfigError::ZeroBits));
    assert_eq!(SimConfig::new("rv32i", Some(1), 33), Err(ConfigError::TooManyBits(33)));
    assert_eq!(SimConfig::new(" ", Some(1), 3), Err(ConfigError::MissingArch));
    let config = SimConfig::new("rv32i", None, 3).unwrap();
    assert!(config.jobs >= 1);
}
