use std::ops::{Add, AddAssign, Range};

use serde::Serialize;
use storage::StoreError;
use types::{Fault, InstructionId, OpcodeEffect};

/// Tally of fault classifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EffectCounts {
    pub faults: usize,
    pub illegal: usize,
    pub newop: usize,
    pub cfchange: usize,
    pub unchanged: usize,
    pub gpr: usize,
    pub fpr: usize,
    pub csr: usize,
    pub imm: usize,
}

impl EffectCounts {
    pub fn from_faults<'a>(faults: impl IntoIterator<Item = &'a Fault>) -> Self {
        let mut counts = Self::default();
        for f in faults {
            counts.record(f);
        }
        counts
    }

    pub fn record(&mut self, fault: &Fault) {
        self.faults += 1;
        match fault.effect_opcode {
            OpcodeEffect::Illegal => self.illegal += 1,
            OpcodeEffect::NewOp => self.newop += 1,
            OpcodeEffect::CfChange => self.cfchange += 1,
            OpcodeEffect::Unchanged => self.unchanged += 1,
        }
        let e = &fault.effects;
        self.gpr += e.effect_gpr as usize;
        self.fpr += e.effect_fpr as usize;
        self.csr += e.effect_csr as usize;
        self.imm += e.effect_imm as usize;
    }

    pub fn of(&self, effect: OpcodeEffect) -> usize {
        match effect {
            OpcodeEffect::Illegal => self.illegal,
            OpcodeEffect::NewOp => self.newop,
            OpcodeEffect::CfChange => self.cfchange,
            OpcodeEffect::Unchanged => self.unchanged,
        }
    }
}

impl AddAssign for EffectCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.faults += rhs.faults;
        self.illegal += rhs.illegal;
        self.newop += rhs.newop;
        self.cfchange += rhs.cfchange;
        self.unchanged += rhs.unchanged;
        self.gpr += rhs.gpr;
        self.fpr += rhs.fpr;
        self.csr += rhs.csr;
        self.imm += rhs.imm;
    }
}

impl Add for EffectCounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

/// Progress of one worker: which slice of the catalog it owned and what it
/// committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub partition: usize,
    pub range: Range<usize>,
    /// Instructions whose batch was committed.
    pub instructions: usize,
    pub counts: EffectCounts,
}

impl WorkerReport {
    pub fn new(partition: usize, range: Range<usize>) -> Self {
        Self {
            partition,
            range,
            instructions: 0,
            counts: EffectCounts::default(),
        }
    }
}

/// A worker that stopped on a failed commit. `report` covers the
/// instructions committed before the failure.
#[derive(Debug)]
pub struct WorkerFailure {
    pub report: WorkerReport,
    pub instruction: InstructionId,
    pub error: StoreError,
}

/// Aggregated outcome of one run, in partition order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub workers: Vec<WorkerReport>,
    pub failures: Vec<WorkerFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Reports of every worker, failed ones included, in partition order.
    pub fn reports(&self) -> impl Iterator<Item = &WorkerReport> {
        let mut all: Vec<&WorkerReport> = self
            .workers
            .iter()
            .chain(self.failures.iter().map(|f| &f.report))
            .collect();
        all.sort_by_key(|r| r.partition);
        all.into_iter()
    }

    pub fn instructions(&self) -> usize {
        self.reports().map(|r| r.instructions).sum()
    }

    pub fn totals(&self) -> EffectCounts {
        self.reports()
            .fold(EffectCounts::default(), |acc, r| acc + r.counts)
    }
}
