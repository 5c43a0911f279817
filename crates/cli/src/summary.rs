use colored::*;
use serde_json::{json, Value};
use simulator::{EffectCounts, RunSummary, SimConfig};
use types::OpcodeEffect;

const EFFECTS: [OpcodeEffect; 4] = [
    OpcodeEffect::Illegal,
    OpcodeEffect::NewOp,
    OpcodeEffect::CfChange,
    OpcodeEffect::Unchanged,
];

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub fn print_text(config: &SimConfig, summary: &RunSummary) {
    let totals = summary.totals();

    println!();
    println!("{}", "=====================================".blue());
    println!("{}", format!("Fault summary: {}", config.arch).bold().green());
    println!("{}", "=====================================".blue());

    for report in summary.reports() {
        println!(
            "  worker {:>3}: instructions {:>5}..{:<5} committed {:>5}, faults {:>8}",
            report.partition,
            report.range.start,
            report.range.end,
            report.instructions,
            report.counts.faults
        );
    }
    for failure in &summary.failures {
        println!(
            "  {} worker {} stopped at instruction {}: {}",
            "FAILED".red().bold(),
            failure.report.partition,
            failure.instruction,
            failure.error
        );
    }

    println!();
    println!("  {}", "Totals:".bold());
    println!("    Instructions: {}", summary.instructions());
    println!("    Faults (1..={} bits): {}", config.max_bits, totals.faults);
    print_effects(&totals);

    println!();
    if summary.is_success() {
        println!("  {}", "All partitions committed".green());
    } else {
        println!(
            "  {}",
            format!("{} worker(s) failed", summary.failures.len()).red()
        );
    }
}

fn print_effects(totals: &EffectCounts) {
    for effect in EFFECTS {
        let n = totals.of(effect);
        let padded = format!("{:<10}", effect.as_str());
        let label = match effect {
            OpcodeEffect::Illegal => padded.red(),
            OpcodeEffect::CfChange => padded.yellow(),
            _ => padded.normal(),
        };
        println!(
            "    {} {:>10} ({:.1}%)",
            label,
            n,
            percent(n, totals.faults)
        );
    }
    for (name, n) in [
        ("gpr", totals.gpr),
        ("fpr", totals.fpr),
        ("csr", totals.csr),
        ("imm", totals.imm),
    ] {
        println!("    {:<10} {:>10} ({:.1}%)", name, n, percent(n, totals.faults));
    }
}

pub fn to_json(config: &SimConfig, summary: &RunSummary) -> Value {
    let failures: Vec<Value> = summary
        .failures
        .iter()
        .map(|f| {
            json!({
                "partition": f.report.partition,
                "instruction": f.instruction,
                "error": f.error.to_string(),
                "report": f.report,
            })
        })
        .collect();

    json!({
        "arch": config.arch,
        "jobs": config.jobs,
        "max_bits": config.max_bits,
        "instructions": summary.instructions(),
        "totals": summary.totals(),
        "workers": summary.workers,
        "failures": failures,
    })
}
