use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use simulator::config::DEFAULT_MAX_BITS;
use simulator::{calculate_faults, RunSummary, SimConfig};
use storage::{DirStore, FaultStore, MemoryStore};

mod summary;

/// Calculates the effect of single- and multi-bit faults on every
/// instruction encoding of an architecture
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Architecture to simulate
    #[arg(short, long)]
    arch: String,

    /// Path to the instruction catalog (JSON)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Number of parallel workers (default: available parallelism)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Maximum number of simultaneously flipped bits
    #[arg(short, long, default_value_t = DEFAULT_MAX_BITS)]
    bits: u32,

    /// Directory receiving one fault batch per instruction; without it
    /// results are kept in memory and only the summary is printed
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(summary) if summary.is_success() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<RunSummary> {
    let args = Args::parse();

    // Everything that can be misconfigured is checked before any worker
    // starts.
    let config = SimConfig::new(&args.arch, args.jobs, args.bits).context("invalid arguments")?;
    let catalog = Catalog::open(&args.catalog)
        .with_context(|| format!("failed to load catalog {}", args.catalog.display()))?;
    let arch = catalog.architecture(&config.arch)?;

    tracing::info!(
        arch = %config.arch,
        instructions = arch.len(),
        jobs = config.jobs,
        bits = config.max_bits,
        "Creating faults..."
    );

    let summary = match &args.out {
        Some(dir) => {
            let store = DirStore::open(dir)
                .with_context(|| format!("failed to open output directory {}", dir.display()))?;
            execute(&config, &arch, &store)?
        }
        None => execute(&config, &arch, &MemoryStore::new())?,
    };

    match args.format {
        Format::Text => summary::print_text(&config, &summary),
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary::to_json(&config, &summary))?),
    }
    Ok(summary)
}

fn execute<S: FaultStore>(
    config: &SimConfig,
    arch: &catalog::ArchCatalog,
    store: &S,
) -> Result<RunSummary> {
    calculate_faults(config, arch, store).context("fault calculation failed")
}
