//! Disk Compactor - defragmentation simulator.
//!
//! Decodes a run-length disk map, compacts it under one or more policies and
//! prints the checksum of each final layout.

use anyhow::Context;
use clap::Parser;
use disk_compactor::disk::{load_disk, read_disk, Disk};
use disk_compactor::{engine, CompactionPolicy, PolicyOutcome, RunConfig};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "disk-compactor")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Disk-block compaction simulator",
    long_about = "Decodes a run-length disk map (alternating file and free run lengths), compacts it with the fragmenting and/or whole-file policy, and prints the position-weighted checksum of each result."
)]
struct Cli {
    /// Disk map file (default: stdin, also selected by "-")
    input: Option<PathBuf>,

    /// Compaction policy to apply: fragmenting or whole-file (repeatable, default: both)
    #[arg(long = "policy", value_name = "POLICY")]
    policies: Vec<CompactionPolicy>,

    /// Print the final layout below each checksum
    #[arg(long)]
    render: bool,

    /// Print the outcomes as JSON
    #[arg(long)]
    json: bool,

    /// Fail unless the fragmenting checksum equals this value
    #[arg(long, value_name = "CHECKSUM")]
    expect_fragmenting: Option<u64>,

    /// Fail unless the whole-file checksum equals this value
    #[arg(long, value_name = "CHECKSUM")]
    expect_whole_file: Option<u64>,
}

impl Cli {
    fn expected(&self, policy: CompactionPolicy) -> Option<u64> {
        match policy {
            CompactionPolicy::Fragmenting => self.expect_fragmenting,
            CompactionPolicy::WholeFile => self.expect_whole_file,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let disk = load_input(cli.input.as_deref())?;

    let policies = if cli.policies.is_empty() {
        CompactionPolicy::ALL.to_vec()
    } else {
        cli.policies.clone()
    };
    let config = RunConfig::new(policies, cli.render);
    let outcomes = engine::run_disk(&disk, &config)?;

    if cli.json {
        println!("{}", engine::outcomes_to_json(&outcomes)?);
    } else {
        print_outcomes(&outcomes);
    }

    for outcome in &outcomes {
        if let Some(expected) = cli.expected(outcome.policy) {
            engine::verify(outcome, expected)?;
        }
    }

    Ok(())
}

fn load_input(path: Option<&Path>) -> anyhow::Result<Disk> {
    match path {
        Some(path) if path != Path::new("-") => load_disk(path)
            .with_context(|| format!("failed to load disk map from {}", path.display())),
        _ => read_disk(io::stdin().lock()).context("failed to load disk map from stdin"),
    }
}

fn print_outcomes(outcomes: &[PolicyOutcome]) {
    for outcome in outcomes {
        println!("{}: {}", outcome.policy, outcome.checksum);
        if let Some(layout) = &outcome.layout {
            println!("  {}", layout);
        }
    }
}
