use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use schema_drift::catalogue;
use schema_drift::fetch::{ApiConfig, HttpFetcher};
use schema_drift::runner::{EndpointReport, Outcome, Runner};
use schema_drift::snapshot::DirStore;
use schema_drift::{FieldError, PathEntry};

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum Mode {
    /// Diff each response against the previously captured snapshot
    Snapshot,
    /// Validate each response against its declared contract
    Contract,
}

/// Walk the endpoint catalogue and report schema drift
#[derive(Parser)]
#[clap(about, version)]
struct Args {
    /// Diff strategy
    #[clap(long, value_enum, default_value = "snapshot")]
    mode: Mode,
    /// Base URL of the API
    #[clap(long, default_value = "https://api.themoviedb.org/3/")]
    base_url: String,
    /// API key injected into every request
    #[clap(long)]
    api_key: String,
    /// Directory holding captured snapshots
    #[clap(long, default_value = "responses")]
    snapshot_dir: PathBuf,
    /// Per-request timeout in seconds
    #[clap(long, default_value_t = 30)]
    timeout: u64,
}

fn main() -> Result<ExitCode, anyhow::Error> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = ApiConfig {
        base_url: args.base_url,
        api_key: args.api_key,
        timeout: Duration::from_secs(args.timeout),
    };

    let fetcher = HttpFetcher::new(config).context("failed to build HTTP client")?;
    let store = DirStore::new(&args.snapshot_dir);
    let runner = Runner::new(fetcher, store);
    let endpoints = catalogue::endpoints();

    let reports = match args.mode {
        Mode::Snapshot => runner.run_snapshot(&endpoints),
        Mode::Contract => runner.run_contract(&endpoints),
    };

    let mut clean = true;
    for report in &reports {
        print_report(report);
        println!();
        clean &= report.outcome.is_clean();
    }

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &EndpointReport) {
    let descriptor = &report.descriptor;
    match descriptor.shape {
        Some(shape) => println!(
            "Processing {} {} (expecting {shape})",
            descriptor.method, descriptor.path
        ),
        None => println!("Processing {} {}", descriptor.method, descriptor.path),
    }

    match &report.outcome {
        Outcome::NoDifference => println!("No differences"),
        Outcome::SnapshotDrift(diff) => {
            println!(
                "DIFFERENT. New: {}, Removed: {}, Same: {}",
                diff.added.len(),
                diff.removed.len(),
                diff.unchanged.len()
            );
            println!();
            print_entries("New", &diff.added);
            print_entries("Removed", &diff.removed);
            print_entries("Same", &diff.unchanged);
        }
        Outcome::ContractDrift(diff) => {
            println!(
                "CONTRACT VIOLATED. New: {}, Missing: {}",
                diff.unknown.len(),
                diff.missing.len()
            );
            println!();
            print_errors("New fields", &diff.unknown);
            print_errors("Missing fields", &diff.missing);
        }
        Outcome::ShapeMissing { raw } => {
            println!("No declared shape; raw response for manual inspection:");
            println!("{raw}");
        }
        Outcome::FetchFailed(err) => println!("FETCH FAILED: {err}"),
        Outcome::BadDocument(err) => println!("COULD NOT EVALUATE: {err}"),
        Outcome::StoreFailed(err) => println!("SNAPSHOT STORE FAILED: {err}"),
    }
}

fn print_entries(label: &str, entries: &BTreeMap<String, PathEntry>) {
    println!("{label}");
    for (path, entry) in entries {
        println!(" {path} ({})", entry.kind);
    }
    println!();
}

fn print_errors(label: &str, errors: &[FieldError]) {
    println!("{label}");
    for error in errors {
        println!(" {} - {}", error.key, error.message);
    }
    println!();
}
