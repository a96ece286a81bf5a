use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::*;
use lock::{Error, WitnessFormat};
use runner::{FormatName, SnapshotFile};

/// Runs the secp256k1 pay-to-pubkey-hash lock against a transaction snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON transaction snapshot
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Witness layout, overriding the one named in the snapshot
    #[arg(short, long, value_enum)]
    format: Option<FormatName>,

    /// Print lock debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    match run() {
        Ok(result) => std::process::exit(result.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<types::Result> {
    let args = Args::parse();

    let file = SnapshotFile::load(&args.snapshot)?;
    let format: WitnessFormat = args.format.unwrap_or(file.format).into();
    let snapshot = file.to_snapshot()?.with_verbose(args.verbose);

    println!("{} {}", "Snapshot:".bold(), args.snapshot.display());
    println!(
        "  format={:?} inputs={} group_inputs={} witnesses={}",
        format,
        snapshot.inputs.len(),
        snapshot.group_inputs.len(),
        snapshot.witnesses.len()
    );

    let result = lock::entry(&snapshot, format);
    if result.success {
        println!("{}", "✓ unlocked".green().bold());
    } else {
        let reason = Error::from_code(result.error_code)
            .map(|err| err.to_string())
            .unwrap_or_else(|| format!("code {}", result.error_code));
        println!("{} {}", "✗ rejected:".red().bold(), reason);
    }
    Ok(result)
}
