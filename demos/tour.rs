//! Command-line runner for the SIMD intrinsic tour.
//!
//! # Usage
//!
//! List every demonstration and whether it can run on this machine:
//! ```sh
//! cargo run --example tour -- list
//! ```
//!
//! Run a few demonstrations by name:
//! ```sh
//! cargo run --example tour -- run sse-load avx2-memory sve-load-s32
//! ```
//!
//! Run the whole catalog with 512-bit modelled SVE registers, failing on
//! anything the CPU cannot do:
//! ```sh
//! RUST_LOG=debug cargo run --example tour -- --sve-bits 512 --strict all
//! ```

use clap::{Parser, Subcommand};
use simd_tour::catalog::{self, Outcome};
use simd_tour::common::features;
use simd_tour::TourConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run SIMD load, store, gather and scatter demonstrations
#[derive(Parser, Debug)]
#[command(
    name = "tour",
    about = "Run SIMD load, store, gather and scatter demonstrations",
    long_about = "Walks through memory intrinsics for SSE, AVX, AVX2 and AVX-512 on x86-64,\n\
                  NEON on AArch64, and a software model of SVE and SVE2 that runs anywhere.",
    version
)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Modelled SVE vector length in bits (128..=2048, multiple of 128)
    #[arg(long, value_name = "BITS")]
    sve_bits: Option<u32>,

    /// Fail instead of skipping demonstrations the CPU cannot run
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List demonstrations and their availability
    List,
    /// Run the named demonstrations
    Run {
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
    /// Run every demonstration, or those listed in the config file
    All,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    match args.command {
        Command::List => {
            list();
            ExitCode::SUCCESS
        },
        Command::Run { names } => run(&TourConfig { demos: names, ..config }),
        Command::All => run(&config),
    }
}

fn build_config(args: &Args) -> simd_tour::Result<TourConfig> {
    let mut config = match &args.config {
        Some(path) => TourConfig::load(path)?,
        None => TourConfig::default(),
    };
    if let Some(bits) = args.sve_bits {
        config.sve_vector_bits = bits;
    }
    if args.strict {
        config.skip_unsupported = false;
    }
    config.validate()?;
    Ok(config)
}

fn list() {
    println!("Detected: {}", features::detected());
    println!();
    for demo in catalog::catalog() {
        let status = if demo.isa.is_modelled() {
            "modelled"
        } else if demo.is_runnable() {
            "yes"
        } else {
            "no"
        };
        println!("{:<20} {:<8} {:<9} {}", demo.name, demo.isa.name(), status, demo.summary);
    }
}

fn run(config: &TourConfig) -> ExitCode {
    let reports = match catalog::run_selected(config) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let mut completed = 0;
    let mut skipped = 0;
    let mut failed = 0;
    for report in &reports {
        match &report.outcome {
            Outcome::Completed(transcript) => {
                println!("{}", transcript);
                completed += 1;
            },
            Outcome::Skipped(isa) => {
                println!("--- {} skipped: {} not available ---\n", report.demo.name, isa);
                skipped += 1;
            },
            Outcome::Failed(e) => {
                eprintln!("✗ {}: {}", report.demo.name, e);
                failed += 1;
            },
        }
    }

    println!(
        "{} completed, {} skipped, {} failed",
        completed, skipped, failed
    );
    if reports.iter().any(|r| r.outcome.is_failure()) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
