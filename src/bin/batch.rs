//! Batch evaluation CLI.
//!
//! Generates instances for a range of seeds, solves and verifies each one,
//! and writes one JSON record per instance.
//!
//! Usage:
//!   cargo run --release --bin batch -- [OPTIONS]
//!
//! Options:
//!   --seeds A..B        Inclusive seed range (default: 1..10)
//!   --time-ms MS        Total time per instance in ms (default: 9800)
//!   --grow-ms MS        End of the grow phase per instance in ms (default: 2000)
//!   --grow-iters N      Grow trials per instance; with --refine-iters, replaces time limits
//!   --refine-iters N    Anneal iterations per instance
//!   --seed N            Base solver seed, offset by the instance seed
//!   --threads N         Number of parallel threads (default: 4)
//!   --output FILE       Output file path (default: stdout)
//!   --quiet             Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::{Duration, Instant};

use kingdoms::batch::{self, BatchConfig};
use kingdoms::search::budget::{DEFAULT_GROW_MS, DEFAULT_TOTAL_MS};
use kingdoms::search::Budget;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = BatchConfig::default();
    let mut output_path: Option<String> = None;
    let mut grow_ms = DEFAULT_GROW_MS;
    let mut total_ms = DEFAULT_TOTAL_MS;
    let mut grow_iters: Option<u64> = None;
    let mut refine_iters: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seeds" => {
                i += 1;
                let (first, last) = parse_range(value(&args, i, "--seeds"));
                config.first_seed = first;
                config.last_seed = last;
            }
            "--time-ms" => {
                i += 1;
                total_ms = parse(&args, i, "--time-ms");
            }
            "--grow-ms" => {
                i += 1;
                grow_ms = parse(&args, i, "--grow-ms");
            }
            "--grow-iters" => {
                i += 1;
                grow_iters = Some(parse(&args, i, "--grow-iters"));
            }
            "--refine-iters" => {
                i += 1;
                refine_iters = Some(parse(&args, i, "--refine-iters"));
            }
            "--seed" => {
                i += 1;
                config.solver.seed = parse(&args, i, "--seed");
            }
            "--threads" => {
                i += 1;
                config.threads = parse(&args, i, "--threads");
            }
            "--output" => {
                i += 1;
                output_path = Some(value(&args, i, "--output").to_string());
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    config.solver.budget = match (grow_iters, refine_iters) {
        (None, None) => Budget::Time {
            grow: Duration::from_millis(grow_ms.min(total_ms)),
            total: Duration::from_millis(total_ms),
        },
        (grow, refine) => Budget::Iterations {
            grow: grow.unwrap_or(0),
            refine: refine.unwrap_or(0),
        },
    };

    if !config.quiet {
        eprintln!(
            "Batch: seeds {}..{}, budget {:?}, {} threads",
            config.first_seed, config.last_seed, config.solver.budget, config.threads
        );
    }

    let start = Instant::now();
    let records = match batch::run_batch(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("failed to build thread pool: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Completed {} instances in {:.1}s",
            records.len(),
            start.elapsed().as_secs_f64()
        );
        batch::print_summary(&records);
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| batch::write_jsonl(&records, &mut BufWriter::new(file))),
        None => batch::write_jsonl(&records, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        eprintln!("Wrote {} records to {}", records.len(), path);
    }

    if records.iter().any(|r| r.error.is_some()) {
        process::exit(2);
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value(args, i, flag);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: '{}'", flag, raw);
            process::exit(1);
        }
    }
}

/// Parses `A..B` or a single seed `A`.
fn parse_range(raw: &str) -> (u64, u64) {
    let parsed = match raw.split_once("..") {
        Some((a, b)) => a.parse().and_then(|a| b.parse().map(|b| (a, b))),
        None => raw.parse().map(|a| (a, a)),
    };
    match parsed {
        Ok(range) => range,
        Err(_) => {
            eprintln!("invalid --seeds value: '{}'", raw);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: batch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seeds A..B       Inclusive seed range (default: 1..10)");
    eprintln!("  --time-ms MS       Total time per instance in ms (default: 9800)");
    eprintln!("  --grow-ms MS       End of the grow phase per instance in ms (default: 2000)");
    eprintln!("  --grow-iters N     Grow trials per instance (replaces time limits)");
    eprintln!("  --refine-iters N   Anneal iterations per instance (replaces time limits)");
    eprintln!("  --seed N           Base solver seed, offset by the instance seed");
    eprintln!("  --threads N        Number of parallel threads (default: 4)");
    eprintln!("  --output FILE      Output file path (default: stdout)");
    eprintln!("  --quiet            Suppress progress and summary output");
    eprintln!("  --help             Show this help");
}
