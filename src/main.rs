//! Kingdoms -- a territory optimizer for the multiplayer chess-pieces puzzle.
//!
//! Reads one problem from stdin, optimizes within the time budget, and
//! writes the two-panel answer to stdout. Progress `info` lines go to
//! stderr.
//!
//! Options:
//!   --time-ms MS        End of optimization, measured from start (default: 9800)
//!   --grow-ms MS        End of the grow phase (default: 2000)
//!   --grow-iters N      Fixed grow trials; with --refine-iters, replaces time limits
//!   --refine-iters N    Fixed anneal iterations
//!   --seed N            RNG seed
//!   --quiet             Suppress info lines

use std::env;
use std::io::{self, BufWriter, Read};
use std::process;
use std::str::FromStr;
use std::time::{Duration, Instant};

use kingdoms::engine::{Solver, SolverConfig};
use kingdoms::protocol::{encode_panels, parse_problem, write_panels};
use kingdoms::search::budget::{DEFAULT_GROW_MS, DEFAULT_TOTAL_MS};
use kingdoms::search::Budget;

fn main() {
    let origin = Instant::now();
    let args: Vec<String> = env::args().collect();
    let mut config = SolverConfig::default();
    let mut grow_ms = DEFAULT_GROW_MS;
    let mut total_ms = DEFAULT_TOTAL_MS;
    let mut grow_iters: Option<u64> = None;
    let mut refine_iters: Option<u64> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
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
                config.seed = parse(&args, i, "--seed");
            }
            "--quiet" => {
                quiet = true;
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

    config.budget = match (grow_iters, refine_iters) {
        (None, None) => Budget::Time {
            grow: Duration::from_millis(grow_ms.min(total_ms)),
            total: Duration::from_millis(total_ms),
        },
        (grow, refine) => Budget::Iterations {
            grow: grow.unwrap_or(0),
            refine: refine.unwrap_or(0),
        },
    };

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read input: {}", e);
        process::exit(1);
    }
    let problem = match parse_problem(&input) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut solver = Solver::new(problem.board, problem.owners, config);
    let (solution, _) = if quiet {
        solver.solve(origin, &mut io::sink())
    } else {
        solver.solve(origin, &mut io::stderr().lock())
    };

    let panels = encode_panels(solver.board(), &solution);
    let mut out = BufWriter::new(io::stdout().lock());
    if let Err(e) = write_panels(&mut out, &panels) {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
}

fn parse<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(raw) = args.get(i) else {
        eprintln!("missing value for {}", flag);
        process::exit(1);
    };
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: '{}'", flag, raw);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: kingdoms [OPTIONS] < problem.txt");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --time-ms MS       End of optimization from start (default: 9800)");
    eprintln!("  --grow-ms MS       End of the grow phase (default: 2000)");
    eprintln!("  --grow-iters N     Fixed grow trials (replaces time limits)");
    eprintln!("  --refine-iters N   Fixed anneal iterations (replaces time limits)");
    eprintln!("  --seed N           RNG seed");
    eprintln!("  --quiet            Suppress info lines");
    eprintln!("  --help             Show this help");
}
