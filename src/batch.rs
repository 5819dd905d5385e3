//! Batch evaluation over generated instances.
//!
//! Solves a range of generated seeds, each with its own `Solver`, checks
//! every answer with the verifier, and records the outcome. Instances run
//! concurrently on a rayon pool when more than one thread is configured;
//! each solve stays single-threaded.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::board::Score;
use crate::engine::{Solver, SolverConfig};
use crate::eval::verify;
use crate::protocol::encode_panels;
use crate::testcase::{generate, TestCase};

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// First seed, inclusive.
    pub first_seed: u64,
    /// Last seed, inclusive.
    pub last_seed: u64,
    /// Solver settings shared by every instance. Time budgets are measured
    /// from the start of each instance.
    pub solver: SolverConfig,
    /// Number of parallel threads.
    pub threads: usize,
    /// Suppress per-instance progress output.
    pub quiet: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            first_seed: 1,
            last_seed: 10,
            solver: SolverConfig::default(),
            threads: 4,
            quiet: false,
        }
    }
}

impl BatchConfig {
    pub fn seed_count(&self) -> usize {
        if self.last_seed < self.first_seed {
            0
        } else {
            (self.last_seed - self.first_seed + 1) as usize
        }
    }
}

/// Outcome of one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub seed: u64,
    pub side: usize,
    pub owners: usize,
    pub walls: usize,
    /// Verified minimum score; `None` when verification failed.
    pub score: Option<Score>,
    pub scores: Vec<Score>,
    /// Verifier message for a rejected answer.
    pub error: Option<String>,
    pub grow_trials: u64,
    pub anneal_iterations: u64,
    pub accepted: u64,
    pub released: usize,
    pub elapsed_ms: u64,
}

/// Solves and verifies a single instance.
pub fn solve_case(case: &TestCase, solver: &SolverConfig) -> BatchRecord {
    let start = Instant::now();
    let mut config = solver.clone();
    config.seed = config.seed.wrapping_add(case.seed);
    let mut engine = Solver::new(case.board.clone(), case.owners, config);
    let (solution, stats) = engine.solve(start, &mut std::io::sink());
    let panels = encode_panels(&case.board, &solution);
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let (score, scores, error) = match verify(&case.board, case.owners, &panels) {
        Ok(verdict) => (Some(verdict.score), verdict.scores, None),
        Err(e) => (None, Vec::new(), Some(e.to_string())),
    };

    BatchRecord {
        seed: case.seed,
        side: case.board.side(),
        owners: case.owners,
        walls: case.board.cell_count() - case.board.free_count(),
        score,
        scores,
        error,
        grow_trials: stats.grow_trials,
        anneal_iterations: stats.anneal.iterations,
        accepted: stats.anneal.accepted,
        released: stats.released,
        elapsed_ms,
    }
}

/// Runs every seed in the configured range. Records come back in seed order.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<BatchRecord>, rayon::ThreadPoolBuildError> {
    use rayon::prelude::*;

    let seeds: Vec<u64> = (0..config.seed_count() as u64)
        .map(|i| config.first_seed + i)
        .collect();
    let total = seeds.len();
    let completed = AtomicUsize::new(0);

    let run_one = |seed: u64| {
        let record = solve_case(&generate(seed), &config.solver);
        if !config.quiet {
            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
            report(&record, n, total);
        }
        record
    };

    if config.threads <= 1 {
        return Ok(seeds.into_iter().map(run_one).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    Ok(pool.install(|| seeds.into_par_iter().map(run_one).collect()))
}

fn report(record: &BatchRecord, n: usize, total: usize) {
    match (&record.score, &record.error) {
        (Some(score), _) => eprintln!(
            "Seed {} ({}/{}): N={} C={} score {} ({}ms)",
            record.seed, n, total, record.side, record.owners, score, record.elapsed_ms
        ),
        (None, error) => eprintln!(
            "Seed {} ({}/{}): N={} C={} rejected: {}",
            record.seed,
            n,
            total,
            record.side,
            record.owners,
            error.as_deref().unwrap_or("unknown error")
        ),
    }
}

/// Writes records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[BatchRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate figures over a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub instances: usize,
    pub rejected: usize,
    pub mean_score: f64,
    pub mean_trials: f64,
    pub mean_iterations: f64,
}

pub fn summarize(records: &[BatchRecord]) -> Summary {
    let total = records.len().max(1) as f64;
    let scored: Vec<Score> = records.iter().filter_map(|r| r.score).collect();
    Summary {
        instances: records.len(),
        rejected: records.len() - scored.len(),
        mean_score: scored.iter().map(|&s| s as f64).sum::<f64>() / scored.len().max(1) as f64,
        mean_trials: records.iter().map(|r| r.grow_trials as f64).sum::<f64>() / total,
        mean_iterations: records.iter().map(|r| r.anneal_iterations as f64).sum::<f64>() / total,
    }
}

/// Prints a summary of batch results to stderr.
pub fn print_summary(records: &[BatchRecord]) {
    let s = summarize(records);
    eprintln!("=== Batch Summary ===");
    eprintln!("Instances: {}", s.instances);
    eprintln!("Rejected: {}", s.rejected);
    eprintln!("Mean score: {:.1}", s.mean_score);
    eprintln!("Mean grow trials: {:.1}", s.mean_trials);
    eprintln!("Mean anneal iterations: {:.1}", s.mean_iterations);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Budget;

    fn quick(first: u64, last: u64, threads: usize) -> BatchConfig {
        BatchConfig {
            first_seed: first,
            last_seed: last,
            solver: SolverConfig {
                budget: Budget::Iterations {
                    grow: 5,
                    refine: 300,
                },
                ..SolverConfig::default()
            },
            threads,
            quiet: true,
        }
    }

    #[test]
    fn seed_count_is_inclusive() {
        assert_eq!(quick(3, 7, 1).seed_count(), 5);
        assert_eq!(quick(7, 3, 1).seed_count(), 0);
    }

    #[test]
    fn every_answer_verifies() {
        let records = run_batch(&quick(1, 4, 1)).unwrap();
        assert_eq!(records.len(), 4);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.seed, 1 + i as u64);
            assert_eq!(r.error, None, "seed {} rejected", r.seed);
            assert_eq!(r.scores.len(), r.owners);
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let strip = |mut r: Vec<BatchRecord>| {
            r.iter_mut().for_each(|r| r.elapsed_ms = 0);
            r
        };
        let seq = strip(run_batch(&quick(3, 6, 1)).unwrap());
        let par = strip(run_batch(&quick(3, 6, 3)).unwrap());
        assert_eq!(seq, par);
    }

    #[test]
    fn jsonl_lines_parse_back() {
        let records = run_batch(&quick(5, 6, 1)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let back: Vec<BatchRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(back, records);
    }

    #[test]
    fn summary_counts_rejections() {
        let mut records = run_batch(&quick(1, 2, 1)).unwrap();
        records[1].score = None;
        records[1].error = Some("bad".to_string());
        let s = summarize(&records);
        assert_eq!(s.instances, 2);
        assert_eq!(s.rejected, 1);
        assert_eq!(s.mean_score, records[0].score.unwrap() as f64);
    }
}
