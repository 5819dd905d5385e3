//! Optimization session.
//!
//! A `Solver` owns the board, its geometry, the RNG, and the configuration
//! for one problem and runs the two phases back to back: repeated region
//! growth to find a good starting partition, then annealing to refine it.
//! Progress is reported as `info` lines on a caller-supplied writer.

use std::io::Write;
use std::time::Instant;

use crate::board::{Board, Geometry, RegionMap, Score};
use crate::eval::Placement;
use crate::search::{
    AnnealStats, Annealer, Budget, FastRng, Grower, PhaseClock, Solution, END_TEMPERATURE,
    START_TEMPERATURE,
};
use crate::search::rng::DEFAULT_SEED;

/// Tunable solver parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Time or iteration limits for both phases.
    pub budget: Budget,
    /// Annealing temperature at the start of refinement.
    pub start_temperature: f64,
    /// Annealing temperature at the end of refinement.
    pub end_temperature: f64,
    /// RNG seed; runs with the same seed and an iteration budget repeat exactly.
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            budget: Budget::default(),
            start_temperature: START_TEMPERATURE,
            end_temperature: END_TEMPERATURE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Counters for a full solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub grow_trials: u64,
    pub grow_score: Score,
    pub anneal: AnnealStats,
    pub anneal_score: Score,
    /// Owned cells dropped by the final settle pass.
    pub released: usize,
    pub final_score: Score,
}

/// One optimization session over a fixed board.
pub struct Solver {
    board: Board,
    geometry: Geometry,
    owners: usize,
    config: SolverConfig,
    rng: FastRng,
}

impl Solver {
    /// Prepares a session. Geometry is computed here, once.
    pub fn new(board: Board, owners: usize, config: SolverConfig) -> Self {
        debug_assert!(owners > 0, "at least one owner is required");
        let geometry = Geometry::new(&board);
        let rng = FastRng::new(config.seed);
        Solver {
            board,
            geometry,
            owners,
            config,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Runs both phases and settles the result for output.
    ///
    /// `origin` is the instant time budgets are measured from, normally
    /// process entry.
    pub fn solve<W: Write>(&mut self, origin: Instant, out: &mut W) -> (Solution, SolveStats) {
        let mut stats = SolveStats::default();

        let (seed, trials) = self.grow_phase(origin, out);
        stats.grow_trials = trials;
        stats.grow_score = seed.min_score();

        let (mut best, anneal) = self.anneal_phase(seed, origin, out);
        stats.anneal = anneal;
        stats.anneal_score = best.min_score();

        stats.released = best.settle(&self.board, &self.geometry);
        stats.final_score = best.min_score();
        let _ = writeln!(
            out,
            "info settle released {} score {} time {}",
            stats.released,
            stats.final_score,
            origin.elapsed().as_millis()
        );

        (best, stats)
    }

    /// Grows random partitions until the grow budget runs out and returns
    /// the one with the highest minimum score. The first of equal candidates
    /// wins. At least one trial runs whenever the board has a free cell.
    pub fn grow_phase<W: Write>(&mut self, origin: Instant, out: &mut W) -> (Solution, u64) {
        let cells = self.board.cell_count();
        if self.board.free_count() == 0 {
            let _ = writeln!(out, "info grow trials 0 score 0 time 0");
            return (Solution::empty(cells, self.owners), 0);
        }

        let mut clock = PhaseClock::grow(&self.config.budget, origin);
        let mut grower = Grower::new(self.owners);
        let mut region: RegionMap = vec![None; cells];
        let mut placement = Placement::empty(cells, self.owners);
        let mut best: Option<(Score, RegionMap)> = None;
        let mut trials = 0u64;

        while clock.tick().is_some() || trials == 0 {
            trials += 1;
            grower.grow_once(&self.board, &self.geometry, &mut self.rng, &mut region);
            placement.recompute(&self.board, &self.geometry, &region);
            let score = placement.min_score();
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, region.clone()));
            }
        }

        let best_region = match best {
            Some((_, r)) => r,
            None => region,
        };
        let placement = Placement::compute(&self.board, &self.geometry, &best_region, self.owners);
        let solution = Solution::new(best_region, placement);
        let _ = writeln!(
            out,
            "info grow trials {} score {} time {}",
            trials,
            solution.min_score(),
            clock.elapsed_ms()
        );
        (solution, trials)
    }

    /// Refines `seed` by annealing until the total budget runs out.
    ///
    /// Returns `seed` unchanged when no free cell is left to move.
    pub fn anneal_phase<W: Write>(
        &mut self,
        seed: Solution,
        origin: Instant,
        out: &mut W,
    ) -> (Solution, AnnealStats) {
        let mut annealer = Annealer::new(&self.board, &self.geometry, self.owners, seed.region);
        if annealer.free_set().is_empty() {
            let best = annealer.into_best();
            let _ = writeln!(
                out,
                "info anneal iterations 0 evaluated 0 accepted 0 score {} time {}",
                best.min_score(),
                origin.elapsed().as_millis()
            );
            return (best, AnnealStats::default());
        }

        let mut clock = PhaseClock::refine(&self.config.budget, origin);
        let stats = annealer.run(
            &mut self.rng,
            &mut clock,
            self.config.start_temperature,
            self.config.end_temperature,
        );
        let best = annealer.into_best();
        let _ = writeln!(
            out,
            "info anneal iterations {} evaluated {} accepted {} score {} time {}",
            stats.iterations,
            stats.evaluated,
            stats.accepted,
            best.min_score(),
            clock.elapsed_ms()
        );
        (best, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iterations(grow: u64, refine: u64, seed: u64) -> SolverConfig {
        SolverConfig {
            budget: Budget::Iterations { grow, refine },
            seed,
            ..SolverConfig::default()
        }
    }

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows, [10, 9, 5, 3, 3]).unwrap()
    }

    #[test]
    fn default_config_uses_time_budget() {
        let config = SolverConfig::default();
        assert!(matches!(config.budget, Budget::Time { .. }));
        assert_eq!(config.start_temperature, 100.0);
        assert_eq!(config.end_temperature, 10.0);
    }

    #[test]
    fn solve_emits_info_lines() {
        let b = board(&["....", "....", "....", "...."]);
        let mut solver = Solver::new(b, 2, iterations(20, 200, 1));
        let mut out = Vec::new();
        let (solution, stats) = solver.solve(Instant::now(), &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("info grow trials 20"), "got: {}", text);
        assert!(text.contains("info anneal"), "got: {}", text);
        assert!(text.contains("info settle"), "got: {}", text);
        assert_eq!(stats.grow_trials, 20);
        assert_eq!(stats.final_score, solution.min_score());
    }

    #[test]
    fn anneal_never_loses_the_grow_score() {
        let b = board(&["......", "..#...", "......", "...#..", "......", "......"]);
        let mut solver = Solver::new(b, 3, iterations(30, 2000, 4));
        let (_, stats) = solver.solve(Instant::now(), &mut std::io::sink());
        assert!(stats.anneal_score >= stats.grow_score);
    }

    #[test]
    fn zero_grow_budget_still_runs_one_trial() {
        let b = board(&["...", "...", "..."]);
        let mut solver = Solver::new(b, 2, iterations(0, 0, 1));
        let (_, trials) = solver.grow_phase(Instant::now(), &mut std::io::sink());
        assert_eq!(trials, 1);
    }

    #[test]
    fn all_walls_board_is_degenerate_not_fatal() {
        let b = board(&["##", "##"]);
        let mut solver = Solver::new(b, 3, iterations(10, 10, 1));
        let (solution, stats) = solver.solve(Instant::now(), &mut std::io::sink());
        assert_eq!(stats.grow_trials, 0);
        assert_eq!(solution.scores, vec![0, 0, 0]);
        assert!(solution.region.iter().all(|r| r.is_none()));
    }

    #[test]
    fn single_owner_collects_every_free_cell() {
        let b = board(&["....", ".#..", "....", "..#."]);
        let free = b.free_count() as Score;
        let mut solver = Solver::new(b, 1, iterations(5, 100, 7));
        let (solution, stats) = solver.solve(Instant::now(), &mut std::io::sink());
        assert_eq!(stats.released, 0);
        assert_eq!(solution.min_score(), solution.scores.iter().sum::<Score>());
        // Every free cell holds the top piece, a king worth 10.
        assert_eq!(solution.min_score(), free * 10);
    }

    #[test]
    fn same_seed_and_iterations_repeat_exactly() {
        let rows = ["........", "..#.....", "........", ".....#..", "........", "........", ".#......", "........"];
        let run = |seed| {
            let mut solver = Solver::new(board(&rows), 3, iterations(25, 1500, seed));
            solver.solve(Instant::now(), &mut std::io::sink()).0
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn large_point_values_score_exactly() {
        let problem = crate::protocol::parse_problem("2 1 .. .. 2000000000 1 1 1 1").unwrap();
        let mut solver = Solver::new(problem.board, problem.owners, iterations(1, 0, 1));
        let (solution, stats) = solver.solve(Instant::now(), &mut std::io::sink());
        assert_eq!(stats.final_score, 8_000_000_000);
        assert_eq!(solution.scores, vec![8_000_000_000]);
    }
}
