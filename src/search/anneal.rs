//! Simulated-annealing refinement of a region map.
//!
//! Each step grafts one unassigned free cell onto a worst-scoring owner,
//! evicts neighbors of other owners so no two owners touch, re-places all
//! pieces, and keeps or undoes the move by the Metropolis rule. Only owners
//! tied for the minimum are perturbed, since only they can raise it.
//!
//! The working state (region map, placement, free set) is owned here and
//! mutated in place; the best snapshot seen is kept separately and never
//! gets worse.

use crate::board::{Board, Geometry, Owner, RegionMap};
use crate::eval::Placement;

use super::budget::{lerp, PhaseClock};
use super::free_set::FreeSet;
use super::rng::FastRng;
use super::solution::Solution;

/// Default starting temperature.
pub const START_TEMPERATURE: f64 = 100.0;

/// Default final temperature.
pub const END_TEMPERATURE: f64 = 10.0;

/// What a single annealing step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The drawn owner or cell could not help; nothing changed.
    Skipped,
    /// The move was evaluated and undone.
    Rejected,
    /// The move was kept.
    Accepted,
    /// The move was kept and beat the best snapshot.
    Improved,
}

/// Counters for one refinement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnealStats {
    pub iterations: u64,
    pub evaluated: u64,
    pub accepted: u64,
    pub improved: u64,
}

/// Working state of the annealer.
pub struct Annealer<'a> {
    board: &'a Board,
    geometry: &'a Geometry,
    region: RegionMap,
    placement: Placement,
    candidate: Placement,
    free: FreeSet,
    evicted: Vec<(usize, Owner)>,
    best: Solution,
}

impl<'a> Annealer<'a> {
    /// Starts from `seed`, deriving its placement once.
    pub fn new(board: &'a Board, geometry: &'a Geometry, owners: usize, seed: RegionMap) -> Self {
        let placement = Placement::compute(board, geometry, &seed, owners);
        let mut free = FreeSet::new(board.cell_count());
        for cell in 0..board.cell_count() {
            if board.is_free(cell) && seed[cell].is_none() {
                free.insert(cell);
            }
        }
        let best = Solution::new(seed.clone(), placement.clone());
        Annealer {
            board,
            geometry,
            candidate: placement.clone(),
            region: seed,
            placement,
            free,
            evicted: Vec::with_capacity(8),
            best,
        }
    }

    /// Runs steps until the clock runs out, cooling linearly from
    /// `start_temp` to `end_temp`.
    pub fn run(
        &mut self,
        rng: &mut FastRng,
        clock: &mut PhaseClock,
        start_temp: f64,
        end_temp: f64,
    ) -> AnnealStats {
        let mut stats = AnnealStats::default();
        while let Some(progress) = clock.tick() {
            stats.iterations += 1;
            let temperature = lerp(start_temp, end_temp, progress);
            match self.step(rng, temperature) {
                StepOutcome::Skipped => {}
                StepOutcome::Rejected => stats.evaluated += 1,
                StepOutcome::Accepted => {
                    stats.evaluated += 1;
                    stats.accepted += 1;
                }
                StepOutcome::Improved => {
                    stats.evaluated += 1;
                    stats.accepted += 1;
                    stats.improved += 1;
                }
            }
        }
        stats
    }

    /// Performs one perturbation at the given temperature.
    pub fn step(&mut self, rng: &mut FastRng, temperature: f64) -> StepOutcome {
        let owners = self.placement.scores().len();
        let c = rng.next(owners);
        let old_min = self.placement.min_score();
        if self.placement.scores()[c] != old_min {
            return StepOutcome::Skipped;
        }

        let Some(p) = self.free.random(rng) else {
            return StepOutcome::Skipped;
        };
        debug_assert!(
            self.region[p].is_none(),
            "free set holds assigned cell {}",
            p
        );

        let scores = self.placement.scores();
        let touches_worst = self
            .geometry
            .neighbors(p)
            .iter()
            .any(|&q| self.region[q].map_or(false, |o| scores[o] == old_min));
        if !touches_worst {
            return StepOutcome::Skipped;
        }

        self.apply(p, c);
        self.candidate
            .recompute(self.board, self.geometry, &self.region);
        let new_min = self.candidate.min_score();

        // Maximizing the minimum: the cost is its negation.
        let diff = old_min as f64 - new_min as f64;
        if diff <= -temperature * rng.next_log() {
            std::mem::swap(&mut self.placement, &mut self.candidate);
            if new_min > self.best.min_score() {
                self.best = Solution::new(self.region.clone(), self.placement.clone());
                return StepOutcome::Improved;
            }
            return StepOutcome::Accepted;
        }

        self.undo(p);
        StepOutcome::Rejected
    }

    /// Gives `p` to `owner` and evicts neighbors held by anyone else.
    fn apply(&mut self, p: usize, owner: Owner) {
        self.region[p] = Some(owner);
        self.free.remove(p);
        self.evicted.clear();
        for &q in self.geometry.neighbors(p) {
            if let Some(o) = self.region[q] {
                if o != owner {
                    self.evicted.push((q, o));
                    self.region[q] = None;
                    if self.board.is_free(q) {
                        self.free.insert(q);
                    }
                }
            }
        }
    }

    /// Reverts the last `apply(p, _)`.
    fn undo(&mut self, p: usize) {
        self.region[p] = None;
        self.free.insert(p);
        for &(q, o) in &self.evicted {
            self.free.remove(q);
            self.region[q] = Some(o);
        }
    }

    /// Current working region map.
    pub fn region(&self) -> &[Option<Owner>] {
        &self.region
    }

    /// Placement of the current working region map.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Unassigned free cells of the working region map.
    pub fn free_set(&self) -> &FreeSet {
        &self.free
    }

    /// Best snapshot seen so far.
    pub fn best(&self) -> &Solution {
        &self.best
    }

    pub fn into_best(self) -> Solution {
        self.best
    }
}
