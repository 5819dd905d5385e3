//! Search and refinement.
//!
//! Region growth explores many random partitions within a first budget;
//! simulated annealing then refines the best one within a second. Both
//! share a fast deterministic RNG and poll a phase clock between
//! iterations.

pub mod anneal;
pub mod budget;
pub mod free_set;
pub mod grow;
pub mod rng;
pub mod solution;

pub use anneal::{AnnealStats, Annealer, StepOutcome, END_TEMPERATURE, START_TEMPERATURE};
pub use budget::{Budget, PhaseClock};
pub use free_set::FreeSet;
pub use grow::{can_claim, Grower};
pub use rng::FastRng;
pub use solution::Solution;
