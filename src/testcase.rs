//! Seeded problem generator.
//!
//! Produces random instances in the same ranges as the contest judge: side
//! 8 to 50, 2 to 8 owners, a wall probability between 0.15 and 0.65, and
//! piece values scaled by the side. Seed 1 is the smallest board and seed 2
//! the largest, as in the judge's examples. The same seed always yields the
//! same instance on a given build.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, PieceValues, Terrain};
use crate::protocol::writer::encode_problem;

pub const MIN_SIDE: usize = 8;
pub const MAX_SIDE: usize = 50;
pub const MIN_OWNERS: usize = 2;
pub const MAX_OWNERS: usize = 8;
pub const MIN_WALL_P: f64 = 0.15;
pub const MAX_WALL_P: f64 = 0.65;

/// Wall probability pinned for seed 1.
const SEED_ONE_WALL_P: f64 = 0.199_623_866_854_042_93;

/// A generated instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub seed: u64,
    pub board: Board,
    pub owners: usize,
    pub wall_probability: f64,
}

impl TestCase {
    /// The instance in the solver's input format.
    pub fn to_input(&self) -> String {
        encode_problem(&self.board, self.owners)
    }
}

/// Generates the instance for `seed`.
pub fn generate(seed: u64) -> TestCase {
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut n = rng.gen_range(MIN_SIDE..=MAX_SIDE);
    match seed {
        1 => n = MIN_SIDE,
        2 => n = MAX_SIDE,
        _ => {}
    }
    let owners = rng.gen_range(MIN_OWNERS..=MAX_OWNERS);
    let mut wall_probability = rng.gen_range(MIN_WALL_P..MAX_WALL_P);
    if seed == 1 {
        wall_probability = SEED_ONE_WALL_P;
    }

    let terrain = (0..n * n)
        .map(|_| {
            if rng.gen::<f64>() < wall_probability {
                Terrain::Wall
            } else {
                Terrain::Free
            }
        })
        .collect();

    let side = n as u32;
    let values = [
        rng.gen_range(3..=8),
        rng.gen_range(3 * side..=4 * side),
        rng.gen_range(side * 3 / 2..=side * 5 / 2),
        rng.gen_range(side..=2 * side),
        rng.gen_range(2..=8),
    ];

    TestCase {
        seed,
        board: Board::new(n, terrain, PieceValues(values)),
        owners,
        wall_probability,
    }
}
