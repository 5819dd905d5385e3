//! Fast xorshift generator with a cached logarithm table.
//!
//! The annealer needs `ln(u)` for a uniform `u` on every acceptance test.
//! Instead of calling `ln` each time, the generator precomputes
//! `ln((i + 0.5) / LOG_TABLE_SIZE)` for every table slot, shuffles the table
//! once, and then hands the entries out round-robin.
//!
//! This is a deliberate approximation: samples are drawn from a fixed grid
//! of 65 536 quantiles and repeat with that period, so they are not truly
//! continuous or independent. At the score scales involved the bias is not
//! observable. Do not swap it for a live `ln` call without re-measuring the
//! annealer's iteration rate.
//!
//! Runs are fully deterministic for a given seed; there is no entropy source.

/// Number of cached logarithm samples.
pub const LOG_TABLE_SIZE: usize = 0x10000;

/// Seed used when none (or zero, a fixed point of xorshift) is supplied.
pub const DEFAULT_SEED: u64 = 88_172_645_463_325_252;

/// Xorshift64 generator plus a shuffled table of `ln(u)` samples.
#[derive(Clone)]
pub struct FastRng {
    state: u64,
    log_index: usize,
    log_table: Box<[f64]>,
}

impl FastRng {
    /// Creates a generator from a seed and fills the logarithm table.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        let mut rng = FastRng {
            state,
            log_index: 0,
            log_table: Box::default(),
        };
        let mut table: Vec<f64> = (0..LOG_TABLE_SIZE)
            .map(|i| ((i as f64 + 0.5) / LOG_TABLE_SIZE as f64).ln())
            .collect();
        rng.shuffle(&mut table[..]);
        rng.log_table = table.into_boxed_slice();
        rng
    }

    /// Advances the xorshift state.
    #[inline]
    fn step(&mut self) -> u64 {
        self.state ^= self.state << 7;
        self.state ^= self.state >> 9;
        self.state
    }

    /// Returns a uniform integer in `[0, n)`. `n` must be positive.
    #[inline]
    pub fn next(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "next(0) has no valid result");
        (self.step() % n as u64) as usize
    }

    /// Returns `ln(u)` for a uniform `u` in `(0, 1)`, from the cached table.
    #[inline]
    pub fn next_log(&mut self) -> f64 {
        let v = self.log_table[self.log_index];
        self.log_index += 1;
        if self.log_index == LOG_TABLE_SIZE {
            self.log_index = 0;
        }
        v
    }

    /// Fisher-Yates shuffle, swapping each slot `i >= 1` with one in `[0, i]`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in 1..items.len() {
            let j = self.next(i + 1);
            if i != j {
                items.swap(i, j);
            }
        }
    }
}

impl Default for FastRng {
    fn default() -> Self {
        FastRng::new(DEFAULT_SEED)
    }
}

impl std::fmt::Debug for FastRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastRng")
            .field("state", &self.state)
            .field("log_index", &self.log_index)
            .finish_non_exhaustive()
    }
}
