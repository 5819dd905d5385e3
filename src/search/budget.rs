//! Phase budgets.
//!
//! Both optimization phases poll a `PhaseClock` at the top of every
//! iteration and stop voluntarily once it reports exhaustion. An iteration
//! that has started always runs to completion.
//!
//! Time budgets are measured against one monotonic origin (process entry),
//! so the grow phase ends `grow` after the origin and the refine phase ends
//! `total` after it. Iteration budgets replace the clock with a counter for
//! reproducible runs.

use std::time::{Duration, Instant};

/// Default end of the grow phase, measured from the origin.
pub const DEFAULT_GROW_MS: u64 = 2000;

/// Default end of the refine phase, measured from the origin.
pub const DEFAULT_TOTAL_MS: u64 = 9800;

/// How long each optimization phase may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Wall-clock deadlines relative to the origin instant.
    Time { grow: Duration, total: Duration },
    /// Fixed iteration counts; makes runs bit-for-bit reproducible.
    Iterations { grow: u64, refine: u64 },
}

impl Default for Budget {
    fn default() -> Self {
        Budget::Time {
            grow: Duration::from_millis(DEFAULT_GROW_MS),
            total: Duration::from_millis(DEFAULT_TOTAL_MS),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Limit {
    Deadline { from: Duration, until: Duration },
    Count(u64),
}

/// Tracks progress through a single phase's budget.
#[derive(Debug, Clone)]
pub struct PhaseClock {
    origin: Instant,
    limit: Limit,
    iterations: u64,
}

impl PhaseClock {
    /// Clock for the grow phase.
    pub fn grow(budget: &Budget, origin: Instant) -> Self {
        let limit = match *budget {
            Budget::Time { grow, .. } => Limit::Deadline {
                from: Duration::ZERO,
                until: grow,
            },
            Budget::Iterations { grow, .. } => Limit::Count(grow),
        };
        PhaseClock {
            origin,
            limit,
            iterations: 0,
        }
    }

    /// Clock for the refine phase. Cooling progress is measured from the
    /// moment this is called until the total deadline.
    pub fn refine(budget: &Budget, origin: Instant) -> Self {
        let limit = match *budget {
            Budget::Time { total, .. } => Limit::Deadline {
                from: origin.elapsed(),
                until: total,
            },
            Budget::Iterations { refine, .. } => Limit::Count(refine),
        };
        PhaseClock {
            origin,
            limit,
            iterations: 0,
        }
    }

    /// Starts the next iteration. Returns the fraction of the budget already
    /// used, in `[0, 1)`, or `None` once the budget is spent.
    pub fn tick(&mut self) -> Option<f64> {
        let progress = match self.limit {
            Limit::Deadline { from, until } => {
                let now = self.origin.elapsed();
                if now >= until {
                    return None;
                }
                let span = until.saturating_sub(from).as_secs_f64();
                if span <= 0.0 {
                    0.0
                } else {
                    (now.saturating_sub(from).as_secs_f64() / span).min(1.0)
                }
            }
            Limit::Count(limit) => {
                if self.iterations >= limit {
                    return None;
                }
                self.iterations as f64 / limit as f64
            }
        };
        self.iterations += 1;
        Some(progress)
    }

    /// Iterations started so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Milliseconds since the origin.
    pub fn elapsed_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Linear interpolation from `start` (progress 0) to `end` (progress 1).
#[inline]
pub fn lerp(start: f64, end: f64, progress: f64) -> f64 {
    start + (end - start) * progress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_budget_counts_exactly() {
        let budget = Budget::Iterations { grow: 3, refine: 4 };
        let origin = Instant::now();

        let mut grow = PhaseClock::grow(&budget, origin);
        let mut seen = Vec::new();
        while let Some(p) = grow.tick() {
            seen.push(p);
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(grow.iterations(), 3);
        assert_eq!(seen[0], 0.0);

        let mut refine = PhaseClock::refine(&budget, origin);
        let mut progress = Vec::new();
        while let Some(p) = refine.tick() {
            progress.push(p);
        }
        assert_eq!(progress, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn zero_iteration_budget_is_immediately_exhausted() {
        let budget = Budget::Iterations { grow: 0, refine: 0 };
        let mut clock = PhaseClock::grow(&budget, Instant::now());
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.iterations(), 0);
    }

    #[test]
    fn expired_deadline_stops_immediately() {
        let budget = Budget::Time {
            grow: Duration::ZERO,
            total: Duration::ZERO,
        };
        let origin = Instant::now();
        assert_eq!(PhaseClock::grow(&budget, origin).tick(), None);
        assert_eq!(PhaseClock::refine(&budget, origin).tick(), None);
    }

    #[test]
    fn generous_deadline_reports_early_progress() {
        let budget = Budget::Time {
            grow: Duration::from_secs(60),
            total: Duration::from_secs(120),
        };
        let mut clock = PhaseClock::refine(&budget, Instant::now());
        let p = clock.tick().unwrap();
        assert!((0.0..0.01).contains(&p));
    }

    #[test]
    fn lerp_cools_linearly() {
        assert_eq!(lerp(100.0, 10.0, 0.0), 100.0);
        assert_eq!(lerp(100.0, 10.0, 0.5), 55.0);
        assert!((lerp(100.0, 10.0, 1.0) - 10.0).abs() < 1e-12);
    }
}
