//! Randomized multi-source region growth.
//!
//! Each owner starts from a random free cell and the owners expand in
//! round-robin breadth-first order. A cell is claimable while unassigned
//! and not touching a cell of another owner; walls are always claimable so
//! growth can pass through them, but claiming one is not progress. Growth
//! ends after a round in which no owner claimed a free cell.

use std::collections::VecDeque;

use crate::board::{Board, Geometry, Owner};

use super::rng::FastRng;

/// Whether `owner` may claim `cell` in the current region map.
pub fn can_claim(
    board: &Board,
    geometry: &Geometry,
    region: &[Option<Owner>],
    cell: usize,
    owner: Owner,
) -> bool {
    if region[cell].is_some() {
        return false;
    }
    if board.is_wall(cell) {
        return true;
    }
    geometry
        .neighbors(cell)
        .iter()
        .all(|&q| region[q].map_or(true, |o| o == owner))
}

/// Reusable frontier queues for repeated growth trials.
#[derive(Debug, Clone, Default)]
pub struct Grower {
    frontiers: Vec<VecDeque<usize>>,
}

impl Grower {
    pub fn new(owners: usize) -> Self {
        Grower {
            frontiers: vec![VecDeque::new(); owners],
        }
    }

    /// Runs one growth trial, overwriting `region`.
    ///
    /// The board must have at least one free cell; otherwise seeding never
    /// terminates.
    pub fn grow_once(
        &mut self,
        board: &Board,
        geometry: &Geometry,
        rng: &mut FastRng,
        region: &mut [Option<Owner>],
    ) {
        debug_assert!(board.free_count() > 0, "growth needs a free cell to seed");
        let cells = board.cell_count();

        for frontier in self.frontiers.iter_mut() {
            frontier.clear();
            loop {
                let p = rng.next(cells);
                if board.is_wall(p) {
                    continue;
                }
                frontier.push_back(p);
                break;
            }
        }

        region.iter_mut().for_each(|r| *r = None);

        loop {
            let mut progressed = false;
            for (owner, frontier) in self.frontiers.iter_mut().enumerate() {
                while let Some(p) = frontier.pop_front() {
                    if !can_claim(board, geometry, region, p, owner) {
                        continue;
                    }
                    frontier.extend(geometry.neighbors(p).iter().copied());
                    region[p] = Some(owner);
                    if board.is_wall(p) {
                        continue;
                    }
                    progressed = true;
                    break;
                }
            }
            if !progressed {
                break;
            }
        }
    }
}
