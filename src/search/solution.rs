//! Region map plus its derived placement.

use crate::board::{Board, Geometry, PieceMap, RegionMap, Score};
use crate::eval::Placement;

/// A snapshot of a region map with the pieces and scores derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub region: RegionMap,
    pub pieces: PieceMap,
    pub scores: Vec<Score>,
}

impl Solution {
    /// Bundles a region map with the placement computed from it.
    pub fn new(region: RegionMap, placement: Placement) -> Self {
        let (pieces, scores) = placement.into_parts();
        Solution {
            region,
            pieces,
            scores,
        }
    }

    /// A solution with nothing assigned.
    pub fn empty(cells: usize, owners: usize) -> Self {
        Solution::new(vec![None; cells], Placement::empty(cells, owners))
    }

    /// The worst owner's total.
    pub fn min_score(&self) -> Score {
        self.scores.iter().copied().min().unwrap_or(0)
    }

    /// Releases owned free cells that hold no piece until none remain.
    ///
    /// The placer treats every owned cell as a blocker, but an encoded
    /// solution only shows pieces. Once every owned free cell holds a piece
    /// the two views agree, so the encoded board is legal. Releasing a cell
    /// can only lengthen other rays, which may strand further cells; the
    /// loop ends because each round shrinks the owned set.
    ///
    /// Returns the number of cells released.
    pub fn settle(&mut self, board: &Board, geometry: &Geometry) -> usize {
        let owners = self.scores.len();
        let mut released = 0;
        loop {
            let placement = Placement::compute(board, geometry, &self.region, owners);
            let mut stranded = 0;
            for cell in 0..board.cell_count() {
                if board.is_free(cell) && self.region[cell].is_some() && placement.piece(cell).is_none() {
                    self.region[cell] = None;
                    stranded += 1;
                }
            }
            if stranded == 0 {
                let (pieces, scores) = placement.into_parts();
                self.pieces = pieces;
                self.scores = scores;
                return released;
            }
            released += stranded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;

    #[test]
    fn empty_solution_scores_zero() {
        let s = Solution::empty(9, 3);
        assert_eq!(s.scores, vec![0, 0, 0]);
        assert_eq!(s.min_score(), 0);
        assert!(s.pieces.iter().all(|p| p.is_none()));
    }

    #[test]
    fn settle_releases_pieceless_cells() {
        let board = Board::from_rows(&["...", "...", "..."], [10, 9, 5, 3, 2]).unwrap();
        let geo = Geometry::new(&board);
        // Corner (0,0) for owner 0 is hemmed in by owner 1 and gets no piece.
        let mut region = vec![Some(1); 9];
        region[0] = Some(0);
        let placement = Placement::compute(&board, &geo, &region, 2);
        assert_eq!(placement.piece(0), None);

        let mut s = Solution::new(region, placement);
        let released = s.settle(&board, &geo);
        assert!(released >= 1);
        assert_eq!(s.region[0], None);
        for cell in 0..9 {
            assert_eq!(s.region[cell].is_some(), s.pieces[cell].is_some());
        }
    }

    #[test]
    fn settle_keeps_fully_placed_solutions() {
        let board = Board::from_rows(&["..", ".."], [4, 0, 0, 0, 0]).unwrap();
        let geo = Geometry::new(&board);
        let region = vec![Some(0); 4];
        let placement = Placement::compute(&board, &geo, &region, 1);
        let mut s = Solution::new(region.clone(), placement);
        assert_eq!(s.settle(&board, &geo), 0);
        assert_eq!(s.region, region);
        assert!(s.pieces.iter().all(|&p| p == Some(PieceKind::King)));
        assert_eq!(s.min_score(), 16);
    }
}
