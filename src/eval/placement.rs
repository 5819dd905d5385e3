//! Greedy piece placement and owner scoring.
//!
//! Every owned free cell gets the most valuable piece kind that does not
//! attack another owner. A kind is legal if, along each of its rays, the
//! first owned cell belongs to the same owner (or there is no owned cell).
//!
//! Cells are judged independently against one region-map snapshot. The
//! pass is not repeated to a fixed point, so a placement can be more
//! conservative than necessary.

use crate::board::{Board, Geometry, Owner, PieceKind, PieceMap, Score};

/// Placed pieces and per-owner point totals for one region map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pieces: PieceMap,
    scores: Vec<Score>,
}

impl Placement {
    /// An empty placement: no pieces, every owner at zero.
    pub fn empty(cells: usize, owners: usize) -> Self {
        Placement {
            pieces: vec![None; cells],
            scores: vec![0; owners],
        }
    }

    /// Places pieces for `region` from scratch.
    pub fn compute(
        board: &Board,
        geometry: &Geometry,
        region: &[Option<Owner>],
        owners: usize,
    ) -> Self {
        let mut placement = Placement::empty(board.cell_count(), owners);
        placement.recompute(board, geometry, region);
        placement
    }

    /// Re-derives pieces and scores in place, reusing the buffers.
    pub fn recompute(&mut self, board: &Board, geometry: &Geometry, region: &[Option<Owner>]) {
        self.scores.iter_mut().for_each(|s| *s = 0);
        for cell in 0..board.cell_count() {
            let piece = best_piece(board, geometry, region, cell);
            self.pieces[cell] = piece;
            if let (Some(kind), Some(owner)) = (piece, region[cell]) {
                self.scores[owner] += Score::from(board.values().of(kind));
            }
        }
    }

    #[inline]
    pub fn pieces(&self) -> &[Option<PieceKind>] {
        &self.pieces
    }

    #[inline]
    pub fn piece(&self, cell: usize) -> Option<PieceKind> {
        self.pieces[cell]
    }

    #[inline]
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// The worst owner's total.
    #[inline]
    pub fn min_score(&self) -> Score {
        self.scores.iter().copied().min().unwrap_or(0)
    }

    pub(crate) fn into_parts(self) -> (PieceMap, Vec<Score>) {
        (self.pieces, self.scores)
    }
}

/// Places pieces for a region map. Shorthand for `Placement::compute`.
pub fn place_all(
    board: &Board,
    geometry: &Geometry,
    region: &[Option<Owner>],
    owners: usize,
) -> Placement {
    Placement::compute(board, geometry, region, owners)
}

/// Whether a piece of `kind` on `cell` attacks no other owner.
pub fn can_place(geometry: &Geometry, region: &[Option<Owner>], cell: usize, kind: PieceKind) -> bool {
    let owner = region[cell];
    geometry.rays(cell, kind).iter().all(|ray| {
        match ray.iter().find_map(|&q| region[q]) {
            Some(other) => Some(other) == owner,
            None => true,
        }
    })
}

/// The most valuable legal piece for `cell`, or `None` for walls,
/// unassigned cells, and cells where nothing fits.
pub fn best_piece(
    board: &Board,
    geometry: &Geometry,
    region: &[Option<Owner>],
    cell: usize,
) -> Option<PieceKind> {
    if board.is_wall(cell) || region[cell].is_none() {
        return None;
    }
    geometry
        .ranked_pieces()
        .iter()
        .copied()
        .find(|&kind| can_place(geometry, region, cell, kind))
}
