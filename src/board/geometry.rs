//! Precomputed grid geometry.
//!
//! For every cell: its 8-neighborhood, and for every piece kind the list of
//! rays the piece attacks along. A ray is the ordered run of cells a piece
//! reaches in one direction before a wall or the board edge stops it. King
//! and knight rays hold a single cell. Walls never appear inside a ray.
//!
//! Everything here is derived once from the board and never mutated.

use super::grid::Board;
use super::piece::{PieceKind, ALL_PIECES, PIECE_COUNT};

/// An ordered run of attacked cells in one direction.
pub type Ray = Vec<usize>;

/// Neighborhoods, rays, and piece preference order for one board.
#[derive(Debug, Clone)]
pub struct Geometry {
    neighbors: Vec<Vec<usize>>,
    /// `rays[cell * PIECE_COUNT + kind]`.
    rays: Vec<Vec<Ray>>,
    ranked: [PieceKind; PIECE_COUNT],
}

impl Geometry {
    /// Builds the geometry tables for a board.
    pub fn new(board: &Board) -> Self {
        let n = board.side() as i32;
        let cells = board.cell_count();

        let mut neighbors = Vec::with_capacity(cells);
        for y in 0..n {
            for x in 0..n {
                let mut nei = Vec::with_capacity(8);
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        if let Some(t) = board.checked_cell(x + dx, y + dy) {
                            nei.push(t);
                        }
                    }
                }
                neighbors.push(nei);
            }
        }

        let mut rays = Vec::with_capacity(cells * PIECE_COUNT);
        for y in 0..n {
            for x in 0..n {
                for kind in ALL_PIECES {
                    rays.push(trace_rays(board, x, y, kind));
                }
            }
        }

        Geometry {
            neighbors,
            rays,
            ranked: rank_pieces(board),
        }
    }

    /// In-bounds orthogonal and diagonal neighbors of a cell.
    #[inline]
    pub fn neighbors(&self, cell: usize) -> &[usize] {
        &self.neighbors[cell]
    }

    /// Rays a piece of `kind` standing on `cell` attacks along.
    #[inline]
    pub fn rays(&self, cell: usize, kind: PieceKind) -> &[Ray] {
        &self.rays[cell * PIECE_COUNT + kind as usize]
    }

    /// Piece kinds by descending point value, ties in wire order.
    #[inline]
    pub fn ranked_pieces(&self) -> &[PieceKind; PIECE_COUNT] {
        &self.ranked
    }
}

/// Walks each of the piece's directions from `(x, y)`.
fn trace_rays(board: &Board, x: i32, y: i32, kind: PieceKind) -> Vec<Ray> {
    let mut out = Vec::new();
    for &(dx, dy) in kind.steps() {
        let mut ray = Ray::new();
        let (mut tx, mut ty) = (x + dx, y + dy);
        while let Some(t) = board.checked_cell(tx, ty) {
            if board.is_wall(t) {
                break;
            }
            ray.push(t);
            if !kind.slides() {
                break;
            }
            tx += dx;
            ty += dy;
        }
        if !ray.is_empty() {
            out.push(ray);
        }
    }
    out
}

/// Sorts piece kinds by value, highest first. The sort is stable so equal
/// values keep wire order.
fn rank_pieces(board: &Board) -> [PieceKind; PIECE_COUNT] {
    let mut ranked = ALL_PIECES;
    ranked.sort_by(|a, b| board.values().of(*b).cmp(&board.values().of(*a)));
    ranked
}
