//! Board representation and precomputed geometry.
//!
//! Contains piece kinds, the immutable board, and the neighborhood and
//! ray tables derived from it.

pub mod geometry;
pub mod grid;
pub mod piece;

pub use geometry::{Geometry, Ray};
pub use grid::{Board, PieceValues, Terrain, MAX_SIDE};
pub use piece::{PieceKind, ALL_PIECES, PIECE_COUNT};

/// Index of a competing owner, in `[0, owners)`.
pub type Owner = usize;

/// Owner of every cell; `None` means unassigned.
pub type RegionMap = Vec<Option<Owner>>;

/// Point total of one owner. Wider than a piece value so that a full
/// board of maximal values cannot overflow.
pub type Score = u64;

/// Placed piece of every cell; derived from a region map.
pub type PieceMap = Vec<Option<PieceKind>>;
