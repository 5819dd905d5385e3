//! Chess piece kinds and their movement patterns.
//!
//! Pieces are indexed in the fixed wire order King, Queen, Rook, Bishop,
//! Knight, which is also the order point values arrive in.

/// The number of piece kinds.
pub const PIECE_COUNT: usize = 5;

/// A chess piece kind that can be placed on an owned cell.
///
/// The `#[repr(u8)]` discriminant doubles as an index into per-kind tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
}

/// All piece kinds in wire order.
pub const ALL_PIECES: [PieceKind; PIECE_COUNT] = [
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// King and queen directions, `(dx, dy)`.
const ROYAL_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const ROOK_STEPS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

const BISHOP_STEPS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

impl PieceKind {
    /// Returns the descriptive-notation glyph used on the output board.
    pub const fn glyph(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
        }
    }

    /// Parses a piece kind from its glyph.
    pub fn from_glyph(c: char) -> Option<PieceKind> {
        match c {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'R' => Some(PieceKind::Rook),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// Returns the human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
        }
    }

    /// Direction vectors this piece attacks along.
    pub const fn steps(self) -> &'static [(i32, i32)] {
        match self {
            PieceKind::King | PieceKind::Queen => &ROYAL_STEPS,
            PieceKind::Rook => &ROOK_STEPS,
            PieceKind::Bishop => &BISHOP_STEPS,
            PieceKind::Knight => &KNIGHT_STEPS,
        }
    }

    /// Whether the piece keeps moving along a direction until blocked.
    pub const fn slides(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop
        )
    }
}
