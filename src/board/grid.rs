//! Board representation.
//!
//! A square grid of free cells and walls plus the point value of every
//! piece kind. Cells are addressed by the flattened index `y * n + x`.

use super::piece::{PieceKind, PIECE_COUNT};

/// Largest supported board side.
pub const MAX_SIDE: usize = 50;

/// Terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Free,
    Wall,
}

impl Terrain {
    /// Returns the grid glyph for this terrain.
    pub const fn glyph(self) -> char {
        match self {
            Terrain::Free => '.',
            Terrain::Wall => '#',
        }
    }

    /// Parses terrain from its grid glyph.
    pub fn from_glyph(c: char) -> Option<Terrain> {
        match c {
            '.' => Some(Terrain::Free),
            '#' => Some(Terrain::Wall),
            _ => None,
        }
    }
}

/// Point value of each piece kind, indexed by `PieceKind as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceValues(pub [u32; PIECE_COUNT]);

impl PieceValues {
    /// Returns the point value of a piece kind.
    #[inline]
    pub fn of(&self, kind: PieceKind) -> u32 {
        self.0[kind as usize]
    }
}

/// An immutable board: side length, terrain, and piece values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    n: usize,
    terrain: Vec<Terrain>,
    values: PieceValues,
}

impl Board {
    /// Creates a board from a row-major terrain vector.
    ///
    /// `terrain.len()` must equal `n * n`; callers validate input first.
    pub fn new(n: usize, terrain: Vec<Terrain>, values: PieceValues) -> Self {
        debug_assert!(n > 0, "board side must be positive");
        debug_assert_eq!(terrain.len(), n * n);
        Board { n, terrain, values }
    }

    /// Parses a board from `n` row strings made of `.` and `#`.
    ///
    /// Returns `None` on a malformed row. Mostly useful in tests.
    pub fn from_rows(rows: &[&str], values: [u32; PIECE_COUNT]) -> Option<Board> {
        let n = rows.len();
        if n == 0 {
            return None;
        }
        let mut terrain = Vec::with_capacity(n * n);
        for row in rows {
            if row.chars().count() != n {
                return None;
            }
            for c in row.chars() {
                terrain.push(Terrain::from_glyph(c)?);
            }
        }
        Some(Board::new(n, terrain, PieceValues(values)))
    }

    /// Side length.
    #[inline]
    pub fn side(&self) -> usize {
        self.n
    }

    /// Number of cells (`n * n`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.terrain.len()
    }

    /// Flattened index of `(x, y)`.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> usize {
        y * self.n + x
    }

    /// Column and row of a flattened index.
    #[inline]
    pub fn coords(&self, cell: usize) -> (usize, usize) {
        (cell % self.n, cell / self.n)
    }

    /// Returns the cell at `(x, y)` if both coordinates are on the board.
    #[inline]
    pub fn checked_cell(&self, x: i32, y: i32) -> Option<usize> {
        let n = self.n as i32;
        if (0..n).contains(&x) && (0..n).contains(&y) {
            Some(self.cell(x as usize, y as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn terrain(&self, cell: usize) -> Terrain {
        self.terrain[cell]
    }

    #[inline]
    pub fn is_wall(&self, cell: usize) -> bool {
        self.terrain[cell] == Terrain::Wall
    }

    #[inline]
    pub fn is_free(&self, cell: usize) -> bool {
        self.terrain[cell] == Terrain::Free
    }

    /// Number of free cells on the board.
    pub fn free_count(&self) -> usize {
        self.terrain.iter().filter(|&&t| t == Terrain::Free).count()
    }

    /// Piece point values.
    #[inline]
    pub fn values(&self) -> &PieceValues {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_parses_terrain() {
        let board = Board::from_rows(&[".#", ".."], [1, 2, 3, 4, 5]).unwrap();
        assert_eq!(board.side(), 2);
        assert_eq!(board.cell_count(), 4);
        assert!(board.is_free(0));
        assert!(board.is_wall(1));
        assert_eq!(board.free_count(), 3);
        assert_eq!(board.values().of(PieceKind::Bishop), 4);
    }

    #[test]
    fn from_rows_rejects_ragged_and_unknown_glyphs() {
        assert!(Board::from_rows(&["..", "."], [0; 5]).is_none());
        assert!(Board::from_rows(&[".x", ".."], [0; 5]).is_none());
        assert!(Board::from_rows(&[], [0; 5]).is_none());
    }

    #[test]
    fn cell_and_coords_are_inverse() {
        let board = Board::from_rows(&["...", "...", "..."], [0; 5]).unwrap();
        for cell in 0..board.cell_count() {
            let (x, y) = board.coords(cell);
            assert_eq!(board.cell(x, y), cell);
        }
        assert_eq!(board.cell(2, 1), 5);
    }

    #[test]
    fn checked_cell_rejects_out_of_bounds() {
        let board = Board::from_rows(&["...", "...", "..."], [0; 5]).unwrap();
        assert_eq!(board.checked_cell(0, 0), Some(0));
        assert_eq!(board.checked_cell(2, 2), Some(8));
        assert_eq!(board.checked_cell(-1, 0), None);
        assert_eq!(board.checked_cell(0, 3), None);
    }
}
