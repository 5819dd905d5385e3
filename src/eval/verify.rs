//! Independent checker for encoded solutions.
//!
//! Reads the two output panels back exactly as a judge would: validates
//! glyphs and owner digits, confirms walls are untouched, and rejects any
//! piece that attacks a piece of another owner. Sliding pieces stop at the
//! first piece or wall they meet. Works from the panels alone, so it also
//! catches bugs in the placer and the writer.

use thiserror::Error;

use crate::board::{Board, PieceKind, Score, Terrain};

/// Reasons an encoded solution is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("expected {expected} characters, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("cell ({row},{col}) has illegal character '{glyph}'")]
    IllegalGlyph { row: usize, col: usize, glyph: char },

    #[error("cannot remove the wall at cell ({row},{col})")]
    WallRemoved { row: usize, col: usize },

    #[error("cannot add a wall to cell ({row},{col})")]
    WallAdded { row: usize, col: usize },

    #[error("illegal owner '{glyph}' at cell ({row},{col})")]
    IllegalOwner { row: usize, col: usize, glyph: char },

    #[error("{piece} at ({row},{col}) attacks piece at ({target_row},{target_col})")]
    Attack {
        piece: &'static str,
        row: usize,
        col: usize,
        target_row: usize,
        target_col: usize,
    },
}

/// Scores of an accepted solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub scores: Vec<Score>,
    /// Minimum over owners.
    pub score: Score,
}

/// Checks encoded panels against the board and scores them.
pub fn verify(board: &Board, owners: usize, panels: &str) -> Result<Verdict, VerifyError> {
    let cells = board.cell_count();
    let chars: Vec<char> = panels.chars().collect();
    if chars.len() != 2 * cells {
        return Err(VerifyError::WrongLength {
            expected: 2 * cells,
            got: chars.len(),
        });
    }

    let mut pieces: Vec<Option<PieceKind>> = vec![None; cells];
    let mut owner_of: Vec<usize> = vec![0; cells];

    for cell in 0..cells {
        let (col, row) = board.coords(cell);
        let glyph = chars[cell];
        let piece = PieceKind::from_glyph(glyph);
        let terrain = Terrain::from_glyph(glyph);
        if piece.is_none() && terrain.is_none() {
            return Err(VerifyError::IllegalGlyph { row, col, glyph });
        }
        if board.is_wall(cell) && terrain != Some(Terrain::Wall) {
            return Err(VerifyError::WallRemoved { row, col });
        }
        if board.is_free(cell) && terrain == Some(Terrain::Wall) {
            return Err(VerifyError::WallAdded { row, col });
        }
        if piece.is_some() {
            let digit = chars[cells + cell];
            match digit.to_digit(10) {
                Some(d) if (d as usize) < owners => owner_of[cell] = d as usize,
                _ => {
                    return Err(VerifyError::IllegalOwner {
                        row,
                        col,
                        glyph: digit,
                    })
                }
            }
        }
        pieces[cell] = piece;
    }

    for cell in 0..cells {
        let Some(kind) = pieces[cell] else {
            continue;
        };
        if let Some(target) = first_enemy(board, &pieces, &owner_of, cell, kind) {
            let (col, row) = board.coords(cell);
            let (target_col, target_row) = board.coords(target);
            return Err(VerifyError::Attack {
                piece: kind.name(),
                row,
                col,
                target_row,
                target_col,
            });
        }
    }

    let mut scores: Vec<Score> = vec![0; owners];
    for cell in 0..cells {
        if let Some(kind) = pieces[cell] {
            scores[owner_of[cell]] += Score::from(board.values().of(kind));
        }
    }
    let score = scores.iter().copied().min().unwrap_or(0);
    Ok(Verdict { scores, score })
}

/// Returns a differently-owned piece attacked from `cell`, if any.
fn first_enemy(
    board: &Board,
    pieces: &[Option<PieceKind>],
    owner_of: &[usize],
    cell: usize,
    kind: PieceKind,
) -> Option<usize> {
    let (x, y) = board.coords(cell);
    let (x, y) = (x as i32, y as i32);
    for &(dx, dy) in kind.steps() {
        let (mut tx, mut ty) = (x + dx, y + dy);
        while let Some(t) = board.checked_cell(tx, ty) {
            if board.is_wall(t) {
                break;
            }
            if pieces[t].is_some() {
                if owner_of[t] != owner_of[cell] {
                    return Some(t);
                }
                break;
            }
            if !kind.slides() {
                break;
            }
            tx += dx;
            ty += dy;
        }
    }
    None
}
