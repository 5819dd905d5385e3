//! Problem input parsing.
//!
//! Input is a whitespace-separated stream: the side `N`, the owner count
//! `C`, `N * N` grid characters (`.` free, `#` wall), then the five piece
//! values in King, Queen, Rook, Bishop, Knight order. Grid characters are
//! read one non-whitespace character at a time, so rows may be given as
//! lines or one character per line.

use std::str::Chars;

use crate::board::{Board, PieceValues, Terrain, MAX_SIDE, PIECE_COUNT};

/// Largest owner count; owners are written as single decimal digits.
pub const MAX_OWNERS: usize = 10;

/// Errors that can occur while reading a problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("invalid {what}: '{token}'")]
    InvalidNumber { what: &'static str, token: String },

    #[error("board side {0} out of range 1..={max}", max = MAX_SIDE)]
    SideOutOfRange(usize),

    #[error("owner count {0} out of range 1..={max}", max = MAX_OWNERS)]
    OwnersOutOfRange(usize),

    #[error("invalid grid character '{glyph}' at ({row},{col})")]
    InvalidCell { row: usize, col: usize, glyph: char },
}

/// A parsed problem instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub board: Board,
    pub owners: usize,
}

/// Whitespace-skipping reader over the raw input.
struct Scanner<'a> {
    chars: Chars<'a>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            chars: input.chars(),
        }
    }

    /// Next non-whitespace character.
    fn glyph(&mut self) -> Option<char> {
        self.chars.by_ref().find(|c| !c.is_whitespace())
    }

    /// Next maximal run of non-whitespace characters.
    fn token(&mut self) -> Option<String> {
        let first = self.glyph()?;
        let mut token = String::from(first);
        for c in self.chars.by_ref() {
            if c.is_whitespace() {
                break;
            }
            token.push(c);
        }
        Some(token)
    }

    fn number<T: std::str::FromStr>(&mut self, what: &'static str) -> Result<T, InputError> {
        let token = self.token().ok_or(InputError::UnexpectedEof(what))?;
        token
            .parse()
            .map_err(|_| InputError::InvalidNumber { what, token })
    }
}

/// Parses a full problem from its text form.
pub fn parse_problem(input: &str) -> Result<Problem, InputError> {
    let mut scan = Scanner::new(input);

    let n: usize = scan.number("board side")?;
    if n == 0 || n > MAX_SIDE {
        return Err(InputError::SideOutOfRange(n));
    }
    let owners: usize = scan.number("owner count")?;
    if owners == 0 || owners > MAX_OWNERS {
        return Err(InputError::OwnersOutOfRange(owners));
    }

    let mut terrain = Vec::with_capacity(n * n);
    for cell in 0..n * n {
        let glyph = scan.glyph().ok_or(InputError::UnexpectedEof("grid"))?;
        let t = Terrain::from_glyph(glyph).ok_or(InputError::InvalidCell {
            row: cell / n,
            col: cell % n,
            glyph,
        })?;
        terrain.push(t);
    }

    const VALUE_NAMES: [&str; PIECE_COUNT] = [
        "king value",
        "queen value",
        "rook value",
        "bishop value",
        "knight value",
    ];
    let mut values = [0u32; PIECE_COUNT];
    for (value, what) in values.iter_mut().zip(VALUE_NAMES) {
        *value = scan.number(what)?;
    }

    Ok(Problem {
        board: Board::new(n, terrain, PieceValues(values)),
        owners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;

    #[test]
    fn parse_line_layout() {
        let p = parse_problem("3\n2\n...\n.#.\n...\n10\n9\n5\n3\n3\n").unwrap();
        assert_eq!(p.owners, 2);
        assert_eq!(p.board.side(), 3);
        assert!(p.board.is_wall(4));
        assert_eq!(p.board.free_count(), 8);
        assert_eq!(p.board.values().of(PieceKind::Queen), 9);
        assert_eq!(p.board.values().of(PieceKind::Knight), 3);
    }

    #[test]
    fn parse_one_char_per_line() {
        let p = parse_problem("2 1\n#\n.\n.\n#\n1 2 3 4 5").unwrap();
        assert_eq!(p.board, Board::from_rows(&["#.", ".#"], [1, 2, 3, 4, 5]).unwrap());
        assert_eq!(p.owners, 1);
    }

    #[test]
    fn reject_bad_side_and_owners() {
        assert_eq!(parse_problem("0 2"), Err(InputError::SideOutOfRange(0)));
        assert_eq!(parse_problem("51 2"), Err(InputError::SideOutOfRange(51)));
        assert_eq!(parse_problem("3 0"), Err(InputError::OwnersOutOfRange(0)));
        assert_eq!(parse_problem("3 11"), Err(InputError::OwnersOutOfRange(11)));
    }

    #[test]
    fn reject_bad_grid_and_numbers() {
        assert_eq!(
            parse_problem("2 2 .. .x 1 1 1 1 1"),
            Err(InputError::InvalidCell {
                row: 1,
                col: 1,
                glyph: 'x'
            })
        );
        assert_eq!(
            parse_problem("two 2"),
            Err(InputError::InvalidNumber {
                what: "board side",
                token: "two".to_string()
            })
        );
        assert_eq!(
            parse_problem("2 2 .. .. 1 1 -1 1 1"),
            Err(InputError::InvalidNumber {
                what: "rook value",
                token: "-1".to_string()
            })
        );
    }

    #[test]
    fn reject_truncated_input() {
        assert_eq!(parse_problem(""), Err(InputError::UnexpectedEof("board side")));
        assert_eq!(parse_problem("2 2 .."), Err(InputError::UnexpectedEof("grid")));
        assert_eq!(
            parse_problem("2 2 .. .. 1 1 1 1"),
            Err(InputError::UnexpectedEof("knight value"))
        );
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            InputError::SideOutOfRange(60).to_string(),
            "board side 60 out of range 1..=50"
        );
    }
}
