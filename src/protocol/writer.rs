//! Solution and problem encoding.
//!
//! A solution is written as two panels of `N * N` characters each. The
//! first panel holds the wall glyph on walls, the piece glyph on owned free
//! cells holding a piece, and `.` elsewhere; the second holds the owner
//! digit on those same piece cells and `.` elsewhere. On the wire the total
//! length comes first on its own line, then one character per line.

use std::io::{self, Write};

use crate::board::{Board, Terrain, ALL_PIECES};
use crate::search::Solution;

/// Encodes both panels as one string of `2 * N * N` characters.
pub fn encode_panels(board: &Board, solution: &Solution) -> String {
    let cells = board.cell_count();
    let mut pieces = String::with_capacity(cells);
    let mut owners = String::with_capacity(cells);
    for cell in 0..cells {
        if board.is_wall(cell) {
            pieces.push(Terrain::Wall.glyph());
            owners.push('.');
            continue;
        }
        match (solution.region[cell], solution.pieces[cell]) {
            (Some(owner), Some(kind)) => {
                debug_assert!(owner < 10, "owner {} has no digit", owner);
                pieces.push(kind.glyph());
                owners.push((b'0' + owner as u8) as char);
            }
            _ => {
                pieces.push(Terrain::Free.glyph());
                owners.push('.');
            }
        }
    }
    pieces.push_str(&owners);
    pieces
}

/// Writes encoded panels in wire form.
pub fn write_panels<W: Write>(out: &mut W, panels: &str) -> io::Result<()> {
    writeln!(out, "{}", panels.chars().count())?;
    for c in panels.chars() {
        writeln!(out, "{}", c)?;
    }
    out.flush()
}

/// Formats a problem in the input format read by `parse_problem`.
pub fn encode_problem(board: &Board, owners: usize) -> String {
    let n = board.side();
    let mut out = String::with_capacity(n * (n + 1) + 32);
    out.push_str(&format!("{}\n{}\n", n, owners));
    for y in 0..n {
        for x in 0..n {
            out.push(board.terrain(board.cell(x, y)).glyph());
        }
        out.push('\n');
    }
    for kind in ALL_PIECES {
        out.push_str(&format!("{}\n", board.values().of(kind)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Geometry, PieceKind};
    use crate::eval::{verify, Placement};
    use crate::protocol::parser::parse_problem;

    fn board3() -> Board {
        Board::from_rows(&["...", ".#.", "..."], [10, 9, 5, 3, 3]).unwrap()
    }

    #[test]
    fn encode_marks_pieces_walls_and_owners() {
        let board = board3();
        let geo = Geometry::new(&board);
        let mut region = vec![None; 9];
        region[0] = Some(0);
        region[8] = Some(1);
        let placement = Placement::compute(&board, &geo, &region, 2);
        let solution = Solution::new(region, placement);
        let panels = encode_panels(&board, &solution);
        assert_eq!(panels, "K...#...K0.......1");
        let verdict = verify(&board, 2, &panels).unwrap();
        assert_eq!(verdict.scores, vec![10, 10]);
    }

    #[test]
    fn owned_cells_without_piece_print_as_free() {
        let board = board3();
        let mut solution = Solution::empty(9, 2);
        solution.region[2] = Some(1);
        let panels = encode_panels(&board, &solution);
        assert_eq!(panels, concat!("....#....", "........."));
        solution.pieces[2] = Some(PieceKind::Rook);
        let panels = encode_panels(&board, &solution);
        assert_eq!(&panels[..3], "..R");
        assert_eq!(&panels[9..12], "..1");
    }

    #[test]
    fn wire_form_is_length_then_one_char_per_line() {
        let mut out = Vec::new();
        write_panels(&mut out, "K.#1").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4\nK\n.\n#\n1\n");
    }

    #[test]
    fn problem_text_parses_back() {
        let board = board3();
        let text = encode_problem(&board, 4);
        assert_eq!(text, "3\n4\n...\n.#.\n...\n10\n9\n5\n3\n3\n");
        let problem = parse_problem(&text).unwrap();
        assert_eq!(problem.board, board);
        assert_eq!(problem.owners, 4);
    }
}
