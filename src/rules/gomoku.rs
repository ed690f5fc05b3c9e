//! Gomoku: five in a row wins.

use super::{Outcome, Position, Rules, cells_near_stones};
use crate::board::{Board, Coord, Side};
use crate::constants::{GOMOKU_CANDIDATE_RADIUS, GOMOKU_RUN};
use crate::moves::Move;
use crate::variant::Variant;

/// Row, column and the two diagonals.
pub const LINES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

pub struct Gomoku;

/// Length of the unbroken run of `side` stones through `at` along `(dx, dy)`.
fn run_length(board: &Board, at: Coord, side: Side, dx: i32, dy: i32) -> usize {
    let same = |c: Coord| board.piece_at(c).is_some_and(|p| p.side == side);
    let mut len = 1;
    for sign in [1, -1] {
        let mut cur = at;
        while let Some(next) = board.offset(cur, dx * sign, dy * sign) {
            if !same(next) {
                break;
            }
            len += 1;
            cur = next;
        }
    }
    len
}

/// Does the stone at `at` sit in a run of five or more?
pub fn completes_five(board: &Board, at: Coord) -> bool {
    let Some(stone) = board.piece_at(at) else {
        return false;
    };
    LINES
        .iter()
        .any(|&(dx, dy)| run_length(board, at, stone.side, dx, dy) >= GOMOKU_RUN)
}

/// The side owning any five-in-a-row on the board.
pub fn five_in_row(board: &Board) -> Option<Side> {
    board
        .pieces()
        .find(|&(c, _)| completes_five(board, c))
        .map(|(_, p)| p.side)
}

impl Rules for Gomoku {
    fn variant(&self) -> Variant {
        Variant::Gomoku
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        pos.board
            .coords()
            .filter(|&c| pos.board.is_empty(c))
            .map(|c| Move::place(c, pos.to_move, Vec::new()))
            .collect()
    }

    fn search_moves(&self, pos: &Position) -> Vec<Move> {
        cells_near_stones(&pos.board, GOMOKU_CANDIDATE_RADIUS)
            .into_iter()
            .map(|c| Move::place(c, pos.to_move, Vec::new()))
            .collect()
    }

    fn outcome(&self, pos: &Position) -> Option<Outcome> {
        five_in_row(&pos.board).map(Outcome::Winner)
    }

    fn no_moves_outcome(&self, _pos: &Position) -> Outcome {
        Outcome::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, PieceKind};

    #[test]
    fn test_five_detected_on_fifth_stone() {
        let mut pos = Position::new(Board::new(15, 15), Side::Black);
        for x in 3..=7 {
            assert_eq!(Gomoku.outcome(&pos), None);
            let mv = Move::place(Coord::new(x, 7), Side::Black, Vec::new());
            assert!(Gomoku.is_legal(&pos, &mv));
            pos = Gomoku.play(&pos, &mv).0;
            // Keep Black on move; White passes in this drill.
            pos.to_move = Side::Black;
        }
        assert_eq!(Gomoku.outcome(&pos), Some(Outcome::Winner(Side::Black)));
    }

    #[test]
    fn test_broken_line_is_not_five() {
        let board = Variant::Gomoku
            .parse_board(&[
                ".......",
                "XXXXOX.",
                ".......",
                ".......",
                ".......",
                ".......",
                ".......",
            ])
            .unwrap();
        assert_eq!(five_in_row(&board), None);
    }

    #[test]
    fn test_diagonal_five() {
        let board = Variant::Gomoku
            .parse_board(&[
                "O......",
                ".O.....",
                "..O....",
                "...O...",
                "....O..",
                ".......",
                ".......",
            ])
            .unwrap();
        assert_eq!(five_in_row(&board), Some(Side::White));
    }

    #[test]
    fn test_search_moves_near_stones() {
        let mut board = Board::new(15, 15);
        board.put(Coord::new(0, 0), Piece::new(Side::Black, PieceKind::Stone));
        let pos = Position::new(board, Side::White);
        // 3x3 corner window minus the stone itself.
        assert_eq!(Gomoku.search_moves(&pos).len(), 8);
        assert_eq!(Gomoku.legal_moves(&pos).len(), 224);
    }
}
