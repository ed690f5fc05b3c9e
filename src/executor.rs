//! Move Executor: applies a move to a board.
//!
//! [`apply`] works on a copy and is what the search uses; [`apply_in_place`]
//! mutates the authoritative board when a move is confirmed.

use crate::board::{Board, Coord, Piece, PieceKind, Side};
use crate::moves::{Move, MoveKind};

/// Apply `mv` to a copy of `board`. The input is left untouched.
pub fn apply(board: &Board, mv: &Move) -> (Board, Vec<Piece>) {
    let mut next = board.clone();
    let captured = apply_in_place(&mut next, mv);
    (next, captured)
}

/// Apply `mv` to `board`, returning the captured pieces in capture order.
///
/// The move is assumed legal; anything missing from the board is skipped.
pub fn apply_in_place(board: &mut Board, mv: &Move) -> Vec<Piece> {
    match mv.kind {
        MoveKind::Flip => {
            if let Some(mut piece) = board.piece_at(mv.to) {
                piece.revealed = true;
                board.put(mv.to, piece);
            }
            Vec::new()
        }
        MoveKind::Place(side) => {
            let captured = remove_all(board, &mv.captures);
            board.put(mv.to, Piece::new(side, PieceKind::Stone));
            captured
        }
        MoveKind::Step => {
            let moving = board.take(mv.from);
            let captured = remove_all(board, &mv.captures);
            if let Some(piece) = moving {
                board.put(mv.to, promote(board, piece, mv.to));
            }
            captured
        }
    }
}

fn remove_all(board: &mut Board, cells: &[Coord]) -> Vec<Piece> {
    cells.iter().filter_map(|&c| board.take(c)).collect()
}

fn far_row(board: &Board, side: Side) -> usize {
    match side {
        Side::White => 0,
        Side::Black => board.height() - 1,
    }
}

/// Pawns become queens and draughts men become kings on the far row.
fn promote(board: &Board, piece: Piece, to: Coord) -> Piece {
    if to.y != far_row(board, piece.side) {
        return piece;
    }
    match piece.kind {
        PieceKind::Pawn => Piece::new(piece.side, PieceKind::Queen),
        PieceKind::Man => Piece::crowned(piece.side),
        _ => piece,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_leaves_input_untouched() {
        let mut board = Board::new(8, 8);
        board.put(Coord::new(0, 7), Piece::new(Side::White, PieceKind::Rook));
        board.put(Coord::new(0, 0), Piece::new(Side::Black, PieceKind::Rook));
        let mv = Move::capture(Coord::new(0, 7), Coord::new(0, 0), Coord::new(0, 0));
        let (next, captured) = apply(&board, &mv);
        assert_eq!(captured, vec![Piece::new(Side::Black, PieceKind::Rook)]);
        assert_eq!(board.count(Side::Black), 1);
        assert_eq!(next.count(Side::Black), 0);
        assert!(next.is_empty(Coord::new(0, 7)));
    }

    #[test]
    fn test_pawn_promotes_to_queen() {
        let mut board = Board::new(8, 8);
        board.put(Coord::new(3, 1), Piece::new(Side::White, PieceKind::Pawn));
        let (next, _) = apply(&board, &Move::step(Coord::new(3, 1), Coord::new(3, 0)));
        assert_eq!(next.piece_at(Coord::new(3, 0)).map(|p| p.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn test_man_crowned_on_far_row() {
        let mut board = Board::new(10, 10);
        board.put(Coord::new(2, 8), Piece::new(Side::Black, PieceKind::Man));
        let (next, _) = apply(&board, &Move::step(Coord::new(2, 8), Coord::new(3, 9)));
        assert_eq!(next.piece_at(Coord::new(3, 9)), Some(Piece::crowned(Side::Black)));
    }

    #[test]
    fn test_chain_removes_every_jumped_piece() {
        let mut board = Board::new(10, 10);
        board.put(Coord::new(1, 8), Piece::new(Side::White, PieceKind::Man));
        board.put(Coord::new(2, 7), Piece::new(Side::Black, PieceKind::Man));
        board.put(Coord::new(2, 5), Piece::new(Side::Black, PieceKind::Man));
        let mv = Move::chain(
            Coord::new(1, 8),
            vec![Coord::new(3, 6)],
            Coord::new(1, 4),
            vec![Coord::new(2, 7), Coord::new(2, 5)],
        );
        let captured = apply_in_place(&mut board, &mv);
        assert_eq!(captured.len(), 2);
        assert_eq!(board.count(Side::Black), 0);
        assert!(board.piece_at(Coord::new(1, 4)).is_some());
    }

    #[test]
    fn test_flip_reveals_in_place() {
        let mut board = Board::new(8, 4);
        board.put(Coord::new(2, 2), Piece::hidden(Side::Black, PieceKind::Cannon));
        apply_in_place(&mut board, &Move::flip(Coord::new(2, 2)));
        assert_eq!(
            board.piece_at(Coord::new(2, 2)),
            Some(Piece::new(Side::Black, PieceKind::Cannon))
        );
    }
}
