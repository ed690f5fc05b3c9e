//! Dark pool: a hidden-piece xiangqi played on half a board.
//!
//! Every piece starts face down. A turn either flips a hidden piece or steps
//! a face-up piece of one's own side to a neighbouring cell, capturing by rank.
//! Nobody owns a side until the first flip: the player who makes it takes the
//! flipped piece's side for the rest of the game.

use super::movement::{Movement, piece_moves};
use super::{Outcome, Position, Rules, royal_outcome};
use crate::board::{Board, Piece, PieceKind};
use crate::executor;
use crate::moves::{Move, MoveKind};
use crate::variant::Variant;

pub struct DarkPool;

/// Has any piece been turned face up yet?
pub fn any_revealed(board: &Board) -> bool {
    board.pieces().any(|(_, p)| p.revealed)
}

impl Rules for DarkPool {
    fn variant(&self) -> Variant {
        Variant::DarkPool
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        let opened = any_revealed(&pos.board);
        let mut moves = Vec::new();
        for (c, piece) in pos.board.pieces() {
            if !piece.revealed {
                moves.push(Move::flip(c));
            } else if opened && piece.side == pos.to_move {
                piece_moves(&pos.board, c, Movement::RankStep, &mut moves);
            }
        }
        moves
    }

    fn outcome(&self, pos: &Position) -> Option<Outcome> {
        royal_outcome(&pos.board, PieceKind::General)
    }

    fn play(&self, pos: &Position, mv: &Move) -> (Position, Vec<Piece>) {
        let (board, captured) = executor::apply(&pos.board, mv);
        let next = match (mv.kind, any_revealed(&pos.board)) {
            // Opening flip: the flipper now plays the colour they turned up.
            (MoveKind::Flip, false) => board
                .piece_at(mv.to)
                .map_or(pos.to_move.opponent(), |p| p.side.opponent()),
            _ => pos.to_move.opponent(),
        };
        (Position::new(board, next), captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Side};

    #[test]
    fn test_only_flips_before_reveal() {
        let board = Variant::DarkPool.initial_board_with(&mut fastrand::Rng::with_seed(7));
        for side in Side::BOTH {
            let moves = DarkPool.legal_moves(&Position::new(board.clone(), side));
            assert_eq!(moves.len(), 32);
            assert!(moves.iter().all(|m| m.kind == MoveKind::Flip));
        }
    }

    #[test]
    fn test_first_flip_assigns_side() {
        let mut board = Board::new(8, 4);
        board.put(Coord::new(0, 0), Piece::hidden(Side::Black, PieceKind::Horse));
        board.put(Coord::new(1, 0), Piece::hidden(Side::White, PieceKind::Horse));
        // Whoever moves first flips a black piece and becomes Black.
        let pos = Position::new(board, Side::White);
        let (after, _) = DarkPool.play(&pos, &Move::flip(Coord::new(0, 0)));
        assert_eq!(after.to_move, Side::White);
        // Later flips never reassign.
        let (after, _) = DarkPool.play(&after, &Move::flip(Coord::new(1, 0)));
        assert_eq!(after.to_move, Side::Black);
    }

    #[test]
    fn test_no_move_onto_hidden_cell() {
        let mut board = Variant::DarkPool
            .parse_board(&["G.......", "........", "........", "......g."])
            .unwrap();
        board.put(Coord::new(1, 0), Piece::hidden(Side::Black, PieceKind::Soldier));
        let pos = Position::new(board, Side::White);
        let moves = DarkPool.legal_moves(&pos);
        assert!(!moves.iter().any(|m| m.kind == MoveKind::Step && m.to == Coord::new(1, 0)));
        assert!(moves.contains(&Move::flip(Coord::new(1, 0))));
    }

    #[test]
    fn test_soldier_takes_general() {
        let board = Variant::DarkPool
            .parse_board(&["Sg......", "........", "........", "......G."])
            .unwrap();
        let pos = Position::new(board, Side::White);
        let take = Move::capture(Coord::new(0, 0), Coord::new(1, 0), Coord::new(1, 0));
        assert!(DarkPool.is_legal(&pos, &take));
        let (done, _) = DarkPool.play(&pos, &take);
        assert_eq!(DarkPool.outcome(&done), Some(Outcome::Winner(Side::White)));
    }

    #[test]
    fn test_lower_rank_cannot_capture() {
        let board = Variant::DarkPool
            .parse_board(&["Hr......", "........", "........", "G.....g."])
            .unwrap();
        let pos = Position::new(board, Side::White);
        let moves = DarkPool.legal_moves(&pos);
        assert!(!moves.iter().any(|m| m.from == Coord::new(0, 0) && m.to == Coord::new(1, 0)));
    }
}
