//! Xiangqi (Chinese chess).
//!
//! Red is [`Side::White`] and starts at the bottom (rows 7-9).
//! Losing the general ends the game; there is no check or stalemate logic.
//!
//! [`Side::White`]: crate::board::Side::White

use super::movement::{DIAGONAL, KNIGHT_OFFSETS, Movement, ORTHOGONAL, Zone, piece_moves};
use super::{Outcome, Position, Rules, royal_outcome};
use crate::board::PieceKind;
use crate::moves::Move;
use crate::variant::Variant;

pub struct Xiangqi;

pub fn movement(kind: PieceKind) -> Option<Movement> {
    Some(match kind {
        PieceKind::General => Movement::General,
        PieceKind::Advisor => Movement::Step {
            dirs: &DIAGONAL,
            zone: Zone::Palace,
        },
        PieceKind::Elephant => Movement::Elephant,
        PieceKind::Horse => Movement::Leap {
            offsets: &KNIGHT_OFFSETS,
            hobbled: true,
        },
        PieceKind::Chariot => Movement::Slide(&ORTHOGONAL),
        PieceKind::Cannon => Movement::Screen,
        PieceKind::Soldier => Movement::Soldier,
        _ => return None,
    })
}

impl Rules for Xiangqi {
    fn variant(&self) -> Variant {
        Variant::Xiangqi
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, piece) in pos.board.pieces() {
            if piece.side != pos.to_move {
                continue;
            }
            if let Some(m) = movement(piece.kind) {
                piece_moves(&pos.board, from, m, &mut moves);
            }
        }
        moves
    }

    fn outcome(&self, pos: &Position) -> Option<Outcome> {
        royal_outcome(&pos.board, PieceKind::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Side};

    fn position(rows: &[&str], side: Side) -> Position {
        Position::new(Variant::Xiangqi.parse_board(rows).unwrap(), side)
    }

    #[test]
    fn test_opening_move_count() {
        let pos = Position::new(Variant::Xiangqi.initial_board(), Side::White);
        // The standard opening position has 44 legal moves.
        assert_eq!(Xiangqi.legal_moves(&pos).len(), 44);
    }

    #[test]
    fn test_flying_general() {
        let pos = position(
            &[
                "....g....",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                "....G....",
            ],
            Side::White,
        );
        let fly = Move::capture(Coord::new(4, 9), Coord::new(4, 0), Coord::new(4, 0));
        assert!(Xiangqi.is_legal(&pos, &fly));
    }

    #[test]
    fn test_general_stays_in_palace() {
        let pos = position(
            &[
                "....g....",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                "...G.....",
                ".........",
                ".........",
            ],
            Side::White,
        );
        let moves = Xiangqi.legal_moves(&pos);
        assert!(!moves.iter().any(|m| m.to == Coord::new(2, 7)));
        assert!(!moves.iter().any(|m| m.to == Coord::new(3, 6)));
        assert!(moves.iter().any(|m| m.to == Coord::new(4, 7)));
    }

    #[test]
    fn test_soldier_sideways_after_river() {
        let before = position(
            &[
                "....g....",
                ".........",
                ".........",
                ".........",
                ".........",
                "....S....",
                ".........",
                ".........",
                ".........",
                "...G.....",
            ],
            Side::White,
        );
        let from = Coord::new(4, 5);
        let soldier: Vec<_> = Xiangqi
            .legal_moves(&before)
            .into_iter()
            .filter(|m| m.from == from)
            .collect();
        assert_eq!(soldier, vec![Move::step(from, Coord::new(4, 4))]);

        let after = position(
            &[
                "....g....",
                ".........",
                ".........",
                ".........",
                "....S....",
                ".........",
                ".........",
                ".........",
                ".........",
                "...G.....",
            ],
            Side::White,
        );
        let from = Coord::new(4, 4);
        let count = Xiangqi
            .legal_moves(&after)
            .iter()
            .filter(|m| m.from == from)
            .count();
        assert_eq!(count, 3);
    }
}
