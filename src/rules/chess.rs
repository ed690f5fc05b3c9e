//! International chess, simplified: no castling, no en passant, and the game
//! ends when a king is captured rather than on checkmate.
//!
//! The king may not step onto a square an enemy piece attacks. Other moves
//! may still leave it exposed; losing it simply ends the game.

use super::movement::{
    ALL_DIRECTIONS, DIAGONAL, KNIGHT_OFFSETS, Movement, ORTHOGONAL, Zone, piece_moves, reaches,
};
use super::{Outcome, Position, Rules, royal_outcome};
use crate::board::{Board, Coord, PieceKind, Side};
use crate::executor;
use crate::moves::Move;
use crate::variant::Variant;

pub struct Chess;

/// Movement capability of each chess piece.
pub fn movement(kind: PieceKind) -> Option<Movement> {
    Some(match kind {
        PieceKind::Pawn => Movement::Pawn,
        PieceKind::Knight => Movement::Leap {
            offsets: &KNIGHT_OFFSETS,
            hobbled: false,
        },
        PieceKind::Bishop => Movement::Slide(&DIAGONAL),
        PieceKind::Rook => Movement::Slide(&ORTHOGONAL),
        PieceKind::Queen => Movement::Slide(&ALL_DIRECTIONS),
        PieceKind::King => Movement::Step {
            dirs: &ALL_DIRECTIONS,
            zone: Zone::Board,
        },
        _ => return None,
    })
}

/// Can any piece of `by` capture on `at`? The cell should hold a piece of
/// the other side; pawn pushes onto an empty cell would count otherwise.
pub fn attacked(board: &Board, at: Coord, by: Side) -> bool {
    board.pieces().any(|(from, p)| {
        p.side == by && movement(p.kind).is_some_and(|m| reaches(board, from, at, m))
    })
}

/// Would this king move land on an attacked square?
fn walks_into_attack(board: &Board, mv: &Move, side: Side) -> bool {
    let (after, _) = executor::apply(board, mv);
    attacked(&after, mv.to, side.opponent())
}

impl Rules for Chess {
    fn variant(&self) -> Variant {
        Variant::Chess
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, piece) in pos.board.pieces() {
            if piece.side != pos.to_move {
                continue;
            }
            let Some(m) = movement(piece.kind) else {
                continue;
            };
            if piece.kind == PieceKind::King {
                let mut steps = Vec::new();
                piece_moves(&pos.board, from, m, &mut steps);
                steps.retain(|mv| !walks_into_attack(&pos.board, mv, piece.side));
                moves.append(&mut steps);
            } else {
                piece_moves(&pos.board, from, m, &mut moves);
            }
        }
        moves
    }

    fn outcome(&self, pos: &Position) -> Option<Outcome> {
        royal_outcome(&pos.board, PieceKind::King)
    }
}
