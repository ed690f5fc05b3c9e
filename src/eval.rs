//! Static position evaluation.
//!
//! Scores are always from a fixed side's point of view: positive favours
//! `perspective`. Material dominates; the positional terms only break ties
//! between materially equal positions.

use crate::board::{Board, Coord, Piece, PieceKind, Side};
use crate::constants::*;
use crate::rules::gomoku::{LINES, five_in_row};
use crate::variant::Variant;

/// Optional evaluation terms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Reward the maximizing side's pieces standing past the midline.
    pub advancement: bool,
}

/// Material value of one piece in `variant`.
pub fn piece_value(variant: Variant, piece: Piece) -> i32 {
    match (variant, piece.kind) {
        (_, PieceKind::King | PieceKind::General) => ROYAL_VALUE,
        (_, PieceKind::Pawn) => CHESS_PAWN,
        (_, PieceKind::Knight) => CHESS_KNIGHT,
        (_, PieceKind::Bishop) => CHESS_BISHOP,
        (_, PieceKind::Rook) => CHESS_ROOK,
        (_, PieceKind::Queen) => CHESS_QUEEN,
        (Variant::DarkPool, PieceKind::Chariot) => DARK_POOL_CHARIOT,
        (Variant::DarkPool, PieceKind::Horse) => DARK_POOL_HORSE,
        (Variant::DarkPool, PieceKind::Cannon) => DARK_POOL_CANNON,
        (Variant::DarkPool, PieceKind::Advisor) => DARK_POOL_ADVISOR,
        (Variant::DarkPool, PieceKind::Elephant) => DARK_POOL_ELEPHANT,
        (Variant::DarkPool, PieceKind::Soldier) => DARK_POOL_SOLDIER,
        (_, PieceKind::Chariot) => XIANGQI_CHARIOT,
        (_, PieceKind::Horse) => XIANGQI_HORSE,
        (_, PieceKind::Cannon) => XIANGQI_CANNON,
        (_, PieceKind::Advisor) => XIANGQI_ADVISOR,
        (_, PieceKind::Elephant) => XIANGQI_ELEPHANT,
        (_, PieceKind::Soldier) => XIANGQI_SOLDIER,
        (_, PieceKind::Man) if piece.promoted => DRAUGHTS_KING,
        (_, PieceKind::Man) => DRAUGHTS_MAN,
        (_, PieceKind::Stone) => GO_STONE,
    }
}

#[inline]
fn sign(side: Side, perspective: Side) -> i32 {
    if side == perspective { 1 } else { -1 }
}

fn material(variant: Variant, board: &Board, perspective: Side) -> i32 {
    board
        .pieces()
        .filter(|(_, p)| p.revealed)
        .map(|(_, p)| sign(p.side, perspective) * piece_value(variant, p))
        .sum()
}

fn past_midline(board: &Board, side: Side, c: Coord) -> bool {
    match side {
        Side::White => c.y < board.height() / 2,
        Side::Black => c.y >= board.height() / 2,
    }
}

fn advancement(board: &Board, perspective: Side) -> i32 {
    let advanced = board
        .pieces()
        .filter(|&(c, p)| p.side == perspective && past_midline(board, p.side, c))
        .count();
    ADVANCE_BONUS * advanced as i32
}

/// Palace term: a general pushed away from its palace center is exposed.
fn palace_displacement(board: &Board, perspective: Side) -> i32 {
    let mid = board.width() / 2;
    board
        .pieces()
        .filter(|(_, p)| p.kind == PieceKind::General)
        .map(|(c, p)| {
            let center_y = match p.side {
                Side::White => board.height() - 2,
                Side::Black => 1,
            };
            let dist = c.x.abs_diff(mid) + c.y.abs_diff(center_y);
            -sign(p.side, perspective) * PALACE_DISTANCE_WEIGHT * dist as i32
        })
        .sum()
}

/// Sum of line weights over every five-cell window that holds stones of only
/// one colour.
fn gomoku_lines(board: &Board, perspective: Side) -> i32 {
    let mut score = 0;
    for start in board.coords() {
        for &(dx, dy) in &LINES {
            let mut counts = [0usize; 2];
            let mut complete = true;
            for i in 0..GOMOKU_RUN as i32 {
                let Some(c) = board.offset(start, dx * i, dy * i) else {
                    complete = false;
                    break;
                };
                if let Some(p) = board.piece_at(c) {
                    counts[p.side.index()] += 1;
                }
            }
            if !complete {
                continue;
            }
            for side in Side::BOTH {
                let own = counts[side.index()];
                let other = counts[side.opponent().index()];
                if own > 0 && other == 0 {
                    score += sign(side, perspective) * GOMOKU_LINE_WEIGHTS[own];
                }
            }
        }
    }
    score
}

/// Score `board` for `perspective`.
pub fn evaluate(variant: Variant, board: &Board, perspective: Side, opts: EvalOptions) -> i32 {
    match variant {
        Variant::Gomoku => match five_in_row(board) {
            Some(winner) => sign(winner, perspective) * WIN_SCORE,
            None => gomoku_lines(board, perspective),
        },
        Variant::Go => material(variant, board, perspective),
        Variant::DarkPool => material(variant, board, perspective),
        Variant::Chess | Variant::Draughts | Variant::Xiangqi => {
            let mut score = material(variant, board, perspective);
            if opts.advancement {
                score += advancement(board, perspective);
            }
            if variant == Variant::Xiangqi {
                score += palace_displacement(board, perspective);
            }
            score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_positions_are_balanced() {
        for variant in [Variant::Chess, Variant::Xiangqi, Variant::Draughts] {
            let board = variant.initial_board();
            assert_eq!(evaluate(variant, &board, Side::White, EvalOptions::default()), 0);
        }
    }

    #[test]
    fn test_material_sign_follows_perspective() {
        let board = Variant::Chess
            .parse_board(&[
                "....k...",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                "...QK...",
            ])
            .unwrap();
        let opts = EvalOptions::default();
        assert_eq!(evaluate(Variant::Chess, &board, Side::White, opts), CHESS_QUEEN);
        assert_eq!(evaluate(Variant::Chess, &board, Side::Black, opts), -CHESS_QUEEN);
    }

    #[test]
    fn test_advancement_counts_only_maximizer() {
        let board = Variant::Draughts
            .parse_board(&[
                "..........",
                "..........",
                "..........",
                "....M.....",
                "..........",
                "..........",
                "......m...",
                "..........",
                "..........",
                "..........",
            ])
            .unwrap();
        let plain = EvalOptions::default();
        let hard = EvalOptions { advancement: true };
        assert_eq!(evaluate(Variant::Draughts, &board, Side::White, plain), 0);
        assert_eq!(evaluate(Variant::Draughts, &board, Side::White, hard), ADVANCE_BONUS);
        assert_eq!(evaluate(Variant::Draughts, &board, Side::Black, hard), ADVANCE_BONUS);
    }

    #[test]
    fn test_displaced_enemy_general_scores() {
        let board = Variant::Xiangqi
            .parse_board(&[
                "...g.....",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                "....G....",
                ".........",
            ])
            .unwrap();
        // Black general is two steps from (4, 1); red's sits on its center.
        let score = evaluate(Variant::Xiangqi, &board, Side::White, EvalOptions::default());
        assert_eq!(score, 2 * PALACE_DISTANCE_WEIGHT);
    }

    #[test]
    fn test_gomoku_lines_and_win() {
        let mut board = Board::new(15, 15);
        let opts = EvalOptions::default();
        assert_eq!(evaluate(Variant::Gomoku, &board, Side::Black, opts), 0);
        for x in 3..7 {
            board.put(Coord::new(x, 7), Piece::new(Side::Black, PieceKind::Stone));
        }
        let four = evaluate(Variant::Gomoku, &board, Side::Black, opts);
        assert!(four > GOMOKU_LINE_WEIGHTS[4]);
        board.put(Coord::new(7, 7), Piece::new(Side::Black, PieceKind::Stone));
        assert_eq!(evaluate(Variant::Gomoku, &board, Side::Black, opts), WIN_SCORE);
        assert_eq!(evaluate(Variant::Gomoku, &board, Side::White, opts), -WIN_SCORE);
    }

    #[test]
    fn test_hidden_pieces_are_not_counted() {
        let board = Variant::DarkPool.initial_board();
        assert_eq!(evaluate(Variant::DarkPool, &board, Side::White, EvalOptions::default()), 0);
    }
}
