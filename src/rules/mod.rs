//! Rule Engine: legal-move generation and terminal detection.
//!
//! Each variant implements [`Rules`]. Piece-moving variants (chess, xiangqi,
//! dark pool) describe their pieces with the shared capabilities in
//! [`movement`]; draughts, Go and gomoku have their own generators.
//!
//! Illegal moves are never errors here: they are simply absent from
//! [`Rules::legal_moves`].

pub mod chess;
pub mod dark_pool;
pub mod draughts;
pub mod go;
pub mod gomoku;
pub mod movement;
pub mod xiangqi;

use crate::board::{Board, Coord, Piece, PieceKind, Side};
use crate::executor;
use crate::moves::Move;
use crate::variant::Variant;

/// A board snapshot plus the side to move. Search clones these freely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub to_move: Side,
    /// The board as it stood before the opponent's last move.
    /// Only Go keeps it (for the single-move ko check).
    pub previous: Option<Board>,
}

impl Position {
    pub fn new(board: Board, to_move: Side) -> Self {
        Self {
            board,
            to_move,
            previous: None,
        }
    }
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// Per-variant rules.
pub trait Rules: Sync {
    fn variant(&self) -> Variant;

    /// Every legal move for `pos.to_move`, in a stable enumeration order.
    fn legal_moves(&self, pos: &Position) -> Vec<Move>;

    /// Moves the search expands. Placement games narrow this to cells near
    /// existing stones; everyone else searches the full legal list.
    fn search_moves(&self, pos: &Position) -> Vec<Move> {
        self.legal_moves(pos)
    }

    fn is_legal(&self, pos: &Position, mv: &Move) -> bool {
        self.legal_moves(pos).contains(mv)
    }

    /// Terminal check that does not need move generation.
    fn outcome(&self, pos: &Position) -> Option<Outcome>;

    /// Result when the side to move has no legal move.
    fn no_moves_outcome(&self, pos: &Position) -> Outcome {
        Outcome::Winner(pos.to_move.opponent())
    }

    /// Apply `mv` to a copy of `pos`, returning the successor and what it captured.
    fn play(&self, pos: &Position, mv: &Move) -> (Position, Vec<Piece>) {
        let (board, captured) = executor::apply(&pos.board, mv);
        (Position::new(board, pos.to_move.opponent()), captured)
    }
}

/// Legal moves for `side` on `board`, with no move history.
pub fn legal_moves(variant: Variant, board: &Board, side: Side) -> Vec<Move> {
    variant
        .rules()
        .legal_moves(&Position::new(board.clone(), side))
}

/// Chess-like terminal: the side whose royal piece is gone has lost.
pub(crate) fn royal_outcome(board: &Board, royal: PieceKind) -> Option<Outcome> {
    let present = |side| board.find(|p| p.side == side && p.kind == royal).is_some();
    match (present(Side::White), present(Side::Black)) {
        (true, false) => Some(Outcome::Winner(Side::White)),
        (false, true) => Some(Outcome::Winner(Side::Black)),
        (false, false) => Some(Outcome::Draw),
        (true, true) => None,
    }
}

/// Empty cells within `radius` (Chebyshev) of any stone, row-major.
/// An empty board yields its center.
pub(crate) fn cells_near_stones(board: &Board, radius: i32) -> Vec<Coord> {
    let mut near = vec![false; board.width() * board.height()];
    let mut any = false;
    for (c, _) in board.pieces() {
        any = true;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if let Some(n) = board.offset(c, dx, dy) {
                    near[n.y * board.width() + n.x] = true;
                }
            }
        }
    }
    if !any {
        return vec![board.center()];
    }
    board
        .coords()
        .filter(|c| near[c.y * board.width() + c.x] && board.is_empty(*c))
        .collect()
}
