//! Go with capture-count scoring.
//!
//! A placement first removes every adjacent enemy group left without
//! liberties, then is rejected if its own group has none (suicide) or if it
//! recreates the board as it stood before the opponent's last move (ko).
//! The game has no natural end here; the session stops it at a move cap.

use super::{Outcome, Position, Rules, cells_near_stones};
use crate::board::{Board, Coord, Piece, PieceKind, Side};
use crate::constants::GO_CANDIDATE_RADIUS;
use crate::executor;
use crate::moves::Move;
use crate::variant::Variant;

pub struct Go;

/// Collect all stones in the group containing `start`.
///
/// Flood fill over orthogonally adjacent stones of the same side.
pub fn collect_group(board: &Board, start: Coord) -> Vec<Coord> {
    let Some(color) = board.piece_at(start).map(|p| p.side) else {
        return Vec::new();
    };
    let mut visited = vec![false; board.width() * board.height()];
    let mut stack = vec![start];
    let mut group = Vec::new();

    while let Some(c) = stack.pop() {
        let i = c.y * board.width() + c.x;
        if visited[i] {
            continue;
        }
        visited[i] = true;
        group.push(c);
        for n in board.neighbors(c) {
            if board.piece_at(n).is_some_and(|p| p.side == color) {
                stack.push(n);
            }
        }
    }
    group
}

/// Count the distinct empty points next to the group containing `start`.
pub fn group_liberties(board: &Board, start: Coord) -> usize {
    let mut liberties: Vec<Coord> = collect_group(board, start)
        .into_iter()
        .flat_map(|c| board.neighbors(c).collect::<Vec<_>>())
        .filter(|&n| board.is_empty(n))
        .collect();
    liberties.sort_unstable();
    liberties.dedup();
    liberties.len()
}

/// Place a stone for `side` at `at` and resolve captures.
///
/// Returns the resulting board and the removed enemy stones, or `None` when
/// the point is occupied or the placement is suicide.
pub fn try_place(board: &Board, at: Coord, side: Side) -> Option<(Board, Vec<Coord>)> {
    if !board.is_empty(at) {
        return None;
    }
    let mut next = board.clone();
    next.put(at, Piece::new(side, PieceKind::Stone));

    let mut removed: Vec<Coord> = Vec::new();
    for n in board.neighbors(at) {
        let enemy = next.piece_at(n).is_some_and(|p| p.side != side);
        if enemy && !removed.contains(&n) && group_liberties(&next, n) == 0 {
            removed.extend(collect_group(&next, n));
        }
    }
    for &c in &removed {
        next.take(c);
    }

    if removed.is_empty() && group_liberties(&next, at) == 0 {
        return None;
    }
    Some((next, removed))
}

/// Winner by stones on the board, or a draw on equal counts.
pub fn stone_winner(board: &Board) -> Outcome {
    let (white, black) = (board.count(Side::White), board.count(Side::Black));
    match white.cmp(&black) {
        std::cmp::Ordering::Greater => Outcome::Winner(Side::White),
        std::cmp::Ordering::Less => Outcome::Winner(Side::Black),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

impl Go {
    fn placement(&self, pos: &Position, at: Coord) -> Option<Move> {
        let (next, removed) = try_place(&pos.board, at, pos.to_move)?;
        if pos.previous.as_ref() == Some(&next) {
            return None;
        }
        Some(Move::place(at, pos.to_move, removed))
    }
}

impl Rules for Go {
    fn variant(&self) -> Variant {
        Variant::Go
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        pos.board
            .coords()
            .filter_map(|c| self.placement(pos, c))
            .collect()
    }

    fn search_moves(&self, pos: &Position) -> Vec<Move> {
        let near: Vec<Move> = cells_near_stones(&pos.board, GO_CANDIDATE_RADIUS)
            .into_iter()
            .filter_map(|c| self.placement(pos, c))
            .collect();
        if near.is_empty() {
            self.legal_moves(pos)
        } else {
            near
        }
    }

    fn outcome(&self, _pos: &Position) -> Option<Outcome> {
        None
    }

    fn no_moves_outcome(&self, pos: &Position) -> Outcome {
        stone_winner(&pos.board)
    }

    fn play(&self, pos: &Position, mv: &Move) -> (Position, Vec<Piece>) {
        let (board, captured) = executor::apply(&pos.board, mv);
        let next = Position {
            board,
            to_move: pos.to_move.opponent(),
            previous: Some(pos.board.clone()),
        };
        (next, captured)
    }
}
