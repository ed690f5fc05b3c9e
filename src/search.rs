//! Minimax search with alpha-beta pruning.
//!
//! Scores are taken from a fixed perspective, the side to move at the root:
//! that side maximizes and its opponent minimizes. Every branch owns its
//! position (the rules hand back a fresh copy for each move), so siblings
//! never observe each other's moves.
//!
//! Dark pool flips are not expanded: what a hidden piece turns out to be is
//! unknown to the searcher, so a flip is scored as the current position.

use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Side};
use crate::constants::WIN_SCORE;
use crate::eval::{EvalOptions, evaluate};
use crate::moves::{Move, MoveKind};
use crate::rules::{Outcome, Position, Rules};
use crate::variant::Variant;

/// Result of a root search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// First move achieving the best score, or `None` at depth 0, in a
    /// finished game, or when no legal move exists.
    pub best_move: Option<Move>,
    /// Minimax value of the root for the side to move.
    pub score: i32,
    /// Positions visited.
    pub nodes: u64,
}

struct Searcher<'a> {
    rules: &'a dyn Rules,
    perspective: Side,
    opts: EvalOptions,
    nodes: u64,
    prune: bool,
}

impl Searcher<'_> {
    fn static_eval(&self, pos: &Position) -> i32 {
        evaluate(self.rules.variant(), &pos.board, self.perspective, self.opts)
    }

    /// Decided games score beyond any material total; nearer wins score higher.
    fn terminal_score(&self, outcome: Outcome, depth: u32) -> i32 {
        let depth = depth as i32;
        match outcome {
            Outcome::Winner(side) if side == self.perspective => WIN_SCORE + depth,
            Outcome::Winner(_) => -WIN_SCORE - depth,
            Outcome::Draw => 0,
        }
    }

    fn child_score(&mut self, pos: &Position, mv: &Move, depth: u32, alpha: i32, beta: i32) -> i32 {
        if mv.kind == MoveKind::Flip {
            self.nodes += 1;
            return self.static_eval(pos);
        }
        let (child, _) = self.rules.play(pos, mv);
        self.value(&child, depth - 1, alpha, beta)
    }

    /// Fail-soft alpha-beta. With `prune` unset this is plain minimax.
    fn value(&mut self, pos: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if let Some(outcome) = self.rules.outcome(pos) {
            return self.terminal_score(outcome, depth);
        }
        if depth == 0 {
            return self.static_eval(pos);
        }

        let moves = self.rules.search_moves(pos);
        if moves.is_empty() {
            return self.terminal_score(self.rules.no_moves_outcome(pos), depth);
        }

        let maximizing = pos.to_move == self.perspective;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in &moves {
            let score = self.child_score(pos, mv, depth, alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.prune && beta <= alpha {
                break;
            }
        }
        best
    }

    fn root(&mut self, pos: &Position, depth: u32) -> (Option<Move>, i32) {
        self.nodes += 1;
        if let Some(outcome) = self.rules.outcome(pos) {
            return (None, self.terminal_score(outcome, depth));
        }
        if depth == 0 {
            return (None, self.static_eval(pos));
        }
        let moves = self.rules.search_moves(pos);
        if moves.is_empty() {
            return (None, self.terminal_score(self.rules.no_moves_outcome(pos), depth));
        }

        let mut best: Option<Move> = None;
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;
        for mv in moves {
            let score = self.child_score(pos, &mv, depth, alpha, i32::MAX);
            // Strictly better only: the first best move in enumeration order wins.
            if best.is_none() || score > best_score {
                best_score = score;
                best = Some(mv);
            }
            if self.prune {
                alpha = alpha.max(best_score);
            }
        }
        (best, best_score)
    }
}

/// Search `pos` to `depth` plies with alpha-beta pruning.
pub fn search(rules: &dyn Rules, pos: &Position, depth: u32, opts: EvalOptions) -> SearchOutcome {
    let start = Instant::now();
    let mut searcher = Searcher {
        rules,
        perspective: pos.to_move,
        opts,
        nodes: 0,
        prune: true,
    };
    let (best_move, score) = searcher.root(pos, depth);
    debug!(
        variant = %rules.variant(),
        depth,
        nodes = searcher.nodes,
        score,
        elapsed_ms = start.elapsed().as_millis() as u64,
        best = ?best_move.as_ref().map(|m| m.notation(pos.board.height())),
        "search finished"
    );
    SearchOutcome {
        best_move,
        score,
        nodes: searcher.nodes,
    }
}

/// The same search without pruning. Slow; it exists to check that pruning
/// never changes the result.
pub fn plain_minimax(
    rules: &dyn Rules,
    pos: &Position,
    depth: u32,
    opts: EvalOptions,
) -> SearchOutcome {
    let mut searcher = Searcher {
        rules,
        perspective: pos.to_move,
        opts,
        nodes: 0,
        prune: false,
    };
    let (best_move, score) = searcher.root(pos, depth);
    SearchOutcome {
        best_move,
        score,
        nodes: searcher.nodes,
    }
}

/// Best move for `side` on `board` at `depth`, with default evaluation terms.
///
/// Returns `None` when `side` has no legal move; the caller treats that as
/// the end of the game.
pub fn best_move(variant: Variant, board: &Board, side: Side, depth: u32) -> Option<Move> {
    let pos = Position::new(board.clone(), side);
    search(variant.rules(), &pos, depth, EvalOptions::default()).best_move
}

/// A uniformly random legal move, for the easy opponent.
pub fn random_move(rules: &dyn Rules, pos: &Position, rng: &mut fastrand::Rng) -> Option<Move> {
    let moves = rules.legal_moves(pos);
    if moves.is_empty() {
        return None;
    }
    let i = rng.usize(..moves.len());
    moves.into_iter().nth(i)
}
