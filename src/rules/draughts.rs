//! International draughts on a 10x10 board.
//!
//! Men step diagonally forward; kings step diagonally in any direction.
//! Capturing is mandatory and only the longest chains are legal. Men capture
//! forward and may chain; kings capture flying, landing on any empty cell
//! past the captured piece. Jumped pieces stay on the board until the chain
//! ends, so they block and cannot be jumped twice.

use super::movement::DIAGONAL;
use super::{Outcome, Position, Rules};
use crate::board::{Board, Coord, Piece, Side};
use crate::moves::Move;
use crate::variant::Variant;

pub struct Draughts;

fn directions(piece: Piece) -> Vec<(i32, i32)> {
    if piece.promoted {
        DIAGONAL.to_vec()
    } else {
        let f = piece.side.forward();
        vec![(-1, f), (1, f)]
    }
}

/// Empty for the purposes of a chain starting at `origin` (which the moving
/// piece has vacated).
fn open(board: &Board, origin: Coord, c: Coord) -> bool {
    c == origin || board.is_empty(c)
}

struct Chain<'a> {
    board: &'a Board,
    origin: Coord,
    piece: Piece,
    captured: Vec<Coord>,
    landed: Vec<Coord>,
}

impl Chain<'_> {
    fn enemy_at(&self, c: Coord) -> bool {
        c != self.origin
            && self
                .board
                .piece_at(c)
                .is_some_and(|p| p.side != self.piece.side)
            && !self.captured.contains(&c)
    }

    /// Extend the chain from `at`, pushing every complete capture sequence.
    fn extend(&mut self, at: Coord, out: &mut Vec<Move>) {
        let mut extended = false;
        for (dx, dy) in directions(self.piece) {
            let Some((victim, landings)) = self.jumps(at, dx, dy) else {
                continue;
            };
            for land in landings {
                if self.landed.contains(&land) {
                    continue;
                }
                extended = true;
                self.captured.push(victim);
                self.landed.push(land);
                self.extend(land, out);
                self.landed.pop();
                self.captured.pop();
            }
        }
        if extended || self.captured.is_empty() {
            return;
        }
        // `at` is the last landing; the earlier ones are the chain's path.
        let via = self.landed[..self.landed.len() - 1].to_vec();
        out.push(Move::chain(self.origin, via, at, self.captured.clone()));
    }

    /// The piece a jump from `at` along `(dx, dy)` would take, and the cells
    /// it could land on.
    fn jumps(&self, at: Coord, dx: i32, dy: i32) -> Option<(Coord, Vec<Coord>)> {
        let board = self.board;
        let mut victim = board.offset(at, dx, dy)?;
        if self.piece.promoted {
            while open(board, self.origin, victim) {
                victim = board.offset(victim, dx, dy)?;
            }
        }
        if !self.enemy_at(victim) {
            return None;
        }
        let mut landings = Vec::new();
        let mut next = board.offset(victim, dx, dy);
        while let Some(c) = next {
            if !open(board, self.origin, c) {
                break;
            }
            landings.push(c);
            if !self.piece.promoted {
                break;
            }
            next = board.offset(c, dx, dy);
        }
        (!landings.is_empty()).then_some((victim, landings))
    }
}

/// Every complete capture chain for the piece at `from`.
pub fn capture_chains(board: &Board, from: Coord) -> Vec<Move> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    let mut chain = Chain {
        board,
        origin: from,
        piece,
        captured: Vec::new(),
        landed: Vec::new(),
    };
    let mut out = Vec::new();
    chain.extend(from, &mut out);
    out
}

fn quiet_moves(board: &Board, from: Coord, piece: Piece, out: &mut Vec<Move>) {
    for (dx, dy) in directions(piece) {
        if let Some(to) = board.offset(from, dx, dy) {
            if board.is_empty(to) {
                out.push(Move::step(from, to));
            }
        }
    }
}

/// Keep only the moves with the longest capture list.
fn longest(moves: Vec<Move>) -> Vec<Move> {
    let max = moves.iter().map(|m| m.captures.len()).max().unwrap_or(0);
    moves.into_iter().filter(|m| m.captures.len() == max).collect()
}

impl Rules for Draughts {
    fn variant(&self) -> Variant {
        Variant::Draughts
    }

    fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        let board = &pos.board;
        let mine: Vec<_> = board
            .pieces()
            .filter(|(_, p)| p.side == pos.to_move)
            .collect();
        let captures: Vec<Move> = mine
            .iter()
            .flat_map(|&(c, _)| capture_chains(board, c))
            .collect();
        if !captures.is_empty() {
            return longest(captures);
        }
        let mut moves = Vec::new();
        for (c, piece) in mine {
            quiet_moves(board, c, piece, &mut moves);
        }
        moves
    }

    fn outcome(&self, pos: &Position) -> Option<Outcome> {
        match (pos.board.count(Side::White), pos.board.count(Side::Black)) {
            (0, 0) => Some(Outcome::Draw),
            (0, _) => Some(Outcome::Winner(Side::Black)),
            (_, 0) => Some(Outcome::Winner(Side::White)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(rows: &[&str], side: Side) -> Position {
        Position::new(Variant::Draughts.parse_board(rows).unwrap(), side)
    }

    #[test]
    fn test_opening_moves() {
        let pos = Position::new(Variant::Draughts.initial_board(), Side::White);
        let moves = Draughts.legal_moves(&pos);
        // Front rank: five men, nine open diagonals.
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn test_longest_chain_is_mandatory() {
        let pos = position(
            &[
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..m.......",
                "..........",
                "..m...m...",
                ".M.....M..",
                "..........",
            ],
            Side::White,
        );
        let moves = Draughts.legal_moves(&pos);
        assert_eq!(
            moves,
            vec![Move::chain(
                Coord::new(1, 8),
                vec![Coord::new(3, 6)],
                Coord::new(1, 4),
                vec![Coord::new(2, 7), Coord::new(2, 5)]
            )]
        );
    }

    #[test]
    fn test_man_does_not_capture_backward() {
        let pos = position(
            &[
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "....M.....",
                "...m......",
                "..........",
                "..........",
                "..........",
            ],
            Side::White,
        );
        let moves = Draughts.legal_moves(&pos);
        assert!(moves.iter().all(|m| !m.is_capture()));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_flying_king_capture() {
        let pos = position(
            &[
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "...m......",
                "..........",
                "..........",
                "K.........",
            ],
            Side::White,
        );
        let moves = Draughts.legal_moves(&pos);
        assert_eq!(moves.len(), 6);
        assert!(moves.iter().all(|m| m.captures == vec![Coord::new(3, 6)]));
        assert!(moves.iter().any(|m| m.to == Coord::new(9, 0)));
    }

    #[test]
    fn test_king_chain_turns_corners() {
        let pos = position(
            &[
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "...m.m....",
                "..........",
                ".K........",
                "..........",
            ],
            Side::White,
        );
        let taken = vec![Coord::new(3, 6), Coord::new(5, 6)];
        let chain = |to| Move::chain(Coord::new(1, 8), vec![Coord::new(4, 5)], to, taken.clone());
        assert_eq!(
            Draughts.legal_moves(&pos),
            vec![
                chain(Coord::new(6, 7)),
                chain(Coord::new(7, 8)),
                chain(Coord::new(8, 9)),
            ]
        );
    }

    #[test]
    fn test_jumped_piece_blocks_the_line() {
        // Each man can be taken, but the first capture stands between the
        // king and the other one.
        let pos = position(
            &[
                "..........",
                "..........",
                "..........",
                "......m...",
                "..........",
                "....K.....",
                "..........",
                "..m.......",
                "..........",
                "..........",
            ],
            Side::White,
        );
        let moves = Draughts.legal_moves(&pos);
        assert_eq!(moves.len(), 5);
        assert!(moves.iter().all(|m| m.captures.len() == 1));
    }

    #[test]
    fn test_king_chain_never_lands_twice() {
        // A ring of four men the king can circle after taking the man on e9.
        // Closing the ring would land on f8 a second time.
        let pos = position(
            &[
                "...K......",
                "....m.M...",
                "..........",
                "..M.m.m.M.",
                "..........",
                "..M.m.m.M.",
                "..........",
                "....M.M...",
                "..........",
                "..........",
            ],
            Side::White,
        );
        let origin = Coord::new(3, 0);
        assert_eq!(
            Draughts.legal_moves(&pos),
            vec![
                Move::chain(
                    origin,
                    vec![Coord::new(5, 2), Coord::new(7, 4), Coord::new(5, 6)],
                    Coord::new(3, 4),
                    vec![Coord::new(4, 1), Coord::new(6, 3), Coord::new(6, 5), Coord::new(4, 5)],
                ),
                Move::chain(
                    origin,
                    vec![Coord::new(5, 2), Coord::new(3, 4), Coord::new(5, 6)],
                    Coord::new(7, 4),
                    vec![Coord::new(4, 1), Coord::new(4, 3), Coord::new(4, 5), Coord::new(6, 5)],
                ),
            ]
        );
    }

    #[test]
    fn test_no_pieces_loses() {
        let pos = position(
            &[
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                ".M........",
                "..........",
            ],
            Side::Black,
        );
        assert_eq!(Draughts.outcome(&pos), Some(Outcome::Winner(Side::White)));
    }
}
