//! Movement capabilities shared by the piece-moving variants.
//!
//! Chess, xiangqi and dark pool describe each piece kind by a [`Movement`]
//! and share one legality predicate, [`reaches`]. Enumeration walks a small
//! candidate set per capability and filters it through the same predicate,
//! so the validator and the generator can never disagree.

use crate::board::{Board, Coord, Piece, PieceKind, Side};
use crate::moves::Move;

pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

pub const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

pub const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

/// Region a stepping piece must stay inside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Zone {
    Board,
    /// The 3x3 palace on the mover's end of a xiangqi board.
    Palace,
}

/// How a piece kind moves.
#[derive(Copy, Clone, Debug)]
pub enum Movement {
    /// Rides along the given directions over empty cells.
    Slide(&'static [(i32, i32)]),
    /// Rides orthogonally to empty cells; captures over exactly one screen.
    Screen,
    /// Fixed jumps. A hobbled leap is blocked when the orthogonal "leg"
    /// cell next to the origin, toward the long side of the jump, is occupied.
    Leap {
        offsets: &'static [(i32, i32)],
        hobbled: bool,
    },
    /// One step in the given directions, confined to a zone.
    Step {
        dirs: &'static [(i32, i32)],
        zone: Zone,
    },
    /// Palace step plus the flying capture of the opposing general.
    General,
    /// Two diagonal steps, blocked at the midpoint, never across the river.
    Elephant,
    /// Chess pawn: push, double push from the start rank, diagonal capture.
    Pawn,
    /// Xiangqi soldier: forward, and sideways once across the river.
    Soldier,
    /// One step in any direction; captures follow the rank table.
    RankStep,
}

/// Is the path from `from` to `to` a straight orthogonal or diagonal line
/// with every intermediate cell empty?
pub fn path_clear(board: &Board, from: Coord, to: Coord) -> bool {
    let (dx, dy) = from.delta(to);
    if !(dx == 0 || dy == 0 || dx.abs() == dy.abs()) {
        return false;
    }
    count_between(board, from, to) == 0
}

/// Pieces strictly between two cells on a shared line.
///
/// Callers ensure the cells are aligned orthogonally or diagonally.
pub fn count_between(board: &Board, from: Coord, to: Coord) -> usize {
    let (dx, dy) = from.delta(to);
    let steps = dx.abs().max(dy.abs());
    let (sx, sy) = (dx.signum(), dy.signum());
    (1..steps)
        .filter_map(|i| board.offset(from, sx * i, sy * i))
        .filter(|&c| !board.is_empty(c))
        .count()
}

/// Palace cells for `side`: the middle three files of its three home ranks.
pub fn in_palace(board: &Board, side: Side, c: Coord) -> bool {
    let mid = board.width() / 2;
    let files = c.x + 1 >= mid && c.x <= mid + 1;
    let ranks = match side {
        Side::White => c.y + 3 >= board.height(),
        Side::Black => c.y < 3,
    };
    files && ranks
}

/// Whether `c` lies on `side`'s own half of the board.
pub fn in_own_half(board: &Board, side: Side, c: Coord) -> bool {
    match side {
        Side::White => c.y >= board.height() / 2,
        Side::Black => c.y < board.height() / 2,
    }
}

/// Dark pool rank: general 7 down to soldier 1.
pub fn rank(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::General => 7,
        PieceKind::Advisor => 6,
        PieceKind::Elephant => 5,
        PieceKind::Chariot => 4,
        PieceKind::Horse => 3,
        PieceKind::Cannon => 2,
        _ => 1,
    }
}

/// Rank dominance: a piece takes anything of equal or lower rank, and a
/// soldier also takes the general.
pub fn outranks(attacker: PieceKind, defender: PieceKind) -> bool {
    if attacker == PieceKind::Soldier && defender == PieceKind::General {
        return true;
    }
    rank(attacker) >= rank(defender)
}

/// Legality predicate for a single piece move.
///
/// The destination must be empty or hold a face-up enemy piece; the rest is
/// decided by the capability. Turn order is the caller's concern.
pub fn reaches(board: &Board, from: Coord, to: Coord, movement: Movement) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    let target = board.piece_at(to);
    if let Some(t) = target {
        if t.side == piece.side || !t.revealed {
            return false;
        }
    }
    let (dx, dy) = from.delta(to);

    match movement {
        Movement::Slide(dirs) => {
            dirs.contains(&(dx.signum(), dy.signum())) && path_clear(board, from, to)
        }
        Movement::Screen => {
            let between = if dx == 0 || dy == 0 {
                count_between(board, from, to)
            } else {
                return false;
            };
            match target {
                None => between == 0,
                Some(_) => between == 1,
            }
        }
        Movement::Leap { offsets, hobbled } => {
            offsets.contains(&(dx, dy)) && (!hobbled || leg_free(board, from, dx, dy))
        }
        Movement::Step { dirs, zone } => {
            dirs.contains(&(dx, dy))
                && match zone {
                    Zone::Board => true,
                    Zone::Palace => in_palace(board, piece.side, to),
                }
        }
        Movement::General => {
            if ORTHOGONAL.contains(&(dx, dy)) {
                return in_palace(board, piece.side, to);
            }
            // Flying general: open file straight to the enemy general.
            dx == 0
                && target.is_some_and(|t| t.kind == PieceKind::General)
                && count_between(board, from, to) == 0
        }
        Movement::Elephant => {
            dx.abs() == 2
                && dy.abs() == 2
                && board
                    .offset(from, dx / 2, dy / 2)
                    .is_some_and(|eye| board.is_empty(eye))
                && in_own_half(board, piece.side, to)
        }
        Movement::Pawn => pawn_reaches(board, piece, from, target, dx, dy),
        Movement::Soldier => {
            let forward = dx == 0 && dy == piece.side.forward();
            let sideways = dy == 0 && dx.abs() == 1 && !in_own_half(board, piece.side, from);
            forward || sideways
        }
        Movement::RankStep => {
            dx.abs() <= 1 && dy.abs() <= 1 && target.is_none_or(|t| outranks(piece.kind, t.kind))
        }
    }
}

fn leg_free(board: &Board, from: Coord, dx: i32, dy: i32) -> bool {
    let (lx, ly) = if dx.abs() == 2 { (dx / 2, 0) } else { (0, dy / 2) };
    board.offset(from, lx, ly).is_some_and(|leg| board.is_empty(leg))
}

fn pawn_reaches(
    board: &Board,
    piece: Piece,
    from: Coord,
    target: Option<Piece>,
    dx: i32,
    dy: i32,
) -> bool {
    let fwd = piece.side.forward();
    let start_rank = match piece.side {
        Side::White => board.height() - 2,
        Side::Black => 1,
    };
    match (dx, target) {
        (0, None) if dy == fwd => true,
        (0, None) if dy == 2 * fwd && from.y == start_rank => board
            .offset(from, 0, fwd)
            .is_some_and(|mid| board.is_empty(mid)),
        (-1 | 1, Some(_)) => dy == fwd,
        _ => false,
    }
}

fn push_rays(
    board: &Board,
    from: Coord,
    dirs: &[(i32, i32)],
    stop_at_piece: bool,
    out: &mut Vec<Coord>,
) {
    for &(dx, dy) in dirs {
        let mut i = 1;
        while let Some(c) = board.offset(from, dx * i, dy * i) {
            out.push(c);
            if stop_at_piece && !board.is_empty(c) {
                break;
            }
            i += 1;
        }
    }
}

fn push_offsets(board: &Board, from: Coord, offsets: &[(i32, i32)], out: &mut Vec<Coord>) {
    out.extend(offsets.iter().filter_map(|&(dx, dy)| board.offset(from, dx, dy)));
}

/// Cells worth testing with [`reaches`] for a piece at `from`.
fn candidates(board: &Board, from: Coord, side: Side, movement: Movement) -> Vec<Coord> {
    let mut out = Vec::new();
    let f = side.forward();
    match movement {
        Movement::Slide(dirs) => push_rays(board, from, dirs, true, &mut out),
        // The screen and the flying file both look past the first piece.
        Movement::Screen => push_rays(board, from, &ORTHOGONAL, false, &mut out),
        Movement::General => {
            push_rays(board, from, &[(0, -1), (0, 1)], false, &mut out);
            push_offsets(board, from, &ORTHOGONAL, &mut out);
        }
        Movement::Leap { offsets, .. } => push_offsets(board, from, offsets, &mut out),
        Movement::Step { dirs, .. } => push_offsets(board, from, dirs, &mut out),
        Movement::Elephant => {
            push_offsets(board, from, &[(2, -2), (2, 2), (-2, 2), (-2, -2)], &mut out)
        }
        Movement::Pawn => {
            push_offsets(board, from, &[(0, f), (0, 2 * f), (-1, f), (1, f)], &mut out)
        }
        Movement::Soldier => push_offsets(board, from, &[(0, f), (-1, 0), (1, 0)], &mut out),
        Movement::RankStep => push_offsets(board, from, &ALL_DIRECTIONS, &mut out),
    }
    out
}

/// Append every legal move of the piece at `from` to `out`.
pub fn piece_moves(board: &Board, from: Coord, movement: Movement, out: &mut Vec<Move>) {
    let Some(piece) = board.piece_at(from) else {
        return;
    };
    for to in candidates(board, from, piece.side, movement) {
        if reaches(board, from, to, movement) {
            out.push(if board.is_empty(to) {
                Move::step(from, to)
            } else {
                Move::capture(from, to, to)
            });
        }
    }
}
