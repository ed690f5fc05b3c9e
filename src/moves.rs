//! Moves and their text notation.

use std::fmt;

use crate::board::{Coord, Side, str_coord};
use crate::error::{GameError, GameResult};

/// What a move does to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Relocate the piece at `from` to `to`.
    Step,
    /// Drop a new stone of the given side at `to` (Go, gomoku).
    Place(Side),
    /// Turn a hidden dark pool piece face up without moving it.
    Flip,
}

/// A move: `from`, `to`, and every cell captured in the turn, in order.
///
/// Placements and flips have `from == to`. Go placements list the stones
/// their capture removes; draughts chains list every jumped piece.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub from: Coord,
    pub to: Coord,
    pub captures: Vec<Coord>,
    /// Landing cells of a draughts chain before `to`.
    pub via: Vec<Coord>,
}

impl Move {
    pub fn step(from: Coord, to: Coord) -> Self {
        Self {
            kind: MoveKind::Step,
            from,
            to,
            captures: Vec::new(),
            via: Vec::new(),
        }
    }

    pub fn capture(from: Coord, to: Coord, at: Coord) -> Self {
        Self {
            kind: MoveKind::Step,
            from,
            to,
            captures: vec![at],
            via: Vec::new(),
        }
    }

    /// A capture chain landing on each cell of `via`, then on `to`.
    pub fn chain(from: Coord, via: Vec<Coord>, to: Coord, captures: Vec<Coord>) -> Self {
        Self {
            kind: MoveKind::Step,
            from,
            to,
            captures,
            via,
        }
    }

    pub fn place(at: Coord, side: Side, captures: Vec<Coord>) -> Self {
        Self {
            kind: MoveKind::Place(side),
            from: at,
            to: at,
            captures,
            via: Vec::new(),
        }
    }

    pub fn flip(at: Coord) -> Self {
        Self {
            kind: MoveKind::Flip,
            from: at,
            to: at,
            captures: Vec::new(),
            via: Vec::new(),
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// Render in protocol notation for a board of the given height.
    pub fn notation(&self, height: usize) -> String {
        let to = str_coord(self.to, height);
        match self.kind {
            MoveKind::Place(_) => to,
            MoveKind::Flip => format!("@{to}"),
            MoveKind::Step => {
                let sep = if self.is_capture() { "x" } else { "" };
                let mut text = str_coord(self.from, height);
                for &c in &self.via {
                    text.push_str(sep);
                    text.push_str(&str_coord(c, height));
                }
                format!("{text}{sep}{to}")
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Place(_) => write!(f, "place({},{})", self.to.x, self.to.y),
            MoveKind::Flip => write!(f, "flip({},{})", self.to.x, self.to.y),
            MoveKind::Step => write!(
                f,
                "({},{})->({},{}) x{}",
                self.from.x,
                self.from.y,
                self.to.x,
                self.to.y,
                self.captures.len()
            ),
        }
    }
}

/// A move as typed by a player, before it is matched against legal moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveText {
    Cell(Coord),
    Flip(Coord),
    Step(Coord, Coord),
    /// Every cell a capture chain visits, origin first.
    Path(Vec<Coord>),
}

impl MoveText {
    /// Parse `d4`, `@c2`, `e2e4`, `e4xd5` or a chain such as `e1xc3xe5`
    /// for a board of the given size.
    pub fn parse(s: &str, width: usize, height: usize) -> Option<MoveText> {
        use crate::board::parse_coord;

        let s = s.trim().to_ascii_lowercase();
        if let Some(rest) = s.strip_prefix('@') {
            return parse_coord(rest, width, height).map(MoveText::Flip);
        }
        if s.contains('x') {
            let cells = s
                .split('x')
                .map(|part| parse_coord(part, width, height))
                .collect::<Option<Vec<_>>>()?;
            return match cells.as_slice() {
                [from, to] => Some(MoveText::Step(*from, *to)),
                [_, _, _, ..] => Some(MoveText::Path(cells)),
                _ => None,
            };
        }
        // Split before the second column letter: "e2e4" -> "e2", "e4".
        let split = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_lowercase())
            .map(|(i, _)| i);
        match split {
            Some(i) => Some(MoveText::Step(
                parse_coord(&s[..i], width, height)?,
                parse_coord(&s[i..], width, height)?,
            )),
            None => parse_coord(&s, width, height).map(MoveText::Cell),
        }
    }

    /// Whether `mv` is the move this text names.
    pub fn matches(&self, mv: &Move) -> bool {
        match (self, mv.kind) {
            (MoveText::Cell(c), MoveKind::Place(_)) => mv.to == *c,
            // A bare cell also names a flip, which is how dark pool players click.
            (MoveText::Cell(c), MoveKind::Flip) | (MoveText::Flip(c), MoveKind::Flip) => {
                mv.to == *c
            }
            (MoveText::Step(from, to), MoveKind::Step) => mv.from == *from && mv.to == *to,
            (MoveText::Path(cells), MoveKind::Step) => {
                let visited = std::iter::once(mv.from)
                    .chain(mv.via.iter().copied())
                    .chain(std::iter::once(mv.to));
                cells.iter().copied().eq(visited)
            }
            _ => false,
        }
    }

    /// The one move in `legal` that `text` names.
    ///
    /// Two capture chains can share their endpoints; the short form then
    /// names neither and the full path must be given.
    pub fn resolve(text: &str, legal: &[Move], width: usize, height: usize) -> GameResult<Move> {
        let parsed = MoveText::parse(text, width, height)
            .ok_or_else(|| GameError::BadNotation(text.to_string()))?;
        let mut found = legal.iter().filter(|m| parsed.matches(m));
        let mv = found
            .next()
            .ok_or_else(|| GameError::IllegalMove(text.to_string()))?;
        if found.next().is_some() {
            return Err(GameError::AmbiguousMove(text.to_string()));
        }
        Ok(mv.clone())
    }
}
