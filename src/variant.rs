//! Variant registry: starting layouts, diagram parsing and rule lookup.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Coord, Piece, PieceKind, Side};
use crate::constants::*;
use crate::error::GameError;
use crate::rules::Rules;
use crate::rules::chess::Chess;
use crate::rules::dark_pool::DarkPool;
use crate::rules::draughts::Draughts;
use crate::rules::go::Go;
use crate::rules::gomoku::Gomoku;
use crate::rules::xiangqi::Xiangqi;

/// The supported games.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Chess,
    Xiangqi,
    Draughts,
    Go,
    Gomoku,
    DarkPool,
}

const CHESS_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const XIANGQI_BACK_RANK: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

/// One side's dark pool army: the full xiangqi set.
const DARK_POOL_ARMY: [(PieceKind, usize); 7] = [
    (PieceKind::General, 1),
    (PieceKind::Advisor, 2),
    (PieceKind::Elephant, 2),
    (PieceKind::Chariot, 2),
    (PieceKind::Horse, 2),
    (PieceKind::Cannon, 2),
    (PieceKind::Soldier, 5),
];

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Chess,
        Variant::Xiangqi,
        Variant::Draughts,
        Variant::Go,
        Variant::Gomoku,
        Variant::DarkPool,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Chess => "chess",
            Variant::Xiangqi => "xiangqi",
            Variant::Draughts => "draughts",
            Variant::Go => "go",
            Variant::Gomoku => "gomoku",
            Variant::DarkPool => "darkpool",
        }
    }

    /// Default (width, height).
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Variant::Chess => (CHESS_SIZE, CHESS_SIZE),
            Variant::Xiangqi => (XIANGQI_WIDTH, XIANGQI_HEIGHT),
            Variant::Draughts => (DRAUGHTS_SIZE, DRAUGHTS_SIZE),
            Variant::Go => (GO_SIZE, GO_SIZE),
            Variant::Gomoku => (GOMOKU_SIZE, GOMOKU_SIZE),
            Variant::DarkPool => (DARK_POOL_WIDTH, DARK_POOL_HEIGHT),
        }
    }

    /// Stone-placement games, which accept any square board size.
    pub fn is_placement(self) -> bool {
        matches!(self, Variant::Go | Variant::Gomoku)
    }

    pub fn first_to_move(self) -> Side {
        match self {
            Variant::Go | Variant::Gomoku => Side::Black,
            _ => Side::White,
        }
    }

    pub fn side_name(self, side: Side) -> &'static str {
        match (self, side) {
            (Variant::Xiangqi | Variant::DarkPool, Side::White) => "red",
            (_, Side::White) => "white",
            (_, Side::Black) => "black",
        }
    }

    pub fn rules(self) -> &'static dyn Rules {
        match self {
            Variant::Chess => &Chess,
            Variant::Xiangqi => &Xiangqi,
            Variant::Draughts => &Draughts,
            Variant::Go => &Go,
            Variant::Gomoku => &Gomoku,
            Variant::DarkPool => &DarkPool,
        }
    }

    /// Starting position. Dark pool is shuffled with a fresh generator.
    pub fn initial_board(self) -> Board {
        self.initial_board_with(&mut fastrand::Rng::new())
    }

    /// Starting position, drawing any randomness from `rng`.
    pub fn initial_board_with(self, rng: &mut fastrand::Rng) -> Board {
        let (width, height) = self.dimensions();
        let mut board = Board::new(width, height);
        match self {
            Variant::Chess => {
                let last = height - 1;
                for (x, &kind) in CHESS_BACK_RANK.iter().enumerate() {
                    board.put(Coord::new(x, 0), Piece::new(Side::Black, kind));
                    board.put(Coord::new(x, 1), Piece::new(Side::Black, PieceKind::Pawn));
                    board.put(Coord::new(x, last - 1), Piece::new(Side::White, PieceKind::Pawn));
                    board.put(Coord::new(x, last), Piece::new(Side::White, kind));
                }
            }
            Variant::Xiangqi => {
                for side in Side::BOTH {
                    // Rows counted from that side's own edge.
                    let row = |r: usize| match side {
                        Side::Black => r,
                        Side::White => height - 1 - r,
                    };
                    for (x, &kind) in XIANGQI_BACK_RANK.iter().enumerate() {
                        board.put(Coord::new(x, row(0)), Piece::new(side, kind));
                    }
                    for x in [1, width - 2] {
                        board.put(Coord::new(x, row(2)), Piece::new(side, PieceKind::Cannon));
                    }
                    for x in (0..width).step_by(2) {
                        board.put(Coord::new(x, row(3)), Piece::new(side, PieceKind::Soldier));
                    }
                }
            }
            Variant::Draughts => {
                for c in board.coords() {
                    if (c.x + c.y) % 2 == 0 {
                        continue;
                    }
                    if c.y < DRAUGHTS_ROWS {
                        board.put(c, Piece::new(Side::Black, PieceKind::Man));
                    } else if c.y >= height - DRAUGHTS_ROWS {
                        board.put(c, Piece::new(Side::White, PieceKind::Man));
                    }
                }
            }
            Variant::Go | Variant::Gomoku => {}
            Variant::DarkPool => {
                let mut pool: Vec<Piece> = Side::BOTH
                    .iter()
                    .flat_map(|&side| {
                        DARK_POOL_ARMY.into_iter().flat_map(move |(kind, n)| {
                            std::iter::repeat_n(Piece::hidden(side, kind), n)
                        })
                    })
                    .collect();
                rng.shuffle(&mut pool);
                for (c, piece) in board.coords().zip(pool) {
                    board.put(c, piece);
                }
            }
        }
        board
    }

    fn kind_for_letter(self, letter: char) -> Option<PieceKind> {
        let kind = match (self, letter) {
            (Variant::Chess, 'P') => PieceKind::Pawn,
            (Variant::Chess, 'N') => PieceKind::Knight,
            (Variant::Chess, 'B') => PieceKind::Bishop,
            (Variant::Chess, 'R') => PieceKind::Rook,
            (Variant::Chess, 'Q') => PieceKind::Queen,
            (Variant::Chess, 'K') => PieceKind::King,
            (Variant::Xiangqi | Variant::DarkPool, 'G') => PieceKind::General,
            (Variant::Xiangqi | Variant::DarkPool, 'A') => PieceKind::Advisor,
            (Variant::Xiangqi | Variant::DarkPool, 'E') => PieceKind::Elephant,
            (Variant::Xiangqi | Variant::DarkPool, 'H') => PieceKind::Horse,
            (Variant::Xiangqi | Variant::DarkPool, 'R') => PieceKind::Chariot,
            (Variant::Xiangqi | Variant::DarkPool, 'C') => PieceKind::Cannon,
            (Variant::Xiangqi | Variant::DarkPool, 'S') => PieceKind::Soldier,
            (Variant::Draughts, 'M' | 'K') => PieceKind::Man,
            _ => return None,
        };
        Some(kind)
    }

    fn piece_for_symbol(self, ch: char) -> Option<Piece> {
        if self.is_placement() {
            return match ch {
                'O' => Some(Piece::new(Side::White, PieceKind::Stone)),
                'X' => Some(Piece::new(Side::Black, PieceKind::Stone)),
                _ => None,
            };
        }
        let side = if ch.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let upper = ch.to_ascii_uppercase();
        let kind = self.kind_for_letter(upper)?;
        Some(if self == Variant::Draughts && upper == 'K' {
            Piece::crowned(side)
        } else {
            Piece::new(side, kind)
        })
    }

    /// Build a board from a text diagram, top row first.
    ///
    /// `.` is an empty cell. Pieces use the [`Piece::symbol`] letters for the
    /// variant: upper case for White (red), lower case for Black, and `O`/`X`
    /// for white/black stones. Hidden dark pool pieces cannot be written.
    /// Returns `None` for ragged rows or unknown symbols.
    pub fn parse_board(self, rows: &[&str]) -> Option<Board> {
        let width = rows.first()?.chars().count();
        if width == 0 || rows.iter().any(|r| r.chars().count() != width) {
            return None;
        }
        let mut board = Board::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    board.put(Coord::new(x, y), self.piece_for_symbol(ch)?);
                }
            }
        }
        Some(board)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chess" => Ok(Variant::Chess),
            "xiangqi" | "chinese-chess" => Ok(Variant::Xiangqi),
            "draughts" | "checkers" => Ok(Variant::Draughts),
            "go" => Ok(Variant::Go),
            "gomoku" => Ok(Variant::Gomoku),
            "darkpool" | "dark-pool" | "dark_pool" => Ok(Variant::DarkPool),
            other => Err(GameError::UnknownVariant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_piece_counts() {
        let counts = |v: Variant| {
            let b = v.initial_board_with(&mut fastrand::Rng::with_seed(1));
            (b.count(Side::White), b.count(Side::Black))
        };
        assert_eq!(counts(Variant::Chess), (16, 16));
        assert_eq!(counts(Variant::Xiangqi), (16, 16));
        assert_eq!(counts(Variant::Draughts), (20, 20));
        assert_eq!(counts(Variant::Go), (0, 0));
        assert_eq!(counts(Variant::DarkPool), (16, 16));
    }

    #[test]
    fn test_dark_pool_shuffle_is_seeded() {
        let a = Variant::DarkPool.initial_board_with(&mut fastrand::Rng::with_seed(42));
        let b = Variant::DarkPool.initial_board_with(&mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
        assert!(a.pieces().all(|(_, p)| !p.revealed));
    }

    #[test]
    fn test_diagram_matches_display_symbols() {
        let board = Variant::Xiangqi.initial_board();
        let text = board.to_string();
        let rows: Vec<String> = text
            .lines()
            .take(board.height())
            .map(|l| l.split_whitespace().skip(1).collect())
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        assert_eq!(Variant::Xiangqi.parse_board(&rows), Some(board));
    }

    #[test]
    fn test_parse_variant_names() {
        assert_eq!("Chinese-Chess".parse::<Variant>().unwrap(), Variant::Xiangqi);
        assert_eq!("dark_pool".parse::<Variant>().unwrap(), Variant::DarkPool);
        assert!("shogi".parse::<Variant>().is_err());
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert_eq!(Variant::Chess.parse_board(&["K..", "k."]), None);
        assert_eq!(Variant::Chess.parse_board(&["Z.."]), None);
    }
}
