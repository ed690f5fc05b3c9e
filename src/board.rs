//! Board model shared by every variant.
//!
//! A [`Board`] is a fixed-size row-major grid of cells, each either empty or
//! holding a [`Piece`]. Row 0 is the top of the board as printed; the side
//! that starts at the bottom ([`Side::White`], or red in xiangqi) moves toward
//! row 0.

use std::fmt;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a forward step (White moves up the printed board).
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

/// Piece kinds across all variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    // Chess
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    // Xiangqi and dark pool
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
    // Draughts (a king is a man with `promoted` set)
    Man,
    // Go and gomoku
    Stone,
}

impl PieceKind {
    /// Upper-case letter used in board diagrams.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::General => 'G',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'E',
            PieceKind::Horse => 'H',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'S',
            PieceKind::Man => 'M',
            PieceKind::Stone => 'O',
        }
    }
}

/// A piece on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
    /// Draughts man crowned as a king.
    pub promoted: bool,
    /// Face-up in dark pool; always true elsewhere.
    pub revealed: bool,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self {
            side,
            kind,
            promoted: false,
            revealed: true,
        }
    }

    /// A face-down dark pool piece.
    pub const fn hidden(side: Side, kind: PieceKind) -> Self {
        Self {
            side,
            kind,
            promoted: false,
            revealed: false,
        }
    }

    pub const fn crowned(side: Side) -> Self {
        Self {
            side,
            kind: PieceKind::Man,
            promoted: true,
            revealed: true,
        }
    }

    /// Diagram symbol: upper case for White, lower case for Black.
    pub fn symbol(&self) -> char {
        if !self.revealed {
            return '#';
        }
        let letter = match self.kind {
            PieceKind::Stone => {
                return match self.side {
                    Side::White => 'O',
                    Side::Black => 'X',
                };
            }
            PieceKind::Man if self.promoted => 'K',
            kind => kind.letter(),
        };
        match self.side {
            Side::White => letter,
            Side::Black => letter.to_ascii_lowercase(),
        }
    }
}

/// A cell coordinate: `x` is the column, `y` the row from the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Signed (dx, dy) from `self` to `to`.
    #[inline]
    pub fn delta(self, to: Coord) -> (i32, i32) {
        (to.x as i32 - self.x as i32, to.y as i32 - self.y as i32)
    }
}

/// Fixed-size grid of cells. Dimensions never change after creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Piece>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, c: Coord) -> usize {
        c.y * self.width + c.x
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// The cell `(dx, dy)` away from `c`, if it is on the board.
    #[inline]
    pub fn offset(&self, c: Coord, dx: i32, dy: i32) -> Option<Coord> {
        let (x, y) = (c.x as i32 + dx, c.y as i32 + dy);
        self.contains(x, y).then(|| Coord::new(x as usize, y as usize))
    }

    #[inline]
    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        self.cells[self.idx(c)]
    }

    #[inline]
    pub fn is_empty(&self, c: Coord) -> bool {
        self.piece_at(c).is_none()
    }

    pub fn set(&mut self, c: Coord, cell: Option<Piece>) {
        let i = self.idx(c);
        self.cells[i] = cell;
    }

    pub fn put(&mut self, c: Coord, piece: Piece) {
        self.set(c, Some(piece));
    }

    /// Remove and return whatever occupies `c`.
    pub fn take(&mut self, c: Coord) -> Option<Piece> {
        let i = self.idx(c);
        self.cells[i].take()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| Coord::new(i % width, i / width))
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|p| (Coord::new(i % self.width, i / self.width), p)))
    }

    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().flatten().filter(|p| p.side == side).count()
    }

    /// First cell (row-major) holding a piece matching `pred`.
    pub fn find(&self, pred: impl Fn(&Piece) -> bool) -> Option<Coord> {
        self.pieces().find(|(_, p)| pred(p)).map(|(c, _)| c)
    }

    /// Orthogonal neighbours of `c` that lie on the board.
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(c, dx, dy))
    }

    /// Center cell (rounded toward the top-left).
    pub fn center(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            write!(f, "{:>2} ", self.height - y)?;
            for x in 0..self.width {
                let ch = self.piece_at(Coord::new(x, y)).map_or('.', |p| p.symbol());
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, "{} ", column_letter(x))?;
        }
        writeln!(f)
    }
}

fn column_letter(x: usize) -> char {
    (b'a' + x as u8) as char
}

/// Parse a cell name such as `e4` for a board of the given dimensions.
///
/// Columns are letters from `a`; rows count from 1 at the bottom.
/// Returns `None` for malformed or off-board names.
pub fn parse_coord(s: &str, width: usize, height: usize) -> Option<Coord> {
    let mut chars = s.trim().chars();
    let col = chars.next()?.to_ascii_lowercase();
    if !col.is_ascii_lowercase() {
        return None;
    }
    let x = (col as u8 - b'a') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    if x >= width || row == 0 || row > height {
        return None;
    }
    Some(Coord::new(x, height - row))
}

/// Inverse of [`parse_coord`].
pub fn str_coord(c: Coord, height: usize) -> String {
    format!("{}{}", column_letter(c.x), height - c.y)
}
