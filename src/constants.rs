//! Constants for board dimensions, search presets and evaluation weights.
//!
//! Every variant keeps its geometry and value table here so the rule
//! and evaluation modules stay free of magic numbers.

// =============================================================================
// Board Geometry
// =============================================================================

/// International chess board (8x8).
pub const CHESS_SIZE: usize = 8;

/// Xiangqi board width (files).
pub const XIANGQI_WIDTH: usize = 9;

/// Xiangqi board height (ranks).
pub const XIANGQI_HEIGHT: usize = 10;

/// Draughts board (10x10).
pub const DRAUGHTS_SIZE: usize = 10;

/// Rows of men each side starts with in draughts.
pub const DRAUGHTS_ROWS: usize = 4;

/// Go board (19x19).
pub const GO_SIZE: usize = 19;

/// Gomoku board (15x15).
pub const GOMOKU_SIZE: usize = 15;

/// Dark pool board width.
pub const DARK_POOL_WIDTH: usize = 8;

/// Dark pool board height.
pub const DARK_POOL_HEIGHT: usize = 4;

/// Smallest square board accepted for Go and gomoku.
pub const MIN_BOARD_SIZE: usize = 5;

/// Largest square board accepted for Go and gomoku. Column `x` is reserved
/// as the capture marker in move notation.
pub const MAX_BOARD_SIZE: usize = 19;

// =============================================================================
// Search Parameters
// =============================================================================

/// Search depth for the "easy" preset.
pub const EASY_DEPTH: u32 = 3;

/// Search depth for the "hard" preset.
pub const HARD_DEPTH: u32 = 4;

/// Deepest preset search for Go and gomoku, whose branching factor is far
/// larger than the piece games'. An explicit depth overrides it.
pub const PLACEMENT_DEPTH_CAP: u32 = 2;

/// Score reported for a decided game (beyond any material total).
pub const WIN_SCORE: i32 = 1_000_000;

/// Candidate radius around existing stones for gomoku searches.
pub const GOMOKU_CANDIDATE_RADIUS: i32 = 2;

/// Candidate radius around existing stones for Go searches.
pub const GO_CANDIDATE_RADIUS: i32 = 1;

// =============================================================================
// Material Values
// =============================================================================

/// King / general value. Dominates every positional term.
pub const ROYAL_VALUE: i32 = 1000;

pub const CHESS_PAWN: i32 = 10;
pub const CHESS_KNIGHT: i32 = 30;
pub const CHESS_BISHOP: i32 = 30;
pub const CHESS_ROOK: i32 = 50;
pub const CHESS_QUEEN: i32 = 90;

pub const XIANGQI_CHARIOT: i32 = 90;
pub const XIANGQI_HORSE: i32 = 40;
pub const XIANGQI_CANNON: i32 = 45;
pub const XIANGQI_ADVISOR: i32 = 20;
pub const XIANGQI_ELEPHANT: i32 = 20;
pub const XIANGQI_SOLDIER: i32 = 10;

/// Draughts man and promoted king (1:3).
pub const DRAUGHTS_MAN: i32 = 10;
pub const DRAUGHTS_KING: i32 = 30;

/// Value of one Go stone on the board.
pub const GO_STONE: i32 = 1;

/// Dark pool values on the same scale as xiangqi.
pub const DARK_POOL_SOLDIER: i32 = 10;
pub const DARK_POOL_CANNON: i32 = 45;
pub const DARK_POOL_HORSE: i32 = 40;
pub const DARK_POOL_CHARIOT: i32 = 90;
pub const DARK_POOL_ELEPHANT: i32 = 20;
pub const DARK_POOL_ADVISOR: i32 = 20;

// =============================================================================
// Positional Terms
// =============================================================================

/// Bonus per piece of the maximizing side standing past the midline (hard only).
pub const ADVANCE_BONUS: i32 = 2;

/// Weight per step of a general's distance from its palace center.
pub const PALACE_DISTANCE_WEIGHT: i32 = 3;

/// Gomoku line weights indexed by same-color stones in a five-cell window.
pub const GOMOKU_LINE_WEIGHTS: [i32; 6] = [0, 1, 10, 100, 1000, 10000];

/// Stones in a row needed to win gomoku.
pub const GOMOKU_RUN: usize = 5;
