//! Boardwise: rule engines and alpha-beta opponents for six board games.
//!
//! International chess, xiangqi, draughts, Go, gomoku and dark pool (a
//! hidden-piece xiangqi) share one board model, one polymorphic rule engine
//! and one minimax search with alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, depth presets and value tables
//! - [`board`] - Board model, coordinates and cell names
//! - [`moves`] - Moves and their text notation
//! - [`variant`] - Starting layouts, diagram parsing and rule lookup
//! - [`rules`] - Legal-move generation and terminal detection
//! - [`executor`] - Applying moves to a board
//! - [`eval`] - Static position evaluation
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`session`] - Turn controller owning the authoritative game
//! - [`config`] - Difficulty and engine settings
//! - [`protocol`] - Text command loop
//!
//! ## Example
//!
//! ```
//! use boardwise::board::Side;
//! use boardwise::rules::legal_moves;
//! use boardwise::search::best_move;
//! use boardwise::variant::Variant;
//!
//! let board = Variant::Chess.initial_board();
//! assert_eq!(legal_moves(Variant::Chess, &board, Side::White).len(), 20);
//!
//! let mv = best_move(Variant::Chess, &board, Side::White, 2).unwrap();
//! println!("Best move: {}", mv.notation(board.height()));
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod eval;
pub mod executor;
pub mod moves;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod session;
pub mod variant;

pub use error::{GameError, GameResult};
