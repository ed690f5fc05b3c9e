//! Error types for the session, protocol and configuration layers.
//!
//! Rule checking and search never fail: an illegal move is simply absent
//! from the legal-move list. These errors cover user-facing input.

/// Errors that can occur while driving a game.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    /// Move text that does not name a cell or a pair of cells
    #[error("cannot parse move '{0}'")]
    BadNotation(String),

    /// Well-formed move that is not legal in the current position
    #[error("illegal move {0}")]
    IllegalMove(String),

    /// Move text naming more than one legal move
    #[error("ambiguous move {0}: give every landing cell")]
    AmbiguousMove(String),

    /// Move attempted after the game has ended
    #[error("game is over")]
    GameOver,

    #[error("unknown variant '{0}'")]
    UnknownVariant(String),

    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    /// Board size outside the supported range, or set for a fixed-size variant
    #[error("invalid board size {size} for {variant}")]
    InvalidBoardSize { variant: String, size: usize },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
