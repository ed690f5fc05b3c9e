//! Engine configuration: difficulty presets and per-game settings.

use std::fmt;
use std::str::FromStr;

use crate::constants::{EASY_DEPTH, HARD_DEPTH, MAX_BOARD_SIZE, MIN_BOARD_SIZE, PLACEMENT_DEPTH_CAP};
use crate::error::{GameError, GameResult};
use crate::eval::EvalOptions;
use crate::variant::Variant;

/// Strength preset for the computer opponent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Hard,
}

impl Difficulty {
    /// Preset search depth.
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => EASY_DEPTH,
            Difficulty::Hard => HARD_DEPTH,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Everything needed to start a game against the computer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub variant: Variant,
    pub difficulty: Difficulty,
    /// Fixed search depth, overriding the difficulty preset.
    pub depth: Option<u32>,
    /// Seed for dark pool shuffles and easy-mode picks.
    pub seed: Option<u64>,
    /// The computer plays the side that moves first.
    pub computer_first: bool,
    /// Easy mode picks a uniformly random legal move instead of searching.
    pub random_easy: bool,
    /// Square board size for Go and gomoku.
    pub board_size: Option<usize>,
    /// Go move cap; defaults to the number of intersections.
    pub move_cap: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Chess,
            difficulty: Difficulty::default(),
            depth: None,
            seed: None,
            computer_first: false,
            random_easy: true,
            board_size: None,
            move_cap: None,
        }
    }
}

impl EngineConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Reject settings that cannot apply to the chosen variant.
    pub fn validate(&self) -> GameResult<()> {
        if let Some(size) = self.board_size {
            if !self.variant.is_placement() || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
                return Err(GameError::InvalidBoardSize {
                    variant: self.variant.to_string(),
                    size,
                });
            }
        }
        Ok(())
    }

    /// Depth the search runs at.
    pub fn search_depth(&self) -> u32 {
        if let Some(depth) = self.depth {
            return depth;
        }
        let preset = self.difficulty.depth();
        if self.variant.is_placement() {
            preset.min(PLACEMENT_DEPTH_CAP)
        } else {
            preset
        }
    }

    /// Whether the computer moves at random instead of searching.
    pub fn plays_randomly(&self) -> bool {
        self.difficulty == Difficulty::Easy && self.random_easy && self.depth.is_none()
    }

    pub fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            advancement: self.difficulty == Difficulty::Hard,
        }
    }

    /// Board (width, height) for this configuration.
    pub fn dimensions(&self) -> (usize, usize) {
        match self.board_size {
            Some(size) if self.variant.is_placement() => (size, size),
            _ => self.variant.dimensions(),
        }
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
