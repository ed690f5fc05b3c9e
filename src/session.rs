//! Turn controller: the authoritative game state between searches.
//!
//! A [`GameSession`] owns the board, knows which side the human plays,
//! records moves and captures, and decides when the game is over. The
//! search only ever sees a borrowed [`Position`] and works on copies.

use tracing::info;

use crate::board::{Board, Piece, Side};
use crate::config::{Difficulty, EngineConfig};
use crate::error::{GameError, GameResult};
use crate::executor;
use crate::moves::{Move, MoveKind, MoveText};
use crate::rules::dark_pool::any_revealed;
use crate::rules::go::stone_winner;
use crate::rules::{Outcome, Position, Rules};
use crate::search::{random_move, search};
use crate::variant::Variant;

/// Who makes a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub fn name(self) -> &'static str {
        match self {
            Player::Human => "human",
            Player::Computer => "computer",
        }
    }
}

/// One confirmed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub side: Side,
    pub player: Player,
    pub notation: String,
    pub captured: Vec<Piece>,
}

pub struct GameSession {
    config: EngineConfig,
    rng: fastrand::Rng,
    position: Position,
    /// Unknown in dark pool until the first flip.
    human_side: Option<Side>,
    /// Pieces each side has lost, indexed by [`Side::index`].
    lost: [Vec<Piece>; 2],
    history: Vec<MoveRecord>,
    outcome: Option<Outcome>,
}

impl GameSession {
    pub fn new(config: EngineConfig) -> GameResult<Self> {
        config.validate()?;
        let mut rng = config.rng();
        let position = initial_position(&config, &mut rng);
        let human_side = initial_human_side(&config);
        info!(variant = %config.variant, difficulty = %config.difficulty, "new game");
        Ok(Self {
            config,
            rng,
            position,
            human_side,
            lost: [Vec::new(), Vec::new()],
            history: Vec::new(),
            outcome: None,
        })
    }

    /// Start over with the same configuration. The random generator keeps
    /// its state, so a seeded dark pool game gets a fresh shuffle.
    pub fn reset(&mut self) {
        self.position = initial_position(&self.config, &mut self.rng);
        self.human_side = initial_human_side(&self.config);
        self.lost = [Vec::new(), Vec::new()];
        self.history.clear();
        self.outcome = None;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn rules(&self) -> &'static dyn Rules {
        self.config.variant.rules()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn to_move(&self) -> Side {
        self.position.to_move
    }

    pub fn human_side(&self) -> Option<Side> {
        self.human_side
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Pieces `side` has lost so far.
    pub fn lost(&self, side: Side) -> &[Piece] {
        &self.lost[side.index()]
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
    }

    pub fn set_depth(&mut self, depth: Option<u32>) {
        self.config.depth = depth;
    }

    /// Go stops after this many moves.
    pub fn move_cap(&self) -> usize {
        let (width, height) = self.config.dimensions();
        self.config.move_cap.unwrap_or(width * height)
    }

    /// Whose turn it is. Before the dark pool opening flip the first player
    /// is on move.
    pub fn player_to_move(&self) -> Player {
        match self.human_side {
            Some(side) if side == self.position.to_move => Player::Human,
            Some(_) => Player::Computer,
            None if self.config.computer_first => Player::Computer,
            None => Player::Human,
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        self.rules().legal_moves(&self.position)
    }

    /// Validate and apply `mv` for the side to move.
    pub fn play(&mut self, mv: &Move) -> GameResult<MoveRecord> {
        let height = self.board().height();
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if !self.rules().is_legal(&self.position, mv) {
            return Err(GameError::IllegalMove(mv.notation(height)));
        }

        let player = self.player_to_move();
        let side = self.position.to_move;
        let opening_flip = self.variant() == Variant::DarkPool
            && mv.kind == MoveKind::Flip
            && !any_revealed(self.board());

        // The executor mutates the authoritative board in place; the rules
        // only decide who moves next and what the ko snapshot is.
        let (next, _) = self.rules().play(&self.position, mv);
        let previous = next.previous;
        let to_move = next.to_move;
        let captured = executor::apply_in_place(&mut self.position.board, mv);
        self.position.to_move = to_move;
        self.position.previous = previous;

        if opening_flip {
            // The flipper plays the colour they turned up.
            let flipped = self.position.to_move.opponent();
            let human = match player {
                Player::Human => flipped,
                Player::Computer => flipped.opponent(),
            };
            self.human_side = Some(human);
            info!(human = self.variant().side_name(human), "sides assigned");
        }

        for piece in &captured {
            self.lost[piece.side.index()].push(*piece);
        }
        let record = MoveRecord {
            mv: mv.clone(),
            side,
            player,
            notation: mv.notation(height),
            captured,
        };
        info!(
            side = self.variant().side_name(side),
            player = player.name(),
            mv = %record.notation,
            captures = record.captured.len(),
            "move played"
        );
        self.history.push(record.clone());
        self.refresh_outcome();
        Ok(record)
    }

    /// Parse `text` and play the legal move it names.
    pub fn play_notation(&mut self, text: &str) -> GameResult<MoveRecord> {
        let (width, height) = (self.board().width(), self.board().height());
        let mv = MoveText::resolve(text, &self.legal_moves(), width, height)?;
        self.play(&mv)
    }

    /// Let the computer pick and play a move for the side to move.
    ///
    /// Returns `Ok(None)` when there is nothing to play; the game is then
    /// over.
    pub fn computer_move(&mut self) -> GameResult<Option<MoveRecord>> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let rules = self.rules();
        let choice = if self.config.plays_randomly() {
            random_move(rules, &self.position, &mut self.rng)
        } else {
            let depth = self.config.search_depth().max(1);
            search(rules, &self.position, depth, self.config.eval_options()).best_move
        };
        match choice {
            Some(mv) => self.play(&mv).map(Some),
            None => {
                self.finish(rules.no_moves_outcome(&self.position));
                Ok(None)
            }
        }
    }

    fn refresh_outcome(&mut self) {
        let rules = self.rules();
        let outcome = rules.outcome(&self.position).or_else(|| {
            if self.variant() == Variant::Go && self.history.len() >= self.move_cap() {
                Some(stone_winner(self.board()))
            } else if rules.legal_moves(&self.position).is_empty() {
                Some(rules.no_moves_outcome(&self.position))
            } else {
                None
            }
        });
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(side) => info!(winner = self.variant().side_name(side), "game over"),
            Outcome::Draw => info!("game over: draw"),
        }
        self.outcome = Some(outcome);
    }
}

fn initial_position(config: &EngineConfig, rng: &mut fastrand::Rng) -> Position {
    let variant = config.variant;
    let board = match config.board_size {
        Some(size) if variant.is_placement() => Board::new(size, size),
        _ => variant.initial_board_with(rng),
    };
    Position::new(board, variant.first_to_move())
}

fn initial_human_side(config: &EngineConfig) -> Option<Side> {
    let first = config.variant.first_to_move();
    match config.variant {
        Variant::DarkPool => None,
        _ if config.computer_first => Some(first.opponent()),
        _ => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_moves_first_by_default() {
        let session = GameSession::new(EngineConfig::new(Variant::Chess)).unwrap();
        assert_eq!(session.player_to_move(), Player::Human);
        assert_eq!(session.human_side(), Some(Side::White));
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut session = GameSession::new(EngineConfig::new(Variant::Chess)).unwrap();
        assert_eq!(
            session.play_notation("e2e5"),
            Err(GameError::IllegalMove("e2e5".into()))
        );
        assert!(matches!(session.play_notation("zz"), Err(GameError::BadNotation(_))));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_turns_alternate() {
        let mut config = EngineConfig::new(Variant::Chess);
        config.depth = Some(1);
        let mut session = GameSession::new(config).unwrap();
        session.play_notation("e2e4").unwrap();
        assert_eq!(session.player_to_move(), Player::Computer);
        let reply = session.computer_move().unwrap().unwrap();
        assert_eq!(reply.side, Side::Black);
        assert_eq!(reply.player, Player::Computer);
        assert_eq!(session.player_to_move(), Player::Human);
    }
}
