//! Line-oriented text protocol, modelled on the Go Text Protocol.
//!
//! Each command is one line, optionally prefixed by a numeric id. Replies
//! start with `=` on success or `?` on failure, echo the id, and end with a
//! blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `variant [name]` - Show or switch the game (starts a new game)
//! - `boardsize <n>` - Board size for Go and gomoku (starts a new game)
//! - `clear_board` - Start the current game over
//! - `difficulty <easy|hard>`, `depth <n|auto>`
//! - `play <move>` - Play a move for the side to move (`d4`, `@c2`, `e2e4`, `e4xd5`,
//!   or a draughts chain with every landing cell, `e1xc3xe5`)
//! - `genmove` - Let the computer move for the side to move
//! - `legal_moves`, `showboard`, `status`, `captures`
//!
//! ## Example
//!
//! ```
//! use boardwise::config::EngineConfig;
//! use boardwise::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::new(EngineConfig::default()).unwrap();
//! let mut out = Vec::new();
//! engine.run("1 name\nquit\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("=1 boardwise"));
//! ```

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::warn;

use crate::board::Side;
use crate::config::{Difficulty, EngineConfig};
use crate::error::{GameError, GameResult};
use crate::rules::Outcome;
use crate::session::GameSession;
use crate::variant::Variant;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "depth",
    "difficulty",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "status",
    "variant",
    "version",
];

type Response = Result<String, String>;

/// Protocol front end over a [`GameSession`].
pub struct ProtocolEngine {
    session: GameSession,
}

impl ProtocolEngine {
    pub fn new(config: EngineConfig) -> GameResult<Self> {
        Ok(Self {
            session: GameSession::new(config)?,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("reading command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let response = self.execute(&command, args);
            let id = id.map(|i| i.to_string()).unwrap_or_default();
            match &response {
                Ok(message) => write!(output, "={id} {message}\n\n")?,
                Err(message) => {
                    warn!(%command, error = %message, "command rejected");
                    write!(output, "?{id} {message}\n\n")?
                }
            }
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Start a new game with `config`, keeping the current one on error.
    fn restart(&mut self, config: EngineConfig) -> Response {
        self.session = GameSession::new(config).map_err(|e| e.to_string())?;
        Ok(String::new())
    }

    fn status(&self) -> String {
        let variant = self.session.variant();
        match self.session.outcome() {
            Some(Outcome::Winner(side)) => format!("{} wins", variant.side_name(side)),
            Some(Outcome::Draw) => "draw".to_string(),
            None => format!(
                "{} to move ({})",
                variant.side_name(self.session.to_move()),
                self.session.player_to_move().name()
            ),
        }
    }

    fn captures(&self) -> String {
        let variant = self.session.variant();
        Side::BOTH
            .iter()
            .map(|&side| {
                let pieces = self.session.lost(side);
                let lost: String = pieces.iter().map(|p| p.symbol()).collect();
                format!("{} lost {}: {lost}", variant.side_name(side), pieces.len())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Execute one command.
    fn execute(&mut self, command: &str, args: &[&str]) -> Response {
        match command {
            "name" => Ok("boardwise".to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("2".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or("missing argument")?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "variant" => {
                let Some(name) = args.first() else {
                    return Ok(self.session.variant().to_string());
                };
                let variant: Variant = name.parse().map_err(|e: GameError| e.to_string())?;
                let mut config = self.session.config().clone();
                config.variant = variant;
                config.board_size = None;
                self.restart(config)
            }

            "boardsize" => {
                let size = args
                    .first()
                    .ok_or("missing argument")?
                    .parse::<usize>()
                    .map_err(|_| "invalid size")?;
                let mut config = self.session.config().clone();
                config.board_size = Some(size);
                self.restart(config)
            }

            "clear_board" => {
                self.session.reset();
                Ok(String::new())
            }

            "difficulty" => {
                let level: Difficulty = args
                    .first()
                    .ok_or("missing argument")?
                    .parse()
                    .map_err(|e: GameError| e.to_string())?;
                self.session.set_difficulty(level);
                Ok(String::new())
            }

            "depth" => {
                let arg = args.first().ok_or("missing argument")?;
                if arg.eq_ignore_ascii_case("auto") {
                    self.session.set_depth(None);
                    return Ok(String::new());
                }
                match arg.parse::<u32>() {
                    Ok(depth) if depth > 0 => {
                        self.session.set_depth(Some(depth));
                        Ok(String::new())
                    }
                    _ => Err("depth must be a positive integer".to_string()),
                }
            }

            "play" => {
                let text = args.first().ok_or("missing argument")?;
                self.session
                    .play_notation(text)
                    .map(|_| String::new())
                    .map_err(|e| e.to_string())
            }

            "genmove" => match self.session.computer_move() {
                Ok(Some(record)) => Ok(record.notation),
                Ok(None) => Ok("none".to_string()),
                Err(e) => Err(e.to_string()),
            },

            "legal_moves" => {
                let height = self.session.board().height();
                let moves: Vec<String> = self
                    .session
                    .legal_moves()
                    .iter()
                    .map(|m| m.notation(height))
                    .collect();
                Ok(moves.join(" "))
            }

            "showboard" => Ok(format!("\n{}", self.session.board())),

            "status" => Ok(self.status()),

            "captures" => Ok(self.captures()),

            _ => Err(format!("unknown command: {command}")),
        }
    }
}

/// Parse an optional numeric command ID from the beginning of the line.
fn parse_id(line: &str) -> (Option<u32>, &str) {
    let trimmed = line.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    match trimmed[..end].parse::<u32>() {
        Ok(id) => (Some(id), trimmed[end..].trim()),
        Err(_) => (None, trimmed),
    }
}
