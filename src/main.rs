//! Boardwise: play board games against an alpha-beta opponent.
//!
//! ## Usage
//!
//! - `boardwise` / `boardwise play` - Run the text protocol on stdin/stdout
//! - `boardwise demo` - Let the computer play itself and print each position

use std::io;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use boardwise::config::{Difficulty, EngineConfig};
use boardwise::protocol::ProtocolEngine;
use boardwise::rules::Outcome;
use boardwise::session::GameSession;
use boardwise::variant::Variant;

/// Boardwise: chess, xiangqi, draughts, Go, gomoku and dark pool
#[derive(Parser)]
#[command(name = "boardwise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
struct EngineArgs {
    /// Game to play
    #[arg(long, env = "BOARDWISE_VARIANT", default_value = "chess", global = true)]
    variant: Variant,

    /// Computer strength
    #[arg(long, env = "BOARDWISE_DIFFICULTY", default_value = "hard", global = true)]
    difficulty: Difficulty,

    /// Fixed search depth, overriding the difficulty preset
    #[arg(long, env = "BOARDWISE_DEPTH", global = true)]
    depth: Option<u32>,

    /// Seed for shuffles and random picks
    #[arg(long, env = "BOARDWISE_SEED", global = true)]
    seed: Option<u64>,

    /// The computer takes the side that moves first
    #[arg(long, env = "BOARDWISE_COMPUTER_FIRST", global = true)]
    computer_first: bool,

    /// Make the easy opponent search instead of moving at random
    #[arg(long, env = "BOARDWISE_SEARCH_EASY", global = true)]
    search_easy: bool,

    /// Board size for Go and gomoku
    #[arg(long, env = "BOARDWISE_BOARD_SIZE", global = true)]
    board_size: Option<usize>,

    /// Move cap for Go (defaults to the number of intersections)
    #[arg(long, env = "BOARDWISE_MOVE_CAP", global = true)]
    move_cap: Option<usize>,
}

impl From<EngineArgs> for EngineConfig {
    fn from(args: EngineArgs) -> Self {
        EngineConfig {
            variant: args.variant,
            difficulty: args.difficulty,
            depth: args.depth,
            seed: args.seed,
            computer_first: args.computer_first,
            random_easy: !args.search_easy,
            board_size: args.board_size,
            move_cap: args.move_cap,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the text protocol on stdin/stdout
    Play,
    /// Let the computer play both sides
    Demo {
        /// Stop after this many moves
        #[arg(long, default_value_t = 200)]
        max_moves: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from(cli.engine);

    match cli.command {
        Some(Commands::Demo { max_moves }) => run_demo(config, max_moves),
        Some(Commands::Play) | None => {
            let mut engine = ProtocolEngine::new(config)?;
            engine.run(io::stdin().lock(), io::stdout().lock())
        }
    }
}

fn run_demo(config: EngineConfig, max_moves: usize) -> Result<()> {
    let mut session = GameSession::new(config)?;
    let variant = session.variant();
    println!("Boardwise demo: {variant}\n");
    println!("{}", session.board());

    for _ in 0..max_moves {
        if session.outcome().is_some() {
            break;
        }
        match session.computer_move()? {
            Some(record) => {
                println!("{} plays {}", variant.side_name(record.side), record.notation);
                println!("{}", session.board());
            }
            None => break,
        }
    }

    match session.outcome() {
        Some(Outcome::Winner(side)) => println!("{} wins", variant.side_name(side)),
        Some(Outcome::Draw) => println!("Draw"),
        None => println!("Stopped after {max_moves} moves"),
    }
    Ok(())
}
