use arbiter::{
    config::{self, get_config},
    Game, GameError, Ply, Position,
};
use clap::Parser;
use thiserror::Error;

#[derive(Error, Debug)]
enum ArbiterError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("{0}")]
    GameError(#[from] GameError),
}

mod arguments {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    /// A chess rules arbiter
    #[derive(Parser)]
    #[command(name = "arbiter", version = "0.1.0", about = "Validates chess games and reports their outcome")]
    pub struct ArbiterArgs {
        /// Configuration file (clock settings)
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        #[command(subcommand)]
        pub command: Commands,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Commands {
        /// Play a list of moves and report the final position and outcome
        Replay {
            /// FEN string of the starting position
            #[arg(short, long, default_value = arbiter::STANDARD_SETUP)]
            fen: String,

            /// Moves in coordinate or short algebraic notation
            moves: Vec<String>,
        },

        /// List the legal moves of a position
        Moves {
            /// FEN string of the position
            #[arg(short, long, default_value = arbiter::STANDARD_SETUP)]
            fen: String,
        },
    }
}

fn replay(fen: &str, moves: &[String]) -> Result<(), ArbiterError> {
    let mut game = Game::load(fen, std::iter::empty())?;
    if let Some(clock_config) = &get_config().clock {
        game.set_clock(clock_config.build_clock());
    }
    game.signals.moved.connect(|ply: &Ply| println!("{:>4} {:<8} {}", ply.number(), ply.san(), ply.lan()));
    game.signals.ended.connect(|(result, rule)| println!("{result} ({rule})"));
    game.start();

    for (index, notation) in moves.iter().enumerate() {
        let player = game.current_player();
        if !player.make_move(&mut game, notation, true) {
            return Err(GameError::Load { index, notation: notation.clone() }.into());
        }
    }

    println!("{}", game.current_position());
    if game.result().is_in_progress() {
        println!("{}", game.result());
    }

    Ok(())
}

fn list_moves(fen: &str) {
    let position = Position::from_fen(fen);
    for ply in position.legal_moves() {
        println!("{:<8} {:<8} {}", ply.san(), ply.lan(), ply.engine());
    }
}

fn run() -> Result<(), ArbiterError> {
    // Parse command line arguments
    let args = arguments::ArbiterArgs::parse();

    env_logger::init();
    arbiter::initialize();
    if let Some(path) = args.config {
        config::initialize(path)?;
    }

    // Run the command
    match args.command {
        arguments::Commands::Replay { fen, moves } => replay(&fen, &moves)?,
        arguments::Commands::Moves { fen } => list_moves(&fen),
    }

    Ok(())
}

/// Main entry point for the arbiter.
fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
