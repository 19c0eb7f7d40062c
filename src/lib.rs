use std::sync::Once;

pub mod chess;
pub mod clock;
pub mod config;
pub mod game;
pub mod notation;
pub mod outcome;
pub mod player;
pub mod ply;
pub mod position;
pub mod signal;

pub use clock::{Clock, ClockDiscipline, Tick, TickSubscription};
pub use game::{Game, GameError, GameSignals, PieceEvent};
pub use outcome::{GameResult, Rule};
pub use player::{MoveSource, Player, PlayerRequest, ScriptedSource};
pub use ply::{CheckState, Ply};
pub use position::{Position, STANDARD_SETUP};

static INIT: Once = Once::new();

/// Initialize the library lookup tables. They are otherwise built on first use.
pub fn initialize() {
    INIT.call_once(|| {
        chess::bitboard::initialize();
        chess::patterns::initialize();
    });
}
