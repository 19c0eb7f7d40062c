use std::fmt::Display;

use crate::chess::Color;

/// Status of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GameResult {
    #[default]
    InProgress,
    WhiteWon,
    BlackWon,
    Draw,
}

impl GameResult {
    /// The result in which `color` wins.
    pub fn win_for(color: Color) -> GameResult {
        match color {
            Color::White => GameResult::WhiteWon,
            Color::Black => GameResult::BlackWon,
        }
    }

    pub fn is_in_progress(self) -> bool {
        self == GameResult::InProgress
    }
}

impl Display for GameResult {
    /// Formats the result as a game-record termination marker.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "*"),
            GameResult::WhiteWon => write!(f, "1-0"),
            GameResult::BlackWon => write!(f, "0-1"),
            GameResult::Draw => write!(f, "1/2-1/2"),
        }
    }
}

/// The rule that ended a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiveFoldRepetition,
    SeventyFiveMoves,
    ThreeFoldRepetition,
    FiftyMoves,
    Resign,
    Timeout,
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Rule::Checkmate => "checkmate",
            Rule::Stalemate => "stalemate",
            Rule::InsufficientMaterial => "insufficient material",
            Rule::FiveFoldRepetition => "five-fold repetition",
            Rule::SeventyFiveMoves => "seventy-five move rule",
            Rule::ThreeFoldRepetition => "three-fold repetition",
            Rule::FiftyMoves => "fifty move rule",
            Rule::Resign => "resignation",
            Rule::Timeout => "time forfeit",
        };
        write!(f, "{description}")
    }
}
