use std::fmt::Display;

use crate::chess::{CastlingSide, Color, Piece, PieceId, PieceType, Square};

/// Check status of the side to move after a ply.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    None,
    Check,
    Checkmate,
}

impl CheckState {
    fn suffix(self) -> &'static str {
        match self {
            CheckState::None => "",
            CheckState::Check => "+",
            CheckState::Checkmate => "#",
        }
    }
}

/// A piece together with its identity on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub id: PieceId,
    pub piece: Piece,
}

/// A captured unit and the square it was removed from. For an en-passant capture the square is
/// not the destination of the capturing pawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub unit: Unit,
    pub square: Square,
}

/// The rook displaced by a castling move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RookMove {
    pub unit: Unit,
    pub from: Square,
    pub to: Square,
}

/// An executed move, as recorded by the position it produced.
///
/// A ply is built once, when a legal move is committed, and never changes afterwards. It keeps
/// everything needed to describe the move in the usual notations without looking at the board
/// again: the moving unit, what it captured, what it promoted to, the rook that moved along with a
/// castling king, and whether the origin file or rank is needed to tell it apart from another
/// unit of the same kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ply {
    pub(crate) number: u32,
    pub(crate) mover: Unit,
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) capture: Option<Capture>,
    pub(crate) promotion: Option<Unit>,
    pub(crate) castling_rook: Option<RookMove>,
    pub(crate) ambiguous_file: bool,
    pub(crate) ambiguous_rank: bool,
    pub(crate) en_passant: bool,
    pub(crate) check_state: CheckState,
}

impl Ply {
    /// Ply number of the position this move produced (the first move of a game is 1).
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn color(&self) -> Color {
        self.mover.piece.color()
    }

    pub fn mover(&self) -> Unit {
        self.mover
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn capture(&self) -> Option<Capture> {
        self.capture
    }

    /// The unit created by a promotion. It has a new identity; the pawn leaves the board.
    pub fn promotion(&self) -> Option<Unit> {
        self.promotion
    }

    pub fn castling_rook(&self) -> Option<RookMove> {
        self.castling_rook
    }

    pub fn castling_side(&self) -> Option<CastlingSide> {
        self.castling_rook.map(|rook| {
            if rook.from.file() > self.from.file() {
                CastlingSide::Kingside
            } else {
                CastlingSide::Queenside
            }
        })
    }

    pub fn is_ambiguous_file(&self) -> bool {
        self.ambiguous_file
    }

    pub fn is_ambiguous_rank(&self) -> bool {
        self.ambiguous_rank
    }

    pub fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    /// Long algebraic notation: "e2-e4", "e4xd5", "e7-e8=Q+", "O-O".
    pub fn lan(&self) -> String {
        if let Some(side) = self.castling_side() {
            return format!("{}{}", castling_token(side, 'O'), self.check_state.suffix());
        }

        let mut lan = String::with_capacity(8);
        lan.push_str(&self.from.to_string());
        lan.push(if self.capture.is_some() { 'x' } else { '-' });
        lan.push_str(&self.to.to_string());
        if let Some(promotion) = self.promotion {
            lan.push('=');
            lan.push(char::from(promotion.piece.piece_type()));
        }
        lan.push_str(self.check_state.suffix());
        lan
    }

    /// Short algebraic notation: "e4", "Nbd7", "exd5", "e8=Q#", "O-O-O".
    pub fn san(&self) -> String {
        self.short_form(|piece| char::from(piece.piece_type()), 'O')
    }

    /// Figurine notation: the short form with piece glyphs in place of letters.
    pub fn fan(&self) -> String {
        self.short_form(Piece::figurine, '0')
    }

    /// Coordinate notation for machine exchange: "e2e4", "e7e8q", "e1g1".
    pub fn engine(&self) -> String {
        let mut engine = format!("{}{}", self.from, self.to);
        if let Some(promotion) = self.promotion {
            engine.push(char::from(promotion.piece.piece_type()).to_ascii_lowercase());
        }
        engine
    }

    fn short_form(&self, symbol: impl Fn(Piece) -> char, castling_letter: char) -> String {
        if let Some(side) = self.castling_side() {
            return format!("{}{}", castling_token(side, castling_letter), self.check_state.suffix());
        }

        let mut san = String::with_capacity(8);
        if self.mover.piece.piece_type() != PieceType::Pawn {
            san.push(symbol(self.mover.piece));
        }
        if self.ambiguous_file {
            san.push(char::from(self.from.file()));
        }
        if self.ambiguous_rank {
            san.push(char::from(self.from.rank()));
        }
        if self.capture.is_some() {
            san.push('x');
        }
        san.push_str(&self.to.to_string());
        if let Some(promotion) = self.promotion {
            san.push('=');
            san.push(symbol(promotion.piece));
        }
        san.push_str(self.check_state.suffix());
        san
    }
}

fn castling_token(side: CastlingSide, letter: char) -> String {
    match side {
        CastlingSide::Kingside => format!("{letter}-{letter}"),
        CastlingSide::Queenside => format!("{letter}-{letter}-{letter}"),
    }
}

impl Display for Ply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.san())
    }
}
