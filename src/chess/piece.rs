use std::fmt::Display;

use thiserror::Error;

/// Errors produced when converting characters to pieces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PieceError {
    #[error("Invalid piece character: {0}")]
    InvalidCharacter(char),
}

/// Represents the color of a chess piece.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const COUNT: usize = 2;

    /// Represents all colors of chess pieces.
    pub const ALL: [Color; Color::COUNT] = [Color::White, Color::Black];

    /// Returns the opposite color.
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl From<Color> for char {
    /// The side-to-move character of the board-state encoding.
    fn from(color: Color) -> Self {
        match color {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl From<Color> for usize {
    fn from(color: Color) -> Self {
        color as usize
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        color as u8
    }
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        assert!(value <= Color::Black.into());
        unsafe { std::mem::transmute(value) }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
    King = 4,
    Pawn = 5,
}

impl PieceType {
    pub const COUNT: usize = 6;

    /// Represents all piece types.
    pub const ALL: [PieceType; PieceType::COUNT] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];
}

impl From<PieceType> for u8 {
    fn from(piece_type: PieceType) -> Self {
        piece_type as u8
    }
}

impl From<PieceType> for usize {
    fn from(piece_type: PieceType) -> Self {
        piece_type as usize
    }
}

impl From<u8> for PieceType {
    fn from(value: u8) -> Self {
        assert!(value <= PieceType::Pawn.into());
        unsafe { std::mem::transmute(value) }
    }
}

impl From<PieceType> for char {
    fn from(piece_type: PieceType) -> Self {
        match piece_type {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl TryFrom<char> for PieceType {
    type Error = PieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'p' => Ok(PieceType::Pawn),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'r' => Ok(PieceType::Rook),
            'q' => Ok(PieceType::Queen),
            'k' => Ok(PieceType::King),
            _ => Err(PieceError::InvalidCharacter(value)),
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "Pawn"),
            PieceType::Knight => write!(f, "Knight"),
            PieceType::Bishop => write!(f, "Bishop"),
            PieceType::Rook => write!(f, "Rook"),
            PieceType::Queen => write!(f, "Queen"),
            PieceType::King => write!(f, "King"),
        }
    }
}

/// Represents a chess piece.
///
/// A `Piece` is a combination of a `Color` and a `PieceType`. It is represented as a single byte,
/// with the lowest bit holding the `Color` and the higher bits the `PieceType`. A piece carries no
/// position; the board it stands on does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece(u8);

#[allow(dead_code)]
impl Piece {
    pub const COUNT: usize = 12;

    pub const WHITE_KNIGHT: Piece = Piece(0);
    pub const WHITE_BISHOP: Piece = Piece(2);
    pub const WHITE_ROOK: Piece = Piece(4);
    pub const WHITE_QUEEN: Piece = Piece(6);
    pub const WHITE_KING: Piece = Piece(8);
    pub const WHITE_PAWN: Piece = Piece(10);
    pub const BLACK_KNIGHT: Piece = Piece(1);
    pub const BLACK_BISHOP: Piece = Piece(3);
    pub const BLACK_ROOK: Piece = Piece(5);
    pub const BLACK_QUEEN: Piece = Piece(7);
    pub const BLACK_KING: Piece = Piece(9);
    pub const BLACK_PAWN: Piece = Piece(11);

    pub fn new(color: Color, piece_type: PieceType) -> Self {
        Piece((u8::from(piece_type) << 1) | u8::from(color))
    }

    pub fn color(self) -> Color {
        Color::from(self.0 & 1)
    }

    pub fn piece_type(self) -> PieceType {
        PieceType::from(self.0 >> 1)
    }

    /// Returns the figurine glyph used by the decorative move notation.
    pub fn figurine(self) -> char {
        match (self.color(), self.piece_type()) {
            (Color::White, PieceType::Pawn) => '♙',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::King) => '♔',
            (Color::Black, PieceType::Pawn) => '♟',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::King) => '♚',
        }
    }
}

impl From<Piece> for char {
    /// Converts a `Piece` to its board-state encoding letter (uppercase for white).
    fn from(piece: Piece) -> Self {
        match piece.color() {
            Color::White => char::from(piece.piece_type()).to_ascii_uppercase(),
            Color::Black => char::from(piece.piece_type()).to_ascii_lowercase(),
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let color = if value.is_uppercase() { Color::White } else { Color::Black };
        Ok(Piece::new(color, PieceType::try_from(value)?))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color(), self.piece_type())
    }
}

/// Identity of one unit on the board.
///
/// Identities survive moves, are assigned in square order when a position is decoded and are
/// freshly allocated when a pawn promotes. They let observers follow a unit from ply to ply; they
/// play no part in legality or position equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);

impl Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
