pub mod bitboard;
pub mod castling;
pub mod coordinates;
pub mod patterns;
pub mod piece;

pub use bitboard::Bitboard;
pub use castling::{CastlingRight, CastlingSide};
pub use coordinates::{CoordinatesError, File, Rank, Square};
pub use piece::{Color, Piece, PieceError, PieceId, PieceType};
