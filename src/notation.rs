use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::{
    chess::{CastlingRight, CastlingSide, Color, File, Piece, PieceType, Rank, Square},
    position::Position,
};

/// Represents errors that can occur when decoding a move string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotationError {
    /// The string is not a move in any of the accepted forms.
    #[error("Invalid notation: \"{0}\"")]
    InvalidNotation(String),

    /// More than one unit matches a move given without a complete origin square.
    #[error("Move \"{0}\" is ambiguous")]
    AmbiguousMove(String),

    /// No unit of the side to move can make the move.
    #[error("Move \"{0}\" has no matches")]
    NoMatchingPiece(String),
}

/// A decoded move: where from, where to and, for a promoting pawn, into what.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

static MOVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?P<castle>O-O(?:-O)?|0-0(?:-0)?)",
        r"|(?P<piece>[KQRBNP])?(?P<from_file>[a-h])?(?P<from_rank>[1-8])?[x-]?",
        r"(?P<to_file>[a-h])(?P<to_rank>[1-8])",
        r"(?:=(?P<promotion>[QRBNqrbn])|(?P<suffix_promotion>[QRBNqrbn]))?)",
        r"[+#]?$"
    ))
    .expect("The move regex is valid")
});

/// Decodes a move string for `color` against `position`.
///
/// Accepted forms are the coordinate form ("e2e4", "e7e8q", "e7e8=Q"), short algebraic with
/// optional capture marker, disambiguation and check suffix ("Nbd7", "exd5", "R1a3+", "e8=Q#"),
/// and the castling tokens "O-O", "O-O-O" and their digit-zero lookalikes.
///
/// When the origin square is incomplete, every unit of the right kind matching the given file or
/// rank is tried against the position; exactly one must be able to make the move. The position is
/// left unchanged.
pub fn parse_move(position: &mut Position, color: Color, notation: &str) -> Result<MoveRequest, NotationError> {
    let captures = MOVE_REGEX.captures(notation).ok_or_else(|| {
        debug!("Move {notation} has unexpected characters");
        NotationError::InvalidNotation(notation.to_string())
    })?;

    if let Some(castle) = captures.name("castle") {
        let side = if castle.as_str().len() > 3 { CastlingSide::Queenside } else { CastlingSide::Kingside };
        let rank = CastlingRight::home_rank(color);
        return Ok(MoveRequest {
            from: Square::new(File::E, rank),
            to: Square::new(side.king_destination_file(), rank),
            promotion: None,
        });
    }

    let first_char = |name: &str| captures.name(name).and_then(|m| m.as_str().chars().next());
    let file = |name: &str| first_char(name).and_then(|c| File::try_from(c).ok());
    let rank = |name: &str| first_char(name).and_then(|c| Rank::try_from(c).ok());

    let (Some(to_file), Some(to_rank)) = (file("to_file"), rank("to_rank")) else {
        debug!("Move {notation} missing destination");
        return Err(NotationError::InvalidNotation(notation.to_string()));
    };
    let to = Square::new(to_file, to_rank);
    let promotion = promotion_type(&captures);

    let from = match (file("from_file"), rank("from_rank")) {
        (Some(from_file), Some(from_rank)) => Square::new(from_file, from_rank),
        (from_file, from_rank) => {
            let piece_type =
                first_char("piece").and_then(|c| PieceType::try_from(c).ok()).unwrap_or(PieceType::Pawn);
            find_origin(position, Piece::new(color, piece_type), from_file, from_rank, to, notation)?
        }
    };

    Ok(MoveRequest { from, to, promotion })
}

fn promotion_type(captures: &Captures) -> Option<PieceType> {
    captures
        .name("promotion")
        .or_else(|| captures.name("suffix_promotion"))
        .and_then(|m| m.as_str().chars().next())
        .and_then(|c| PieceType::try_from(c).ok())
}

fn find_origin(
    position: &mut Position,
    piece: Piece,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to: Square,
    notation: &str,
) -> Result<Square, NotationError> {
    let mut origin = None;
    for square in Square::ALL {
        if from_file.is_some_and(|file| file != square.file()) || from_rank.is_some_and(|rank| rank != square.rank())
        {
            continue;
        }
        if position[square] != Some(piece) {
            continue;
        }
        if !position.move_with_coords(piece.color(), square, to, None, false, true) {
            continue;
        }
        if origin.is_some() {
            debug!("Move {notation} is ambiguous");
            return Err(NotationError::AmbiguousMove(notation.to_string()));
        }
        origin = Some(square);
    }

    origin.ok_or_else(|| {
        debug!("Move {notation} has no matches");
        NotationError::NoMatchingPiece(notation.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(from: Square, to: Square, promotion: Option<PieceType>) -> MoveRequest {
        MoveRequest { from, to, promotion }
    }

    #[test]
    fn test_coordinate_notation() {
        let mut position = Position::new();
        assert_eq!(parse_move(&mut position, Color::White, "e2e4"), Ok(request(Square::E2, Square::E4, None)));
        assert_eq!(parse_move(&mut position, Color::White, "e2-e4"), Ok(request(Square::E2, Square::E4, None)));
        assert_eq!(parse_move(&mut position, Color::White, "g1f3"), Ok(request(Square::G1, Square::F3, None)));
    }

    #[test]
    fn test_short_algebraic_notation() {
        let mut position = Position::new();
        assert_eq!(parse_move(&mut position, Color::White, "e4"), Ok(request(Square::E2, Square::E4, None)));
        assert_eq!(parse_move(&mut position, Color::White, "Nf3"), Ok(request(Square::G1, Square::F3, None)));
        assert_eq!(parse_move(&mut position, Color::Black, "Nc6"), Ok(request(Square::B8, Square::C6, None)));
        assert_eq!(parse_move(&mut position, Color::Black, "e5+"), Ok(request(Square::E7, Square::E5, None)));
    }

    #[test]
    fn test_promotion_forms() {
        let mut position = Position::from_fen("8/P7/8/8/8/8/8/k1K5 w - - 0 1");
        let expected = Ok(request(Square::A7, Square::A8, Some(PieceType::Knight)));
        assert_eq!(parse_move(&mut position, Color::White, "a7a8n"), expected);
        assert_eq!(parse_move(&mut position, Color::White, "a7a8=N"), expected);
        assert_eq!(parse_move(&mut position, Color::White, "a8=N"), expected);
        assert_eq!(
            parse_move(&mut position, Color::White, "a8"),
            Ok(request(Square::A7, Square::A8, None))
        );
    }

    #[test]
    fn test_castling_tokens() {
        let mut position = Position::new();
        assert_eq!(parse_move(&mut position, Color::White, "O-O"), Ok(request(Square::E1, Square::G1, None)));
        assert_eq!(parse_move(&mut position, Color::White, "0-0-0"), Ok(request(Square::E1, Square::C1, None)));
        assert_eq!(parse_move(&mut position, Color::Black, "O-O-O+"), Ok(request(Square::E8, Square::C8, None)));
    }

    #[test]
    fn test_ambiguous_and_unmatched_moves() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1");
        assert_eq!(
            parse_move(&mut position, Color::White, "Rd1"),
            Err(NotationError::AmbiguousMove("Rd1".to_string()))
        );
        assert_eq!(parse_move(&mut position, Color::White, "Rad1"), Ok(request(Square::A1, Square::D1, None)));
        assert_eq!(
            parse_move(&mut position, Color::White, "Nf3"),
            Err(NotationError::NoMatchingPiece("Nf3".to_string()))
        );
    }

    #[test]
    fn test_rejects_garbage() {
        let mut position = Position::new();
        for notation in ["", "e9", "e2e4!", "hello", "O-O-O-O", "Zf3", "e2e4qq"] {
            assert!(parse_move(&mut position, Color::White, notation).is_err(), "{notation} should be rejected");
        }
    }
}
