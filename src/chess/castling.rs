use bitflags::bitflags;

use super::{
    coordinates::{File, Rank, Square},
    piece::Color,
};

/// The two directions a king may castle in.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside = 0,
    Queenside = 1,
}

impl CastlingSide {
    pub const COUNT: usize = 2;

    pub const ALL: [CastlingSide; CastlingSide::COUNT] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// File the rook starts on.
    pub fn rook_file(self) -> File {
        match self {
            CastlingSide::Kingside => File::H,
            CastlingSide::Queenside => File::A,
        }
    }

    /// File the king lands on.
    pub fn king_destination_file(self) -> File {
        match self {
            CastlingSide::Kingside => File::G,
            CastlingSide::Queenside => File::C,
        }
    }

    /// File the rook lands on, which is also the square the king crosses.
    pub fn rook_destination_file(self) -> File {
        match self {
            CastlingSide::Kingside => File::F,
            CastlingSide::Queenside => File::D,
        }
    }
}

bitflags! {
    /// The four castling permissions of a position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CastlingRight: u8 {
        const WHITE_KINGSIDE = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;
    }
}

impl CastlingRight {
    pub fn new(color: Color, side: CastlingSide) -> CastlingRight {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => CastlingRight::WHITE_KINGSIDE,
            (Color::White, CastlingSide::Queenside) => CastlingRight::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => CastlingRight::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::Queenside) => CastlingRight::BLACK_QUEENSIDE,
        }
    }

    /// Both rights of one color.
    pub fn both(color: Color) -> CastlingRight {
        CastlingRight::new(color, CastlingSide::Kingside) | CastlingRight::new(color, CastlingSide::Queenside)
    }

    /// The right that is lost when a rook leaves, or is captured on, `square`.
    pub fn for_rook_corner(square: Square) -> CastlingRight {
        match square {
            Square::A1 => CastlingRight::WHITE_QUEENSIDE,
            Square::H1 => CastlingRight::WHITE_KINGSIDE,
            Square::A8 => CastlingRight::BLACK_QUEENSIDE,
            Square::H8 => CastlingRight::BLACK_KINGSIDE,
            _ => CastlingRight::empty(),
        }
    }

    /// The home rank of a color's king and rooks.
    pub fn home_rank(color: Color) -> Rank {
        match color {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_castling_right() {
        assert_eq!(CastlingRight::new(Color::White, CastlingSide::Kingside), CastlingRight::WHITE_KINGSIDE);
        assert_eq!(CastlingRight::new(Color::Black, CastlingSide::Queenside), CastlingRight::BLACK_QUEENSIDE);
        assert_eq!(CastlingRight::both(Color::White), CastlingRight::WHITE_KINGSIDE | CastlingRight::WHITE_QUEENSIDE);
    }

    #[test]
    fn test_rook_corners() {
        assert_eq!(CastlingRight::for_rook_corner(Square::H8), CastlingRight::BLACK_KINGSIDE);
        assert_eq!(CastlingRight::for_rook_corner(Square::A1), CastlingRight::WHITE_QUEENSIDE);
        assert!(CastlingRight::for_rook_corner(Square::E4).is_empty());
    }
}
