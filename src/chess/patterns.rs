use std::sync::OnceLock;

use super::{
    bitboard::Bitboard,
    castling::CastlingSide,
    coordinates::{CoordinatesResult, Rank, Square},
    piece::{Color, PieceType},
};

type Direction = fn(Square) -> CoordinatesResult<Square>;

const ROOK_DIRECTIONS: [Direction; 4] =
    [|sq| sq.up(1), |sq| sq.down(1), |sq| sq.left(1), |sq| sq.right(1)];

const BISHOP_DIRECTIONS: [Direction; 4] = [
    |sq| sq.up(1).and_then(|sq| sq.left(1)),
    |sq| sq.up(1).and_then(|sq| sq.right(1)),
    |sq| sq.down(1).and_then(|sq| sq.left(1)),
    |sq| sq.down(1).and_then(|sq| sq.right(1)),
];

const KNIGHT_JUMPS: [Direction; 8] = [
    |sq| sq.up(2).and_then(|sq| sq.left(1)),
    |sq| sq.up(2).and_then(|sq| sq.right(1)),
    |sq| sq.down(2).and_then(|sq| sq.left(1)),
    |sq| sq.down(2).and_then(|sq| sq.right(1)),
    |sq| sq.left(2).and_then(|sq| sq.up(1)),
    |sq| sq.left(2).and_then(|sq| sq.down(1)),
    |sq| sq.right(2).and_then(|sq| sq.up(1)),
    |sq| sq.right(2).and_then(|sq| sq.down(1)),
];

fn rays(from: Square, directions: &[Direction]) -> Bitboard {
    let mut pattern = Bitboard::EMPTY;
    for direction in directions {
        let mut next = direction(from);
        while let Ok(to) = next {
            pattern |= to;
            next = direction(to);
        }
    }
    pattern
}

fn steps(from: Square, directions: &[Direction]) -> Bitboard {
    directions.iter().filter_map(|direction| direction(from).ok()).fold(Bitboard::EMPTY, |bb, sq| bb | sq)
}

fn pawn_pattern(color: Color, from: Square) -> Bitboard {
    let (forward, start_rank): (i8, Rank) = match color {
        Color::White => (1, Rank::R2),
        Color::Black => (-1, Rank::R7),
    };

    let mut pattern = Bitboard::EMPTY;
    if let Ok(ahead) = from.up(forward) {
        pattern |= ahead;
        if let Ok(left) = ahead.left(1) {
            pattern |= left;
        }
        if let Ok(right) = ahead.right(1) {
            pattern |= right;
        }
        if from.rank() == start_rank {
            if let Ok(double) = ahead.up(forward) {
                pattern |= double;
            }
        }
    }
    pattern
}

fn king_pattern(color: Color, from: Square) -> Bitboard {
    let mut pattern = steps(from, &ROOK_DIRECTIONS) | steps(from, &BISHOP_DIRECTIONS);

    let home = match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if from == home {
        for side in CastlingSide::ALL {
            pattern |= Square::new(side.king_destination_file(), from.rank());
        }
    }
    pattern
}

fn compute_pattern(color: Color, piece_type: PieceType, from: Square) -> Bitboard {
    match piece_type {
        PieceType::Pawn => pawn_pattern(color, from),
        PieceType::Knight => steps(from, &KNIGHT_JUMPS),
        PieceType::Bishop => rays(from, &BISHOP_DIRECTIONS),
        PieceType::Rook => rays(from, &ROOK_DIRECTIONS),
        PieceType::Queen => rays(from, &ROOK_DIRECTIONS) | rays(from, &BISHOP_DIRECTIONS),
        PieceType::King => king_pattern(color, from),
    }
}

/// Lookup table indexed by color, piece type and origin square.
static MOVE_PATTERNS: OnceLock<Vec<Bitboard>> = OnceLock::new();

fn pattern_index(color: Color, piece_type: PieceType, from: Square) -> usize {
    (usize::from(color) * PieceType::COUNT + usize::from(piece_type)) * Square::COUNT + usize::from(from)
}

/// Returns every destination a piece could reach from `from` on an empty board.
///
/// This is the geometric reach only: pawn captures and double steps, and the two castling
/// destinations of a king standing on its home square, are included regardless of the position.
/// Whether the move is actually possible is decided by the position.
pub fn move_pattern(color: Color, piece_type: PieceType, from: Square) -> Bitboard {
    let lookup = MOVE_PATTERNS.get_or_init(|| {
        let mut patterns = vec![Bitboard::EMPTY; Color::COUNT * PieceType::COUNT * Square::COUNT];
        for color in Color::ALL {
            for piece_type in PieceType::ALL {
                for from in Square::ALL {
                    patterns[pattern_index(color, piece_type, from)] = compute_pattern(color, piece_type, from);
                }
            }
        }
        patterns
    });
    lookup[pattern_index(color, piece_type, from)]
}

/// Returns the squares a move from `from` to `to` passes over, which must all be empty.
///
/// Knight jumps cross nothing. Every other move that is part of a pattern follows a rank, a file
/// or a diagonal.
pub fn crossed_squares(from: Square, to: Square) -> Bitboard {
    Bitboard::between(from, to)
}

pub(crate) fn initialize() {
    move_pattern(Color::White, PieceType::Pawn, Square::A2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_pattern() {
        assert_eq!(move_pattern(Color::White, PieceType::Knight, Square::A1), Square::B3 | Square::C2);
        assert_eq!(move_pattern(Color::Black, PieceType::Knight, Square::E4).popcnt(), 8);
    }

    #[test]
    fn test_pawn_patterns() {
        assert_eq!(
            move_pattern(Color::White, PieceType::Pawn, Square::E2),
            Square::E3 | Square::E4 | Square::D3 | Square::F3
        );
        assert_eq!(move_pattern(Color::White, PieceType::Pawn, Square::A3), Square::A4 | Square::B4);
        assert_eq!(
            move_pattern(Color::Black, PieceType::Pawn, Square::H7),
            Square::H6 | Square::H5 | Square::G6
        );
        assert!(move_pattern(Color::White, PieceType::Pawn, Square::C8).is_empty());
    }

    #[test]
    fn test_king_castling_destinations() {
        let white_home = move_pattern(Color::White, PieceType::King, Square::E1);
        assert!(white_home.get(Square::G1));
        assert!(white_home.get(Square::C1));
        assert_eq!(white_home.popcnt(), 7);

        let black_on_white_home = move_pattern(Color::Black, PieceType::King, Square::E1);
        assert!(!black_on_white_home.get(Square::G1));
        assert!(!move_pattern(Color::White, PieceType::King, Square::D1).get(Square::B1));
    }

    #[test]
    fn test_slider_patterns() {
        assert_eq!(move_pattern(Color::White, PieceType::Rook, Square::D4).popcnt(), 14);
        assert_eq!(move_pattern(Color::White, PieceType::Bishop, Square::A1).popcnt(), 7);
        assert_eq!(move_pattern(Color::Black, PieceType::Queen, Square::D4).popcnt(), 27);
    }

    #[test]
    fn test_crossed_squares() {
        assert_eq!(crossed_squares(Square::E2, Square::E4), Bitboard::from(Square::E3));
        assert_eq!(crossed_squares(Square::E1, Square::G1), Bitboard::from(Square::F1));
        assert_eq!(crossed_squares(Square::E1, Square::C1), Bitboard::from(Square::D1));
        assert_eq!(crossed_squares(Square::G1, Square::F3), Bitboard::EMPTY);
    }
}
