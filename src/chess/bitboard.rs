use once_cell::sync::Lazy;

use super::coordinates::{CoordinatesResult, File, Rank, Square};

/// A bitboard is a 64-bit integer that represents a set of squares. Bit `n` stands for the square
/// with linear index `n` (A1 = 0, H8 = 63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

static BETWEEN: Lazy<Vec<Bitboard>> = Lazy::new(|| {
    let directions: [fn(Square) -> CoordinatesResult<Square>; 4] = [
        |square| square.right(1),
        |square| square.up(1),
        |square| square.right(1).and_then(|square| square.up(1)),
        |square| square.right(1).and_then(|square| square.down(1)),
    ];

    let mut between = vec![Bitboard::EMPTY; Square::COUNT * Square::COUNT];
    for from in Square::ALL {
        for direction in directions.iter() {
            let mut bb = Bitboard::EMPTY;
            let mut next = direction(from);
            while let Ok(to) = next {
                between[usize::from(from) * Square::COUNT + usize::from(to)] = bb;
                between[usize::from(to) * Square::COUNT + usize::from(from)] = bb;
                bb |= to;
                next = direction(to);
            }
        }
    }
    between
});

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const ALL: Bitboard = Bitboard(u64::MAX);

    /// Returns the value of a single square on the bitboard.
    pub fn get(self, square: Square) -> bool {
        self.0 & (1u64 << u8::from(square)) != 0
    }

    pub fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }

        Some((self.0.trailing_zeros() as u8).into())
    }

    pub fn popcnt(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self == Bitboard::EMPTY
    }

    /// Returns a bitboard with all squares strictly between two squares sharing a rank, a file or a
    /// diagonal. Unaligned squares have nothing between them.
    pub fn between(from: Square, to: Square) -> Bitboard {
        BETWEEN[usize::from(from) * Square::COUNT + usize::from(to)]
    }
}

/// Forces the construction of the lookup table.
pub(crate) fn initialize() {
    Lazy::force(&BETWEEN);
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Bitboard(1u64 << u8::from(square))
    }
}

impl From<File> for Bitboard {
    fn from(file: File) -> Self {
        Bitboard(0x0101010101010101 << u8::from(file))
    }
}

impl From<Rank> for Bitboard {
    fn from(rank: Rank) -> Self {
        Bitboard(0xff << (8 * u8::from(rank)))
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitOr<Square> for Bitboard {
    type Output = Self;
    fn bitor(self, rhs: Square) -> Self::Output {
        self | Bitboard::from(rhs)
    }
}

impl std::ops::BitOr<Square> for Square {
    type Output = Bitboard;
    fn bitor(self, rhs: Square) -> Self::Output {
        Bitboard::from(self) | Bitboard::from(rhs)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Self;
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl std::ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl std::ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitOrAssign<Square> for Bitboard {
    fn bitor_assign(&mut self, rhs: Square) {
        *self |= Bitboard::from(rhs);
    }
}

impl std::ops::BitXorAssign<Square> for Bitboard {
    fn bitxor_assign(&mut self, rhs: Square) {
        self.0 ^= Bitboard::from(rhs).0;
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> Self::IntoIter {
        BitboardIterator(self.0)
    }
}

/// An iterator over the set bits in a bitboard, from A1 up to H8.
pub struct BitboardIterator(u64);

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }

        let square: Square = (self.0.trailing_zeros() as u8).into();
        self.0 &= self.0 - 1;
        Some(square)
    }
}
