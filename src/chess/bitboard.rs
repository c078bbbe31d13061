//! [`Bitboard`]-based square sets. The mailbox board in
//! [`crate::chess::board`] answers "what stands here" directly; the bitboard
//! complements it for per-square boolean state (the moved flags gating
//! castling) and for cheap set queries in tests.
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not, Sub};

use crate::chess::core::{Square, BOARD_WIDTH};

/// Represents a set of squares as a thin wrapper around [u64]. Mirroring
/// [`Square`] semantics, the least significant bit corresponds to A1 and the
/// most significant bit to H8.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Returns raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Builds the set containing exactly the given squares.
    #[must_use]
    pub fn from_squares(squares: &[Square]) -> Self {
        let mut result = Self::empty();
        for square in squares {
            result |= Self::from(*square);
        }
        result
    }

    /// Returns true if this bitboard contains given square.
    #[must_use]
    pub fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square as u8)) != 0
    }

    /// Adds given square to the set.
    pub(super) fn insert(&mut self, square: Square) {
        self.bits |= 1u64 << square as u8;
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    /// Dumps the set as an 8x8 grid of `1`/`.`, rank 8 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_WIDTH).rev() {
            for file in 0..BOARD_WIDTH {
                let index = rank * BOARD_WIDTH + file;
                write!(
                    f,
                    "{}",
                    if self.bits & (1u64 << index) != 0 {
                        '1'
                    } else {
                        '.'
                    }
                )?;
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits & rhs.bits)
    }
}

impl Sub for Bitboard {
    type Output = Self;

    /// [Relative complement], i.e. Result = LHS \ RHS.
    ///
    /// [Relative complement]: https://en.wikipedia.org/wiki/Complement_%28set_theory%29#Relative_complement
    fn sub(self, rhs: Self) -> Self::Output {
        self & !rhs
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.bits)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square as u8)
    }
}

/// Iterates over set squares in a given [`Bitboard`] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B) through implementing
/// [BitScan] forward operation.
///
/// [BitScan]: https://www.chessprogramming.org/BitScan
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        // trailing_zeros() on a non-zero u64 is in 0..64 range.
        Some(
            Square::try_from(next_index as u8)
                .expect("BitboardIterator indices are always within the board"),
        )
    }
}

impl ExactSizeIterator for BitboardIterator {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_operations() {
        let mut set = Bitboard::empty();
        assert!(!set.contains(Square::A1));
        set.insert(Square::A1);
        set.insert(Square::E5);
        set.insert(Square::H8);
        assert!(set.contains(Square::A1));
        assert!(set.contains(Square::E5));
        assert!(set.contains(Square::H8));
        assert!(!set.contains(Square::E4));
        assert_eq!(set.count(), 3);
        // Re-inserting is idempotent.
        set.insert(Square::E5);
        assert_eq!(set.count(), 3);
    }

    #[test]
    fn from_squares() {
        let set = Bitboard::from_squares(&[Square::A2, Square::B2, Square::C2]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![
            Square::A2,
            Square::B2,
            Square::C2
        ]);
    }

    #[test]
    fn complement_and_union() {
        let white = Bitboard::from_squares(&[Square::E1, Square::D1]);
        let black = Bitboard::from_squares(&[Square::E8, Square::D8]);
        let all = white | black;
        assert_eq!(all.count(), 4);
        assert_eq!((all - black), white);
        assert_eq!((all & black), black);
    }

    #[test]
    fn debug_grid() {
        let set = Bitboard::from_squares(&[Square::A1, Square::H8]);
        let grid = format!("{set:?}");
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], ".......1");
        assert_eq!(lines[7], "1.......");
    }
}
