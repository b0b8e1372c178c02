use crate::{constants::NUM_FILES, types::Square};

/// Bit `i` represents square `i` (a8 = bit 0, h1 = bit 63)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct BitBoard(pub u64);

pub const EMPTY: BitBoard = BitBoard(0);

pub const NOT_A_FILE: u64 = 0xFEFE_FEFE_FEFE_FEFE;
pub const NOT_H_FILE: u64 = 0x7F7F_7F7F_7F7F_7F7F;
pub const NOT_AB_FILE: u64 = 0xFCFC_FCFC_FCFC_FCFC;
pub const NOT_GH_FILE: u64 = 0x3F3F_3F3F_3F3F_3F3F;

impl BitBoard {
    #[inline]
    pub fn set_bit(&mut self, square: Square) {
        self.0 |= square.as_bit();
    }

    #[inline]
    pub fn clear_bit(&mut self, square: Square) {
        self.0 &= !square.as_bit();
    }

    #[inline]
    pub fn is_bit_set(&self, square: Square) -> bool {
        (self.0 & square.as_bit()) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Population count
    #[inline]
    pub fn count_bits(&self) -> u32 {
        self.0.count_ones()
    }

    /// Index (0-63) of the least significant set bit
    #[inline]
    pub fn lsb(&self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Removes and returns the least significant set bit
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let index = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(Square::from_index(index))
    }

    /// One character per square, rank 8 first. Debugging aid for attack masks.
    pub fn to_grid(&self) -> String {
        let mut grid = String::new();

        for rank in 0..NUM_FILES {
            for file in 0..NUM_FILES {
                let bit = (self.0 >> (rank * NUM_FILES + file)) & 1;
                grid.push(if bit == 1 { '1' } else { '.' });
            }
            grid.push('\n');
        }

        grid
    }
}

impl Iterator for BitBoard {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        self.pop_lsb()
    }
}

impl From<Square> for BitBoard {
    fn from(square: Square) -> Self {
        BitBoard(square.as_bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_and_count() {
        let bitboard = BitBoard(0b1011_0000);
        assert_eq!(bitboard.count_bits(), 3);
        assert_eq!(bitboard.lsb(), Some(4));
        assert_eq!(EMPTY.lsb(), None);
    }

    #[test]
    fn test_iterates_squares_in_index_order() {
        let mut bitboard = EMPTY;
        bitboard.set_bit(Square::H1);
        bitboard.set_bit(Square::A8);
        bitboard.set_bit(Square::E4);

        let squares: Vec<Square> = bitboard.collect();
        assert_eq!(squares, vec![Square::A8, Square::E4, Square::H1]);
    }

    #[test]
    fn test_file_masks() {
        assert!(!BitBoard(NOT_A_FILE).is_bit_set(Square::A5));
        assert!(BitBoard(NOT_A_FILE).is_bit_set(Square::B5));
        assert!(!BitBoard(NOT_H_FILE).is_bit_set(Square::H2));
        assert!(!BitBoard(NOT_AB_FILE).is_bit_set(Square::B3));
        assert!(!BitBoard(NOT_GH_FILE).is_bit_set(Square::G7));
    }
}
