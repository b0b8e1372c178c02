use std::{fmt, str::FromStr};

use crate::{constants::NUM_FILES, error::EngineError, types::Square};

impl Square {
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square::from_index)
    }

    /// Caller guarantees `index < 64`.
    #[inline]
    pub fn from_index(index: u8) -> Square {
        debug_assert!(index < 64, "square index out of range: {index}");
        // SAFETY: masked to 0-63, which matches our enum variants
        unsafe { std::mem::transmute::<u8, Square>(index & 63) }
    }

    /// `rank` and `file` are 0-indexed from a1
    pub fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file >= 8 || rank >= 8 {
            return None;
        }

        Some(Square::from_index((7 - rank) * NUM_FILES as u8 + file))
    }

    #[inline]
    pub fn as_bit(self) -> u64 {
        1u64 << (self as u64)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// 0-indexed (0-7), rank 1 is 0
    pub fn rank(self) -> u8 {
        7 - (self as u8 / NUM_FILES as u8)
    }

    /// 0-indexed (0-7), a-file is 0
    pub fn file(self) -> u8 {
        (self as u8) % (NUM_FILES as u8)
    }

    /// Same file, opposite rank. Used to read white-oriented score tables for black.
    #[inline]
    pub fn mirror(self) -> Square {
        Square::from_index(self as u8 ^ 56)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl FromStr for Square {
    type Err = EngineError;

    /// Parses coordinates such as `e4`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(EngineError::InvalidSquare(s.to_string()));
        }

        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');

        Square::from_coords(file, rank).ok_or_else(|| EngineError::InvalidSquare(s.to_string()))
    }
}
