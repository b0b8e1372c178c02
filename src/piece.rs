use crate::{
    constants::NUM_PIECE_TYPES,
    types::{Piece, Side},
};

impl Piece {
    pub const fn value(self) -> i32 {
        match self {
            Piece::Pawn => 100,
            Piece::Knight => 300,
            Piece::Bishop => 350,
            Piece::Rook => 500,
            Piece::Queen => 1000,
            Piece::King => 10000,
        }
    }

    pub fn iter() -> impl Iterator<Item = Piece> {
        [
            Piece::Pawn,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ]
        .into_iter()
    }

    /// Promotion choices in the order they are generated
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Index into a 12-entry table: white pieces 0-5, black pieces 6-11
    #[inline]
    pub const fn colored_index(self, side: Side) -> usize {
        side as usize * NUM_PIECE_TYPES + self as usize
    }

    #[inline]
    pub fn from_colored_index(index: u8) -> (Side, Piece) {
        let side = if index as usize >= NUM_PIECE_TYPES {
            Side::Black
        } else {
            Side::White
        };

        let piece = match index as usize % NUM_PIECE_TYPES {
            0 => Piece::Pawn,
            1 => Piece::Knight,
            2 => Piece::Bishop,
            3 => Piece::Rook,
            4 => Piece::Queen,
            _ => Piece::King,
        };

        (side, piece)
    }

    /// Letter used in board notation, uppercase for white
    pub fn to_char(self, side: Side) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };

        match side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<(Side, Piece)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };

        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };

        Some((side, piece))
    }
}
