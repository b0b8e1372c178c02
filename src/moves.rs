use std::{cmp::Reverse, fmt, ops::Index};

use crate::{
    constants::MAX_MOVES,
    types::{Piece, Side, Square},
};

const SOURCE_MASK: u32 = 0x3F;
const TARGET_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMOTED_SHIFT: u32 = 16;
const NIBBLE_MASK: u32 = 0xF;
const CAPTURE_FLAG: u32 = 1 << 20;
const DOUBLE_PUSH_FLAG: u32 = 1 << 21;
const EN_PASSANT_FLAG: u32 = 1 << 22;
const CASTLING_FLAG: u32 = 1 << 23;

/// A move packed into 24 bits:
///
/// ```text
/// bits  0-5   source square
/// bits  6-11  target square
/// bits 12-15  moving piece (white 0-5, black 6-11)
/// bits 16-19  promoted piece, same encoding, 0 when none
/// bit  20     capture
/// bit  21     double pawn push
/// bit  22     en passant
/// bit  23     castling
/// ```
///
/// A white pawn has code 0, so promotion code 0 safely means "no promotion".
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Move(u32);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub capture: bool,
    pub double_push: bool,
    pub en_passant: bool,
    pub castling: bool,
}

impl MoveFlags {
    pub const QUIET: MoveFlags = MoveFlags {
        capture: false,
        double_push: false,
        en_passant: false,
        castling: false,
    };
}

impl Move {
    /// The empty move, used for unfilled PV and killer slots
    pub const NULL: Move = Move(0);

    pub fn new(
        source: Square,
        target: Square,
        side: Side,
        piece: Piece,
        promoted: Option<Piece>,
        flags: MoveFlags,
    ) -> Self {
        let promoted_code = promoted.map_or(0, |p| p.colored_index(side) as u32);

        Move(
            source as u32
                | (target as u32) << TARGET_SHIFT
                | (piece.colored_index(side) as u32) << PIECE_SHIFT
                | promoted_code << PROMOTED_SHIFT
                | if flags.capture { CAPTURE_FLAG } else { 0 }
                | if flags.double_push { DOUBLE_PUSH_FLAG } else { 0 }
                | if flags.en_passant { EN_PASSANT_FLAG } else { 0 }
                | if flags.castling { CASTLING_FLAG } else { 0 },
        )
    }

    pub const fn from_raw(raw: u32) -> Self {
        Move(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn source(self) -> Square {
        Square::from_index((self.0 & SOURCE_MASK) as u8)
    }

    #[inline]
    pub fn target(self) -> Square {
        Square::from_index(((self.0 >> TARGET_SHIFT) & SOURCE_MASK) as u8)
    }

    /// 12-way piece code, usable as a `[_; 12]` index
    #[inline]
    pub fn piece_index(self) -> usize {
        ((self.0 >> PIECE_SHIFT) & NIBBLE_MASK) as usize
    }

    #[inline]
    pub fn side(self) -> Side {
        Piece::from_colored_index(self.piece_index() as u8).0
    }

    #[inline]
    pub fn piece(self) -> Piece {
        Piece::from_colored_index(self.piece_index() as u8).1
    }

    #[inline]
    pub fn promotion(self) -> Option<Piece> {
        match (self.0 >> PROMOTED_SHIFT) & NIBBLE_MASK {
            0 => None,
            code => Some(Piece::from_colored_index(code as u8).1),
        }
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.0 & CAPTURE_FLAG != 0
    }

    #[inline]
    pub fn is_double_push(self) -> bool {
        self.0 & DOUBLE_PUSH_FLAG != 0
    }

    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.0 & EN_PASSANT_FLAG != 0
    }

    #[inline]
    pub fn is_castling(self) -> bool {
        self.0 & CASTLING_FLAG != 0
    }

    pub fn flags(self) -> MoveFlags {
        MoveFlags {
            capture: self.is_capture(),
            double_push: self.is_double_push(),
            en_passant: self.is_en_passant(),
            castling: self.is_castling(),
        }
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.target())?;

        if let Some(piece) = self.promotion() {
            write!(f, "{}", piece.to_char(Side::Black))?;
        }

        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}")?;

        let flags = self.flags();
        for (set, name) in [
            (flags.capture, " capture"),
            (flags.double_push, " double"),
            (flags.en_passant, " ep"),
            (flags.castling, " castle"),
        ] {
            if set {
                f.write_str(name)?;
            }
        }

        f.write_str(")")
    }
}

/// Fixed-capacity move buffer, one per search ply
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            count: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, move_: Move) {
        debug_assert!(self.count < MAX_MOVES, "move list overflow");
        self.moves[self.count] = move_;
        self.count += 1;
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.count]
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn contains(&self, move_: Move) -> bool {
        self.as_slice().contains(&move_)
    }

    /// Highest score first. Equal scores keep generation order.
    pub fn sort_by_score<F>(&mut self, mut score: F)
    where
        F: FnMut(Move) -> i32,
    {
        self.moves[..self.count].sort_by_cached_key(|&move_| Reverse(score(move_)));
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = Move;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Move>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter().copied()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
