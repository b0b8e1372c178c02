use std::fmt;

use crate::{
    attacks::attack_tables,
    bitboard::BitBoard,
    constants::{NUM_FILES, NUM_PIECE_TYPES, NUM_SIDES, START_FEN},
    types::{
        BLACK_KINGSIDE, BLACK_QUEENSIDE, Piece, Side, Square, WHITE_KINGSIDE, WHITE_QUEENSIDE,
    },
};

/// Index of the combined occupancy in `Position::occupancies`
pub const BOTH: usize = 2;

/// Complete board state. Small enough that search snapshots it by value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// [side][piece]
    pub bit_pieces: [[BitBoard; NUM_PIECE_TYPES]; NUM_SIDES],
    /// White, black, both
    pub occupancies: [BitBoard; 3],
    pub side: Side,
    /// Square a pawn can capture onto en passant
    pub en_passant: Option<Square>,
    /// Castle permissions, see `WHITE_KINGSIDE` and friends
    pub castle: u8,
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Position {
    /// No pieces, white to move, no rights
    pub fn empty() -> Self {
        Position {
            bit_pieces: [[BitBoard(0); NUM_PIECE_TYPES]; NUM_SIDES],
            occupancies: [BitBoard(0); 3],
            side: Side::White,
            en_passant: None,
            castle: 0,
        }
    }

    pub fn start() -> Self {
        match Position::from_fen(START_FEN) {
            Ok(position) => position,
            Err(e) => unreachable!("start position failed to parse: {e}"),
        }
    }

    #[inline]
    pub fn pieces(&self, side: Side, piece: Piece) -> BitBoard {
        self.bit_pieces[side as usize][piece as usize]
    }

    #[inline]
    pub fn occupancy(&self, side: Side) -> BitBoard {
        self.occupancies[side as usize]
    }

    #[inline]
    pub fn all_occupancy(&self) -> BitBoard {
        self.occupancies[BOTH]
    }

    /// Places a piece without touching the occupancies. Call `update_occupancies` afterwards.
    pub fn add_piece(&mut self, side: Side, piece: Piece, square: Square) {
        self.bit_pieces[side as usize][piece as usize].set_bit(square);
    }

    pub fn remove_piece(&mut self, side: Side, piece: Piece, square: Square) {
        self.bit_pieces[side as usize][piece as usize].clear_bit(square);
    }

    /// Rebuilds all three occupancies from the piece bitboards
    pub fn update_occupancies(&mut self) {
        for side in Side::iter() {
            self.occupancies[side as usize] = BitBoard(
                self.bit_pieces[side as usize]
                    .iter()
                    .fold(0, |acc, bitboard| acc | bitboard.0),
            );
        }

        self.occupancies[BOTH] = BitBoard(
            self.occupancies[Side::White as usize].0 | self.occupancies[Side::Black as usize].0,
        );
    }

    pub fn piece_at(&self, square: Square) -> Option<(Side, Piece)> {
        if !self.occupancies[BOTH].is_bit_set(square) {
            return None;
        }

        Side::iter().find_map(|side| {
            Piece::iter()
                .find(|&piece| self.pieces(side, piece).is_bit_set(square))
                .map(|piece| (side, piece))
        })
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces(side, Piece::King).lsb().map(Square::from_index)
    }

    /// Whether any piece of `by_side` attacks `square` in the current occupancy
    pub fn is_square_attacked(&self, square: Square, by_side: Side) -> bool {
        let tables = attack_tables();
        let occupancy = self.all_occupancy();

        // A pawn of `by_side` attacks `square` iff a pawn of the other side on
        // `square` would attack the pawn
        if tables.pawn_attacks(by_side.opponent(), square).0 & self.pieces(by_side, Piece::Pawn).0
            != 0
        {
            return true;
        }

        if tables.knight_attacks(square).0 & self.pieces(by_side, Piece::Knight).0 != 0 {
            return true;
        }

        let queens = self.pieces(by_side, Piece::Queen).0;

        if tables.bishop_attacks(square, occupancy).0
            & (self.pieces(by_side, Piece::Bishop).0 | queens)
            != 0
        {
            return true;
        }

        if tables.rook_attacks(square, occupancy).0 & (self.pieces(by_side, Piece::Rook).0 | queens)
            != 0
        {
            return true;
        }

        tables.king_attacks(square).0 & self.pieces(by_side, Piece::King).0 != 0
    }

    /// Whether the side to move is in check
    pub fn in_check(&self) -> bool {
        self.king_square(self.side)
            .is_some_and(|king| self.is_square_attacked(king, self.side.opponent()))
    }

    /// Occupancies equal the union of their piece bitboards and no square holds two pieces.
    pub fn check_invariants(&self) -> bool {
        let mut seen = 0u64;

        for side in Side::iter() {
            let mut union = 0u64;

            for piece in Piece::iter() {
                let bits = self.pieces(side, piece).0;

                if bits & seen != 0 {
                    return false;
                }

                seen |= bits;
                union |= bits;
            }

            if union != self.occupancies[side as usize].0 {
                return false;
            }
        }

        seen == self.occupancies[BOTH].0
            && self.occupancies[BOTH].0
                == self.occupancies[Side::White as usize].0 | self.occupancies[Side::Black as usize].0
    }

    /// Castling rights in notation order, `-` when none remain
    pub fn castle_string(&self) -> String {
        let rights: String = [
            (WHITE_KINGSIDE, 'K'),
            (WHITE_QUEENSIDE, 'Q'),
            (BLACK_KINGSIDE, 'k'),
            (BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(bit, _)| self.castle & bit != 0)
        .map(|&(_, c)| c)
        .collect();

        if rights.is_empty() {
            "-".to_string()
        } else {
            rights
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;

        for square in Square::iter() {
            if square.file() == 0 {
                write!(f, "  {} ", square.rank() + 1)?;
            }

            let c = self
                .piece_at(square)
                .map_or('.', |(side, piece)| piece.to_char(side));

            write!(f, " {c}")?;

            if square.file() as usize == NUM_FILES - 1 {
                writeln!(f)?;
            }
        }

        writeln!(f, "\n     a b c d e f g h\n")?;
        writeln!(
            f,
            "     Side:      {}",
            match self.side {
                Side::White => "white",
                Side::Black => "black",
            }
        )?;
        writeln!(
            f,
            "     En passant: {}",
            self.en_passant
                .map_or_else(|| "no".to_string(), |square| square.to_string())
        )?;
        writeln!(f, "     Castling:  {}", self.castle_string())
    }
}
