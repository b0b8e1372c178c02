use crate::{
    constants::{BISHOP_SCORE, KING_SCORE, KNIGHT_SCORE, NUM_SQUARES, PAWN_SCORE, ROOK_SCORE},
    position::Position,
    types::{Piece, Side, Square},
};

/// Square bonus from white's point of view. Queens have no table.
fn square_score(piece: Piece) -> Option<&'static [i32; NUM_SQUARES]> {
    match piece {
        Piece::Pawn => Some(&PAWN_SCORE),
        Piece::Knight => Some(&KNIGHT_SCORE),
        Piece::Bishop => Some(&BISHOP_SCORE),
        Piece::Rook => Some(&ROOK_SCORE),
        Piece::Queen => None,
        Piece::King => Some(&KING_SCORE),
    }
}

fn piece_square_value(side: Side, piece: Piece, square: Square) -> i32 {
    let table_square = match side {
        Side::White => square,
        Side::Black => square.mirror(),
    };

    piece.value() + square_score(piece).map_or(0, |table| table[table_square as usize])
}

impl Position {
    /// Material plus square bonuses, from white's point of view
    pub fn white_score(&self) -> i32 {
        let mut score = 0;

        for side in Side::iter() {
            let sign = match side {
                Side::White => 1,
                Side::Black => -1,
            };

            for piece in Piece::iter() {
                for square in self.pieces(side, piece) {
                    score += sign * piece_square_value(side, piece, square);
                }
            }
        }

        score
    }

    /// Static evaluation relative to the side to move
    pub fn evaluate(&self) -> i32 {
        match self.side {
            Side::White => self.white_score(),
            Side::Black => -self.white_score(),
        }
    }
}
