//! Forsyth-Edwards Notation loading and rendering

use crate::{
    constants::NUM_FILES,
    error::{EngineError, Result},
    position::Position,
    types::{
        BLACK_KINGSIDE, BLACK_QUEENSIDE, Piece, Side, Square, WHITE_KINGSIDE, WHITE_QUEENSIDE,
    },
};

fn invalid(reason: impl Into<String>) -> EngineError {
    EngineError::InvalidFen(reason.into())
}

impl Position {
    /// Parses the six FEN fields. The move counters are optional and ignored.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() < 4 {
            return Err(invalid(format!(
                "expected at least 4 fields, found {}",
                fields.len()
            )));
        }

        let mut position = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
        }

        // Placement runs from rank 8 down, which is square index order
        for (row, rank_text) in ranks.iter().enumerate() {
            let mut file = 0usize;

            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(invalid(format!("bad empty-square count '{c}'")));
                    }
                    file += skip as usize;
                    continue;
                }

                let (side, piece) =
                    Piece::from_char(c).ok_or_else(|| invalid(format!("unknown piece '{c}'")))?;

                if file >= NUM_FILES {
                    return Err(invalid(format!("rank {} is too long", 8 - row)));
                }

                position.add_piece(side, piece, Square::from_index((row * NUM_FILES + file) as u8));
                file += 1;
            }

            if file != NUM_FILES {
                return Err(invalid(format!(
                    "rank {} covers {file} files instead of 8",
                    8 - row
                )));
            }
        }

        position.side = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(invalid(format!("bad side to move '{other}'"))),
        };

        position.castle = parse_castling(fields[2])?;

        position.en_passant = match fields[3] {
            "-" => None,
            text => {
                let square = text
                    .parse::<Square>()
                    .map_err(|_| invalid(format!("bad en passant square '{text}'")))?;

                // Only a pawn that just double-pushed leaves a target, on rank 3 or 6
                if square.rank() != 2 && square.rank() != 5 {
                    return Err(invalid(format!(
                        "en passant square '{text}' is not on rank 3 or 6"
                    )));
                }

                Some(square)
            }
        };

        for side in Side::iter() {
            let kings = position.pieces(side, Piece::King).count_bits();
            if kings != 1 {
                return Err(invalid(format!("{side:?} has {kings} kings")));
            }
        }

        position.update_occupancies();

        Ok(position)
    }

    /// The move counters are not tracked, so they are always rendered as `0 1`
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in 0..8 {
            let mut empty = 0;

            for file in 0..NUM_FILES {
                let square = Square::from_index((row * NUM_FILES + file) as u8);

                match self.piece_at(square) {
                    Some((side, piece)) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char(side));
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push_str(&empty.to_string());
            }

            if row < 7 {
                fen.push('/');
            }
        }

        let side = match self.side {
            Side::White => 'w',
            Side::Black => 'b',
        };

        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |square| square.to_string());

        format!("{fen} {side} {} {en_passant} 0 1", self.castle_string())
    }
}

fn parse_castling(text: &str) -> Result<u8> {
    if text == "-" {
        return Ok(0);
    }

    text.chars().try_fold(0u8, |castle, c| {
        let bit = match c {
            'K' => WHITE_KINGSIDE,
            'Q' => WHITE_QUEENSIDE,
            'k' => BLACK_KINGSIDE,
            'q' => BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("bad castling rights '{text}'"))),
        };

        Ok(castle | bit)
    })
}
