use crate::{
    constants::CASTLING_RIGHTS,
    moves::Move,
    position::Position,
    types::{MoveMode, Piece, Side, Square},
};

impl Position {
    /// Plays a pseudo-legal move in place.
    ///
    /// Returns `false` and leaves the position untouched when the move would leave
    /// the mover's king attacked, or when `mode` is `CapturesOnly` and the move is quiet.
    pub fn make_move(&mut self, move_: Move, mode: MoveMode) -> bool {
        if mode == MoveMode::CapturesOnly && !move_.is_capture() {
            return false;
        }

        let snapshot = *self;

        let source = move_.source();
        let target = move_.target();
        let side = move_.side();
        let piece = move_.piece();
        let enemy = side.opponent();

        self.remove_piece(side, piece, source);
        self.add_piece(side, piece, target);

        if move_.is_capture() && !move_.is_en_passant() {
            if let Some(victim) =
                Piece::iter().find(|&victim| self.pieces(enemy, victim).is_bit_set(target))
            {
                self.remove_piece(enemy, victim, target);
            }
        }

        if let Some(promoted) = move_.promotion() {
            self.remove_piece(side, Piece::Pawn, target);
            self.add_piece(side, promoted, target);
        }

        if move_.is_en_passant() {
            // The captured pawn sits behind the target square
            let captured = match side {
                Side::White => target as u8 + 8,
                Side::Black => target as u8 - 8,
            };

            self.remove_piece(enemy, Piece::Pawn, Square::from_index(captured));
        }

        self.en_passant = None;

        if move_.is_double_push() {
            let skipped = match side {
                Side::White => target as u8 + 8,
                Side::Black => target as u8 - 8,
            };

            self.en_passant = Some(Square::from_index(skipped));
        }

        if move_.is_castling() {
            let rook_move = match target {
                Square::G1 => Some((Square::H1, Square::F1)),
                Square::C1 => Some((Square::A1, Square::D1)),
                Square::G8 => Some((Square::H8, Square::F8)),
                Square::C8 => Some((Square::A8, Square::D8)),
                _ => None,
            };

            if let Some((rook_from, rook_to)) = rook_move {
                self.remove_piece(side, Piece::Rook, rook_from);
                self.add_piece(side, Piece::Rook, rook_to);
            }
        }

        self.castle &= CASTLING_RIGHTS[source as usize];
        self.castle &= CASTLING_RIGHTS[target as usize];

        self.update_occupancies();
        self.side = enemy;

        let king_attacked = self
            .king_square(side)
            .is_some_and(|king| self.is_square_attacked(king, enemy));

        if king_attacked {
            *self = snapshot;
            return false;
        }

        true
    }
}
