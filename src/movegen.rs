use crate::{
    attacks::{AttackTables, attack_tables},
    bitboard::BitBoard,
    moves::{Move, MoveFlags, MoveList},
    position::Position,
    types::{
        BLACK_KINGSIDE, BLACK_QUEENSIDE, MoveMode, Piece, Side, Square, WHITE_KINGSIDE,
        WHITE_QUEENSIDE,
    },
};

const CAPTURE: MoveFlags = MoveFlags {
    capture: true,
    ..MoveFlags::QUIET
};

/// King path for one castling right: rights bit, king from/to, squares that must be
/// empty, squares that must not be attacked
struct CastleRule {
    right: u8,
    king_from: Square,
    king_to: Square,
    empty: &'static [Square],
    safe: &'static [Square],
}

const WHITE_CASTLES: [CastleRule; 2] = [
    CastleRule {
        right: WHITE_KINGSIDE,
        king_from: Square::E1,
        king_to: Square::G1,
        empty: &[Square::F1, Square::G1],
        safe: &[Square::E1, Square::F1, Square::G1],
    },
    CastleRule {
        right: WHITE_QUEENSIDE,
        king_from: Square::E1,
        king_to: Square::C1,
        empty: &[Square::D1, Square::C1, Square::B1],
        safe: &[Square::E1, Square::D1, Square::C1],
    },
];

const BLACK_CASTLES: [CastleRule; 2] = [
    CastleRule {
        right: BLACK_KINGSIDE,
        king_from: Square::E8,
        king_to: Square::G8,
        empty: &[Square::F8, Square::G8],
        safe: &[Square::E8, Square::F8, Square::G8],
    },
    CastleRule {
        right: BLACK_QUEENSIDE,
        king_from: Square::E8,
        king_to: Square::C8,
        empty: &[Square::D8, Square::C8, Square::B8],
        safe: &[Square::E8, Square::D8, Square::C8],
    },
];

impl Position {
    /// Appends every pseudo-legal move for the side to move. Moves that leave the
    /// mover's king attacked are filtered later by `make_move`.
    pub fn generate_moves(&self, moves: &mut MoveList) {
        let tables = attack_tables();

        self.generate_pawn_moves(tables, moves);
        self.generate_castling_moves(moves);

        for piece in [
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ] {
            self.generate_piece_moves(tables, piece, moves);
        }
    }

    /// Pseudo-legal moves that `make_move` accepts
    pub fn legal_moves(&self) -> MoveList {
        let mut pseudo_legal = MoveList::new();
        self.generate_moves(&mut pseudo_legal);

        let mut legal = MoveList::new();

        for move_ in &pseudo_legal {
            let mut copy = *self;
            if copy.make_move(move_, MoveMode::AllMoves) {
                legal.push(move_);
            }
        }

        legal
    }

    fn generate_pawn_moves(&self, tables: &AttackTables, moves: &mut MoveList) {
        let side = self.side;
        let empty = !self.all_occupancy().0;
        let enemies = self.occupancy(side.opponent());

        // Pushes move toward rank 8 (lower indices) for white
        let (forward, promotion_rank, start_rank): (i8, u8, u8) = match side {
            Side::White => (-8, 6, 1),
            Side::Black => (8, 1, 6),
        };

        for source in self.pieces(side, Piece::Pawn) {
            let promotes = source.rank() == promotion_rank;
            let single = source as i8 + forward;

            // Pawns misplaced on the last rank by a FEN have no push
            if (0..64).contains(&single) && empty & (1u64 << single) != 0 {
                let single = Square::from_index(single as u8);

                if promotes {
                    push_promotions(moves, source, single, side, MoveFlags::QUIET);
                } else {
                    moves.push(Move::new(
                        source,
                        single,
                        side,
                        Piece::Pawn,
                        None,
                        MoveFlags::QUIET,
                    ));

                    if source.rank() == start_rank {
                        let double = Square::from_index((single as i8 + forward) as u8);

                        if empty & double.as_bit() != 0 {
                            moves.push(Move::new(
                                source,
                                double,
                                side,
                                Piece::Pawn,
                                None,
                                MoveFlags {
                                    double_push: true,
                                    ..MoveFlags::QUIET
                                },
                            ));
                        }
                    }
                }
            }

            let attacks = tables.pawn_attacks(side, source);

            for target in BitBoard(attacks.0 & enemies.0) {
                if promotes {
                    push_promotions(moves, source, target, side, CAPTURE);
                } else {
                    moves.push(Move::new(source, target, side, Piece::Pawn, None, CAPTURE));
                }
            }

            if let Some(target) = self.en_passant {
                if attacks.is_bit_set(target) {
                    moves.push(Move::new(
                        source,
                        target,
                        side,
                        Piece::Pawn,
                        None,
                        MoveFlags {
                            capture: true,
                            en_passant: true,
                            ..MoveFlags::QUIET
                        },
                    ));
                }
            }
        }
    }

    fn generate_castling_moves(&self, moves: &mut MoveList) {
        let side = self.side;
        let enemy = side.opponent();
        let occupancy = self.all_occupancy();

        let rules = match side {
            Side::White => &WHITE_CASTLES,
            Side::Black => &BLACK_CASTLES,
        };

        for rule in rules {
            if self.castle & rule.right == 0 {
                continue;
            }

            if rule.empty.iter().any(|&square| occupancy.is_bit_set(square)) {
                continue;
            }

            if rule
                .safe
                .iter()
                .any(|&square| self.is_square_attacked(square, enemy))
            {
                continue;
            }

            moves.push(Move::new(
                rule.king_from,
                rule.king_to,
                side,
                Piece::King,
                None,
                MoveFlags {
                    castling: true,
                    ..MoveFlags::QUIET
                },
            ));
        }
    }

    fn generate_piece_moves(&self, tables: &AttackTables, piece: Piece, moves: &mut MoveList) {
        let side = self.side;
        let own = self.occupancy(side).0;
        let enemies = self.occupancy(side.opponent());
        let occupancy = self.all_occupancy();

        for source in self.pieces(side, piece) {
            let attacks = match piece {
                Piece::Knight => tables.knight_attacks(source),
                Piece::Bishop => tables.bishop_attacks(source, occupancy),
                Piece::Rook => tables.rook_attacks(source, occupancy),
                Piece::Queen => tables.queen_attacks(source, occupancy),
                Piece::King => tables.king_attacks(source),
                Piece::Pawn => continue,
            };

            for target in BitBoard(attacks.0 & !own) {
                let flags = if enemies.is_bit_set(target) {
                    CAPTURE
                } else {
                    MoveFlags::QUIET
                };

                moves.push(Move::new(source, target, side, piece, None, flags));
            }
        }
    }
}

fn push_promotions(
    moves: &mut MoveList,
    source: Square,
    target: Square,
    side: Side,
    flags: MoveFlags,
) {
    for promoted in Piece::PROMOTIONS {
        moves.push(Move::new(
            source,
            target,
            side,
            Piece::Pawn,
            Some(promoted),
            flags,
        ));
    }
}
