mod test_utils;

use chess_engine::{
    EngineError,
    constants::START_FEN,
    position::Position,
    types::{
        BLACK_KINGSIDE, BLACK_QUEENSIDE, Piece, Side, Square, WHITE_KINGSIDE, WHITE_QUEENSIDE,
    },
};
use test_utils::*;

#[test]
fn test_load_starting_position_from_fen() {
    let position = position_from_fen(START_FEN);

    assert_eq!(position.side, Side::White);
    assert_eq!(position.castle, 0b1111);
    assert_eq!(position.en_passant, None);

    assert!(position.pieces(Side::White, Piece::King).is_bit_set(Square::E1));
    assert!(position.pieces(Side::Black, Piece::King).is_bit_set(Square::E8));
    assert!(position.pieces(Side::White, Piece::Pawn).is_bit_set(Square::E2));
    assert!(position.pieces(Side::Black, Piece::Pawn).is_bit_set(Square::E7));

    assert_eq!(position.occupancy(Side::White).count_bits(), 16);
    assert_eq!(position.occupancy(Side::Black).count_bits(), 16);
    assert_eq!(position.all_occupancy().count_bits(), 32);
    assert_eq!(position, Position::start());
}

#[test]
fn test_load_custom_position_from_fen() {
    let position =
        position_from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");

    assert_eq!(position.en_passant, Some(Square::D6));
    assert_eq!(position.piece_at(Square::E4), Some((Side::White, Piece::Pawn)));
    assert_eq!(position.piece_at(Square::D5), Some((Side::Black, Piece::Pawn)));
    assert_eq!(position.piece_at(Square::E2), None);
    assert_eq!(position.piece_at(Square::D7), None);
}

#[test]
fn test_load_position_with_black_to_move() {
    let position =
        position_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

    assert_eq!(position.side, Side::Black);
    assert_eq!(position.en_passant, Some(Square::E3));
}

#[test]
fn test_load_position_with_limited_castling() {
    let position = position_from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Kq - 0 1");

    assert_eq!(position.castle, WHITE_KINGSIDE | BLACK_QUEENSIDE);
    assert_eq!(position.castle & WHITE_QUEENSIDE, 0);
    assert_eq!(position.castle & BLACK_KINGSIDE, 0);
    assert_eq!(position.castle_string(), "Kq");
}

#[test]
fn test_load_position_with_no_castling() {
    let position = position_from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1");

    assert_eq!(position.castle, 0);
    assert_eq!(position.castle_string(), "-");
}

#[test]
fn test_move_counters_are_accepted_and_ignored() {
    let with_counters =
        position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 5 10");
    let without_counters = position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");

    assert_eq!(with_counters, without_counters);
    assert_eq!(with_counters.to_fen(), START_FEN);
}

#[test]
fn test_round_trip_reference_positions() {
    for fen in [START_FEN, KIWIPETE_FEN, POSITION_3_FEN, POSITION_4_FEN] {
        assert_eq!(position_from_fen(fen).to_fen(), fen);
    }

    // Counters are not tracked
    assert_eq!(
        position_from_fen(POSITION_5_FEN).to_fen(),
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1"
    );
}

#[test]
fn test_whitespace_between_fields_is_flexible() {
    let position = position_from_fen("  4k3/8/8/8/8/8/8/4K3   b   -   -  ");

    assert_eq!(position.side, Side::Black);
    assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn test_loaded_positions_are_consistent() {
    for fen in [START_FEN, KIWIPETE_FEN, POSITION_3_FEN, POSITION_4_FEN, POSITION_5_FEN] {
        assert!(position_from_fen(fen).check_invariants(), "{fen}");
    }
}

#[test]
fn test_too_few_fields() {
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"),
        Err(EngineError::InvalidFen(_))
    ));
}

#[test]
fn test_invalid_placement() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 w KQkq - 0 1",
        "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
    ] {
        assert!(
            matches!(Position::from_fen(fen), Err(EngineError::InvalidFen(_))),
            "accepted {fen}"
        );
    }
}

#[test]
fn test_invalid_state_fields() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR white KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq i3 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e 0 1",
    ] {
        assert!(
            matches!(Position::from_fen(fen), Err(EngineError::InvalidFen(_))),
            "accepted {fen}"
        );
    }
}

#[test]
fn test_en_passant_square_must_sit_behind_a_double_push() {
    for fen in [
        "4k3/1P6/8/8/8/8/8/4K3 w - a8 0 1",
        "4k3/8/8/8/8/8/8/4K3 b - e1 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e4 0 1",
    ] {
        assert!(
            matches!(Position::from_fen(fen), Err(EngineError::InvalidFen(_))),
            "accepted {fen}"
        );
    }

    assert_eq!(
        position_from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1").en_passant,
        Some(Square::E6)
    );
}

#[test]
fn test_king_count_is_checked() {
    assert!(Position::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1").is_err());
    assert!(Position::from_fen("kk6/8/8/8/8/8/8/K7 w - - 0 1").is_err());
    assert!(Position::from_fen("k7/8/8/8/8/8/8/K7 w - - 0 1").is_ok());
}

#[test]
fn test_error_message_names_the_problem() {
    let error = Position::from_fen("8/8/8/8/8/8/8/K6z w - - 0 1").unwrap_err();
    assert!(error.to_string().contains("unknown piece 'z'"), "{error}");
}
