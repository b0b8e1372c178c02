#![allow(dead_code)]

use chess_engine::{
    engine::{Engine, SearchInfo, SearchResult},
    moves::{Move, MoveList},
    position::Position,
    types::{MoveMode, Square},
};

pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
pub const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
pub const POSITION_4_FEN: &str =
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
pub const POSITION_5_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

pub fn position_from_fen(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("Failed to load FEN {fen}: {e}"))
}

pub fn engine_from_fen(fen: &str, depth: u16) -> Engine {
    Engine::from_fen(fen, Some(depth)).unwrap_or_else(|e| panic!("Failed to load FEN {fen}: {e}"))
}

pub fn search(fen: &str, depth: u16) -> SearchResult {
    engine_from_fen(fen, depth).think(None::<fn(&SearchInfo)>)
}

pub fn pseudo_legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    position.generate_moves(&mut moves);
    moves
}

/// (source, target) pairs of the legal moves
pub fn move_pairs(position: &Position) -> Vec<(Square, Square)> {
    position
        .legal_moves()
        .iter()
        .map(|m| (m.source(), m.target()))
        .collect()
}

pub fn move_strings(position: &Position) -> Vec<String> {
    position.legal_moves().iter().map(|m| m.to_string()).collect()
}

pub fn find_move(position: &Position, text: &str) -> Move {
    position
        .legal_moves()
        .iter()
        .find(|m| m.to_string() == text)
        .unwrap_or_else(|| panic!("{text} is not legal in {}", position.to_fen()))
}

/// Plays each move of a line in turn, asserting that every one is accepted
pub fn play_line(position: &Position, line: &[Move]) -> Position {
    let mut current = *position;

    for &move_ in line {
        assert!(
            current.legal_moves().contains(move_),
            "{move_} is not legal in {}",
            current.to_fen()
        );
        assert!(current.make_move(move_, MoveMode::AllMoves));
    }

    current
}
