mod test_utils;

use chess_engine::{
    constants::START_FEN,
    engine::{Engine, SearchInfo},
};
use test_utils::*;

#[test]
fn test_pv_starts_with_best_move() {
    let result = search(START_FEN, 4);

    assert!(!result.pv.is_empty(), "PV should not be empty");
    assert_eq!(result.pv.first().copied(), result.best_move);
}

#[test]
fn test_pv_is_a_playable_line() {
    for fen in [START_FEN, KIWIPETE_FEN, POSITION_3_FEN, POSITION_4_FEN] {
        let result = search(fen, 3);
        let end = play_line(&position_from_fen(fen), &result.pv);

        assert!(end.check_invariants(), "{fen}");
    }
}

#[test]
fn test_quiet_opening_pv_spans_every_ply() {
    let mut engine = Engine::new(Some(4));
    let mut lines = Vec::new();

    engine.think(Some(|info: &SearchInfo| lines.push((info.depth, info.pv.clone()))));

    assert_eq!(lines.len(), 4);
    for (depth, pv) in &lines {
        assert_eq!(pv.len(), *depth as usize, "depth {depth}: {pv:?}");
    }
}

#[test]
fn test_start_position_line() {
    let result = search(START_FEN, 3);

    assert_eq!(
        result.pv.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
        vec!["d2d4", "d7d5", "b1c3"]
    );
    assert_eq!(result.score, 30);
}

#[test]
fn test_mate_in_two_line() {
    let result = search("7k/8/8/8/8/8/1R6/R3K3 w - - 0 1", 4);

    assert_eq!(result.pv.len(), 3);
    let end = play_line(&position_from_fen("7k/8/8/8/8/8/1R6/R3K3 w - - 0 1"), &result.pv);
    assert!(end.in_check());
    assert!(end.legal_moves().is_empty());
}

#[test]
fn test_checks_extend_the_pv_past_the_nominal_depth() {
    let result = search(POSITION_4_FEN, 3);

    assert_eq!(result.pv.len(), 6);
    assert_eq!(result.score, -425);
}

#[test]
fn test_no_pv_when_checkmated() {
    let result = search("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 2);

    assert!(result.pv.is_empty());
    assert_eq!(result.best_move, None);
}
