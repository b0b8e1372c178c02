//! Leaf counting for move generator verification

use crate::{
    moves::{Move, MoveList},
    position::Position,
    types::MoveMode,
};

/// Number of leaf positions reachable in exactly `depth` legal moves
pub fn perft(position: &Position, depth: u16) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    position.generate_moves(&mut moves);

    let mut nodes = 0;

    for move_ in &moves {
        let mut child = *position;

        if !child.make_move(move_, MoveMode::AllMoves) {
            continue;
        }

        nodes += if depth == 1 { 1 } else { perft(&child, depth - 1) };
    }

    nodes
}

/// Leaf counts split by root move, in generation order
pub fn perft_divide(position: &Position, depth: u16) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    position
        .legal_moves()
        .iter()
        .map(|move_| {
            let mut child = *position;
            child.make_move(move_, MoveMode::AllMoves);
            (move_, perft(&child, depth - 1))
        })
        .collect()
}
