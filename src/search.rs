//! Negamax alpha-beta with principal variation search, quiescence and move ordering.
//!
//! All heuristic state lives in `SearchState`. Positions are copied per child, so
//! backtracking never needs an undo step.

use crate::{
    constants::{
        CAPTURE_SCORE, FIRST_KILLER_SCORE, INFINITY_SCORE, MATE_VALUE, MAX_PLY, MVV_LVA,
        NUM_COLORED_PIECES, NUM_SQUARES, PV_SCORE, SECOND_KILLER_SCORE,
    },
    moves::{Move, MoveList},
    position::Position,
    types::{MoveMode, Piece},
};

pub struct SearchState {
    pub nodes: u64,
    ply: usize,
    /// [slot][ply], slot 0 is the most recent
    killers: [[Move; MAX_PLY]; 2],
    /// [colored piece][target square]
    history: [[i32; NUM_SQUARES]; NUM_COLORED_PIECES],
    /// Triangular PV table: row `ply` holds the best line found from that ply
    pv_table: [[Move; MAX_PLY]; MAX_PLY],
    pv_length: [usize; MAX_PLY],
    follow_pv: bool,
    score_pv: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        SearchState {
            nodes: 0,
            ply: 0,
            killers: [[Move::NULL; MAX_PLY]; 2],
            history: [[0; NUM_SQUARES]; NUM_COLORED_PIECES],
            pv_table: [[Move::NULL; MAX_PLY]; MAX_PLY],
            pv_length: [0; MAX_PLY],
            follow_pv: false,
            score_pv: false,
        }
    }

    /// Clears every table. Called once per top-level search, not per iteration.
    pub fn reset(&mut self) {
        *self = SearchState::new();
    }

    /// One iterative-deepening iteration with a full window
    pub fn search_depth(&mut self, position: &Position, depth: u16) -> i32 {
        self.ply = 0;
        self.follow_pv = true;
        self.negamax(position, -INFINITY_SCORE, INFINITY_SCORE, depth)
    }

    /// Principal variation from the root
    pub fn pv(&self) -> Vec<Move> {
        self.pv_table[0][..self.pv_length[0]].to_vec()
    }

    pub fn killer(&self, slot: usize, ply: usize) -> Move {
        self.killers[slot][ply]
    }

    pub fn history_score(&self, move_: Move) -> i32 {
        self.history[move_.piece_index()][move_.target() as usize]
    }

    /// Turns on PV ordering for this node if the root PV move for this ply is available
    fn enable_pv_scoring(&mut self, moves: &MoveList) {
        self.follow_pv = false;

        if moves.contains(self.pv_table[0][self.ply]) {
            self.score_pv = true;
            self.follow_pv = true;
        }
    }

    /// Ordering key: PV move, then captures by MVV-LVA, then killers, then history
    pub fn score_move(&mut self, position: &Position, move_: Move) -> i32 {
        if self.score_pv && self.pv_table[0][self.ply] == move_ {
            self.score_pv = false;
            return PV_SCORE;
        }

        if move_.is_capture() {
            let target = move_.target();

            // En passant lands on an empty square, so the victim defaults to a pawn
            let victim = Piece::iter()
                .find(|&piece| {
                    position
                        .pieces(position.side.opponent(), piece)
                        .is_bit_set(target)
                })
                .unwrap_or(Piece::Pawn);

            return MVV_LVA[move_.piece() as usize][victim as usize] + CAPTURE_SCORE;
        }

        if self.killers[0][self.ply] == move_ {
            FIRST_KILLER_SCORE
        } else if self.killers[1][self.ply] == move_ {
            SECOND_KILLER_SCORE
        } else {
            self.history_score(move_)
        }
    }

    fn sort_moves(&mut self, position: &Position, moves: &mut MoveList) {
        moves.sort_by_score(|move_| self.score_move(position, move_));
    }

    /// Fail-soft negamax. The returned score may lie outside `(alpha, beta)`.
    pub fn negamax(&mut self, position: &Position, mut alpha: i32, beta: i32, depth: u16) -> i32 {
        self.pv_length[self.ply] = self.ply;

        if depth == 0 {
            return self.quiescence(position, alpha, beta);
        }

        // Keeps `ply + 1` indexable
        if self.ply >= MAX_PLY - 1 {
            return position.evaluate();
        }

        self.nodes += 1;

        let in_check = position.in_check();
        let depth = if in_check { depth + 1 } else { depth };

        let mut moves = MoveList::new();
        position.generate_moves(&mut moves);

        if self.follow_pv {
            self.enable_pv_scoring(&moves);
        }

        self.sort_moves(position, &mut moves);

        let mut legal_moves = 0;
        let mut found_pv = false;
        let mut best_score = -INFINITY_SCORE;

        for move_ in &moves {
            let mut child = *position;

            if !child.make_move(move_, MoveMode::AllMoves) {
                continue;
            }

            legal_moves += 1;
            self.ply += 1;

            let score = if found_pv {
                let score = -self.negamax(&child, -alpha - 1, -alpha, depth - 1);

                if score > alpha && score < beta {
                    -self.negamax(&child, -beta, -alpha, depth - 1)
                } else {
                    score
                }
            } else {
                -self.negamax(&child, -beta, -alpha, depth - 1)
            };

            self.ply -= 1;

            best_score = best_score.max(score);

            if score >= beta {
                if !move_.is_capture() {
                    self.killers[1][self.ply] = self.killers[0][self.ply];
                    self.killers[0][self.ply] = move_;
                }

                return score;
            }

            if score > alpha {
                if !move_.is_capture() {
                    self.history[move_.piece_index()][move_.target() as usize] += depth as i32;
                }

                alpha = score;
                found_pv = true;
                self.store_pv(move_);
            }
        }

        if legal_moves == 0 {
            return if in_check {
                -MATE_VALUE + self.ply as i32
            } else {
                0
            };
        }

        best_score
    }

    fn store_pv(&mut self, move_: Move) {
        let ply = self.ply;

        self.pv_table[ply][ply] = move_;

        for next in ply + 1..self.pv_length[ply + 1] {
            self.pv_table[ply][next] = self.pv_table[ply + 1][next];
        }

        self.pv_length[ply] = self.pv_length[ply + 1];
    }

    /// Captures only, with the static evaluation as a standing-pat floor
    pub fn quiescence(&mut self, position: &Position, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let stand_pat = position.evaluate();

        if self.ply >= MAX_PLY - 1 {
            return stand_pat;
        }

        if stand_pat >= beta {
            return stand_pat;
        }

        alpha = alpha.max(stand_pat);
        let mut best_score = stand_pat;

        let mut moves = MoveList::new();
        position.generate_moves(&mut moves);
        self.sort_moves(position, &mut moves);

        for move_ in &moves {
            let mut child = *position;

            if !child.make_move(move_, MoveMode::CapturesOnly) {
                continue;
            }

            self.ply += 1;
            let score = -self.quiescence(&child, -beta, -alpha);
            self.ply -= 1;

            best_score = best_score.max(score);

            if score >= beta {
                return score;
            }

            alpha = alpha.max(score);
        }

        best_score
    }
}
