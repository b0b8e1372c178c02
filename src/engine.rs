use std::time::Instant;

use tracing::{debug, info};

use crate::{
    constants::DEFAULT_MAX_DEPTH,
    error::Result,
    moves::Move,
    position::Position,
    search::SearchState,
    types::MoveMode,
};

pub struct Engine {
    pub position: Position,
    pub search_settings: SearchSettings,
    search: SearchState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    pub max_depth: u16,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Progress record emitted after each completed iteration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u16,
    pub score: i32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the root has no legal move
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u16,
    pub nodes: u64,
    pub pv: Vec<Move>,
    pub time_ms: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(None)
    }
}

impl Engine {
    pub fn new(max_depth: Option<u16>) -> Self {
        Engine {
            position: Position::start(),
            search_settings: SearchSettings {
                max_depth: max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            },
            search: SearchState::new(),
        }
    }

    pub fn from_fen(fen: &str, max_depth: Option<u16>) -> Result<Self> {
        let mut engine = Engine::new(max_depth);
        engine.position = Position::from_fen(fen)?;
        Ok(engine)
    }

    pub fn new_game(&mut self) {
        self.position = Position::start();
        self.search.reset();
    }

    /// Plays a move chosen from the legal moves. Returns `false` if it was rejected.
    pub fn play(&mut self, move_: Move) -> bool {
        self.position.make_move(move_, MoveMode::AllMoves)
    }

    /// Iterative deepening from depth 1 to `max_depth`. Heuristic tables are reset
    /// once here and carried across iterations.
    pub fn think<F>(&mut self, mut on_depth_complete: Option<F>) -> SearchResult
    where
        F: FnMut(&SearchInfo),
    {
        let started = Instant::now();
        self.search.reset();

        let mut final_depth = 0;
        let mut final_score = 0;

        for depth in 1..=self.search_settings.max_depth {
            let score = self.search.search_depth(&self.position, depth);

            final_depth = depth;
            final_score = score;

            let info = SearchInfo {
                depth,
                score,
                nodes: self.search.nodes,
                pv: self.search.pv(),
            };

            debug!(
                depth,
                score,
                nodes = info.nodes,
                pv = %format_moves(&info.pv),
                "iteration complete"
            );

            if let Some(ref mut callback) = on_depth_complete {
                callback(&info);
            }
        }

        let pv = self.search.pv();

        // A depth-0 request leaves no PV, so fall back to the first legal move
        let best_move = pv
            .first()
            .copied()
            .or_else(|| self.position.legal_moves().iter().next());

        let time_ms = started.elapsed().as_millis() as u64;

        match best_move {
            Some(move_) => info!(
                best_move = %move_,
                score = final_score,
                depth = final_depth,
                nodes = self.search.nodes,
                time_ms,
                "search finished"
            ),
            None => info!(score = final_score, "search finished without a legal move"),
        }

        SearchResult {
            best_move,
            score: final_score,
            depth: final_depth,
            nodes: self.search.nodes,
            pv,
            time_ms,
        }
    }
}

/// Space-separated coordinate notation
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
