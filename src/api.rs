#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

use crate::{
    engine::{Engine, SearchInfo},
    error::{EngineError, Result},
    types::MoveMode,
};

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub fen: String,
    pub depth: Option<u16>,
}

#[cfg_attr(feature = "api", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnalyzeResponse {
    pub best_move: String,           // The best move in coordinate notation (e.g., e2e4)
    pub ponder_move: Option<String>, // Expected reply, second move of the PV
    pub evaluation: i32,             // Centipawns from the side to move's point of view
    pub depth: u16,                  // Search depth reached
    pub nodes: u64,                  // Total nodes searched
    pub pv: Vec<String>,             // Principal variation (best line of play)
    pub time_ms: u64,                // Time spent searching in milliseconds
    pub fen_after_move: String,      // FEN string after applying best move
}

/// Main entry point for API consumers
/// Analyzes a chess position and returns the best move
pub fn analyze_position(request: AnalyzeRequest) -> Result<AnalyzeResponse> {
    let mut engine = Engine::from_fen(&request.fen, request.depth)?;

    if engine.position.legal_moves().is_empty() {
        return Err(EngineError::NoLegalMoves);
    }

    let result = engine.think(None::<fn(&SearchInfo)>);
    let best_move = result.best_move.ok_or(EngineError::NoLegalMoves)?;

    let mut after = engine.position;
    if !after.make_move(best_move, MoveMode::AllMoves) {
        return Err(EngineError::IllegalMove(best_move.to_string()));
    }

    Ok(AnalyzeResponse {
        best_move: best_move.to_string(),
        ponder_move: result.pv.get(1).map(|m| m.to_string()),
        evaluation: result.score,
        depth: result.depth,
        nodes: result.nodes,
        pv: result.pv.iter().map(|m| m.to_string()).collect(),
        time_ms: result.time_ms,
        fen_after_move: after.to_fen(),
    })
}

/// Simpler interface with just FEN and depth
pub fn get_best_move(fen: &str, depth: u16) -> Result<AnalyzeResponse> {
    analyze_position(AnalyzeRequest {
        fen: fen.to_string(),
        depth: Some(depth),
    })
}

/// JSON in, JSON out
#[cfg(feature = "api")]
pub fn analyze_json(request: &str) -> std::result::Result<String, String> {
    let request: AnalyzeRequest = serde_json::from_str(request).map_err(|e| e.to_string())?;
    let response = analyze_position(request).map_err(|e| e.to_string())?;
    serde_json::to_string(&response).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::START_FEN;

    #[test]
    fn test_analyze_starting_position() {
        let request = AnalyzeRequest {
            fen: START_FEN.to_string(),
            depth: Some(3),
        };

        let response = analyze_position(request).unwrap();
        assert!(!response.best_move.is_empty());
        assert_eq!(response.depth, 3);
        assert!(response.nodes > 0);
        assert_eq!(response.pv.first(), Some(&response.best_move));
    }

    #[test]
    fn test_fen_after_move() {
        let response = get_best_move(START_FEN, 3).unwrap();

        assert_ne!(response.fen_after_move, START_FEN);
        assert!(response.fen_after_move.contains(" b "));
    }

    #[test]
    fn test_invalid_fen() {
        let result = get_best_move("invalid fen string", 3);
        assert!(matches!(result, Err(EngineError::InvalidFen(_))));
    }

    #[test]
    fn test_checkmated_position_has_no_best_move() {
        // Scholar's mate, black is mated
        let fen = "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4";
        assert_eq!(get_best_move(fen, 2).unwrap_err(), EngineError::NoLegalMoves);
    }

    #[cfg(feature = "api")]
    #[test]
    fn test_analyze_json() {
        let response =
            analyze_json(&format!(r#"{{"fen":"{START_FEN}","depth":2}}"#)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(value["depth"], 2);
        assert!(value["best_move"].as_str().is_some());
    }
}
