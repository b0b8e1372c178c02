//! Error types for the engine
//!
//! Illegal moves are not errors inside the core: the generator omits them and
//! `Position::make_move` reports them with `false`. Errors only come from
//! parsing text and from building the attack tables.

use thiserror::Error;

use crate::types::Slider;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid move string: {0}")]
    InvalidMove(String),

    /// Well-formed move text that matches no legal move in the position
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("No legal moves in position (checkmate or stalemate)")]
    NoLegalMoves,

    /// Discovery gave up after exhausting its attempt budget
    #[error("Failed to find a {slider} magic number for square {square}")]
    MagicNotFound { square: u8, slider: Slider },

    /// A shipped magic maps two occupancies with different attacks to one slot
    #[error("Magic number for {slider} on square {square} produces conflicting collisions")]
    MagicCollision { square: u8, slider: Slider },
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
