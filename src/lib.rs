pub mod api;
pub mod attacks;
pub mod bitboard;
pub mod constants;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod fen;
pub mod magic;
pub mod make_move;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod position;
pub mod search;
pub mod square;
pub mod types;
pub mod uci;

pub use error::{EngineError, Result};
