//! Error types for the search engine.
//!
//! Only caller contract breaches cross the crate boundary as errors.
//! Budget cancellation is internal control flow (see `search::budget`) and
//! is never surfaced here.

use thiserror::Error;

/// Errors surfaced by the engine's public entry points.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine was asked for a move in a position that has none. The
    /// game loop is expected to check for game over before asking.
    #[error("no legal moves available in position {fen}")]
    NoLegalMoves { fen: String },
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
