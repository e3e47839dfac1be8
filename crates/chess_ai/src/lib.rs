//! Adversarial game-tree search engine for chess.
//!
//! Given a position and a side to move, the engine selects the best move
//! under a time/node budget by alpha-beta minimax search with iterative
//! deepening, move ordering seeded by the principal variation, forcing
//! extensions, and a pluggable static evaluator.
//!
//! The board representation and move generator are external collaborators
//! (the [`pleco`] crate); this crate implements no chess rules of its own.
//!
//! ```no_run
//! use chess_ai::{Board, Engine};
//! use std::time::Duration;
//!
//! let mut board = Board::start_pos();
//! let mut engine = Engine::default();
//! let mv = engine
//!     .choose_move(&mut board, Some(Duration::from_millis(500)))
//!     .expect("the start position has legal moves");
//! board.apply_move(mv);
//! ```

mod board;
mod config;
mod constants;
mod error;
pub mod evaluation;
pub mod search;

pub use board::BoardExt;
pub use config::{EvalWeights, ExtensionPolicy, SearchConfig};
pub use error::{EngineError, EngineResult};
pub use evaluation::{Evaluate, MaterialEvaluator, Score, WeightedEvaluator};
pub use search::{AlphaBeta, Engine};

// Re-export the rules collaborator's vocabulary types used in this API.
pub use pleco::{BitMove, Board, Player};
