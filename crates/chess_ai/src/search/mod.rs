//! Game-tree search.
//!
//! ## Module Organization
//!
//! - `alphabeta` - recursive alpha-beta core with fail-hard pruning and
//!   forcing extensions
//! - `iterative` - iterative deepening driver and budget-adapted target
//!   depth selection
//! - `ordering` - move ordering heuristics (PV hint, captures, checks)
//! - `budget` - node/time budget tracking and cooperative cancellation
//! - `make_unmake` - scoped move application with guaranteed undo

mod alphabeta;
mod budget;
mod iterative;
mod make_unmake;
mod ordering;

pub use alphabeta::AlphaBeta;
pub use iterative::Engine;
