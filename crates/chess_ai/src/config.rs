//! Caller-supplied engine configuration.
//!
//! Everything here is plain data with sensible defaults; nothing is parsed
//! from a file. The structs are the full configuration surface of the
//! engine: search depth, extension policy, evaluation weights, branching
//! thresholds and the time/node budget knobs.

use std::time::Duration;

/// Weights applied to the four sub-scores of [`WeightedEvaluator`].
///
/// Each weight is a non-negative multiplier over the raw centipawn-scale
/// sub-score.
///
/// [`WeightedEvaluator`]: crate::evaluation::WeightedEvaluator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    pub material: f64,
    pub piece_square: f64,
    pub king_safety: f64,
    pub mobility: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            material: 1.0,
            piece_square: 0.1,
            king_safety: 0.2,
            mobility: 0.05,
        }
    }
}

impl EvalWeights {
    /// Weights that reduce the composite evaluator to plain material count.
    pub fn material_only() -> Self {
        Self {
            material: 1.0,
            piece_square: 0.0,
            king_safety: 0.0,
            mobility: 0.0,
        }
    }
}

/// Policy for searching past the nominal depth in forcing positions.
///
/// The triggers and the ply ceiling are heuristic, so they are configuration
/// rather than fixed behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionPolicy {
    /// Hard ceiling on plies searched beyond the nominal depth, regardless
    /// of how forcing the position is.
    pub max_extra_plies: u8,
    /// Extend when the side to move is in check.
    pub on_check: bool,
    /// Extend when every legal move is a capture (a forced tactical
    /// sequence).
    pub on_forced_captures: bool,
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self {
            max_extra_plies: 2,
            on_check: true,
            on_forced_captures: true,
        }
    }
}

impl ExtensionPolicy {
    /// No extensions at all: `depth == 0` is always a leaf.
    pub fn disabled() -> Self {
        Self {
            max_extra_plies: 0,
            on_check: false,
            on_forced_captures: false,
        }
    }
}

/// Configuration for the iterative-deepening driver.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Nominal search depth the deepening loop aims for.
    pub base_depth: u8,
    /// Forcing-extension policy applied by the alpha-beta core.
    pub extensions: ExtensionPolicy,
    /// Root move counts at or below this widen the target depth by one.
    pub low_branching: usize,
    /// Root move counts at or above this narrow the target depth by one.
    pub high_branching: usize,
    /// Hard cap on nodes visited in one move selection.
    pub max_nodes: u64,
    /// Slice reserved at the end of a time budget so the search can unwind
    /// before the deadline actually passes.
    pub safety_margin: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_depth: 4,
            extensions: ExtensionPolicy::default(),
            low_branching: 10,
            high_branching: 35,
            max_nodes: 1_000_000,
            safety_margin: Duration::from_millis(50),
        }
    }
}
