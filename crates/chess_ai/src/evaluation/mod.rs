//! Static position evaluation.
//!
//! Evaluators are pluggable strategies behind the [`Evaluate`] trait:
//!
//! - [`MaterialEvaluator`] - plain material count
//! - [`WeightedEvaluator`] - material + piece-square tables + king safety
//!   + mobility, combined as a weighted sum
//!
//! Scores are `f64` so decided terminal positions can be scored with exact
//! `±infinity`; everything in between is a finite centipawn-scale value.
//! Terminal detection always precedes feature evaluation, so a mate or a
//! dead draw is never scored through the feature terms.

mod material;
mod pst;
mod weighted;

pub use material::MaterialEvaluator;
pub use weighted::WeightedEvaluator;

use crate::board::BoardExt;
use pleco::{Board, Player};

/// Signed evaluation score. `±INFINITY` marks a decided game.
pub type Score = f64;

/// A static evaluation strategy.
///
/// `board` is mutable because the mobility term temporarily passes the turn
/// to count the opponent's moves; implementations must leave the position
/// exactly as they found it on every path.
pub trait Evaluate {
    /// Scores `board` from `perspective`'s point of view: positive is good
    /// for `perspective`. Antisymmetric in perspective for any fixed
    /// non-terminal position.
    fn evaluate(&self, board: &mut Board, perspective: Player) -> Score;
}

/// Score for a decided position, or `None` if the game is still open.
///
/// Checkmate is won by the side that just moved; stalemate and insufficient
/// material are dead draws.
pub(crate) fn terminal_score(board: &Board, perspective: Player) -> Option<Score> {
    if board.checkmate() {
        let winner = board.turn().other_player();
        return Some(if winner == perspective {
            Score::INFINITY
        } else {
            Score::NEG_INFINITY
        });
    }
    if board.stalemate() || board.insufficient_material() {
        return Some(0.0);
    }
    None
}
