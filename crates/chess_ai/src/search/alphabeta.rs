//! Alpha-beta minimax search with fail-hard pruning and forcing extensions.
//!
//! The core owns the evaluator and the extension policy; the iterative
//! deepening driver composes it. The search holds one mutable borrow of the
//! position for its whole duration and pushes/undoes moves through an RAII
//! guard, so every exit path - pruning returns included - restores the
//! position.

use super::budget::{BudgetTracker, LimitReached};
use super::make_unmake::AppliedMove;
use super::ordering::order_moves;
use crate::board::BoardExt;
use crate::config::ExtensionPolicy;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::{Evaluate, Score};
use pleco::{BitMove, Board, Player};
use std::time::Duration;

/// Result of one root expansion.
pub(crate) struct RootOutcome {
    /// Move achieving `value`, or `None` when no move improved on the
    /// initial minus-infinity bound (every reply is already lost).
    pub best: Option<BitMove>,
    pub value: Score,
}

/// Fixed-depth alpha-beta search engine.
pub struct AlphaBeta {
    evaluator: Box<dyn Evaluate>,
    extensions: ExtensionPolicy,
}

impl AlphaBeta {
    pub fn new(evaluator: Box<dyn Evaluate>, extensions: ExtensionPolicy) -> Self {
        Self {
            evaluator,
            extensions,
        }
    }

    /// Picks a move at a fixed nominal depth.
    ///
    /// Falls back to the first enumerated legal move when the search finds
    /// every line losing; errs only when the position has no legal move at
    /// all.
    pub fn choose_move(&self, board: &mut Board, depth: u8) -> EngineResult<BitMove> {
        let legal: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        if legal.is_empty() {
            return Err(EngineError::NoLegalMoves { fen: board.fen() });
        }
        let mut budget = BudgetTracker::new();
        budget.begin_search(None, u64::MAX, Duration::ZERO);
        let chosen = match self.search_root(board, depth, None, &mut budget) {
            Ok(outcome) => outcome.best,
            // Unlimited budget, so this cannot fire; keep the fallback
            // anyway rather than panic.
            Err(LimitReached) => None,
        };
        Ok(chosen.unwrap_or(legal[0]))
    }

    /// Expands the root with a full-width window and returns the best move
    /// and its value. The caller's `pv` hint steers move ordering at every
    /// node of this search.
    pub(crate) fn search_root(
        &self,
        board: &mut Board,
        depth: u8,
        pv: Option<BitMove>,
        budget: &mut BudgetTracker,
    ) -> Result<RootOutcome, LimitReached> {
        budget.checkpoint()?;
        budget.count_node();

        let perspective = board.turn();
        let moves: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        debug_assert!(!moves.is_empty(), "root must have a legal move");

        let mut alpha = Score::NEG_INFINITY;
        let beta = Score::INFINITY;
        let mut best_value = Score::NEG_INFINITY;
        let mut best_move = None;

        for mv in order_moves(board, &moves, pv) {
            budget.checkpoint()?;
            let value = {
                let applied = AppliedMove::new(board, mv);
                self.search(
                    &mut *applied.board,
                    depth.saturating_sub(1),
                    1,
                    depth,
                    alpha,
                    beta,
                    false,
                    perspective,
                    pv,
                    budget,
                )
            }?;
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
            if best_value > alpha {
                alpha = best_value;
            }
        }

        Ok(RootOutcome {
            best: best_move,
            value: best_value,
        })
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// `depth` is the remaining nominal depth, `ply` the distance from the
    /// root and `nominal` the root's nominal depth; `ply` may run past
    /// `nominal` through forcing extensions, up to the policy's hard
    /// ceiling. Leaves are scored from the root `perspective`.
    #[allow(clippy::too_many_arguments)]
    fn search(
        &self,
        board: &mut Board,
        depth: u8,
        ply: u8,
        nominal: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        perspective: Player,
        pv: Option<BitMove>,
        budget: &mut BudgetTracker,
    ) -> Result<Score, LimitReached> {
        budget.checkpoint()?;
        budget.count_node();

        if board.is_decided() {
            return Ok(self.evaluator.evaluate(board, perspective));
        }
        if ply >= nominal.saturating_add(self.extensions.max_extra_plies) {
            return Ok(self.evaluator.evaluate(board, perspective));
        }

        let moves: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        if depth == 0 && !self.qualifies_for_extension(board, &moves) {
            return Ok(self.evaluator.evaluate(board, perspective));
        }

        let next_depth = depth.saturating_sub(1);
        if maximizing {
            let mut value = Score::NEG_INFINITY;
            for mv in order_moves(board, &moves, pv) {
                budget.checkpoint()?;
                let child = {
                    let applied = AppliedMove::new(board, mv);
                    self.search(
                        &mut *applied.board,
                        next_depth,
                        ply + 1,
                        nominal,
                        alpha,
                        beta,
                        false,
                        perspective,
                        pv,
                        budget,
                    )
                }?;
                value = value.max(child);
                if value >= beta {
                    return Ok(value);
                }
                alpha = alpha.max(value);
            }
            Ok(value)
        } else {
            let mut value = Score::INFINITY;
            for mv in order_moves(board, &moves, pv) {
                budget.checkpoint()?;
                let child = {
                    let applied = AppliedMove::new(board, mv);
                    self.search(
                        &mut *applied.board,
                        next_depth,
                        ply + 1,
                        nominal,
                        alpha,
                        beta,
                        true,
                        perspective,
                        pv,
                        budget,
                    )
                }?;
                value = value.min(child);
                if value <= alpha {
                    return Ok(value);
                }
                beta = beta.min(value);
            }
            Ok(value)
        }
    }

    /// A position past nominal depth keeps getting searched while the side
    /// to move is in check or every legal move is a capture.
    fn qualifies_for_extension(&self, board: &Board, moves: &[BitMove]) -> bool {
        if self.extensions.max_extra_plies == 0 {
            return false;
        }
        if self.extensions.on_check && board.in_check() {
            return true;
        }
        self.extensions.on_forced_captures
            && !moves.is_empty()
            && moves.iter().all(|mv| mv.is_capture())
    }
}
