//! Iterative deepening driver.
//!
//! Runs the alpha-beta core at depth 1, 2, ... up to an adaptively chosen
//! target, reusing each completed depth's best move to order the next one.
//! A depth cancelled by the budget is discarded whole; the driver answers
//! with the last fully completed depth, or the first enumerated legal move
//! when not even depth 1 finished.

use super::alphabeta::AlphaBeta;
use super::budget::{BudgetTracker, LimitReached};
use crate::config::SearchConfig;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::{Evaluate, Score, WeightedEvaluator};
use instant::Instant;
use pleco::{BitMove, Board};
use std::time::Duration;
use tracing::{debug, trace};

/// Iterative deepening move-selection engine.
///
/// Composes an [`AlphaBeta`] core with a budget tracker. The principal
/// variation hint and the smoothed search statistics are per-instance state;
/// two engines never share them.
pub struct Engine {
    core: AlphaBeta,
    config: SearchConfig,
    budget: BudgetTracker,
    pv: Option<BitMove>,
    last_depth: u8,
    last_value: Score,
}

impl Engine {
    pub fn new(evaluator: Box<dyn Evaluate>, config: SearchConfig) -> Self {
        Self {
            core: AlphaBeta::new(evaluator, config.extensions),
            config,
            budget: BudgetTracker::new(),
            pv: None,
            last_depth: 0,
            last_value: 0.0,
        }
    }

    /// Nodes visited during the most recent `choose_move` call.
    pub fn nodes(&self) -> u64 {
        self.budget.nodes()
    }

    /// Deepest fully completed depth of the most recent `choose_move` call.
    pub fn last_depth(&self) -> u8 {
        self.last_depth
    }

    /// Value of the most recent completed depth, from the mover's
    /// perspective.
    pub fn last_value(&self) -> Score {
        self.last_value
    }

    /// Selects a move for the side to move, optionally under a wall-clock
    /// budget.
    ///
    /// Always returns a legal move when one exists; errs only when the
    /// position has none, which the game loop should have ruled out.
    pub fn choose_move(
        &mut self,
        board: &mut Board,
        time_budget: Option<Duration>,
    ) -> EngineResult<BitMove> {
        let legal: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        if legal.is_empty() {
            return Err(EngineError::NoLegalMoves { fen: board.fen() });
        }

        self.budget
            .begin_search(time_budget, self.config.max_nodes, self.config.safety_margin);
        self.last_depth = 0;
        self.last_value = 0.0;

        let target = self.target_depth(legal.len(), time_budget);
        trace!(target, branching = legal.len(), "target depth selected");

        let mut chosen: Option<BitMove> = None;
        for depth in 1..=target {
            let depth_start = Instant::now();
            let nodes_before = self.budget.nodes();
            match self.core.search_root(board, depth, self.pv, &mut self.budget) {
                Ok(outcome) => {
                    let nodes_used = self.budget.nodes() - nodes_before;
                    self.budget
                        .record_depth(depth, nodes_used, depth_start.elapsed());
                    self.last_depth = depth;
                    self.last_value = outcome.value;
                    if let Some(mv) = outcome.best {
                        self.pv = Some(mv);
                        chosen = Some(mv);
                    }
                    debug!(
                        depth,
                        value = outcome.value,
                        nodes = nodes_used,
                        "depth completed"
                    );
                    // A proven result cannot change with deeper search.
                    if outcome.value.is_infinite() {
                        break;
                    }
                }
                Err(LimitReached) => {
                    debug!(depth, "budget exhausted, partial depth discarded");
                    break;
                }
            }
        }

        Ok(chosen.unwrap_or(legal[0]))
    }

    /// Picks the deepening target for this call: the configured base depth,
    /// widened or narrowed one level by the root branching factor, then
    /// shrunk while the tracker's estimates say the budget cannot carry it.
    fn target_depth(&self, branching: usize, time_budget: Option<Duration>) -> u8 {
        let base = self.config.base_depth.max(1);
        let mut target = base;
        if branching <= self.config.low_branching {
            target = target.saturating_add(1);
        } else if branching >= self.config.high_branching {
            target = target.saturating_sub(1);
        }
        target = target.clamp(1, base.saturating_add(1));

        while target > 1 {
            let expected = self.budget.expected_nodes(target);
            if expected <= 0.0 {
                break;
            }
            let over_nodes = expected > self.config.max_nodes as f64;
            let over_time = match (time_budget, self.budget.secs_per_node()) {
                (Some(budget), Some(spn)) => {
                    let usable = budget.saturating_sub(self.config.safety_margin);
                    expected * spn > usable.as_secs_f64()
                }
                _ => false,
            };
            if over_nodes || over_time {
                target -= 1;
            } else {
                break;
            }
        }
        target
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(
            Box::new(WeightedEvaluator::default()),
            SearchConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EvalWeights, ExtensionPolicy};
    use crate::evaluation::MaterialEvaluator;

    fn shallow_config(base_depth: u8) -> SearchConfig {
        SearchConfig {
            base_depth,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn start_position_yields_a_legal_move() {
        let mut board = Board::start_pos();
        let mut engine = Engine::new(Box::new(MaterialEvaluator), shallow_config(2));
        let mv = engine.choose_move(&mut board, None).unwrap();
        let legal: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        assert!(legal.contains(&mv));
        assert_eq!(board.fen(), Board::start_pos().fen());
    }

    #[test]
    fn mate_in_one_stops_deepening_at_depth_one() {
        let mut board = Board::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1").unwrap();
        let mut engine = Engine::new(Box::new(MaterialEvaluator), shallow_config(4));
        let mv = engine.choose_move(&mut board, None).unwrap();
        assert_eq!(engine.last_depth(), 1, "deepening must stop on a proven mate");
        assert_eq!(engine.last_value(), Score::INFINITY);
        board.apply_move(mv);
        assert!(board.checkmate());
    }

    #[test]
    fn node_cap_overshoot_is_bounded_by_one_branching_factor() {
        let cap = 200u64;
        let mut board = Board::start_pos();
        let mut engine = Engine::new(
            Box::new(MaterialEvaluator),
            SearchConfig {
                base_depth: 6,
                max_nodes: cap,
                ..SearchConfig::default()
            },
        );
        let legal: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        let mv = engine.choose_move(&mut board, None).unwrap();
        assert!(legal.contains(&mv), "a cancelled search still answers legally");
        assert!(
            engine.nodes() <= cap + legal.len() as u64,
            "node counter {} overshot cap {} by more than one node's children",
            engine.nodes(),
            cap
        );
    }

    #[test]
    fn single_legal_move_is_returned_immediately() {
        let mut board = Board::from_fen("k7/8/2K5/8/8/8/8/1R6 b - - 0 1").unwrap();
        let only: Vec<BitMove> = board.generate_moves().iter().copied().collect();
        assert_eq!(only.len(), 1);
        let mut engine = Engine::default();
        let mv = engine.choose_move(&mut board, None).unwrap();
        assert_eq!(mv, only[0]);
    }

    #[test]
    fn material_only_depth_one_grabs_the_hanging_queen() {
        let mut board = Board::from_fen("k7/8/8/3q4/4P3/8/8/K7 w - - 0 1").unwrap();
        let mut engine = Engine::new(
            Box::new(crate::evaluation::WeightedEvaluator::new(
                EvalWeights::material_only(),
            )),
            SearchConfig {
                base_depth: 1,
                extensions: ExtensionPolicy::disabled(),
                ..SearchConfig::default()
            },
        );
        let mv = engine.choose_move(&mut board, None).unwrap();
        assert!(mv.is_capture());
        assert_eq!(mv.get_dest().0, 35);
    }

    #[test]
    fn terminal_position_is_rejected() {
        let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(board.stalemate());
        let mut engine = Engine::default();
        assert!(matches!(
            engine.choose_move(&mut board, None),
            Err(EngineError::NoLegalMoves { .. })
        ));
    }

    #[test]
    fn branching_factor_steers_the_target_depth() {
        let engine = Engine::new(Box::new(MaterialEvaluator), shallow_config(3));
        assert_eq!(engine.target_depth(5, None), 4); // quiet position, look deeper
        assert_eq!(engine.target_depth(20, None), 3);
        assert_eq!(engine.target_depth(40, None), 2); // wide position, stay shallow
    }

    #[test]
    fn pv_hint_persists_across_turns() {
        let mut board = Board::start_pos();
        let mut engine = Engine::new(Box::new(MaterialEvaluator), shallow_config(2));
        let first = engine.choose_move(&mut board, None).unwrap();
        assert_eq!(engine.pv, Some(first));
    }
}
