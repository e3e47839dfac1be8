//! Search budget bookkeeping.
//!
//! Pure advisory statistics: a per-call node counter and deadline, plus
//! smoothed per-depth node counts and a smoothed per-node wall time that
//! persist across move selections of one engine instance. The tracker never
//! changes a search result; it only cancels depths and steers the target
//! depth more conservatively.

use instant::Instant;
use std::time::Duration;

/// Distinguished cancellation condition, recovered at the driver's
/// per-depth boundary. Deliberately not an `EngineError`: it never crosses
/// the crate boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LimitReached;

/// Blend factor for a freshly measured per-depth node count.
const NODE_EMA_WEIGHT: f64 = 0.5;
/// Blend factor for a freshly measured time-per-node, favoring the prior.
const TIME_EMA_WEIGHT: f64 = 0.3;

#[derive(Debug)]
pub(crate) struct BudgetTracker {
    nodes: u64,
    max_nodes: u64,
    deadline: Option<Instant>,
    /// Smoothed node count per completed depth, indexed by depth.
    depth_nodes: Vec<f64>,
    /// Smoothed wall time per node, in seconds.
    secs_per_node: Option<f64>,
}

impl BudgetTracker {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            max_nodes: u64::MAX,
            deadline: None,
            depth_nodes: Vec::new(),
            secs_per_node: None,
        }
    }

    /// Resets the per-call state (counter and deadline). The smoothed
    /// averages survive between calls.
    pub fn begin_search(
        &mut self,
        time_budget: Option<Duration>,
        max_nodes: u64,
        safety_margin: Duration,
    ) {
        self.nodes = 0;
        self.max_nodes = max_nodes;
        self.deadline =
            time_budget.map(|budget| Instant::now() + budget.saturating_sub(safety_margin));
    }

    /// Cooperative cancellation check, run before every node expansion and
    /// before every child descent.
    pub fn checkpoint(&self) -> Result<(), LimitReached> {
        if self.nodes >= self.max_nodes {
            return Err(LimitReached);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(LimitReached);
            }
        }
        Ok(())
    }

    pub fn count_node(&mut self) {
        self.nodes += 1;
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Folds a completed depth's node count and wall time into the
    /// smoothed estimates.
    pub fn record_depth(&mut self, depth: u8, nodes: u64, elapsed: Duration) {
        let slot = depth as usize;
        if self.depth_nodes.len() <= slot {
            self.depth_nodes.resize(slot + 1, 0.0);
        }
        let fresh = nodes as f64;
        self.depth_nodes[slot] = if self.depth_nodes[slot] > 0.0 {
            (1.0 - NODE_EMA_WEIGHT) * self.depth_nodes[slot] + NODE_EMA_WEIGHT * fresh
        } else {
            fresh
        };

        if nodes > 0 {
            let fresh_spn = elapsed.as_secs_f64() / nodes as f64;
            self.secs_per_node = Some(match self.secs_per_node {
                Some(prior) => (1.0 - TIME_EMA_WEIGHT) * prior + TIME_EMA_WEIGHT * fresh_spn,
                None => fresh_spn,
            });
        }
    }

    /// Expected total node count for searching depths `1..=target`, from
    /// the smoothed estimates. Depths never completed contribute nothing,
    /// which keeps the tracker purely advisory.
    pub fn expected_nodes(&self, target: u8) -> f64 {
        self.depth_nodes
            .iter()
            .take(target as usize + 1)
            .skip(1)
            .sum()
    }

    pub fn secs_per_node(&self) -> Option<f64> {
        self.secs_per_node
    }
}
