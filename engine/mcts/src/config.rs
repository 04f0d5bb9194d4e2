//! Search configuration parameters.

use std::time::Duration;

use connect4::Column;

/// Configuration for a search episode.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wall-clock budget per move. The worker checks the run flag between
    /// complete traversals only, so the budget may be overrun by the cost of
    /// one traversal (bounded by tree depth, at most 42 plies).
    pub budget: Duration,

    /// Exploration constant in the UCT formula. Higher values explore more,
    /// lower values exploit the current best line.
    pub exploration: f32,

    /// UCT scores within this distance of the running best are treated as
    /// tied and broken uniformly at random.
    pub tie_epsilon: f32,

    /// Column returned if the budget expires before any root child exists.
    /// Should never trigger with a budget that covers at least one
    /// traversal; it is a guard, not a strategy.
    pub fallback_column: Column,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: Duration::from_secs(1),
            exploration: 1.141,
            tie_epsilon: 1e-7,
            fallback_column: Column::CENTER,
        }
    }
}

impl SearchConfig {
    /// Builder pattern: set the wall-clock budget.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration(mut self, c: f32) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the UCT tie-break epsilon.
    pub fn with_tie_epsilon(mut self, epsilon: f32) -> Self {
        self.tie_epsilon = epsilon;
        self
    }

    /// Builder pattern: set the no-children fallback column.
    pub fn with_fallback_column(mut self, col: Column) -> Self {
        self.fallback_column = col;
        self
    }
}
