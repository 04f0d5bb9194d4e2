//! Turn-taking engine facade.
//!
//! [`Engine`] is the boundary between the search and whatever drives the
//! real game. Each turn it is told which column the opponent just played (if
//! any), relocates the tree root to that position, searches for the
//! configured budget, commits the most-visited reply as the new root, and
//! returns it. Carrying the chosen subtree across turns means the next
//! search starts from accumulated statistics instead of from scratch.
//!
//! `get_move` never fails: every degenerate condition (opponent move the
//! search never expanded, budget expiring before the first expansion) is
//! handled locally and resolves to a move being returned.

use connect4::Column;
use tracing::warn;

use crate::config::SearchConfig;
use crate::ctx::SearchCtx;
use crate::search::run_timed;
use crate::tree::SearchTree;

/// A Connect Four player backed by time-boxed Monte Carlo Tree Search.
///
/// The engine's tree always starts at the empty board with Red to move,
/// whichever color the engine ends up playing: if the opponent moves first,
/// the first `get_move` call carries that move and relocates the root before
/// searching.
#[derive(Debug)]
pub struct Engine {
    tree: SearchTree,
    ctx: SearchCtx,
    config: SearchConfig,
}

impl Engine {
    /// An engine with an entropy-seeded generator.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            tree: SearchTree::new(),
            ctx: SearchCtx::new(),
            config,
        }
    }

    /// An engine with a fixed seed, for reproducible play.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            tree: SearchTree::new(),
            ctx: SearchCtx::with_seed(seed),
            config,
        }
    }

    /// Choose a column to play. `opponent_move` is the column the opponent
    /// just played, or `None` when the engine makes the first move of the
    /// game.
    pub fn get_move(&mut self, opponent_move: Option<Column>) -> Column {
        if let Some(col) = opponent_move {
            if !self.tree.promote(col, &mut self.ctx) {
                // The opponent played a line the search never expanded; its
                // statistics start over from zero.
                warn!(column = %col, "opponent move not in tree, starting fresh at that position");
            }
        }

        run_timed(&mut self.tree, &mut self.ctx, &self.config);

        let chosen = match self.tree.most_visited() {
            Some(col) => col,
            None => {
                // Guarded degenerate case: the budget expired before a
                // single expansion.
                warn!(
                    fallback = %self.config.fallback_column,
                    "search produced no children, using fallback column"
                );
                self.config.fallback_column
            }
        };

        self.tree.promote(chosen, &mut self.ctx);
        chosen
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The current search tree, for inspection.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }
}
