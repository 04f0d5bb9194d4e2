//! Time-boxed Monte Carlo Tree Search for Connect Four.
//!
//! The search builds a tree of positions reachable from the current game
//! state. Each traversal descends by UCT through fully expanded nodes,
//! expands unexplored columns uniformly at random, and keeps descending
//! through newly built nodes until the line reaches a terminal outcome
//! (win, tie, or an attempted drop into a full column), which is then
//! backpropagated to the root. A node carries no board of its own: its
//! outcome is resolved at construction by replaying its move path on one
//! shared scratch board.
//!
//! The scheduler runs traversals on a dedicated worker thread for a fixed
//! wall-clock budget, and the [`Engine`] facade relocates the root after
//! each real move so that search effort carries across turns.
//!
//! # Usage
//!
//! ```rust
//! use std::time::Duration;
//! use mcts::{Engine, SearchConfig};
//!
//! let config = SearchConfig::default().with_budget(Duration::from_millis(10));
//! let mut engine = Engine::new(config);
//!
//! // The engine moves first; later turns pass Some(opponent_column).
//! let col = engine.get_move(None);
//! assert!(col.index() < 7);
//! ```

pub mod config;
pub mod ctx;
pub mod engine;
pub mod node;
pub mod path;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::SearchConfig;
pub use ctx::SearchCtx;
pub use engine::Engine;
pub use node::{Node, NodeId};
pub use path::MovePath;
pub use search::{run_timed, run_traversals, SearchStats};
pub use tree::{SearchTree, TreeStats};
