//! Search tree node representation.
//!
//! Each node represents the game position reached by one sequence of moves
//! from the current real root. Nodes store the visit statistics used for UCT
//! selection and final move choice.

use connect4::{Color, Outcome, COLS};

use crate::path::MovePath;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree.
///
/// `red_score` is the cumulative score credited to Red across all traversals
/// through this node: a win adds 1, a tie 0.5, a loss 0. Yellow's share is
/// always derived as `visits - red_score`, never stored; a tie therefore
/// contributes 0.5 to both sides by construction.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node index (NONE for the root).
    pub parent: NodeId,

    /// Columns played from the true game start to reach this position.
    pub path: MovePath,

    /// The color to move at this position.
    pub mover: Color,

    /// Terminal classification of the move that produced this node,
    /// computed once at construction and immutable thereafter.
    pub outcome: Outcome,

    /// Number of completed traversals through this node.
    pub visits: u32,

    /// Cumulative score credited to Red.
    pub red_score: f32,

    /// One slot per column, lazily populated; NONE = unexpanded.
    pub children: [NodeId; COLS],
}

impl Node {
    /// A root node for a position with no move behind it.
    pub fn new_root(path: MovePath, mover: Color) -> Self {
        Self {
            parent: NodeId::NONE,
            path,
            mover,
            outcome: Outcome::Continue,
            visits: 0,
            red_score: 0.0,
            children: [NodeId::NONE; COLS],
        }
    }

    /// A child node whose outcome has already been resolved by path replay.
    pub fn new_child(parent: NodeId, path: MovePath, mover: Color, outcome: Outcome) -> Self {
        Self {
            parent,
            path,
            mover,
            outcome,
            visits: 0,
            red_score: 0.0,
            children: [NodeId::NONE; COLS],
        }
    }

    /// Whether this node's move ended the game (or was illegal).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::Continue
    }

    /// The color that made the move producing this node.
    #[inline]
    pub fn prev_mover(&self) -> Color {
        self.mover.opponent()
    }

    /// Cumulative score from `color`'s point of view.
    #[inline]
    pub fn score_for(&self, color: Color) -> f32 {
        match color {
            Color::Red => self.red_score,
            Color::Yellow => self.visits as f32 - self.red_score,
        }
    }

    /// Whether every child slot is populated.
    #[inline]
    pub fn fully_expanded(&self) -> bool {
        self.children.iter().all(|c| c.is_some())
    }
}
