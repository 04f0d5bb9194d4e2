//! The search tree and its traversal.
//!
//! Nodes live in an arena (a contiguous `Vec`) and reference each other by
//! [`NodeId`] index. One traversal walks from the root to a terminal node:
//! fully expanded interior nodes are descended by UCT, the first node with an
//! open child slot expands a uniformly random one, and because a freshly
//! constructed child is traversed immediately, the descent keeps growing the
//! tree until it lands on a Win, Tie, or Invalid outcome. That terminal
//! outcome is the simulation result; it is backpropagated through the parent
//! chain.
//!
//! There is no separate rollout phase: a node's outcome is resolved at
//! construction by replaying its move path on the scratch board, trading
//! O(depth) recomputation for not storing a board per node.

use connect4::{Color, Column, Outcome, COLS};
use rand::Rng;

use crate::config::SearchConfig;
use crate::ctx::SearchCtx;
use crate::node::{Node, NodeId};
use crate::path::MovePath;

/// Arena-backed MCTS tree over Connect Four positions.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SearchTree {
    /// A tree rooted at the empty board with Red to move.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new_root(MovePath::empty(), Color::Red)],
            root: NodeId(0),
        }
    }

    /// The root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// A node by ID.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The root node.
    #[inline]
    pub fn root_node(&self) -> &Node {
        self.node(self.root)
    }

    /// Total number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True only before construction completes; kept for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run one complete traversal: descend from the root, growing the tree
    /// until a terminal outcome is reached, then backpropagate that result.
    pub fn traverse(&mut self, ctx: &mut SearchCtx, config: &SearchConfig) {
        let mut current = self.root;

        loop {
            let node = &self.nodes[current.index()];

            if node.is_terminal() {
                let credit = red_credit(node.outcome, node.prev_mover());
                self.backpropagate(current, credit);
                return;
            }

            // Expansion before exploitation: every child slot is filled once
            // before any UCT comparison happens at this node.
            let mut open = [0usize; COLS];
            let mut open_count = 0;
            for (i, child) in node.children.iter().enumerate() {
                if child.is_none() {
                    open[open_count] = i;
                    open_count += 1;
                }
            }

            if open_count > 0 {
                let pick = open[ctx.rng.gen_range(0..open_count)];
                current = self.expand(current, Column::ALL[pick], ctx);
            } else {
                current = self.select_uct(current, ctx, config);
            }
        }
    }

    /// Pick the child maximizing `score/visits + C*sqrt(ln(N)/visits)`,
    /// breaking near-ties uniformly at random.
    fn select_uct(&self, id: NodeId, ctx: &mut SearchCtx, config: &SearchConfig) -> NodeId {
        let node = &self.nodes[id.index()];
        let mover = node.mover;
        let parent_ln = (node.visits as f32).ln();

        let mut best = f32::NEG_INFINITY;
        let mut tied = [0usize; COLS];
        let mut tied_count = 0;

        for (i, &child_id) in node.children.iter().enumerate() {
            let child = &self.nodes[child_id.index()];
            // Every expanded child was traversed at construction, so
            // child.visits >= 1 here.
            let exploit = child.score_for(mover) / child.visits as f32;
            let explore = config.exploration * (parent_ln / child.visits as f32).sqrt();
            let uct = exploit + explore;

            if (uct - best).abs() < config.tie_epsilon {
                tied[tied_count] = i;
                tied_count += 1;
            } else if uct > best {
                best = uct;
                tied[0] = i;
                tied_count = 1;
            }
        }

        let pick = tied[ctx.rng.gen_range(0..tied_count)];
        node.children[pick]
    }

    /// Construct the child of `parent_id` reached by playing `col`,
    /// resolving its outcome by full path replay on the scratch board.
    fn expand(&mut self, parent_id: NodeId, col: Column, ctx: &mut SearchCtx) -> NodeId {
        let (path, mover) = {
            let parent = &self.nodes[parent_id.index()];
            (parent.path.push(col), parent.mover.opponent())
        };
        let outcome = resolve_outcome(&path, ctx);

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new_child(parent_id, path, mover, outcome));
        self.nodes[parent_id.index()].children[col.index()] = id;
        id
    }

    /// Credit one completed traversal to every node from `leaf` up to the
    /// root.
    fn backpropagate(&mut self, leaf: NodeId, red_credit: f32) {
        let mut id = leaf;
        while id.is_some() {
            let node = &mut self.nodes[id.index()];
            node.visits += 1;
            node.red_score += red_credit;
            id = node.parent;
        }
    }

    /// The most-visited root child (robust-child policy), or `None` if the
    /// root has no children at all. Strict comparison: the leftmost maximum
    /// wins.
    pub fn most_visited(&self) -> Option<Column> {
        let root = self.root_node();
        let mut best: Option<(Column, u32)> = None;

        for (i, &child_id) in root.children.iter().enumerate() {
            if child_id.is_none() {
                continue;
            }
            let visits = self.nodes[child_id.index()].visits;
            if best.map_or(true, |(_, most)| visits > most) {
                best = Some((Column::ALL[i], visits));
            }
        }

        best.map(|(col, _)| col)
    }

    /// Make the root's child for `col` the new root, keeping its accumulated
    /// statistics and discarding everything else in the arena. If that child
    /// was never expanded, a fresh zero-statistics node is constructed in
    /// its place; returns whether the existing child was found.
    pub fn promote(&mut self, col: Column, ctx: &mut SearchCtx) -> bool {
        let child = self.nodes[self.root.index()].children[col.index()];
        let (target, hit) = if child.is_some() {
            (child, true)
        } else {
            (self.expand(self.root, col, ctx), false)
        };
        self.rebase(target);
        hit
    }

    /// Rebuild the arena retaining only the subtree under `new_root`. The
    /// discarded siblings and old parent chain are dropped here; this is the
    /// reclamation step that a garbage collector performed in spirit for the
    /// parent-severing design this arena replaces.
    fn rebase(&mut self, new_root: NodeId) {
        let old = std::mem::take(&mut self.nodes);
        let mut nodes = Vec::new();
        copy_subtree(&old, new_root, NodeId::NONE, &mut nodes);
        self.nodes = nodes;
        self.root = NodeId(0);
    }

    /// Tree-level counters for episode logging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: self.root_node().visits,
        }
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
}

/// Score credited to Red for a terminal outcome produced by `prev_mover`.
/// A win credits the mover, a tie credits half, an invalid move is an
/// immediate loss for whoever moved into it.
fn red_credit(outcome: Outcome, prev_mover: Color) -> f32 {
    let red_wins = match outcome {
        Outcome::Win => prev_mover == Color::Red,
        Outcome::Invalid => prev_mover == Color::Yellow,
        Outcome::Tie => return 0.5,
        Outcome::Continue => unreachable!("terminal classification of a Continue node"),
    };
    if red_wins {
        1.0
    } else {
        0.0
    }
}

/// Replay a node's full move path from the empty board, oldest to newest;
/// the final `simulate` result is the node's outcome. All earlier moves are
/// `Continue` by construction, since only Continue nodes are expanded.
fn resolve_outcome(path: &MovePath, ctx: &mut SearchCtx) -> Outcome {
    ctx.board.reset();
    ctx.replay_buf.clear();
    ctx.replay_buf.extend(path.iter());

    let mut outcome = Outcome::Continue;
    for i in (0..ctx.replay_buf.len()).rev() {
        outcome = ctx.board.simulate(ctx.replay_buf[i]);
    }
    outcome
}

/// Depth-first copy of a subtree into a fresh arena, remapping indices.
/// Recursion depth is bounded by the game length (42 plies).
fn copy_subtree(old: &[Node], id: NodeId, new_parent: NodeId, out: &mut Vec<Node>) -> NodeId {
    let new_id = NodeId(out.len() as u32);
    let mut node = old[id.index()].clone();
    node.parent = new_parent;
    node.children = [NodeId::NONE; COLS];
    out.push(node);

    for i in 0..COLS {
        let old_child = old[id.index()].children[i];
        if old_child.is_some() {
            let new_child = copy_subtree(old, old_child, new_id, out);
            out[new_id.index()].children[i] = new_child;
        }
    }

    new_id
}
