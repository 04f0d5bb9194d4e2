//! Persistent move paths.
//!
//! A [`MovePath`] is the sequence of columns played from the true game start
//! to the position a tree node represents. Paths share their tails: every
//! child path is one link prepended to its parent's path, so a tree of a
//! million nodes stores one link per node instead of a move list per node.
//! Links are immutable after creation and shared through `Arc` so a path can
//! move onto the search worker thread with its tree.

use std::sync::Arc;

use connect4::Column;

#[derive(Debug)]
struct Link {
    col: Column,
    tail: Option<Arc<Link>>,
}

/// An immutable, shared-tail sequence of column choices, newest first.
#[derive(Debug, Clone, Default)]
pub struct MovePath {
    head: Option<Arc<Link>>,
}

impl MovePath {
    /// The empty path (the true game start).
    pub fn empty() -> Self {
        Self { head: None }
    }

    /// A new path with `col` prepended. Does not modify `self`; the new
    /// path's tail is shared with this one.
    pub fn push(&self, col: Column) -> MovePath {
        MovePath {
            head: Some(Arc::new(Link {
                col,
                tail: self.head.clone(),
            })),
        }
    }

    /// True for the empty path.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of moves in the path, equal to the node's depth from the true
    /// game root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterate the moves newest to oldest. Replay reverses through a buffer.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

/// Iterator over a path's columns, newest first.
pub struct Iter<'a> {
    next: Option<&'a Link>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Column;

    fn next(&mut self) -> Option<Column> {
        let link = self.next?;
        self.next = link.tail.as_deref();
        Some(link.col)
    }
}
