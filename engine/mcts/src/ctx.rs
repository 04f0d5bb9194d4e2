//! Shared search resources.
//!
//! Outcome resolution and tie-break selection need a scratch board, a replay
//! buffer, and a random generator. These are deliberately bundled into one
//! exclusively owned handle that the scheduler threads through every tree
//! call: during an active search episode the worker holds the only `&mut`,
//! so the single-writer invariant is enforced by the borrow checker instead
//! of by convention.

use connect4::{Board, Column};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Scratch state owned by the search scheduler for the duration of an
/// episode. Never shared between threads; it moves with the tree onto the
/// worker and back.
#[derive(Debug)]
pub struct SearchCtx {
    /// One reusable board for move-sequence replay, reset before each use.
    pub board: Board,
    /// Reusable buffer for reversing a move path into play order.
    pub replay_buf: Vec<Column>,
    /// Random generator for expansion choice and UCT tie-breaks.
    pub rng: ChaCha20Rng,
}

impl SearchCtx {
    /// A context with an entropy-seeded generator.
    pub fn new() -> Self {
        Self::from_rng(ChaCha20Rng::from_entropy())
    }

    /// A context with a fixed seed, for deterministic searches.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha20Rng) -> Self {
        Self {
            board: Board::new(),
            // A game is at most 42 moves, so the buffer never reallocates.
            replay_buf: Vec::with_capacity(connect4::BOARD_SIZE),
            rng,
        }
    }
}

impl Default for SearchCtx {
    fn default() -> Self {
        Self::new()
    }
}
