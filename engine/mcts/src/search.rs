//! Time-boxed search scheduling.
//!
//! A search episode lends the tree and the scratch context to a dedicated
//! worker thread that loops traversals back to back, with no delay between
//! iterations. The calling thread sleeps for the wall-clock budget, clears
//! an atomic run flag, and joins the worker. The flag is checked only
//! between complete traversals: every traversal started before the deadline
//! runs to completion, and nothing is cancelled mid-flight, so the overrun
//! is bounded by the cost of one traversal.
//!
//! The worker holds the only mutable borrow of the tree and the context for
//! the whole episode, so no other thread can observe or mutate them until
//! the join returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::SearchConfig;
use crate::ctx::SearchCtx;
use crate::tree::SearchTree;

/// Counters from one search episode.
#[derive(Debug, Clone, Copy)]
pub struct SearchStats {
    /// Completed traversals.
    pub traversals: u64,
    /// Wall-clock time from worker start to join.
    pub elapsed: Duration,
    /// Arena size after the episode.
    pub total_nodes: usize,
}

/// Run traversals for the configured wall-clock budget, updating the tree
/// and context in place, and return the episode counters.
pub fn run_timed(
    tree: &mut SearchTree,
    ctx: &mut SearchCtx,
    config: &SearchConfig,
) -> SearchStats {
    let started = Instant::now();
    let running = AtomicBool::new(true);
    let mut traversals = 0u64;

    thread::scope(|s| {
        let worker = s.spawn(|| {
            let mut count = 0u64;
            while running.load(Ordering::Relaxed) {
                tree.traverse(ctx, config);
                count += 1;
            }
            count
        });

        thread::sleep(config.budget);
        running.store(false, Ordering::Relaxed);

        traversals = match worker.join() {
            Ok(count) => count,
            Err(panic) => std::panic::resume_unwind(panic),
        };
    });

    let stats = SearchStats {
        traversals,
        elapsed: started.elapsed(),
        total_nodes: tree.len(),
    };
    debug!(
        traversals = stats.traversals,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        total_nodes = stats.total_nodes,
        "search episode complete"
    );

    stats
}

/// Run a fixed number of traversals on the calling thread. This is the
/// deterministic counterpart of [`run_timed`] for tests and benchmarks:
/// with a seeded context, the resulting tree depends only on the traversal
/// count.
pub fn run_traversals(tree: &mut SearchTree, ctx: &mut SearchCtx, config: &SearchConfig, n: u64) {
    for _ in 0..n {
        tree.traverse(ctx, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_run_makes_progress_and_honors_budget() {
        let config = SearchConfig::default().with_budget(Duration::from_millis(50));
        let mut tree = SearchTree::new();
        let mut ctx = SearchCtx::with_seed(3);

        let stats = run_timed(&mut tree, &mut ctx, &config);

        assert!(stats.traversals > 0);
        assert_eq!(u64::from(tree.root_node().visits), stats.traversals);
        assert!(stats.elapsed >= config.budget);
        // Generous bound: the only overrun allowed is one in-flight traversal.
        assert!(stats.elapsed < config.budget + Duration::from_secs(1));
    }

    #[test]
    fn timed_run_expands_all_root_children() {
        // A budget of many traversals guarantees the seven root children all
        // get their construction visit.
        let config = SearchConfig::default().with_budget(Duration::from_millis(50));
        let mut tree = SearchTree::new();
        let mut ctx = SearchCtx::with_seed(4);

        let stats = run_timed(&mut tree, &mut ctx, &config);

        assert!(stats.traversals >= 7);
        assert!(tree.root_node().fully_expanded());
    }

    #[test]
    fn timed_run_borrows_tree_and_context_in_place() {
        // The episode works on the caller's own tree and context; both stay
        // live afterwards and the same context keeps driving further
        // traversals with no replacement in between.
        let config = SearchConfig::default().with_budget(Duration::from_millis(20));
        let mut tree = SearchTree::new();
        let mut ctx = SearchCtx::with_seed(6);

        let stats = run_timed(&mut tree, &mut ctx, &config);
        let after_episode = tree.root_node().visits;
        assert_eq!(u64::from(after_episode), stats.traversals);

        run_traversals(&mut tree, &mut ctx, &config, 10);
        assert_eq!(tree.root_node().visits, after_episode + 10);
    }

    #[test]
    fn fixed_count_run_is_exact() {
        let config = SearchConfig::default();
        let mut tree = SearchTree::new();
        let mut ctx = SearchCtx::with_seed(8);

        run_traversals(&mut tree, &mut ctx, &config, 123);
        assert_eq!(tree.root_node().visits, 123);
    }
}
