//! Threading primitives for the root-split search.
//!
//! The root move list is dealt round-robin into one partition per worker.
//! Each worker owns a private board clone; the only state shared between
//! workers is `SharedSearchState`, which carries the stop flag, the deadline
//! and node accounting.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::{Duration, Instant};

/// Worker count used when nothing else is configured.
pub const DEFAULT_SEARCH_THREADS: usize = 4;

/// Threading configuration owned by the adversary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            requested_threads: DEFAULT_SEARCH_THREADS,
        }
    }
}

impl ThreadingConfig {
    pub const fn with_threads(requested_threads: usize) -> Self {
        Self { requested_threads }
    }

    #[inline]
    pub fn normalized_threads(self) -> usize {
        self.requested_threads.max(1)
    }
}

/// Deal `items` into `parts` lists: item `i` goes to list `i % parts`.
/// Relative order inside each list is preserved.
pub fn partition_round_robin<T: Clone>(items: &[T], parts: usize) -> Vec<Vec<T>> {
    let parts = parts.max(1);
    let mut partitions: Vec<Vec<T>> = (0..parts).map(|_| Vec::new()).collect();
    for (index, item) in items.iter().enumerate() {
        partitions[index % parts].push(item.clone());
    }
    partitions
}

/// Shared cancellation + accounting state for the worker pool.
#[derive(Debug)]
pub struct SharedSearchState {
    stop: AtomicBool,
    pub nodes_visited: AtomicU64,
    time_budget_ms: AtomicU64, // 0 means unlimited
    started_at: Mutex<Option<Instant>>,
}

impl SharedSearchState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            stop: AtomicBool::new(false),
            nodes_visited: AtomicU64::new(0),
            time_budget_ms: AtomicU64::new(0),
            started_at: Mutex::new(None),
        })
    }

    /// A fresh state whose clock starts now.
    pub fn with_time_limit(limit: Option<Duration>) -> Arc<Self> {
        let state = Self::new();
        state.set_time_budget(limit);
        state.reset_started_at();
        state
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn add_nodes(&self, n: u64) {
        self.nodes_visited.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }

    /// A zero duration is rounded up to one millisecond so it still limits.
    #[inline]
    pub fn set_time_budget(&self, limit: Option<Duration>) {
        let budget_ms = limit
            .map(|limit| u64::try_from(limit.as_millis()).unwrap_or(u64::MAX).max(1))
            .unwrap_or(0);
        self.time_budget_ms.store(budget_ms, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset_started_at(&self) {
        if let Ok(mut guard) = self.started_at.lock() {
            *guard = Some(Instant::now());
        }
    }

    #[inline]
    pub fn time_budget_exceeded(&self) -> bool {
        let budget_ms = self.time_budget_ms.load(Ordering::Relaxed);
        if budget_ms == 0 {
            return false;
        }
        let Ok(guard) = self.started_at.lock() else {
            return false;
        };
        let Some(started) = *guard else {
            return false;
        };
        started.elapsed().as_millis() >= u128::from(budget_ms)
    }

    /// Stop flag check that also trips the flag once the deadline passes,
    /// so every other worker sees it on its next poll.
    pub fn poll_deadline(&self) -> bool {
        if self.should_stop() {
            return true;
        }
        if self.time_budget_exceeded() {
            self.request_stop();
            return true;
        }
        false
    }
}
