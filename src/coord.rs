//! Coordination bridge between independent solver instances.
//!
//! Several solver processes or threads can run fully independent searches
//! on the same problem and only exchange two scalars: the best total cost
//! known anywhere, and a terminate signal. The solve loop polls this state
//! at a fixed iteration cadence (never mid-iteration); seeing a strictly
//! better remote cost makes it restart with a configurable probability,
//! and a terminate signal makes it return its current state. How the
//! scalars travel between processes (channels, MPI, mailboxes) is up to
//! the embedding layer.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

/// Shared best-cost watermark and terminate flag.
///
/// Cheap to share via [`Arc`]; all operations are relaxed atomics, which
/// is enough because the values only steer heuristics.
#[derive(Debug)]
pub struct SearchPeers {
    best_cost: AtomicI64,
    terminate: AtomicBool,
}

impl Default for SearchPeers {
    fn default() -> Self {
        Self {
            best_cost: AtomicI64::new(i64::MAX),
            terminate: AtomicBool::new(false),
        }
    }
}

impl SearchPeers {
    /// Creates a fresh shared state with no known cost.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Records `cost` if it improves on the best known so far.
    pub fn publish_cost(&self, cost: i64) {
        self.best_cost.fetch_min(cost, Ordering::Relaxed);
    }

    /// Best total cost published by any participant, `i64::MAX` if none.
    pub fn best_cost(&self) -> i64 {
        self.best_cost.load(Ordering::Relaxed)
    }

    /// Asks every participant to stop at its next poll point.
    pub fn request_terminate(&self) {
        self.terminate.store(true, Ordering::Relaxed);
    }

    /// Whether termination has been requested.
    pub fn terminated(&self) -> bool {
        self.terminate.load(Ordering::Relaxed)
    }
}

/// Per-run view of a [`SearchPeers`], with the polling cadence and
/// restart acceptance probability.
#[derive(Debug, Clone)]
pub struct CoordHandle {
    /// The shared state polled by the run.
    pub peers: Arc<SearchPeers>,
    /// Poll once every this many iterations.
    pub poll_interval: u64,
    /// Percentage chance, in `0..=100`, of restarting when a strictly
    /// better remote cost is seen.
    pub accept_prob: u32,
}

impl CoordHandle {
    /// Creates a handle with the default cadence (1000 iterations) and
    /// acceptance probability (80%).
    pub fn new(peers: Arc<SearchPeers>) -> Self {
        Self {
            peers,
            poll_interval: 1000,
            accept_prob: 80,
        }
    }

    /// Sets the polling cadence in iterations (minimum 1).
    pub fn with_poll_interval(mut self, iterations: u64) -> Self {
        self.poll_interval = iterations.max(1);
        self
    }

    /// Sets the restart acceptance probability.
    pub fn with_accept_prob(mut self, percent: u32) -> Self {
        self.accept_prob = percent.min(100);
        self
    }
}
