//! Peer set metrics.

use metrics::{Counter, Gauge};

/// Handles for the peer set's metrics. No-ops without an installed recorder.
#[derive(Clone, Debug)]
pub(crate) struct PeerSetMetrics {
    /// Current number of members
    size: Gauge,
    /// Configured capacity
    capacity: Gauge,
    /// Successful adds
    added_total: Counter,
    /// Adds rejected because the peer was already a member
    rejected_duplicate_total: Counter,
    /// Adds rejected because the set was full
    rejected_limit_total: Counter,
    /// Effective removals
    removed_total: Counter,
    /// Blocked readers handed a freshly added peer
    waiters_woken_total: Counter,
}

impl Default for PeerSetMetrics {
    fn default() -> Self {
        Self {
            size: metrics::gauge!("discovery.peer_set.size"),
            capacity: metrics::gauge!("discovery.peer_set.capacity"),
            added_total: metrics::counter!("discovery.peer_set.added_total"),
            rejected_duplicate_total: metrics::counter!(
                "discovery.peer_set.rejected_total",
                "reason" => "already_member"
            ),
            rejected_limit_total: metrics::counter!(
                "discovery.peer_set.rejected_total",
                "reason" => "limit_reached"
            ),
            removed_total: metrics::counter!("discovery.peer_set.removed_total"),
            waiters_woken_total: metrics::counter!("discovery.peer_set.waiters_woken_total"),
        }
    }
}

impl PeerSetMetrics {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let metrics = Self::default();
        metrics.capacity.set(capacity as f64);
        metrics
    }

    pub(crate) fn record_added(&self, len: usize) {
        self.added_total.increment(1);
        self.size.set(len as f64);
    }

    pub(crate) fn record_removed(&self, len: usize) {
        self.removed_total.increment(1);
        self.size.set(len as f64);
    }

    pub(crate) fn record_duplicate(&self) {
        self.rejected_duplicate_total.increment(1);
    }

    pub(crate) fn record_limit_reached(&self) {
        self.rejected_limit_total.increment(1);
    }

    pub(crate) fn record_woken(&self, woken: usize) {
        if woken > 0 {
            self.waiters_woken_total.increment(woken as u64);
        }
    }
}
