//! Bounded peer set with wake-on-add for blocked readers.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use libp2p::PeerId;
use parking_lot::RwLock;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::{DEFAULT_PEERS_LIMIT, PeerSetConfig};
use crate::error::{CancelReason, PeersError, TryAddError};
use crate::metrics::PeerSetMetrics;
use crate::traits::DiscoveryPeerId;

/// Peer set keyed by libp2p `PeerId`.
pub type DiscoveredPeers = BoundedPeerSet<PeerId>;

/// Membership plus the readers waiting for the first member.
#[derive(Debug)]
struct Inner<Id> {
    peers: HashSet<Id>,
    /// One slot per blocked reader, drained by the next successful add.
    waiters: Vec<oneshot::Sender<Id>>,
}

/// Outcome of the non-blocking half of a `peers*` call.
enum Checked<Id> {
    Snapshot(Vec<Id>),
    Waiting(oneshot::Receiver<Id>),
}

/// Thread-safe set of discovered peers holding at most `capacity` members.
///
/// Reads take the shared lock, mutations the exclusive one. The lock is never
/// held while a reader waits: blocked readers park on a one-shot slot that
/// [`try_add`](Self::try_add) fills without blocking.
#[derive(Debug)]
pub struct BoundedPeerSet<Id: DiscoveryPeerId> {
    capacity: usize,
    inner: RwLock<Inner<Id>>,
    metrics: PeerSetMetrics,
}

impl<Id: DiscoveryPeerId> Default for BoundedPeerSet<Id> {
    fn default() -> Self {
        Self::new(DEFAULT_PEERS_LIMIT)
    }
}

impl<Id: DiscoveryPeerId> BoundedPeerSet<Id> {
    /// Create an empty set. A capacity of zero never accepts peers.
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "creating discovered peer set");
        Self {
            capacity,
            inner: RwLock::new(Inner {
                peers: HashSet::new(),
                waiters: Vec::new(),
            }),
            metrics: PeerSetMetrics::with_capacity(capacity),
        }
    }

    pub fn from_config(config: &PeerSetConfig) -> Self {
        Self::new(config.peers_limit)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, peer: &Id) -> bool {
        self.inner.read().peers.contains(peer)
    }

    pub fn len(&self) -> usize {
        self.inner.read().peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current members, possibly empty. Never waits.
    pub fn snapshot(&self) -> Vec<Id> {
        self.inner.read().peers.iter().cloned().collect()
    }

    /// Readers currently parked in a `peers*` call.
    ///
    /// Readers that gave up are pruned lazily, so this may overcount until the
    /// next add or the next reader parks.
    pub fn waiting(&self) -> usize {
        self.inner.read().waiters.len()
    }

    /// Insert `peer` unless it is already a member or the set is full.
    ///
    /// On success every reader parked at this moment is handed `peer`. Readers
    /// that start waiting afterwards see it in their snapshot instead.
    pub fn try_add(&self, peer: Id) -> Result<(), TryAddError> {
        let mut inner = self.inner.write();

        if inner.peers.contains(&peer) {
            self.metrics.record_duplicate();
            return Err(TryAddError::AlreadyMember);
        }
        if inner.peers.len() >= self.capacity {
            self.metrics.record_limit_reached();
            return Err(TryAddError::LimitReached {
                capacity: self.capacity,
            });
        }

        inner.peers.insert(peer.clone());
        let len = inner.peers.len();

        // Sending on a oneshot never blocks; slots of readers that gave up
        // hand the value back and are dropped here.
        let woken = inner
            .waiters
            .drain(..)
            .filter_map(|tx| tx.send(peer.clone()).ok())
            .count();
        drop(inner);

        self.metrics.record_added(len);
        self.metrics.record_woken(woken);
        trace!(?peer, len, woken, "peer added to discovered set");

        Ok(())
    }

    /// Remove `peer` if present. No-op on a zero capacity set.
    pub fn remove(&self, peer: &Id) {
        // A zero capacity set never holds members.
        if self.capacity == 0 {
            return;
        }

        let mut inner = self.inner.write();
        if inner.peers.remove(peer) {
            let len = inner.peers.len();
            drop(inner);

            self.metrics.record_removed(len);
            trace!(?peer, len, "peer removed from discovered set");
        }
    }

    /// All members if any are known, otherwise the next added peer.
    ///
    /// Fails with [`CancelReason::Cancelled`] if `cancel` fires while waiting.
    /// A non-empty set answers immediately even when `cancel` is already
    /// cancelled.
    pub async fn peers(&self, cancel: &CancellationToken) -> Result<Vec<Id>, PeersError> {
        self.peers_with(async {
            cancel.cancelled().await;
            CancelReason::Cancelled
        })
        .await
    }

    /// Like [`peers`](Self::peers), giving up after `timeout`.
    pub async fn peers_timeout(&self, timeout: Duration) -> Result<Vec<Id>, PeersError> {
        self.peers_with(async move {
            tokio::time::sleep(timeout).await;
            CancelReason::DeadlineExceeded
        })
        .await
    }

    /// Like [`peers`](Self::peers), giving up at `deadline`.
    pub async fn peers_until(&self, deadline: Instant) -> Result<Vec<Id>, PeersError> {
        self.peers_with(async move {
            tokio::time::sleep_until(deadline).await;
            CancelReason::DeadlineExceeded
        })
        .await
    }

    /// Like [`peers`](Self::peers) with an arbitrary cancellation signal.
    ///
    /// `cancel` is only polled once the set was found empty; the reason it
    /// resolves to is returned inside [`PeersError::Cancelled`].
    pub async fn peers_with<F>(&self, cancel: F) -> Result<Vec<Id>, PeersError>
    where
        F: Future<Output = CancelReason>,
    {
        tokio::pin!(cancel);

        loop {
            let rx = match self.snapshot_or_park() {
                Checked::Snapshot(peers) => return Ok(peers),
                Checked::Waiting(rx) => rx,
            };

            tokio::select! {
                biased;

                peer = rx => match peer {
                    Ok(peer) => {
                        trace!(?peer, "woken by newly discovered peer");
                        return Ok(vec![peer]);
                    }
                    // Slot dropped without a peer; check the set again.
                    Err(_) => continue,
                },

                reason = &mut cancel => {
                    return Err(PeersError::Cancelled(reason));
                }
            }
        }
    }

    fn snapshot_or_park(&self) -> Checked<Id> {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if !inner.peers.is_empty() {
                return Checked::Snapshot(inner.peers.iter().cloned().collect());
            }
        }

        // Slow path: a peer may have landed between the two locks
        let mut inner = self.inner.write();
        if !inner.peers.is_empty() {
            return Checked::Snapshot(inner.peers.iter().cloned().collect());
        }

        inner.waiters.retain(|tx| !tx.is_closed());
        let (tx, rx) = oneshot::channel();
        inner.waiters.push(tx);

        Checked::Waiting(rx)
    }
}
