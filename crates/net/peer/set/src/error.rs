//! Error types for peer set operations.
//!
//! Each operation has its own closed error enum so callers match on exactly
//! the failures that operation can produce.

/// Why [`try_add`](crate::BoundedPeerSet::try_add) rejected a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TryAddError {
    /// The peer is already a member. Safe to treat as success.
    #[error("peer already added")]
    AlreadyMember,

    /// The set holds `capacity` peers already.
    #[error("peers limit reached: capacity {capacity}")]
    LimitReached {
        /// Capacity the set was constructed with.
        capacity: usize,
    },
}

/// Why a wait for peers ended without a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller's cancellation token fired.
    Cancelled,
    /// The caller's deadline passed.
    DeadlineExceeded,
}

impl core::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cancelled => f.write_str("cancelled"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// Error returned by the `peers*` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PeersError {
    /// The set was empty and the wait was cut short.
    #[error("waiting for peers: {0}")]
    Cancelled(CancelReason),
}

impl PeersError {
    pub fn reason(&self) -> CancelReason {
        match self {
            Self::Cancelled(reason) => *reason,
        }
    }
}
