//! Capacity-bounded set of discovered peers.
//!
//! The discovery side feeds candidates in with [`BoundedPeerSet::try_add`] and
//! drops them with [`BoundedPeerSet::remove`]. Consumers such as connection
//! managers or bootstrappers call [`BoundedPeerSet::peers`]:
//!
//! - non-empty set: returns a snapshot of every member immediately
//! - empty set: waits for the next successful add and returns just that peer,
//!   or fails once the caller's cancellation token or deadline fires
//!
//! ```ignore
//! let set = Arc::new(DiscoveredPeers::new(5));
//! // discovery
//! set.try_add(peer_id)?;
//! // consumer
//! let peers = set.peers_timeout(Duration::from_secs(30)).await?;
//! ```

mod config;
mod error;
mod metrics;
mod set;
mod traits;

pub use config::{DEFAULT_PEERS_LIMIT, PeerSetConfig};
pub use error::{CancelReason, PeersError, TryAddError};
pub use set::{BoundedPeerSet, DiscoveredPeers};
pub use traits::DiscoveryPeerId;
