//! Bound for identifiers held by the peer set.

use std::fmt::Debug;
use std::hash::Hash;

/// Blanket-implemented for any type with Clone + Eq + Hash + Send + Sync + Debug.
///
/// The set never interprets the identifier; libp2p's `PeerId` is the usual
/// instantiation, protocol overlays or test ids work equally.
pub trait DiscoveryPeerId: Clone + Eq + Hash + Send + Sync + Debug + 'static {}

impl<T> DiscoveryPeerId for T where T: Clone + Eq + Hash + Send + Sync + Debug + 'static {}
