//! Peer set configuration for TOML persistence.

use serde::{Deserialize, Serialize};

/// Default number of discovered peers held at once.
pub const DEFAULT_PEERS_LIMIT: usize = 5;

/// Discovered peer set configuration (TOML-serializable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerSetConfig {
    /// Maximum number of peers the set holds simultaneously.
    ///
    /// Zero disables the set: every add is rejected.
    #[serde(default = "default_peers_limit")]
    pub peers_limit: usize,
}

impl Default for PeerSetConfig {
    fn default() -> Self {
        Self {
            peers_limit: DEFAULT_PEERS_LIMIT,
        }
    }
}

impl PeerSetConfig {
    pub fn new(peers_limit: usize) -> Self {
        Self { peers_limit }
    }

    /// Config that never accepts peers.
    pub fn disabled() -> Self {
        Self { peers_limit: 0 }
    }

    pub fn is_disabled(&self) -> bool {
        self.peers_limit == 0
    }
}

fn default_peers_limit() -> usize {
    DEFAULT_PEERS_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PeerSetConfig::default();
        assert_eq!(config.peers_limit, DEFAULT_PEERS_LIMIT);
        assert!(!config.is_disabled());
        assert!(PeerSetConfig::disabled().is_disabled());
    }

    #[test]
    fn test_config_from_toml() {
        let config: PeerSetConfig = toml::from_str("peers_limit = 42").unwrap();
        assert_eq!(config, PeerSetConfig::new(42));

        // Missing fields fall back to defaults
        let config: PeerSetConfig = toml::from_str("").unwrap();
        assert_eq!(config, PeerSetConfig::default());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = PeerSetConfig::new(7);
        let text = toml::to_string(&config).unwrap();
        let parsed: PeerSetConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
