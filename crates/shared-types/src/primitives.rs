//! # Bridge Primitives
//!
//! Chain and protocol identifiers plus the base value types every subsystem
//! shares.

use serde::{Deserialize, Serialize};

/// Hash type (32-byte SHA-256).
pub type Hash = [u8; 32];

/// Address type (20-byte).
pub type Address = [u8; 20];

/// Token amount in base units.
pub type Amount = u128;

/// The all-zeroes address. Never a valid sender or recipient.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Check whether an address is the zero address.
pub fn is_zero_address(address: &Address) -> bool {
    *address == ZERO_ADDRESS
}

/// Supported ledger identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainId {
    /// Ethereum mainnet.
    Ethereum,
    /// Arbitrum L2.
    Arbitrum,
    /// Optimism L2.
    Optimism,
    /// Polygon PoS.
    Polygon,
    /// Base L2.
    Base,
}

impl ChainId {
    /// All chains the bridge knows about, in canonical order.
    pub const ALL: [ChainId; 5] = [
        ChainId::Ethereum,
        ChainId::Arbitrum,
        ChainId::Optimism,
        ChainId::Polygon,
        ChainId::Base,
    ];

    /// Stable lowercase name, used in logs and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::Arbitrum => "arbitrum",
            ChainId::Optimism => "optimism",
            ChainId::Polygon => "polygon",
            ChainId::Base => "base",
        }
    }

    /// Seconds until a message sourced from this chain is considered final.
    pub fn finality_secs(&self) -> u64 {
        match self {
            ChainId::Ethereum => 780, // PoS, 2 epochs
            ChainId::Arbitrum => 60,
            ChainId::Optimism => 60,
            ChainId::Polygon => 256, // Fast finality
            ChainId::Base => 60,
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChainId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| format!("unknown chain: {s}"))
    }
}

/// Messaging protocols a transfer can be routed through.
///
/// Each protocol has its own adapter with independent trust assumptions;
/// the enum only identifies the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// LayerZero endpoint messaging.
    LayerZero,
    /// Wormhole guardian network.
    Wormhole,
    /// Axelar gateway network.
    Axelar,
    /// Hyperlane mailbox messaging.
    Hyperlane,
}

impl Protocol {
    /// All protocols, in canonical order.
    pub const ALL: [Protocol; 4] = [
        Protocol::LayerZero,
        Protocol::Wormhole,
        Protocol::Axelar,
        Protocol::Hyperlane,
    ];

    /// Stable lowercase name, used in logs and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::LayerZero => "layerzero",
            Protocol::Wormhole => "wormhole",
            Protocol::Axelar => "axelar",
            Protocol::Hyperlane => "hyperlane",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::ALL
            .into_iter()
            .find(|protocol| protocol.as_str() == s)
            .ok_or_else(|| format!("unknown protocol: {s}"))
    }
}

/// Value-moving operation classes, used as rate-limit scopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// Inbound mint on message delivery.
    Mint,
    /// Outbound burn when bridging out.
    Burn,
    /// Router-mediated bridge request.
    Bridge,
}

impl OperationType {
    /// Stable lowercase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Mint => "mint",
            OperationType::Burn => "burn",
            OperationType::Bridge => "bridge",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a hash as an abbreviated hex string for logs.
pub fn short_hash(hash: &Hash) -> String {
    format!("{}..{}", hex::encode(&hash[..4]), hex::encode(&hash[28..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(is_zero_address(&ZERO_ADDRESS));
        assert!(!is_zero_address(&[1u8; 20]));
    }

    #[test]
    fn test_chain_id_names_unique() {
        let names: std::collections::HashSet<_> =
            ChainId::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names.len(), ChainId::ALL.len());
    }

    #[test]
    fn test_chain_id_from_str_roundtrip() {
        for chain in ChainId::ALL {
            assert_eq!(chain.as_str().parse::<ChainId>(), Ok(chain));
        }
        assert!("solana".parse::<ChainId>().is_err());
    }

    #[test]
    fn test_protocol_from_str_roundtrip() {
        for protocol in Protocol::ALL {
            assert_eq!(protocol.as_str().parse::<Protocol>(), Ok(protocol));
        }
        assert!("ibc".parse::<Protocol>().is_err());
    }

    #[test]
    fn test_chain_finality() {
        assert_eq!(ChainId::Ethereum.finality_secs(), 780);
        assert_eq!(ChainId::Arbitrum.finality_secs(), 60);
    }

    #[test]
    fn test_protocol_display() {
        assert_eq!(Protocol::LayerZero.to_string(), "layerzero");
        assert_eq!(Protocol::Hyperlane.to_string(), "hyperlane");
    }

    #[test]
    fn test_short_hash() {
        let hash = [0xABu8; 32];
        let short = short_hash(&hash);
        assert!(short.starts_with("abababab"));
        assert!(short.contains(".."));
    }
}
