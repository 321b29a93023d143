//! # Trusted Remotes
//!
//! The per-chain counterpart address an adapter accepts inbound messages
//! from. Anything else is rejected before the payload is even decoded.

use super::errors::AdapterError;
use dashmap::DashMap;
use shared_types::{Address, ChainId};

/// Per-origin-chain trusted counterpart table.
#[derive(Default)]
pub struct TrustedRemotes {
    remotes: DashMap<ChainId, Address>,
}

impl TrustedRemotes {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the trusted counterpart for a chain.
    pub fn set(&self, chain: ChainId, remote: Address) {
        self.remotes.insert(chain, remote);
    }

    /// Remove a chain's trusted counterpart.
    pub fn remove(&self, chain: ChainId) {
        self.remotes.remove(&chain);
    }

    /// Configured counterpart for a chain, if any.
    pub fn get(&self, chain: ChainId) -> Option<Address> {
        self.remotes.get(&chain).map(|r| *r)
    }

    /// Verify an inbound sender against the table.
    pub fn verify(&self, chain: ChainId, sender: &Address) -> Result<(), AdapterError> {
        match self.get(chain) {
            None => Err(AdapterError::NoTrustedRemote(chain)),
            Some(trusted) if trusted == *sender => Ok(()),
            Some(_) => Err(AdapterError::UntrustedRemote {
                chain,
                sender: hex::encode(sender),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_configured_remote() {
        let remotes = TrustedRemotes::new();
        remotes.set(ChainId::Ethereum, [1u8; 20]);
        assert!(remotes.verify(ChainId::Ethereum, &[1u8; 20]).is_ok());
    }

    #[test]
    fn test_verify_rejects_unknown_sender() {
        let remotes = TrustedRemotes::new();
        remotes.set(ChainId::Ethereum, [1u8; 20]);
        assert!(matches!(
            remotes.verify(ChainId::Ethereum, &[2u8; 20]),
            Err(AdapterError::UntrustedRemote { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_unconfigured_chain() {
        let remotes = TrustedRemotes::new();
        assert!(matches!(
            remotes.verify(ChainId::Base, &[1u8; 20]),
            Err(AdapterError::NoTrustedRemote(ChainId::Base))
        ));
    }

    #[test]
    fn test_remove_clears_remote() {
        let remotes = TrustedRemotes::new();
        remotes.set(ChainId::Polygon, [3u8; 20]);
        remotes.remove(ChainId::Polygon);
        assert!(remotes.get(ChainId::Polygon).is_none());
    }
}
