//! # Bridge Payload
//!
//! The protocol-independent body of a cross-chain message. Protocol framing
//! (endpoint ids, domains, consistency levels) is added per adapter; this
//! codec covers only what every protocol carries.

use super::errors::AdapterError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{Address, Amount, ChainId, Hash};

/// Body of a cross-chain value transfer message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgePayload {
    /// Recipient on the destination chain.
    pub recipient: Address,
    /// Amount to mint at the destination.
    pub amount: Amount,
    /// Per-origin-chain sequence number; the replay-protection key.
    pub nonce: u64,
}

impl BridgePayload {
    /// Serialize to the canonical byte form.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).expect("payload serialization is infallible")
    }

    /// Decode from canonical bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, AdapterError> {
        bincode::deserialize(bytes).map_err(|e| AdapterError::MalformedPayload(e.to_string()))
    }

    /// Deterministic hash identifying this message between two chains.
    pub fn message_hash(&self, origin: ChainId, dest: ChainId) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update([origin as u8]);
        hasher.update([dest as u8]);
        hasher.update(self.encode());

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        hash
    }
}
