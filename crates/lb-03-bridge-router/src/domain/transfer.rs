//! # Transfer Records
//!
//! One record per accepted bridge request, mutated as the in-flight
//! operation progresses. Settled records never change again.

use super::errors::RouterError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{Address, Amount, ChainId, Hash, Protocol};

/// Transfer lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Accepted, burned locally, message in flight.
    #[default]
    Pending,
    /// Destination confirmed delivery.
    Completed,
    /// Dispatch or validation failed.
    Failed,
    /// The burned amount was returned to the sender.
    Refunded,
}

impl TransferStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed)
                | (Self::Pending, Self::Failed)
                | (Self::Failed, Self::Refunded)
        )
    }

    /// Check if the record is fully settled.
    ///
    /// `Failed` is not settled: it still owes the sender a refund.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Refunded)
    }
}

/// A cross-chain transfer record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transfer {
    /// Deterministic unique identifier.
    pub id: Hash,
    /// Account debited on the source chain.
    pub sender: Address,
    /// Account credited on the destination chain.
    pub recipient: Address,
    /// Amount moved.
    pub amount: Amount,
    /// Chain the transfer left from.
    pub source_chain: ChainId,
    /// Chain the transfer is headed to.
    pub dest_chain: ChainId,
    /// Protocol carrying the message.
    pub protocol: Protocol,
    /// Current lifecycle state.
    pub status: TransferStatus,
    /// Unix timestamp the router accepted the request.
    pub timestamp: u64,
    /// Hash of the dispatched message correlation; zero until dispatched.
    pub message_hash: Hash,
    /// Router-local sequence number.
    pub nonce: u64,
}

impl Transfer {
    /// Transition to a new state.
    pub fn transition_to(&mut self, next: TransferStatus) -> Result<(), RouterError> {
        if !self.status.can_transition_to(next) {
            return Err(RouterError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Derive the globally unique transfer id.
///
/// The sequence number keeps two otherwise identical requests in the same
/// second distinct.
pub fn derive_transfer_id(
    sender: &Address,
    recipient: &Address,
    amount: Amount,
    dest_chain: ChainId,
    protocol: Protocol,
    timestamp: u64,
    sequence: u64,
) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(sender);
    hasher.update(recipient);
    hasher.update(amount.to_be_bytes());
    hasher.update([dest_chain as u8]);
    hasher.update([protocol as u8]);
    hasher.update(timestamp.to_be_bytes());
    hasher.update(sequence.to_be_bytes());

    let mut id = [0u8; 32];
    id.copy_from_slice(&hasher.finalize());
    id
}
