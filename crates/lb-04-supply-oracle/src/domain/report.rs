//! # Supply Reports
//!
//! The signed payload a reporter submits, the deterministic hash votes
//! accumulate against, and the pending batch itself.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{sign_report, Address, Amount, ChainId, Hash, ReportSignature};
use std::collections::HashSet;

/// A proposed supply update for one chain.
///
/// The nonce is a reporter-chosen unix timestamp; it both orders proposals
/// and bounds their replay window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyReport {
    /// Chain being reported on.
    pub chain_id: ChainId,
    /// Reported total supply.
    pub total_supply: Amount,
    /// Reported bridge-custody amount.
    pub locked_supply: Amount,
    /// Proposal nonce (unix seconds).
    pub nonce: u64,
}

impl SupplyReport {
    /// Canonical byte form signed by reporters.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + 16 + 16 + 8);
        bytes.push(self.chain_id as u8);
        bytes.extend_from_slice(&self.total_supply.to_be_bytes());
        bytes.extend_from_slice(&self.locked_supply.to_be_bytes());
        bytes.extend_from_slice(&self.nonce.to_be_bytes());
        bytes
    }

    /// Deterministic hash votes accumulate against.
    ///
    /// Two reporters proposing the same figures under the same nonce vote
    /// on the same hash; any differing field splits the vote.
    pub fn update_hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_bytes());

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        hash
    }

    /// Sign with a reporter's shared secret.
    pub fn sign(&self, shared_secret: &[u8]) -> ReportSignature {
        sign_report(&self.canonical_bytes(), shared_secret)
    }
}

/// Outcome of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Vote recorded; threshold not yet reached.
    Recorded {
        /// Votes collected so far.
        votes: usize,
        /// Votes needed to apply.
        required: usize,
    },
    /// Threshold reached; the update was applied.
    Applied,
}

/// Votes collected for one update hash.
#[derive(Clone, Debug)]
pub struct PendingSignatureBatch {
    /// Distinct signers that voted.
    pub signers: HashSet<Address>,
    /// Unix timestamp of the first vote; drives batch expiry.
    pub first_seen: u64,
}

impl PendingSignatureBatch {
    /// Open a batch at `now`.
    pub fn new(now: u64) -> Self {
        Self {
            signers: HashSet::new(),
            first_seen: now,
        }
    }
}
