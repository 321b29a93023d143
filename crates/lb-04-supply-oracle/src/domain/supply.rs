//! # Chain Supply Records
//!
//! One record per registered chain, written only through the threshold
//! update protocol.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, ChainId};

/// Supply snapshot for one chain.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ChainSupply {
    /// Chain the record describes.
    pub chain_id: ChainId,
    /// Total supply reported on that chain.
    pub total_supply: Amount,
    /// Amount held in bridge custody on that chain.
    pub locked_supply: Amount,
    /// `total_supply - locked_supply`, recomputed on every update.
    pub circulating_supply: Amount,
    /// Unix timestamp of the last applied update.
    pub last_update_time: u64,
    /// Number of applied updates.
    pub update_count: u64,
}

impl ChainSupply {
    /// Create an empty record for a chain.
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            total_supply: 0,
            locked_supply: 0,
            circulating_supply: 0,
            last_update_time: 0,
            update_count: 0,
        }
    }

    /// Apply a threshold-approved update.
    ///
    /// The circulating figure is always recomputed here, never written
    /// independently.
    pub fn apply(&mut self, total_supply: Amount, locked_supply: Amount, now: u64) {
        self.total_supply = total_supply;
        self.locked_supply = locked_supply;
        self.circulating_supply = total_supply.saturating_sub(locked_supply);
        self.last_update_time = now;
        self.update_count += 1;
    }
}
