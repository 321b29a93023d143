//! # Oracle Configuration

use serde::{Deserialize, Serialize};
use shared_types::{Amount, ChainId};

/// Supply oracle configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Distinct signer votes required to apply an update.
    pub required_signatures: usize,
    /// Allowed drift between actual and expected circulating supply.
    pub tolerance_threshold: Amount,
    /// Expected global circulating supply.
    pub expected_supply: Amount,
    /// How far in the past a proposal nonce may lie.
    pub validity_period_secs: u64,
    /// How far in the future a proposal nonce may lie.
    pub clock_skew_secs: u64,
    /// Seconds between reconciliation passes.
    pub reconciliation_interval_secs: u64,
    /// Chains the oracle tracks.
    pub chains: Vec<ChainId>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            required_signatures: 3,
            tolerance_threshold: 1_000,
            expected_supply: 100_000_000,
            validity_period_secs: 300,
            clock_skew_secs: 10,
            reconciliation_interval_secs: 600,
            chains: ChainId::ALL.to_vec(),
        }
    }
}

impl OracleConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.required_signatures == 0 {
            return Err("required_signatures cannot be 0".into());
        }
        if self.chains.is_empty() {
            return Err("chains cannot be empty".into());
        }
        if self.validity_period_secs == 0 {
            return Err("validity_period_secs cannot be 0".into());
        }
        if self.reconciliation_interval_secs == 0 {
            return Err("reconciliation_interval_secs cannot be 0".into());
        }
        Ok(())
    }
}
