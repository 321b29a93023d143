//! # Rate Limit Configuration
//!
//! Window sizing and base allowances, validated before use.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Denominator for tier multipliers expressed in basis points.
pub const TIER_BPS_DENOMINATOR: u128 = 10_000;

/// Rate limiting configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Length of one window in seconds.
    pub window_duration_secs: u64,
    /// Base token allowance per account per window.
    pub base_max_tokens: Amount,
    /// Transaction count allowance per account per window.
    pub max_tx_per_window: u32,
    /// Multiplier applied to per-account allowances to size the global
    /// aggregate window.
    pub global_multiplier: u32,
    /// Master switch. When disabled every check passes.
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_duration_secs: 3600,
            base_max_tokens: 1_000_000,
            max_tx_per_window: 100,
            global_multiplier: 50,
            enabled: true,
        }
    }
}

impl RateLimitConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_duration_secs == 0 {
            return Err("window_duration_secs cannot be 0".into());
        }
        if self.enabled && self.base_max_tokens == 0 {
            return Err("base_max_tokens cannot be 0 while enabled".into());
        }
        if self.enabled && self.max_tx_per_window == 0 {
            return Err("max_tx_per_window cannot be 0 while enabled".into());
        }
        if self.global_multiplier == 0 {
            return Err("global_multiplier cannot be 0".into());
        }
        Ok(())
    }

    /// Global token allowance per window.
    pub fn global_max_tokens(&self) -> Amount {
        self.base_max_tokens
            .saturating_mul(self.global_multiplier as Amount)
    }

    /// Global transaction count allowance per window.
    pub fn global_max_tx(&self) -> u32 {
        self.max_tx_per_window.saturating_mul(self.global_multiplier)
    }
}
