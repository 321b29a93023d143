//! # Rate Limit Errors
//!
//! Capacity errors carry enough context for callers to distinguish
//! "shrink the amount" from "retry next window".

use shared_types::Amount;
use thiserror::Error;

/// Rate limiting error types.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RateLimitError {
    /// Token allowance for the current window would be exceeded.
    #[error("capacity exceeded: {used} used + {requested} requested > {max} allowed (window resets at {resets_at})")]
    CapacityExceeded {
        /// Tokens already consumed in the window.
        used: Amount,
        /// Tokens the rejected operation asked for.
        requested: Amount,
        /// Effective allowance for this window.
        max: Amount,
        /// Unix timestamp when the window resets.
        resets_at: u64,
    },

    /// Transaction count allowance for the current window would be exceeded.
    #[error("transaction count exceeded: {count}/{max} in window (resets at {resets_at})")]
    TxCountExceeded {
        /// Transactions already counted in the window.
        count: u32,
        /// Count allowance for this window.
        max: u32,
        /// Unix timestamp when the window resets.
        resets_at: u64,
    },

    /// Global aggregate allowance would be exceeded.
    #[error("global capacity exceeded: {used} used + {requested} requested > {max} allowed")]
    GlobalCapacityExceeded {
        /// Tokens already consumed globally in the window.
        used: Amount,
        /// Tokens the rejected operation asked for.
        requested: Amount,
        /// Global allowance for this window.
        max: Amount,
    },

    /// A single operation asks for more than one whole window allows.
    #[error("amount {requested} exceeds the per-window maximum {max}")]
    AmountExceedsWindowMax {
        /// Tokens the rejected operation asked for.
        requested: Amount,
        /// Effective allowance for one window.
        max: Amount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_display() {
        let err = RateLimitError::CapacityExceeded {
            used: 900,
            requested: 200,
            max: 1000,
            resets_at: 7200,
        };
        let text = err.to_string();
        assert!(text.contains("900"));
        assert!(text.contains("7200"));
    }

    #[test]
    fn test_tx_count_error_display() {
        let err = RateLimitError::TxCountExceeded {
            count: 3,
            max: 3,
            resets_at: 7200,
        };
        assert!(err.to_string().contains("3/3"));
    }
}
