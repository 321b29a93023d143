//! # Sliding Window Arithmetic
//!
//! The window itself is plain data; all arithmetic is pure so the limiter
//! service can hold locks for as short as possible.

use crate::error::RateLimitError;
use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Usage accumulated inside one window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitWindow {
    /// Tokens consumed since `window_start`.
    pub tokens_used: Amount,
    /// Operations counted since `window_start`.
    pub tx_count: u32,
    /// Unix timestamp the window opened.
    pub window_start: u64,
}

impl RateLimitWindow {
    /// Open a fresh window at `now`.
    pub fn new(now: u64) -> Self {
        Self {
            tokens_used: 0,
            tx_count: 0,
            window_start: now,
        }
    }

    /// A window is expired once `now` has moved past `window_start + duration`.
    pub fn is_expired(&self, now: u64, duration_secs: u64) -> bool {
        now > self.window_start.saturating_add(duration_secs)
    }

    /// Unix timestamp at which the current window stops counting.
    pub fn resets_at(&self, duration_secs: u64) -> u64 {
        self.window_start.saturating_add(duration_secs)
    }

    /// Evaluate whether `amount` fits without mutating anything.
    ///
    /// An expired window is treated as fresh: the single operation is
    /// evaluated against the whole allowance.
    pub fn check(
        &self,
        now: u64,
        amount: Amount,
        max_tokens: Amount,
        max_tx: u32,
        duration_secs: u64,
    ) -> Result<(), RateLimitError> {
        if self.is_expired(now, duration_secs) {
            if amount > max_tokens {
                return Err(RateLimitError::AmountExceedsWindowMax {
                    requested: amount,
                    max: max_tokens,
                });
            }
            return Ok(());
        }

        let resets_at = self.resets_at(duration_secs);
        if self.tokens_used.saturating_add(amount) > max_tokens {
            return Err(RateLimitError::CapacityExceeded {
                used: self.tokens_used,
                requested: amount,
                max: max_tokens,
                resets_at,
            });
        }
        if self.tx_count.saturating_add(1) > max_tx {
            return Err(RateLimitError::TxCountExceeded {
                count: self.tx_count,
                max: max_tx,
                resets_at,
            });
        }
        Ok(())
    }

    /// Record a passed check. Resets first if the window expired.
    pub fn commit(&mut self, now: u64, amount: Amount, duration_secs: u64) {
        if self.is_expired(now, duration_secs) {
            *self = Self::new(now);
        }
        self.tokens_used = self.tokens_used.saturating_add(amount);
        self.tx_count = self.tx_count.saturating_add(1);
    }

    /// Return capacity after a compensated operation.
    ///
    /// Only token usage is returned; the transaction count stands, since the
    /// attempt did happen.
    pub fn release(&mut self, amount: Amount) {
        self.tokens_used = self.tokens_used.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_TOKENS: Amount = 1000;
    const MAX_TX: u32 = 3;
    const WINDOW: u64 = 3600;

    #[test]
    fn test_fresh_window_allows() {
        let window = RateLimitWindow::new(1000);
        assert!(window.check(1000, 500, MAX_TOKENS, MAX_TX, WINDOW).is_ok());
    }

    #[test]
    fn test_capacity_boundary() {
        let mut window = RateLimitWindow::new(1000);
        window.commit(1000, 900, WINDOW);

        // 900 + 100 == max is allowed, 900 + 101 is not
        assert!(window.check(1500, 100, MAX_TOKENS, MAX_TX, WINDOW).is_ok());
        assert!(matches!(
            window.check(1500, 101, MAX_TOKENS, MAX_TX, WINDOW),
            Err(RateLimitError::CapacityExceeded { used: 900, .. })
        ));
    }

    #[test]
    fn test_tx_count_boundary() {
        let mut window = RateLimitWindow::new(1000);
        for _ in 0..MAX_TX {
            window.commit(1000, 1, WINDOW);
        }
        assert!(matches!(
            window.check(1500, 1, MAX_TOKENS, MAX_TX, WINDOW),
            Err(RateLimitError::TxCountExceeded { count: 3, max: 3, .. })
        ));
    }

    #[test]
    fn test_expired_window_treated_as_fresh() {
        let mut window = RateLimitWindow::new(1000);
        window.commit(1000, MAX_TOKENS, WINDOW);

        // Saturated inside the window
        assert!(window.check(2000, 1, MAX_TOKENS, MAX_TX, WINDOW).is_err());

        // Past window_start + duration the counters no longer apply
        let later = 1000 + WINDOW + 1;
        assert!(window.check(later, 500, MAX_TOKENS, MAX_TX, WINDOW).is_ok());
    }

    #[test]
    fn test_expired_window_still_bounds_single_amount() {
        let window = RateLimitWindow::new(1000);
        let later = 1000 + WINDOW + 1;
        assert!(matches!(
            window.check(later, MAX_TOKENS + 1, MAX_TOKENS, MAX_TX, WINDOW),
            Err(RateLimitError::AmountExceedsWindowMax { .. })
        ));
    }

    #[test]
    fn test_commit_resets_expired_window() {
        let mut window = RateLimitWindow::new(1000);
        window.commit(1000, 800, WINDOW);

        let later = 1000 + WINDOW + 1;
        window.commit(later, 100, WINDOW);
        assert_eq!(window.tokens_used, 100);
        assert_eq!(window.tx_count, 1);
        assert_eq!(window.window_start, later);
    }

    #[test]
    fn test_release_returns_tokens_only() {
        let mut window = RateLimitWindow::new(1000);
        window.commit(1000, 500, WINDOW);
        window.release(500);
        assert_eq!(window.tokens_used, 0);
        assert_eq!(window.tx_count, 1);
    }

    #[test]
    fn test_release_saturates() {
        let mut window = RateLimitWindow::new(1000);
        window.release(100);
        assert_eq!(window.tokens_used, 0);
    }
}
