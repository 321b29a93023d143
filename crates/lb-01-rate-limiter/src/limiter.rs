//! # Sliding Window Limiter Service
//!
//! Per-`(account, operation)` windows with a mirrored global aggregate.
//!
//! ## Locking
//!
//! Each check-then-commit runs under the account's map entry guard, so two
//! concurrent requests from the same account serialize. The global aggregate
//! lives in a second map whose entry guard is always acquired after the
//! per-account one; the fixed order rules out deadlock between the two.

use crate::config::{RateLimitConfig, TIER_BPS_DENOMINATOR};
use crate::error::RateLimitError;
use crate::window::RateLimitWindow;
use dashmap::DashMap;
use shared_types::{Address, Amount, OperationType, TimeSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Sliding-window rate limiter gating every mint/burn/bridge action.
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    /// Per-(account, operation) windows.
    accounts: DashMap<(Address, OperationType), RateLimitWindow>,
    /// Global aggregate window per operation.
    global: DashMap<OperationType, RateLimitWindow>,
    /// Tier multipliers in basis points. Missing entry = 10_000 (1x).
    tiers: DashMap<Address, u32>,
    /// Accounts that bypass all checks.
    exempt: DashMap<Address, ()>,
    clock: Arc<dyn TimeSource>,
}

impl SlidingWindowLimiter {
    /// Create a limiter with the given config and clock.
    pub fn new(config: RateLimitConfig, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            accounts: DashMap::new(),
            global: DashMap::new(),
            tiers: DashMap::new(),
            exempt: DashMap::new(),
            clock,
        }
    }

    /// Effective per-window token allowance for an account.
    pub fn effective_max(&self, account: &Address) -> Amount {
        let bps = self.tiers.get(account).map(|t| *t).unwrap_or(10_000);
        self.config
            .base_max_tokens
            .saturating_mul(bps as u128)
            / TIER_BPS_DENOMINATOR
    }

    /// Atomically check and reserve capacity for one operation.
    ///
    /// On success both the account window and the global aggregate have the
    /// usage recorded. On error neither is touched.
    pub fn check_and_commit(
        &self,
        account: &Address,
        operation: OperationType,
        amount: Amount,
    ) -> Result<(), RateLimitError> {
        if !self.config.enabled || self.exempt.contains_key(account) {
            return Ok(());
        }

        let now = self.clock.now();
        let duration = self.config.window_duration_secs;
        let effective_max = self.effective_max(account);

        // Account entry guard first, global second. Same order everywhere.
        let mut account_window = self
            .accounts
            .entry((*account, operation))
            .or_insert_with(|| RateLimitWindow::new(now));
        account_window.check(
            now,
            amount,
            effective_max,
            self.config.max_tx_per_window,
            duration,
        )?;

        let mut global_window = self
            .global
            .entry(operation)
            .or_insert_with(|| RateLimitWindow::new(now));
        global_window
            .check(
                now,
                amount,
                self.config.global_max_tokens(),
                self.config.global_max_tx(),
                duration,
            )
            .map_err(|err| match err {
                RateLimitError::CapacityExceeded {
                    used, requested, max, ..
                } => RateLimitError::GlobalCapacityExceeded {
                    used,
                    requested,
                    max,
                },
                RateLimitError::AmountExceedsWindowMax { requested, max } => {
                    RateLimitError::GlobalCapacityExceeded {
                        used: 0,
                        requested,
                        max,
                    }
                }
                other => other,
            })?;

        account_window.commit(now, amount, duration);
        global_window.commit(now, amount, duration);

        debug!(
            account = %hex::encode(account),
            operation = %operation,
            amount,
            used = account_window.tokens_used,
            "rate limit capacity reserved"
        );
        Ok(())
    }

    /// Return previously reserved capacity after a compensated operation.
    pub fn release(&self, account: &Address, operation: OperationType, amount: Amount) {
        if !self.config.enabled || self.exempt.contains_key(account) {
            return;
        }

        if let Some(mut window) = self.accounts.get_mut(&(*account, operation)) {
            window.release(amount);
        }
        if let Some(mut window) = self.global.get_mut(&operation) {
            window.release(amount);
        }
    }

    /// Set an account's tier multiplier in basis points (10_000 = 1x).
    pub fn set_tier(&self, account: Address, multiplier_bps: u32) {
        info!(account = %hex::encode(account), multiplier_bps, "tier updated");
        self.tiers.insert(account, multiplier_bps);
    }

    /// Remove an account's tier, reverting it to the base allowance.
    pub fn clear_tier(&self, account: &Address) {
        self.tiers.remove(account);
    }

    /// Exempt an account from all checks.
    pub fn add_exempt(&self, account: Address) {
        info!(account = %hex::encode(account), "account exempted from rate limits");
        self.exempt.insert(account, ());
    }

    /// Remove an account's exemption.
    pub fn remove_exempt(&self, account: &Address) {
        self.exempt.remove(account);
    }

    /// Whether an account bypasses all checks.
    pub fn is_exempt(&self, account: &Address) -> bool {
        self.exempt.contains_key(account)
    }

    /// Current window for an account, if one is tracked.
    pub fn usage(&self, account: &Address, operation: OperationType) -> Option<RateLimitWindow> {
        self.accounts.get(&(*account, operation)).map(|w| *w)
    }

    /// Number of tracked account windows.
    pub fn tracked_windows(&self) -> usize {
        self.accounts.len()
    }

    /// Drop windows that have fallen out of their duration.
    pub fn prune_stale(&self) {
        let now = self.clock.now();
        let duration = self.config.window_duration_secs;
        self.accounts
            .retain(|_, window| !window.is_expired(now, duration));
        self.global
            .retain(|_, window| !window.is_expired(now, duration));
    }
}

/// Background task dropping stale windows on an interval.
pub async fn run_pruning_loop(limiter: Arc<SlidingWindowLimiter>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let before = limiter.tracked_windows();
        limiter.prune_stale();
        let after = limiter.tracked_windows();
        if before != after {
            debug!(
                pruned = before.saturating_sub(after),
                remaining = after,
                "stale rate limit windows pruned"
            );
        }
    }
}
