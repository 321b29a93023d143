//! # LB-01 Rate Limiter
//!
//! Sliding-window quota enforcement for every value-moving operation.
//!
//! ## Purpose
//!
//! Bound how much value and how many transactions a single account (and the
//! system as a whole) can push through the bridge within a moving time
//! window:
//! - Per-`(account, operation)` sliding windows
//! - Mirrored global aggregate per operation
//! - Tier multipliers scaling the base allowance
//! - Exempt accounts that bypass all checks
//!
//! ## Concurrency
//!
//! The check-then-commit pair is atomic per account: the per-key map entry
//! is held exclusively for the duration of a check, and the global aggregate
//! has its own entry lock, always acquired after the per-account one.
//!
//! ## Module Structure
//!
//! ```text
//! lb-01-rate-limiter/
//! ├── config.rs        # Window sizing and base allowances
//! ├── window.rs        # RateLimitWindow arithmetic
//! ├── error.rs         # Capacity errors
//! └── limiter.rs       # SlidingWindowLimiter service
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod limiter;
pub mod window;

pub use config::RateLimitConfig;
pub use error::RateLimitError;
pub use limiter::{run_pruning_loop, SlidingWindowLimiter};
pub use window::RateLimitWindow;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
