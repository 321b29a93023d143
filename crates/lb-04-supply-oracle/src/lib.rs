//! # LB-04 Supply Oracle
//!
//! Out-of-band supply reconciliation across all bridged ledgers.
//!
//! ## Purpose
//!
//! No single reporter is trusted to assert a chain's supply. Signed reports
//! accumulate votes per update hash; only when the signature threshold is
//! reached does a chain's supply record change. Periodic reconciliation
//! sums the per-chain records against the expected global supply and, when
//! the drift exceeds tolerance, trips the circuit breaker to pause every
//! registered component.
//!
//! ## Security Features
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Threshold signatures | An update applies only after N distinct signer votes |
//! | HMAC-signed reports | Per-signer shared secrets, constant-time verification |
//! | Nonce validity window | Replays and stale proposals rejected outright |
//! | Emergency mode | Manual override suppressing pause storms during incidents |
//!
//! ## Module Structure
//!
//! ```text
//! lb-04-supply-oracle/
//! ├── domain/          # ChainSupply, SupplyReport, signature batches, errors
//! ├── ports/           # Pausable + AlertSink outbound ports
//! ├── config.rs        # Thresholds, tolerance, windows
//! └── service.rs       # SupplyOracle + reconciliation loop
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use config::OracleConfig;
pub use domain::{
    ChainSupply, OracleError, PendingSignatureBatch, SupplyReport, UpdateOutcome,
};
pub use ports::{
    AlertSink, MockPausable, Pausable, RecordingAlertSink, SupplyMismatch, TracingAlertSink,
};
pub use service::{run_reconciliation_loop, OracleAdminCap, ReconcileOutcome, SupplyOracle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
