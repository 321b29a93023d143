//! # LB-03 Bridge Router
//!
//! The single entry point for bridging value out. The router holds the
//! chain × protocol support matrix, computes bridge options, selects a
//! route, delegates dispatch to the chosen protocol adapter, and tracks the
//! resulting transfer records.
//!
//! ## Saga semantics
//!
//! There is no transaction spanning two ledgers. Bridging is burn-then-
//! dispatch with a synchronous compensating refund: a dispatch failure
//! re-mints the burned amount before the error reaches the caller, and the
//! transfer record ends `Refunded`, never silently burned. A dispatched
//! message that is lost in flight is caught later by supply reconciliation,
//! not here.
//!
//! ## Module Structure
//!
//! ```text
//! lb-03-bridge-router/
//! ├── domain/          # Transfer state machine, bridge options, errors
//! ├── events/          # Published events + EventSink port
//! ├── state.rs         # Registries and the transfer store
//! └── service.rs       # BridgeRouter
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod events;
pub mod service;
pub mod state;

// Re-exports
pub use domain::{
    derive_transfer_id, select_route, BridgeOption, RoutePreference, RouterError, Transfer,
    TransferStatus,
};
pub use events::{
    EventSink, RecordingEventSink, TracingEventSink, TransferCompleted, TransferFailed,
    TransferInitiated, TransferRefunded,
};
pub use service::{AdminCap, BridgeRouter, RouterDependencies};
pub use state::AdapterId;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
