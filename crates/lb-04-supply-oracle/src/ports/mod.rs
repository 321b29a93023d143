//! # Ports
//!
//! Outbound dependencies of the oracle: components it can pause and the
//! alert sink it raises mismatches through.

pub mod outbound;

pub use outbound::{
    AlertSink, MockPausable, Pausable, RecordingAlertSink, SupplyMismatch, TracingAlertSink,
};
