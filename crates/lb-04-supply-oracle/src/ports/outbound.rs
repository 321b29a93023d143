//! # Outbound Ports
//!
//! The circuit-breaker target trait and the mismatch alert sink.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::Amount;
use tracing::error;

/// A component the oracle can pause - outbound port.
///
/// Routers and adapters are wrapped behind this at wiring time, so the
/// oracle depends on nothing but the capability to stop them.
#[async_trait]
pub trait Pausable: Send + Sync {
    /// Human-readable component name for logs.
    fn name(&self) -> &str;

    /// Stop the component. Idempotent.
    async fn pause(&self) -> Result<(), String>;
}

/// Raised when reconciliation finds drift beyond tolerance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SupplyMismatch {
    /// Summed circulating supply across chains.
    pub actual: Amount,
    /// Configured expected global supply.
    pub expected: Amount,
    /// `|actual - expected|`.
    pub deviation: Amount,
    /// Unix timestamp of detection.
    pub timestamp: u64,
}

/// Alert sink - outbound port.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Reconciliation found drift beyond tolerance.
    async fn supply_mismatch(&self, alert: SupplyMismatch);
}

/// Default sink: structured log lines.
pub struct TracingAlertSink;

#[async_trait]
impl AlertSink for TracingAlertSink {
    async fn supply_mismatch(&self, alert: SupplyMismatch) {
        error!(
            actual = alert.actual,
            expected = alert.expected,
            deviation = alert.deviation,
            "supply mismatch detected"
        );
    }
}

/// Recording sink for tests.
#[derive(Default)]
pub struct RecordingAlertSink {
    /// Mismatch alerts, in emission order.
    pub mismatches: Mutex<Vec<SupplyMismatch>>,
}

impl RecordingAlertSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn supply_mismatch(&self, alert: SupplyMismatch) {
        self.mismatches.lock().push(alert);
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock pausable component for testing.
pub struct MockPausable {
    name: String,
    /// Whether `pause` has been called successfully.
    pub paused: std::sync::atomic::AtomicBool,
    /// Should pause calls fail?
    pub should_fail: std::sync::atomic::AtomicBool,
}

impl MockPausable {
    /// Create a named mock.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            paused: std::sync::atomic::AtomicBool::new(false),
            should_fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Whether a pause landed.
    pub fn is_paused(&self) -> bool {
        self.paused.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Make future pause calls fail.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait]
impl Pausable for MockPausable {
    fn name(&self) -> &str {
        &self.name
    }

    async fn pause(&self) -> Result<(), String> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(format!("{} refused to pause", self.name));
        }
        self.paused
            .store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}
