//! # Published Events
//!
//! Events the router emits as transfers progress, delivered through the
//! [`EventSink`] outbound port. Sinks must not fail the operation that
//! emitted the event; delivery errors are logged and dropped.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Hash, Protocol};
use tracing::info;

/// Published when a bridge request is accepted and dispatched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferInitiated {
    /// Transfer record id.
    pub transfer_id: Hash,
    /// Debited account.
    pub sender: Address,
    /// Destination chain.
    pub dest_chain: ChainId,
    /// Protocol carrying the message.
    pub protocol: Protocol,
    /// Amount moved.
    pub amount: Amount,
    /// Unix timestamp of acceptance.
    pub timestamp: u64,
}

/// Published when the destination confirms delivery.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferCompleted {
    /// Transfer record id.
    pub transfer_id: Hash,
    /// Unix timestamp of confirmation.
    pub timestamp: u64,
}

/// Published when a transfer fails.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferFailed {
    /// Transfer record id.
    pub transfer_id: Hash,
    /// Human-readable failure reason.
    pub reason: String,
    /// Unix timestamp of the failure.
    pub timestamp: u64,
}

/// Published when a burned amount is returned to the sender.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferRefunded {
    /// Transfer record id.
    pub transfer_id: Hash,
    /// Amount returned.
    pub amount: Amount,
    /// Unix timestamp of the refund.
    pub timestamp: u64,
}

/// Event sink - outbound port.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// A bridge request was accepted and dispatched.
    async fn transfer_initiated(&self, event: TransferInitiated);

    /// A transfer was confirmed delivered.
    async fn transfer_completed(&self, event: TransferCompleted);

    /// A transfer failed.
    async fn transfer_failed(&self, event: TransferFailed);

    /// A burned amount was refunded.
    async fn transfer_refunded(&self, event: TransferRefunded);
}

/// Default sink: structured log lines.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn transfer_initiated(&self, event: TransferInitiated) {
        info!(
            transfer_id = %shared_types::short_hash(&event.transfer_id),
            dest = %event.dest_chain,
            protocol = %event.protocol,
            amount = event.amount,
            "transfer initiated"
        );
    }

    async fn transfer_completed(&self, event: TransferCompleted) {
        info!(
            transfer_id = %shared_types::short_hash(&event.transfer_id),
            "transfer completed"
        );
    }

    async fn transfer_failed(&self, event: TransferFailed) {
        info!(
            transfer_id = %shared_types::short_hash(&event.transfer_id),
            reason = %event.reason,
            "transfer failed"
        );
    }

    async fn transfer_refunded(&self, event: TransferRefunded) {
        info!(
            transfer_id = %shared_types::short_hash(&event.transfer_id),
            amount = event.amount,
            "transfer refunded"
        );
    }
}

/// Recording sink for tests.
#[derive(Default)]
pub struct RecordingEventSink {
    /// Initiated events, in emission order.
    pub initiated: Mutex<Vec<TransferInitiated>>,
    /// Completed events, in emission order.
    pub completed: Mutex<Vec<TransferCompleted>>,
    /// Failed events, in emission order.
    pub failed: Mutex<Vec<TransferFailed>>,
    /// Refunded events, in emission order.
    pub refunded: Mutex<Vec<TransferRefunded>>,
}

impl RecordingEventSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn transfer_initiated(&self, event: TransferInitiated) {
        self.initiated.lock().push(event);
    }

    async fn transfer_completed(&self, event: TransferCompleted) {
        self.completed.lock().push(event);
    }

    async fn transfer_failed(&self, event: TransferFailed) {
        self.failed.lock().push(event);
    }

    async fn transfer_refunded(&self, event: TransferRefunded) {
        self.refunded.lock().push(event);
    }
}
