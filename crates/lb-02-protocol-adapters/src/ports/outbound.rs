//! # Outbound Ports
//!
//! Traits for external dependencies: the messaging network endpoint and the
//! token ledger capability.

use crate::domain::AdapterError;
use crate::ports::inbound::FeeQuote;
use async_trait::async_trait;
use shared_types::{Address, Amount, ChainId};
use uuid::Uuid;

/// External messaging network endpoint - outbound port.
///
/// One implementation per protocol network. The adapter gives it fully
/// framed bytes; the endpoint is responsible for transport only.
#[async_trait]
pub trait MessagingNetwork: Send + Sync {
    /// Quote the transport fee for a message of `payload_len` bytes.
    async fn estimate_fee(
        &self,
        dest_chain: ChainId,
        payload_len: usize,
    ) -> Result<FeeQuote, AdapterError>;

    /// Hand a framed message to the network for delivery.
    ///
    /// Returns a correlation id for tracking. May block on the external
    /// network; callers treat it as slow and fallible.
    async fn dispatch(&self, dest_chain: ChainId, message: Vec<u8>) -> Result<Uuid, AdapterError>;
}

/// Token ledger capability - outbound port.
///
/// The base token's mint/burn surface, restricted to bridge components.
/// Balance and approval semantics live outside this system.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Mint `amount` to `recipient`.
    async fn mint(&self, recipient: Address, amount: Amount) -> Result<(), String>;

    /// Burn `amount` from `holder`.
    async fn burn(&self, holder: Address, amount: Amount) -> Result<(), String>;

    /// Cumulative minted amount on this ledger.
    async fn total_minted(&self) -> Amount;

    /// Cumulative burned amount on this ledger.
    async fn total_burned(&self) -> Amount;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock messaging network for testing.
pub struct MockMessagingNetwork {
    /// Flat transport fee returned by every quote.
    pub transport_fee: Amount,
    /// Estimated delivery time returned by every quote.
    pub transport_time_secs: u64,
    /// Fail all fee estimates?
    pub fail_estimates: std::sync::atomic::AtomicBool,
    /// Fail all dispatches?
    pub fail_dispatch: std::sync::atomic::AtomicBool,
    /// Every successfully dispatched message.
    pub dispatched: parking_lot::Mutex<Vec<(ChainId, Vec<u8>)>>,
}

impl MockMessagingNetwork {
    /// Create a mock with a flat fee.
    pub fn new(transport_fee: Amount, transport_time_secs: u64) -> Self {
        Self {
            transport_fee,
            transport_time_secs,
            fail_estimates: std::sync::atomic::AtomicBool::new(false),
            fail_dispatch: std::sync::atomic::AtomicBool::new(false),
            dispatched: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Make all future fee estimates fail.
    pub fn set_fail_estimates(&self, fail: bool) {
        self.fail_estimates
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Make all future dispatches fail.
    pub fn set_fail_dispatch(&self, fail: bool) {
        self.fail_dispatch
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of messages dispatched so far.
    pub fn dispatched_count(&self) -> usize {
        self.dispatched.lock().len()
    }

    /// The most recently dispatched message, if any.
    pub fn last_dispatched(&self) -> Option<(ChainId, Vec<u8>)> {
        self.dispatched.lock().last().cloned()
    }
}

#[async_trait]
impl MessagingNetwork for MockMessagingNetwork {
    async fn estimate_fee(
        &self,
        _dest_chain: ChainId,
        _payload_len: usize,
    ) -> Result<FeeQuote, AdapterError> {
        if self.fail_estimates.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AdapterError::Network("mock estimate failure".to_string()));
        }
        Ok(FeeQuote {
            fee: self.transport_fee,
            estimated_time_secs: self.transport_time_secs,
        })
    }

    async fn dispatch(&self, dest_chain: ChainId, message: Vec<u8>) -> Result<Uuid, AdapterError> {
        if self.fail_dispatch.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AdapterError::Network("mock dispatch failure".to_string()));
        }
        self.dispatched.lock().push((dest_chain, message));
        Ok(Uuid::new_v4())
    }
}
