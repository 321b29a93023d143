//! # Inbound Port
//!
//! The contract every protocol adapter implements. The router only ever
//! talks to this trait; protocol specifics stay behind it.

use crate::domain::AdapterError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Protocol};
use uuid::Uuid;

/// A fee estimate for dispatching through one protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    /// Total protocol fee in base token units.
    pub fee: Amount,
    /// Estimated end-to-end delivery time in seconds.
    pub estimated_time_secs: u64,
}

/// Parameters for an outbound bridge operation.
#[derive(Clone, Debug)]
pub struct BridgeOutRequest {
    /// Destination chain.
    pub dest_chain: ChainId,
    /// Account whose balance is burned.
    pub sender: Address,
    /// Recipient on the destination chain.
    pub recipient: Address,
    /// Amount to move.
    pub amount: Amount,
    /// Protocol fee supplied with the call.
    pub fee_paid: Amount,
    /// Opaque extra data forwarded to the protocol.
    pub data: Vec<u8>,
}

/// Bridge adapter - inbound port. One implementation per protocol.
#[async_trait]
pub trait BridgeAdapter: Send + Sync {
    /// Which protocol this adapter speaks.
    fn protocol(&self) -> Protocol;

    /// Relative security ranking of the protocol's trust model (higher is
    /// stronger). Used by route selection only; not a cryptographic claim.
    fn security_level(&self) -> u8;

    /// Whether this adapter can reach `chain`.
    fn supports_chain(&self, chain: ChainId) -> bool;

    /// Smallest transfer the protocol accepts.
    fn min_transfer(&self) -> Amount;

    /// Largest transfer the protocol accepts.
    fn max_transfer(&self) -> Amount;

    /// Quote the fee for a transfer. Pure: must not mutate state.
    ///
    /// An error means "this route is unavailable right now"; callers must
    /// isolate it rather than propagate it.
    async fn estimate_fee(
        &self,
        dest_chain: ChainId,
        amount: Amount,
        data: &[u8],
    ) -> Result<FeeQuote, AdapterError>;

    /// Burn locally and dispatch an outbound message.
    ///
    /// Returns the adapter-local correlation id. If dispatch fails after
    /// the burn, the amount is re-minted before the error surfaces.
    async fn bridge_out(&self, request: BridgeOutRequest) -> Result<Uuid, AdapterError>;

    /// Deliver an inbound message from the trusted network endpoint.
    ///
    /// Rejects untrusted senders and replayed nonces; on success mints to
    /// the embedded recipient.
    async fn handle_inbound(
        &self,
        origin_chain: ChainId,
        remote_sender: Address,
        message: &[u8],
    ) -> Result<(), AdapterError>;

    /// Stop accepting operations.
    fn pause(&self);

    /// Resume accepting operations.
    fn resume(&self);

    /// Whether the adapter currently refuses operations.
    fn is_paused(&self) -> bool;
}
