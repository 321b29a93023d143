//! # Adapter Core
//!
//! The burn/mint pipeline shared by every protocol adapter. Each adapter
//! owns one `AdapterCore`; protocol-specific framing, chain coverage, and
//! fee modelling stay in the adapter itself.
//!
//! ## Ordering invariants
//!
//! - Outbound: validate, reserve rate-limit capacity, burn, dispatch. A
//!   dispatch failure re-mints and releases the reservation before the
//!   error surfaces, so no entry point can strand burned funds.
//! - Inbound: verify trusted remote, reserve capacity, consume the nonce,
//!   mint. The nonce is consumed before the mint, so a re-entrant delivery
//!   of the same message can never double-mint.

use crate::domain::{
    AdapterError, BridgePayload, OutboundNonceSequence, ProcessedNonceRegistry, TrustedRemotes,
};
use crate::ports::{BridgeOutRequest, FeeQuote, MessagingNetwork, TokenLedger};
use lb_01_rate_limiter::SlidingWindowLimiter;
use serde::{Deserialize, Serialize};
use shared_types::{is_zero_address, Amount, ChainId, OperationType, Protocol};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Protocol fee model layered on top of the network transport quote.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FeeModel {
    /// Flat protocol fee.
    pub base_fee: Amount,
    /// Amount-proportional fee in basis points.
    pub fee_bps: u32,
    /// Protocol overhead added to the transport's delivery estimate.
    pub overhead_secs: u64,
}

impl FeeModel {
    /// Combine this model with a transport quote.
    pub fn quote(&self, amount: Amount, transport: FeeQuote) -> FeeQuote {
        let proportional = amount.saturating_mul(self.fee_bps as u128) / 10_000;
        FeeQuote {
            fee: self
                .base_fee
                .saturating_add(proportional)
                .saturating_add(transport.fee),
            estimated_time_secs: transport.estimated_time_secs + self.overhead_secs,
        }
    }
}

/// Dependencies shared by all adapters on one ledger.
pub struct AdapterDependencies {
    /// Sliding-window limiter gating mint and burn.
    pub limiter: Arc<SlidingWindowLimiter>,
    /// The local token ledger capability.
    pub ledger: Arc<dyn TokenLedger>,
    /// The protocol's network endpoint.
    pub network: Arc<dyn MessagingNetwork>,
}

/// Shared state and pipeline for one protocol adapter.
pub struct AdapterCore {
    protocol: Protocol,
    local_chain: ChainId,
    limiter: Arc<SlidingWindowLimiter>,
    ledger: Arc<dyn TokenLedger>,
    network: Arc<dyn MessagingNetwork>,
    nonces: ProcessedNonceRegistry,
    outbound_nonce: OutboundNonceSequence,
    trusted: TrustedRemotes,
    paused: AtomicBool,
}

impl AdapterCore {
    /// Create a core for one protocol on one ledger.
    pub fn new(protocol: Protocol, local_chain: ChainId, deps: AdapterDependencies) -> Self {
        Self {
            protocol,
            local_chain,
            limiter: deps.limiter,
            ledger: deps.ledger,
            network: deps.network,
            nonces: ProcessedNonceRegistry::new(),
            outbound_nonce: OutboundNonceSequence::new(),
            trusted: TrustedRemotes::new(),
            paused: AtomicBool::new(false),
        }
    }

    /// The protocol this core serves.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The chain whose ledger this core mints and burns on.
    pub fn local_chain(&self) -> ChainId {
        self.local_chain
    }

    /// The network endpoint for fee quotes.
    pub fn network(&self) -> &Arc<dyn MessagingNetwork> {
        &self.network
    }

    /// The trusted-remote table for admin wiring.
    pub fn trusted_remotes(&self) -> &TrustedRemotes {
        &self.trusted
    }

    /// The consumed-nonce registry.
    pub fn processed_nonces(&self) -> &ProcessedNonceRegistry {
        &self.nonces
    }

    /// Stop accepting operations.
    pub fn pause(&self) {
        warn!(protocol = %self.protocol, "adapter paused");
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Resume accepting operations.
    pub fn resume(&self) {
        info!(protocol = %self.protocol, "adapter resumed");
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Whether operations are currently refused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn ensure_active(&self) -> Result<(), AdapterError> {
        if self.is_paused() {
            return Err(AdapterError::Paused);
        }
        Ok(())
    }

    /// Burn locally and dispatch, compensating on dispatch failure.
    ///
    /// `required_fee` is the adapter's own quote for this transfer; `frame`
    /// wraps the canonical payload in the protocol's wire envelope.
    pub async fn bridge_out(
        &self,
        request: &BridgeOutRequest,
        required_fee: Amount,
        frame: impl Fn(&BridgePayload) -> Vec<u8>,
    ) -> Result<Uuid, AdapterError> {
        self.ensure_active()?;

        if is_zero_address(&request.recipient) {
            return Err(AdapterError::ZeroRecipient);
        }
        if request.amount == 0 {
            return Err(AdapterError::ZeroAmount);
        }
        if request.fee_paid < required_fee {
            return Err(AdapterError::InsufficientFee {
                paid: request.fee_paid,
                required: required_fee,
            });
        }

        self.limiter
            .check_and_commit(&request.sender, OperationType::Burn, request.amount)?;

        if let Err(e) = self.ledger.burn(request.sender, request.amount).await {
            self.limiter
                .release(&request.sender, OperationType::Burn, request.amount);
            return Err(AdapterError::Ledger(e));
        }

        let payload = BridgePayload {
            recipient: request.recipient,
            amount: request.amount,
            nonce: self.outbound_nonce.next(request.dest_chain),
        };
        let message = frame(&payload);

        match self.network.dispatch(request.dest_chain, message).await {
            Ok(correlation_id) => {
                info!(
                    protocol = %self.protocol,
                    dest = %request.dest_chain,
                    amount = request.amount,
                    nonce = payload.nonce,
                    %correlation_id,
                    "outbound message dispatched"
                );
                Ok(correlation_id)
            }
            Err(e) => {
                // Compensate: the burn already happened, undo it before
                // surfacing the dispatch failure.
                if let Err(mint_err) = self.ledger.mint(request.sender, request.amount).await {
                    error!(
                        protocol = %self.protocol,
                        amount = request.amount,
                        %mint_err,
                        "compensating re-mint failed after dispatch error"
                    );
                }
                self.limiter
                    .release(&request.sender, OperationType::Burn, request.amount);
                warn!(
                    protocol = %self.protocol,
                    dest = %request.dest_chain,
                    amount = request.amount,
                    "dispatch failed, burn compensated"
                );
                Err(e)
            }
        }
    }

    /// Validate an inbound payload and mint.
    ///
    /// The caller (the protocol adapter) has already stripped its wire
    /// envelope and decoded the canonical payload. The nonce stays consumed
    /// even if the final mint fails; that deficit is the supply oracle's
    /// job to surface, not a replay opportunity.
    pub async fn handle_inbound(
        &self,
        origin_chain: ChainId,
        remote_sender: shared_types::Address,
        payload: &BridgePayload,
    ) -> Result<(), AdapterError> {
        self.ensure_active()?;
        self.trusted.verify(origin_chain, &remote_sender)?;

        if payload.amount == 0 {
            return Err(AdapterError::ZeroAmount);
        }
        if is_zero_address(&payload.recipient) {
            return Err(AdapterError::ZeroRecipient);
        }

        // Fast path so an obvious replay reports as one even when the rate
        // limiter would also have rejected. The authoritative check is the
        // atomic mark below.
        if self.nonces.is_processed(origin_chain, payload.nonce) {
            return Err(AdapterError::NonceAlreadyProcessed {
                chain: origin_chain,
                nonce: payload.nonce,
            });
        }

        self.limiter
            .check_and_commit(&payload.recipient, OperationType::Mint, payload.amount)?;

        if !self.nonces.check_and_mark(origin_chain, payload.nonce) {
            self.limiter
                .release(&payload.recipient, OperationType::Mint, payload.amount);
            return Err(AdapterError::NonceAlreadyProcessed {
                chain: origin_chain,
                nonce: payload.nonce,
            });
        }

        if let Err(e) = self.ledger.mint(payload.recipient, payload.amount).await {
            self.limiter
                .release(&payload.recipient, OperationType::Mint, payload.amount);
            return Err(AdapterError::Ledger(e));
        }

        debug!(
            protocol = %self.protocol,
            origin = %origin_chain,
            amount = payload.amount,
            nonce = payload.nonce,
            "inbound message minted"
        );
        Ok(())
    }
}
