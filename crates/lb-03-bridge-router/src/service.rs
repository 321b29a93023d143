//! # Bridge Router Service
//!
//! Route computation, transfer acceptance, and the burn/dispatch saga.
//!
//! ## Error discipline
//!
//! Rejections that happen before any funds move (validation, configuration,
//! capacity) leave no trace: the transfer record is removed and the caller
//! gets the specific error. A dispatch failure after the burn keeps the
//! record and walks it `Pending -> Failed -> Refunded`; the compensating
//! re-mint has already run inside the adapter pipeline by the time the
//! error surfaces here.

use crate::domain::{
    derive_transfer_id, select_route, BridgeOption, RoutePreference, RouterError, Transfer,
    TransferStatus,
};
use crate::events::{
    EventSink, TransferCompleted, TransferFailed, TransferInitiated, TransferRefunded,
};
use crate::state::{AdapterId, RouterState};
use lb_01_rate_limiter::SlidingWindowLimiter;
use lb_02_protocol_adapters::{AdapterError, BridgeAdapter, BridgeOutRequest};
use sha2::{Digest, Sha256};
use shared_types::{
    is_zero_address, Address, Amount, ChainId, Hash, OperationType, Protocol, TimeSource,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Capability token for administrative operations.
///
/// Issued exactly once per router; holding a reference is the authorization.
pub struct AdminCap {
    _sealed: (),
}

/// Dependencies for the router service.
pub struct RouterDependencies {
    /// The chain whose ledger this router serves.
    pub local_chain: ChainId,
    /// Sliding-window limiter for the bridge operation scope.
    pub limiter: Arc<SlidingWindowLimiter>,
    /// Event sink for published events.
    pub events: Arc<dyn EventSink>,
    /// Clock for record timestamps.
    pub clock: Arc<dyn TimeSource>,
}

/// The single entry point for bridging value between chains.
pub struct BridgeRouter {
    state: RouterState,
    local_chain: ChainId,
    limiter: Arc<SlidingWindowLimiter>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn TimeSource>,
}

impl BridgeRouter {
    /// Create a router and its admin capability.
    pub fn new(deps: RouterDependencies) -> (Self, AdminCap) {
        let router = Self {
            state: RouterState::new(),
            local_chain: deps.local_chain,
            limiter: deps.limiter,
            events: deps.events,
            clock: deps.clock,
        };
        (router, AdminCap { _sealed: () })
    }

    /// The chain whose ledger this router serves.
    pub fn local_chain(&self) -> ChainId {
        self.local_chain
    }

    // === ADMIN SURFACE ===

    /// Register (or replace) the adapter for a protocol.
    ///
    /// Returns the identity the adapter must present when reporting status
    /// updates. Replacing an adapter revokes the identities issued for the
    /// protocol before.
    pub fn register_adapter(
        &self,
        _cap: &AdminCap,
        adapter: Arc<dyn BridgeAdapter>,
    ) -> AdapterId {
        let protocol = adapter.protocol();

        let mut protocols = self.state.protocols.write();
        if !protocols.contains(&protocol) {
            protocols.push(protocol);
        }
        drop(protocols);

        self.state.adapters.write().insert(protocol, adapter);

        let mut ids = self.state.adapter_ids.write();
        ids.retain(|_, p| *p != protocol);
        let id = AdapterId::issue();
        ids.insert(id, protocol);

        info!(%protocol, adapter_id = %id, "adapter registered");
        id
    }

    /// Enable or disable a protocol for a destination chain.
    pub fn set_chain_support(
        &self,
        _cap: &AdminCap,
        chain: ChainId,
        protocol: Protocol,
        enabled: bool,
    ) {
        info!(%chain, %protocol, enabled, "chain support updated");
        self.state.support.write().insert((chain, protocol), enabled);
    }

    /// Stop accepting bridge requests.
    ///
    /// Deliberately not capability-gated: the supply oracle's circuit
    /// breaker must be able to pull this without holding admin rights.
    pub fn pause(&self) {
        warn!("router paused");
        self.state.set_paused(true);
    }

    /// Resume accepting bridge requests.
    pub fn unpause(&self, _cap: &AdminCap) {
        info!("router unpaused");
        self.state.set_paused(false);
    }

    /// Whether the router refuses new bridge requests.
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    // === QUERIES ===

    /// Protocols registered and enabled for a chain, in registration order.
    pub fn supported_protocols(&self, chain: ChainId) -> Vec<Protocol> {
        let support = self.state.support.read();
        self.state
            .protocols
            .read()
            .iter()
            .copied()
            .filter(|protocol| support.get(&(chain, *protocol)).copied().unwrap_or(false))
            .collect()
    }

    /// Compute the currently available routes to a chain.
    ///
    /// A protocol whose estimator fails (or whose adapter is paused) simply
    /// contributes no option; one broken protocol never fails the query.
    pub async fn bridge_options(&self, chain: ChainId, amount: Amount) -> Vec<BridgeOption> {
        let mut options = Vec::new();
        for protocol in self.supported_protocols(chain) {
            let adapter = match self.adapter_for(protocol) {
                Some(adapter) => adapter,
                None => continue,
            };
            if adapter.is_paused() {
                debug!(%protocol, "skipping paused adapter");
                continue;
            }
            match adapter.estimate_fee(chain, amount, &[]).await {
                Ok(quote) => options.push(BridgeOption {
                    protocol,
                    fee: quote.fee,
                    estimated_time_secs: quote.estimated_time_secs,
                    security_level: adapter.security_level(),
                    available: true,
                    min_amount: adapter.min_transfer(),
                    max_amount: adapter.max_transfer(),
                }),
                Err(e) => {
                    debug!(%protocol, %chain, error = %e, "estimator failed, dropping option");
                }
            }
        }
        options
    }

    /// Pick the best protocol for a transfer.
    pub async fn optimal_route(
        &self,
        chain: ChainId,
        amount: Amount,
        preference: RoutePreference,
    ) -> Result<Protocol, RouterError> {
        let options = self.bridge_options(chain, amount).await;
        select_route(&options, preference).ok_or(RouterError::NoRouteAvailable { chain })
    }

    /// Fetch a transfer record.
    pub fn get_transfer(&self, transfer_id: &Hash) -> Option<Transfer> {
        self.state.transfers.read().get(transfer_id).cloned()
    }

    /// Number of transfer records held.
    pub fn transfer_count(&self) -> usize {
        self.state.transfers.read().len()
    }

    // === BRIDGING ===

    /// Accept a bridge request and dispatch it through `protocol`.
    ///
    /// Returns the transfer record id. On a post-burn dispatch failure the
    /// compensating refund has completed before this returns, and the
    /// record reads `Refunded`.
    #[allow(clippy::too_many_arguments)]
    pub async fn bridge_token(
        &self,
        sender: Address,
        dest_chain: ChainId,
        recipient: Address,
        amount: Amount,
        protocol: Protocol,
        fee_paid: Amount,
        data: Vec<u8>,
    ) -> Result<Hash, RouterError> {
        if self.state.is_paused() {
            return Err(RouterError::RouterPaused);
        }
        if is_zero_address(&recipient) {
            return Err(RouterError::ZeroRecipient);
        }
        if amount == 0 {
            return Err(RouterError::ZeroAmount);
        }

        match self.state.support.read().get(&(dest_chain, protocol)).copied() {
            None => {
                return Err(RouterError::ProtocolNotConfigured {
                    chain: dest_chain,
                    protocol,
                })
            }
            Some(false) => {
                return Err(RouterError::ProtocolDisabled {
                    chain: dest_chain,
                    protocol,
                })
            }
            Some(true) => {}
        }

        let adapter = self
            .adapter_for(protocol)
            .ok_or(RouterError::ProtocolNotConfigured {
                chain: dest_chain,
                protocol,
            })?;
        if adapter.is_paused() {
            return Err(RouterError::ProtocolPaused(protocol));
        }

        self.limiter
            .check_and_commit(&sender, OperationType::Bridge, amount)?;

        let timestamp = self.clock.now();
        let sequence = self.state.next_sequence();
        let transfer_id = derive_transfer_id(
            &sender, &recipient, amount, dest_chain, protocol, timestamp, sequence,
        );

        let transfer = Transfer {
            id: transfer_id,
            sender,
            recipient,
            amount,
            source_chain: self.local_chain,
            dest_chain,
            protocol,
            status: TransferStatus::Pending,
            timestamp,
            message_hash: [0u8; 32],
            nonce: sequence,
        };
        self.state.transfers.write().insert(transfer_id, transfer);

        let request = BridgeOutRequest {
            dest_chain,
            sender,
            recipient,
            amount,
            fee_paid,
            data,
        };

        match adapter.bridge_out(request).await {
            Ok(correlation_id) => {
                let message_hash = hash_correlation(correlation_id.as_bytes());
                if let Some(record) = self.state.transfers.write().get_mut(&transfer_id) {
                    record.message_hash = message_hash;
                }

                self.events
                    .transfer_initiated(TransferInitiated {
                        transfer_id,
                        sender,
                        dest_chain,
                        protocol,
                        amount,
                        timestamp,
                    })
                    .await;
                Ok(transfer_id)
            }
            Err(AdapterError::Network(reason)) => {
                // The burn happened and the adapter re-minted. Record the
                // full saga so the audit trail shows the refund.
                self.settle_refunded(&transfer_id, amount, &reason).await;
                self.limiter
                    .release(&sender, OperationType::Bridge, amount);
                Err(RouterError::DispatchFailed {
                    source: AdapterError::Network(reason),
                })
            }
            Err(rejection) => {
                // Rejected before any funds moved; leave no partial state.
                self.state.transfers.write().remove(&transfer_id);
                self.limiter
                    .release(&sender, OperationType::Bridge, amount);
                Err(RouterError::AdapterRejected(rejection))
            }
        }
    }

    /// Report a delivery outcome for a transfer.
    ///
    /// Only identities issued by `register_adapter` are accepted, so every
    /// registered protocol can report and nothing else can.
    pub async fn update_transfer_status(
        &self,
        caller: AdapterId,
        transfer_id: Hash,
        status: TransferStatus,
    ) -> Result<(), RouterError> {
        if !self.state.is_registered_adapter(&caller) {
            return Err(RouterError::UnauthorizedStatusUpdate(caller.to_string()));
        }
        if !matches!(status, TransferStatus::Completed | TransferStatus::Failed) {
            let from = self
                .get_transfer(&transfer_id)
                .map(|t| t.status)
                .unwrap_or_default();
            return Err(RouterError::InvalidStatusTransition { from, to: status });
        }

        {
            let mut transfers = self.state.transfers.write();
            let record = transfers
                .get_mut(&transfer_id)
                .ok_or_else(|| RouterError::TransferNotFound(hex::encode(transfer_id)))?;
            record.transition_to(status)?;
        }

        let timestamp = self.clock.now();
        match status {
            TransferStatus::Completed => {
                self.events
                    .transfer_completed(TransferCompleted {
                        transfer_id,
                        timestamp,
                    })
                    .await;
            }
            TransferStatus::Failed => {
                self.events
                    .transfer_failed(TransferFailed {
                        transfer_id,
                        reason: "reported by adapter".to_string(),
                        timestamp,
                    })
                    .await;
            }
            _ => {}
        }
        Ok(())
    }

    fn adapter_for(&self, protocol: Protocol) -> Option<Arc<dyn BridgeAdapter>> {
        self.state.adapters.read().get(&protocol).cloned()
    }

    async fn settle_refunded(&self, transfer_id: &Hash, amount: Amount, reason: &str) {
        let timestamp = self.clock.now();
        {
            let mut transfers = self.state.transfers.write();
            if let Some(record) = transfers.get_mut(transfer_id) {
                // Pending -> Failed -> Refunded; both transitions are legal
                // from Pending, so failures here would indicate a logic bug.
                if let Err(e) = record
                    .transition_to(TransferStatus::Failed)
                    .and_then(|_| record.transition_to(TransferStatus::Refunded))
                {
                    warn!(error = %e, "refund settlement hit an unexpected state");
                }
            }
        }

        self.events
            .transfer_failed(TransferFailed {
                transfer_id: *transfer_id,
                reason: reason.to_string(),
                timestamp,
            })
            .await;
        self.events
            .transfer_refunded(TransferRefunded {
                transfer_id: *transfer_id,
                amount,
                timestamp,
            })
            .await;
    }
}

fn hash_correlation(bytes: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}
