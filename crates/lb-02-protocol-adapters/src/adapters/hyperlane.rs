//! # Hyperlane Adapter
//!
//! Mailbox messaging addressed by u32 domains, which reuse the chains'
//! native network ids. The mailbox accepts any sender by default, so the
//! trusted-remote check carries the whole authentication burden here.

use crate::core::{AdapterCore, AdapterDependencies, FeeModel};
use crate::domain::{AdapterError, BridgePayload};
use crate::ports::{BridgeAdapter, BridgeOutRequest, FeeQuote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Protocol};
use uuid::Uuid;

/// Wire version this adapter emits and accepts.
const MAILBOX_VERSION: u8 = 3;

/// Hyperlane adapter configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HyperlaneConfig {
    /// Protocol fee model.
    pub fee_model: FeeModel,
    /// Smallest accepted transfer.
    pub min_transfer: Amount,
    /// Largest accepted transfer.
    pub max_transfer: Amount,
}

impl Default for HyperlaneConfig {
    fn default() -> Self {
        Self {
            fee_model: FeeModel {
                base_fee: 100,
                fee_bps: 8,
                overhead_secs: 180,
            },
            min_transfer: 1,
            max_transfer: 1_000_000,
        }
    }
}

/// Bridge adapter speaking the Hyperlane mailbox protocol.
pub struct HyperlaneAdapter {
    core: AdapterCore,
    config: HyperlaneConfig,
}

impl HyperlaneAdapter {
    /// Trust-model ranking: deployment-configurable security modules.
    pub const SECURITY_LEVEL: u8 = 1;

    /// Create an adapter bound to one local ledger.
    pub fn new(local_chain: ChainId, deps: AdapterDependencies, config: HyperlaneConfig) -> Self {
        Self {
            core: AdapterCore::new(Protocol::Hyperlane, local_chain, deps),
            config,
        }
    }

    /// Shared state access for admin wiring (trusted remotes, registries).
    pub fn core(&self) -> &AdapterCore {
        &self.core
    }

    /// Mailbox domain for a chain. Domains mirror native network ids.
    pub fn domain(chain: ChainId) -> u32 {
        match chain {
            ChainId::Ethereum => 1,
            ChainId::Optimism => 10,
            ChainId::Polygon => 137,
            ChainId::Base => 8453,
            ChainId::Arbitrum => 42161,
        }
    }

    fn chain_from_domain(domain: u32) -> Option<ChainId> {
        ChainId::ALL
            .into_iter()
            .find(|chain| Self::domain(*chain) == domain)
    }

    fn frame(&self, payload: &BridgePayload, dest_chain: ChainId) -> Vec<u8> {
        let origin = Self::domain(self.core.local_chain());
        let dest = Self::domain(dest_chain);

        let body = payload.encode();
        let mut message = Vec::with_capacity(9 + body.len());
        message.push(MAILBOX_VERSION);
        message.extend_from_slice(&origin.to_be_bytes());
        message.extend_from_slice(&dest.to_be_bytes());
        message.extend_from_slice(&body);
        message
    }

    fn unframe(
        &self,
        origin_chain: ChainId,
        message: &[u8],
    ) -> Result<BridgePayload, AdapterError> {
        if message.len() < 9 {
            return Err(AdapterError::MalformedPayload(
                "message shorter than header".to_string(),
            ));
        }
        if message[0] != MAILBOX_VERSION {
            return Err(AdapterError::MalformedPayload(format!(
                "unknown message version {}",
                message[0]
            )));
        }

        let origin = u32::from_be_bytes([message[1], message[2], message[3], message[4]]);
        match Self::chain_from_domain(origin) {
            Some(chain) if chain == origin_chain => {}
            _ => {
                return Err(AdapterError::MalformedPayload(format!(
                    "origin domain {} does not match origin chain {}",
                    origin, origin_chain
                )))
            }
        }

        let dest = u32::from_be_bytes([message[5], message[6], message[7], message[8]]);
        if dest != Self::domain(self.core.local_chain()) {
            return Err(AdapterError::MalformedPayload(format!(
                "destination domain {} is not this chain",
                dest
            )));
        }

        BridgePayload::decode(&message[9..])
    }

    fn ensure_bounds(&self, amount: Amount) -> Result<(), AdapterError> {
        if amount < self.config.min_transfer || amount > self.config.max_transfer {
            return Err(AdapterError::TransferOutOfBounds {
                amount,
                min: self.config.min_transfer,
                max: self.config.max_transfer,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BridgeAdapter for HyperlaneAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Hyperlane
    }

    fn security_level(&self) -> u8 {
        Self::SECURITY_LEVEL
    }

    fn supports_chain(&self, chain: ChainId) -> bool {
        chain != self.core.local_chain()
    }

    fn min_transfer(&self) -> Amount {
        self.config.min_transfer
    }

    fn max_transfer(&self) -> Amount {
        self.config.max_transfer
    }

    async fn estimate_fee(
        &self,
        dest_chain: ChainId,
        amount: Amount,
        data: &[u8],
    ) -> Result<FeeQuote, AdapterError> {
        if !self.supports_chain(dest_chain) {
            return Err(AdapterError::UnsupportedChain(dest_chain));
        }
        self.ensure_bounds(amount)?;

        let body_len = BridgePayload {
            recipient: [0u8; 20],
            amount,
            nonce: 0,
        }
        .encode()
        .len();
        let payload_len = 9 + body_len + data.len();
        let transport = self.core.network().estimate_fee(dest_chain, payload_len).await?;
        Ok(self.config.fee_model.quote(amount, transport))
    }

    async fn bridge_out(&self, request: BridgeOutRequest) -> Result<Uuid, AdapterError> {
        let quote = self
            .estimate_fee(request.dest_chain, request.amount, &request.data)
            .await?;
        let dest_chain = request.dest_chain;
        self.core
            .bridge_out(&request, quote.fee, |payload| self.frame(payload, dest_chain))
            .await
    }

    async fn handle_inbound(
        &self,
        origin_chain: ChainId,
        remote_sender: Address,
        message: &[u8],
    ) -> Result<(), AdapterError> {
        let payload = self.unframe(origin_chain, message)?;
        self.core
            .handle_inbound(origin_chain, remote_sender, &payload)
            .await
    }

    fn pause(&self) {
        self.core.pause();
    }

    fn resume(&self) {
        self.core.resume();
    }

    fn is_paused(&self) -> bool {
        self.core.is_paused()
    }
}
