//! # Wormhole Adapter
//!
//! Guardian-network messaging. Messages carry the emitter chain id and the
//! consistency level the origin chain publishes at; a mismatch between the
//! claimed origin and the emitter id is rejected before decoding.

use crate::core::{AdapterCore, AdapterDependencies, FeeModel};
use crate::domain::{AdapterError, BridgePayload};
use crate::ports::{BridgeAdapter, BridgeOutRequest, FeeQuote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Protocol};
use uuid::Uuid;

/// Wire version this adapter emits and accepts.
const VAA_VERSION: u8 = 1;

/// Consistency level for chains that publish at finality.
const CONSISTENCY_FINALIZED: u8 = 1;

/// Consistency level for chains that publish at the safe block.
const CONSISTENCY_SAFE: u8 = 201;

/// Wormhole adapter configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WormholeConfig {
    /// Protocol fee model.
    pub fee_model: FeeModel,
    /// Smallest accepted transfer.
    pub min_transfer: Amount,
    /// Largest accepted transfer.
    pub max_transfer: Amount,
}

impl Default for WormholeConfig {
    fn default() -> Self {
        Self {
            fee_model: FeeModel {
                base_fee: 350,
                fee_bps: 5,
                overhead_secs: 900,
            },
            min_transfer: 1,
            max_transfer: 10_000_000,
        }
    }
}

/// Bridge adapter speaking the Wormhole guardian protocol.
pub struct WormholeAdapter {
    core: AdapterCore,
    config: WormholeConfig,
}

impl WormholeAdapter {
    /// Trust-model ranking: 13-of-19 guardian attestation.
    pub const SECURITY_LEVEL: u8 = 3;

    /// Create an adapter bound to one local ledger.
    pub fn new(local_chain: ChainId, deps: AdapterDependencies, config: WormholeConfig) -> Self {
        Self {
            core: AdapterCore::new(Protocol::Wormhole, local_chain, deps),
            config,
        }
    }

    /// Shared state access for admin wiring (trusted remotes, registries).
    pub fn core(&self) -> &AdapterCore {
        &self.core
    }

    /// Wormhole chain id, if the guardian network serves the chain.
    ///
    /// Polygon is deliberately absent: this deployment does not run a
    /// guardian-attested route there.
    pub fn wormhole_chain_id(chain: ChainId) -> Option<u16> {
        match chain {
            ChainId::Ethereum => Some(2),
            ChainId::Arbitrum => Some(23),
            ChainId::Optimism => Some(24),
            ChainId::Base => Some(30),
            ChainId::Polygon => None,
        }
    }

    /// Consistency level the origin chain publishes at.
    fn consistency_level(chain: ChainId) -> u8 {
        match chain {
            ChainId::Ethereum => CONSISTENCY_FINALIZED,
            _ => CONSISTENCY_SAFE,
        }
    }

    fn frame(&self, payload: &BridgePayload) -> Vec<u8> {
        let emitter = Self::wormhole_chain_id(self.core.local_chain()).unwrap_or_default();

        let body = payload.encode();
        let mut message = Vec::with_capacity(4 + body.len());
        message.push(VAA_VERSION);
        message.extend_from_slice(&emitter.to_be_bytes());
        message.push(Self::consistency_level(self.core.local_chain()));
        message.extend_from_slice(&body);
        message
    }

    fn unframe(
        &self,
        origin_chain: ChainId,
        message: &[u8],
    ) -> Result<BridgePayload, AdapterError> {
        if message.len() < 4 {
            return Err(AdapterError::MalformedPayload(
                "message shorter than header".to_string(),
            ));
        }
        if message[0] != VAA_VERSION {
            return Err(AdapterError::MalformedPayload(format!(
                "unknown message version {}",
                message[0]
            )));
        }

        let emitter = u16::from_be_bytes([message[1], message[2]]);
        let expected = Self::wormhole_chain_id(origin_chain)
            .ok_or(AdapterError::UnsupportedChain(origin_chain))?;
        if emitter != expected {
            return Err(AdapterError::MalformedPayload(format!(
                "emitter chain {} does not match origin chain {}",
                emitter, origin_chain
            )));
        }

        let consistency = message[3];
        if consistency != Self::consistency_level(origin_chain) {
            return Err(AdapterError::MalformedPayload(format!(
                "unexpected consistency level {} for {}",
                consistency, origin_chain
            )));
        }

        BridgePayload::decode(&message[4..])
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
impl BridgeAdapter for WormholeAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Wormhole
    }

    fn security_level(&self) -> u8 {
        Self::SECURITY_LEVEL
    }

    fn supports_chain(&self, chain: ChainId) -> bool {
        chain != self.core.local_chain() && Self::wormhole_chain_id(chain).is_some()
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
        let payload_len = 4 + body_len + data.len();
        let transport = self.core.network().estimate_fee(dest_chain, payload_len).await?;
        Ok(self.config.fee_model.quote(amount, transport))
    }

    async fn bridge_out(&self, request: BridgeOutRequest) -> Result<Uuid, AdapterError> {
        let quote = self
            .estimate_fee(request.dest_chain, request.amount, &request.data)
            .await?;
        self.core
            .bridge_out(&request, quote.fee, |payload| self.frame(payload))
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
