//! # Axelar Adapter
//!
//! Gateway messaging addressed by chain name strings, the way the gateway
//! contracts do. Names keep the registry's historical casing, so matching
//! is exact, not case-folded.

use crate::core::{AdapterCore, AdapterDependencies, FeeModel};
use crate::domain::{AdapterError, BridgePayload};
use crate::ports::{BridgeAdapter, BridgeOutRequest, FeeQuote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Protocol};
use uuid::Uuid;

/// Axelar adapter configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AxelarConfig {
    /// Protocol fee model.
    pub fee_model: FeeModel,
    /// Smallest accepted transfer.
    pub min_transfer: Amount,
    /// Largest accepted transfer.
    pub max_transfer: Amount,
}

impl Default for AxelarConfig {
    fn default() -> Self {
        Self {
            fee_model: FeeModel {
                base_fee: 150,
                fee_bps: 20,
                overhead_secs: 300,
            },
            min_transfer: 1,
            max_transfer: 2_000_000,
        }
    }
}

/// Bridge adapter speaking the Axelar gateway protocol.
pub struct AxelarAdapter {
    core: AdapterCore,
    config: AxelarConfig,
}

impl AxelarAdapter {
    /// Trust-model ranking: proof-of-stake validator set.
    pub const SECURITY_LEVEL: u8 = 2;

    /// Create an adapter bound to one local ledger.
    pub fn new(local_chain: ChainId, deps: AdapterDependencies, config: AxelarConfig) -> Self {
        Self {
            core: AdapterCore::new(Protocol::Axelar, local_chain, deps),
            config,
        }
    }

    /// Shared state access for admin wiring (trusted remotes, registries).
    pub fn core(&self) -> &AdapterCore {
        &self.core
    }

    /// Gateway registry name, if the network serves the chain.
    ///
    /// Optimism is deliberately absent: this deployment does not run a
    /// gateway route there. Casing follows the registry (older chains are
    /// capitalized).
    pub fn gateway_name(chain: ChainId) -> Option<&'static str> {
        match chain {
            ChainId::Ethereum => Some("Ethereum"),
            ChainId::Polygon => Some("Polygon"),
            ChainId::Arbitrum => Some("arbitrum"),
            ChainId::Base => Some("base"),
            ChainId::Optimism => None,
        }
    }

    fn chain_from_name(name: &str) -> Option<ChainId> {
        ChainId::ALL
            .into_iter()
            .find(|chain| Self::gateway_name(*chain) == Some(name))
    }

    fn frame(&self, payload: &BridgePayload, dest_chain: ChainId) -> Vec<u8> {
        let source = Self::gateway_name(self.core.local_chain()).unwrap_or_default();
        let dest = Self::gateway_name(dest_chain).unwrap_or_default();

        let body = payload.encode();
        let mut message = Vec::with_capacity(2 + source.len() + dest.len() + body.len());
        message.push(source.len() as u8);
        message.extend_from_slice(source.as_bytes());
        message.push(dest.len() as u8);
        message.extend_from_slice(dest.as_bytes());
        message.extend_from_slice(&body);
        message
    }

    fn unframe(
        &self,
        origin_chain: ChainId,
        message: &[u8],
    ) -> Result<BridgePayload, AdapterError> {
        let (source_name, rest) = Self::read_name(message)?;
        let (dest_name, body) = Self::read_name(rest)?;

        let claimed = Self::chain_from_name(source_name).ok_or_else(|| {
            AdapterError::MalformedPayload(format!("unknown source chain name {source_name:?}"))
        })?;
        if claimed != origin_chain {
            return Err(AdapterError::MalformedPayload(format!(
                "source chain {} does not match origin chain {}",
                claimed, origin_chain
            )));
        }

        let local_name = Self::gateway_name(self.core.local_chain())
            .ok_or(AdapterError::UnsupportedChain(self.core.local_chain()))?;
        if dest_name != local_name {
            return Err(AdapterError::MalformedPayload(format!(
                "destination chain {dest_name:?} is not this chain"
            )));
        }

        BridgePayload::decode(body)
    }

    fn read_name(bytes: &[u8]) -> Result<(&str, &[u8]), AdapterError> {
        let (&len, rest) = bytes.split_first().ok_or_else(|| {
            AdapterError::MalformedPayload("message shorter than header".to_string())
        })?;
        let len = len as usize;
        if rest.len() < len {
            return Err(AdapterError::MalformedPayload(
                "truncated chain name".to_string(),
            ));
        }
        let name = std::str::from_utf8(&rest[..len])
            .map_err(|_| AdapterError::MalformedPayload("chain name is not utf-8".to_string()))?;
        Ok((name, &rest[len..]))
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
impl BridgeAdapter for AxelarAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Axelar
    }

    fn security_level(&self) -> u8 {
        Self::SECURITY_LEVEL
    }

    fn supports_chain(&self, chain: ChainId) -> bool {
        chain != self.core.local_chain() && Self::gateway_name(chain).is_some()
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

        let source_len = Self::gateway_name(self.core.local_chain())
            .map(str::len)
            .unwrap_or_default();
        let dest_len = Self::gateway_name(dest_chain).map(str::len).unwrap_or_default();
        let body_len = BridgePayload {
            recipient: [0u8; 20],
            amount,
            nonce: 0,
        }
        .encode()
        .len();
        let payload_len = 2 + source_len + dest_len + body_len + data.len();

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
