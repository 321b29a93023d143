//! # LayerZero Adapter
//!
//! Endpoint-id based messaging. Messages carry a one-byte version and the
//! source/destination endpoint ids, mirroring how the endpoint contract
//! addresses chains.

use crate::core::{AdapterCore, AdapterDependencies, FeeModel};
use crate::domain::{AdapterError, BridgePayload};
use crate::ports::{BridgeAdapter, BridgeOutRequest, FeeQuote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Protocol};
use uuid::Uuid;

/// Wire version this adapter emits and accepts.
const MSG_VERSION: u8 = 1;

/// LayerZero adapter configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LayerZeroConfig {
    /// Protocol fee model.
    pub fee_model: FeeModel,
    /// Smallest accepted transfer.
    pub min_transfer: Amount,
    /// Largest accepted transfer.
    pub max_transfer: Amount,
}

impl Default for LayerZeroConfig {
    fn default() -> Self {
        Self {
            fee_model: FeeModel {
                base_fee: 200,
                fee_bps: 10,
                overhead_secs: 120,
            },
            min_transfer: 1,
            max_transfer: 5_000_000,
        }
    }
}

/// Bridge adapter speaking the LayerZero endpoint protocol.
pub struct LayerZeroAdapter {
    core: AdapterCore,
    config: LayerZeroConfig,
}

impl LayerZeroAdapter {
    /// Trust-model ranking: configurable oracle + relayer pair.
    pub const SECURITY_LEVEL: u8 = 2;

    /// Create an adapter bound to one local ledger.
    pub fn new(local_chain: ChainId, deps: AdapterDependencies, config: LayerZeroConfig) -> Self {
        Self {
            core: AdapterCore::new(Protocol::LayerZero, local_chain, deps),
            config,
        }
    }

    /// Shared state access for admin wiring (trusted remotes, registries).
    pub fn core(&self) -> &AdapterCore {
        &self.core
    }

    /// Endpoint id for a chain, if LayerZero serves it.
    pub fn endpoint_id(chain: ChainId) -> Option<u16> {
        match chain {
            ChainId::Ethereum => Some(101),
            ChainId::Polygon => Some(109),
            ChainId::Arbitrum => Some(110),
            ChainId::Optimism => Some(111),
            ChainId::Base => Some(184),
        }
    }

    fn frame(&self, payload: &BridgePayload, dest_chain: ChainId) -> Vec<u8> {
        let src = Self::endpoint_id(self.core.local_chain()).unwrap_or_default();
        let dst = Self::endpoint_id(dest_chain).unwrap_or_default();

        let body = payload.encode();
        let mut message = Vec::with_capacity(5 + body.len());
        message.push(MSG_VERSION);
        message.extend_from_slice(&src.to_be_bytes());
        message.extend_from_slice(&dst.to_be_bytes());
        message.extend_from_slice(&body);
        message
    }

    fn unframe(
        &self,
        origin_chain: ChainId,
        message: &[u8],
    ) -> Result<BridgePayload, AdapterError> {
        if message.len() < 5 {
            return Err(AdapterError::MalformedPayload(
                "message shorter than header".to_string(),
            ));
        }
        if message[0] != MSG_VERSION {
            return Err(AdapterError::MalformedPayload(format!(
                "unknown message version {}",
                message[0]
            )));
        }

        let src = u16::from_be_bytes([message[1], message[2]]);
        let expected_src = Self::endpoint_id(origin_chain)
            .ok_or(AdapterError::UnsupportedChain(origin_chain))?;
        if src != expected_src {
            return Err(AdapterError::MalformedPayload(format!(
                "source endpoint {} does not match origin chain {}",
                src, origin_chain
            )));
        }

        let dst = u16::from_be_bytes([message[3], message[4]]);
        let local = Self::endpoint_id(self.core.local_chain())
            .ok_or(AdapterError::UnsupportedChain(self.core.local_chain()))?;
        if dst != local {
            return Err(AdapterError::MalformedPayload(format!(
                "destination endpoint {} is not this chain",
                dst
            )));
        }

        BridgePayload::decode(&message[5..])
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
impl BridgeAdapter for LayerZeroAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::LayerZero
    }

    fn security_level(&self) -> u8 {
        Self::SECURITY_LEVEL
    }

    fn supports_chain(&self, chain: ChainId) -> bool {
        chain != self.core.local_chain() && Self::endpoint_id(chain).is_some()
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

        // Header + canonical payload + forwarded extra data.
        let body_len = BridgePayload {
            recipient: [0u8; 20],
            amount,
            nonce: 0,
        }
        .encode()
        .len();
        let payload_len = 5 + body_len + data.len();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::ports::{MockMessagingNetwork, TokenLedger};
    use lb_01_rate_limiter::{RateLimitConfig, SlidingWindowLimiter};
    use shared_types::ManualClock;
    use std::sync::Arc;

    fn create_test_adapter(
        local_chain: ChainId,
    ) -> (LayerZeroAdapter, Arc<InMemoryLedger>, Arc<MockMessagingNetwork>) {
        let clock = Arc::new(ManualClock::new(1000));
        let limiter = Arc::new(SlidingWindowLimiter::new(RateLimitConfig::default(), clock));
        let ledger = Arc::new(InMemoryLedger::new());
        let network = Arc::new(MockMessagingNetwork::new(30, 60));

        let adapter = LayerZeroAdapter::new(
            local_chain,
            AdapterDependencies {
                limiter,
                ledger: Arc::clone(&ledger) as Arc<dyn TokenLedger>,
                network: Arc::clone(&network) as _,
            },
            LayerZeroConfig::default(),
        );
        (adapter, ledger, network)
    }

    #[test]
    fn test_endpoint_ids_cover_all_chains() {
        for chain in ChainId::ALL {
            assert!(LayerZeroAdapter::endpoint_id(chain).is_some());
        }
    }

    #[test]
    fn test_supports_remote_chains_only() {
        let (adapter, _, _) = create_test_adapter(ChainId::Ethereum);
        assert!(!adapter.supports_chain(ChainId::Ethereum));
        assert!(adapter.supports_chain(ChainId::Base));
    }

    #[tokio::test]
    async fn test_frame_unframe_roundtrip() {
        let (source, _, _) = create_test_adapter(ChainId::Ethereum);
        let (dest, _, _) = create_test_adapter(ChainId::Arbitrum);

        let payload = BridgePayload {
            recipient: [2u8; 20],
            amount: 100,
            nonce: 7,
        };
        let message = source.frame(&payload, ChainId::Arbitrum);
        let decoded = dest.unframe(ChainId::Ethereum, &message).unwrap();
        assert_eq!(decoded, payload);
    }

    #[tokio::test]
    async fn test_unframe_rejects_wrong_origin() {
        let (source, _, _) = create_test_adapter(ChainId::Ethereum);
        let (dest, _, _) = create_test_adapter(ChainId::Arbitrum);

        let payload = BridgePayload {
            recipient: [2u8; 20],
            amount: 100,
            nonce: 7,
        };
        let message = source.frame(&payload, ChainId::Arbitrum);
        // Claimed origin Base, but the frame says Ethereum.
        assert!(matches!(
            dest.unframe(ChainId::Base, &message),
            Err(AdapterError::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_unframe_rejects_unknown_version() {
        let (dest, _, _) = create_test_adapter(ChainId::Arbitrum);
        let message = vec![9u8, 0, 101, 0, 110, 1, 2, 3];
        assert!(matches!(
            dest.unframe(ChainId::Ethereum, &message),
            Err(AdapterError::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_estimate_fee_applies_model() {
        let (adapter, _, _) = create_test_adapter(ChainId::Ethereum);
        let quote = adapter
            .estimate_fee(ChainId::Arbitrum, 10_000, &[])
            .await
            .unwrap();
        // 200 base + 10 (10 bps of 10_000) + 30 transport
        assert_eq!(quote.fee, 240);
        assert_eq!(quote.estimated_time_secs, 180);
    }

    #[tokio::test]
    async fn test_estimate_fee_rejects_local_chain() {
        let (adapter, _, _) = create_test_adapter(ChainId::Ethereum);
        assert!(matches!(
            adapter.estimate_fee(ChainId::Ethereum, 100, &[]).await,
            Err(AdapterError::UnsupportedChain(ChainId::Ethereum))
        ));
    }

    #[tokio::test]
    async fn test_estimate_fee_enforces_bounds() {
        let (adapter, _, _) = create_test_adapter(ChainId::Ethereum);
        assert!(matches!(
            adapter
                .estimate_fee(ChainId::Arbitrum, 6_000_000, &[])
                .await,
            Err(AdapterError::TransferOutOfBounds { .. })
        ));
    }

    #[tokio::test]
    async fn test_bridge_out_dispatches_decodable_message() {
        let (adapter, ledger, network) = create_test_adapter(ChainId::Ethereum);
        ledger.credit([1u8; 20], 1_000).await;

        adapter
            .bridge_out(BridgeOutRequest {
                dest_chain: ChainId::Arbitrum,
                sender: [1u8; 20],
                recipient: [2u8; 20],
                amount: 100,
                fee_paid: 1_000,
                data: Vec::new(),
            })
            .await
            .unwrap();

        let (dest_chain, message) = network.last_dispatched().unwrap();
        assert_eq!(dest_chain, ChainId::Arbitrum);

        let (receiver, _, _) = create_test_adapter(ChainId::Arbitrum);
        let payload = receiver.unframe(ChainId::Ethereum, &message).unwrap();
        assert_eq!(payload.amount, 100);
        assert_eq!(payload.recipient, [2u8; 20]);
    }
}
