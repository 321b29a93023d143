//! # Two-Chain Test Harness
//!
//! A source node (Ethereum) and a destination node (Arbitrum), each with
//! its own ledger, limiter, router, and LayerZero adapter, joined by the
//! mock network endpoints. Delivering a dispatched message by hand stands
//! in for the external relayer.

use async_trait::async_trait;
use lb_01_rate_limiter::{RateLimitConfig, SlidingWindowLimiter};
use lb_02_protocol_adapters::adapters::layerzero::LayerZeroConfig;
use lb_02_protocol_adapters::{
    AdapterDependencies, AdapterError, BridgeAdapter, InMemoryLedger, LayerZeroAdapter,
    MockMessagingNetwork, TokenLedger,
};
use lb_03_bridge_router::{
    AdapterId, AdminCap, BridgeRouter, EventSink, RecordingEventSink, RouterDependencies,
    RouterError,
};
use lb_04_supply_oracle::Pausable;
use shared_types::{Address, Amount, ChainId, Hash, ManualClock, Protocol, TimeSource};
use std::sync::Arc;

/// Bridging user on the source chain.
pub const ALICE: Address = [0x11; 20];
/// Recipient on the destination chain.
pub const BOB: Address = [0x22; 20];
/// Bridge endpoint address on the source chain (trusted remote for dest).
pub const SOURCE_ENDPOINT: Address = [0xE1; 20];
/// Bridge endpoint address on the destination chain (trusted remote for source).
pub const DEST_ENDPOINT: Address = [0xE2; 20];

/// One chain's full stack.
pub struct ChainNode {
    /// The chain this node serves.
    pub chain: ChainId,
    /// Local token ledger.
    pub ledger: Arc<InMemoryLedger>,
    /// Local rate limiter.
    pub limiter: Arc<SlidingWindowLimiter>,
    /// The LayerZero endpoint on this chain.
    pub network: Arc<MockMessagingNetwork>,
    /// The LayerZero adapter.
    pub adapter: Arc<LayerZeroAdapter>,
    /// The routing service.
    pub router: Arc<BridgeRouter>,
    /// Router admin capability.
    pub router_cap: AdminCap,
    /// Identity issued to the adapter.
    pub adapter_id: AdapterId,
    /// Recorded router events.
    pub events: Arc<RecordingEventSink>,
}

impl ChainNode {
    /// Build one node.
    pub fn new(chain: ChainId, clock: Arc<ManualClock>, rate_limit: RateLimitConfig) -> Self {
        let limiter = Arc::new(SlidingWindowLimiter::new(
            rate_limit,
            Arc::clone(&clock) as Arc<dyn TimeSource>,
        ));
        let ledger = Arc::new(InMemoryLedger::new());
        let network = Arc::new(MockMessagingNetwork::new(30, 60));

        let adapter = Arc::new(LayerZeroAdapter::new(
            chain,
            AdapterDependencies {
                limiter: Arc::clone(&limiter),
                ledger: Arc::clone(&ledger) as Arc<dyn TokenLedger>,
                network: Arc::clone(&network) as _,
            },
            LayerZeroConfig::default(),
        ));

        let events = Arc::new(RecordingEventSink::new());
        let (router, router_cap) = BridgeRouter::new(RouterDependencies {
            local_chain: chain,
            limiter: Arc::clone(&limiter),
            events: Arc::clone(&events) as Arc<dyn EventSink>,
            clock: Arc::clone(&clock) as Arc<dyn TimeSource>,
        });
        let router = Arc::new(router);
        let adapter_id =
            router.register_adapter(&router_cap, Arc::clone(&adapter) as Arc<dyn BridgeAdapter>);

        Self {
            chain,
            ledger,
            limiter,
            network,
            adapter,
            router,
            router_cap,
            adapter_id,
            events,
        }
    }
}

/// Source and destination wired together.
pub struct TwoChainHarness {
    /// Shared manual clock.
    pub clock: Arc<ManualClock>,
    /// Ethereum node; Alice starts funded here.
    pub source: ChainNode,
    /// Arbitrum node.
    pub dest: ChainNode,
}

impl TwoChainHarness {
    /// Build the two-chain world with default rate limits.
    pub async fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig::default()).await
    }

    /// Build the two-chain world with a specific rate limit config.
    pub async fn with_rate_limit(rate_limit: RateLimitConfig) -> Self {
        let clock = Arc::new(ManualClock::new(100_000));
        let source = ChainNode::new(ChainId::Ethereum, Arc::clone(&clock), rate_limit.clone());
        let dest = ChainNode::new(ChainId::Arbitrum, Arc::clone(&clock), rate_limit);

        source
            .router
            .set_chain_support(&source.router_cap, ChainId::Arbitrum, Protocol::LayerZero, true);
        dest.router
            .set_chain_support(&dest.router_cap, ChainId::Ethereum, Protocol::LayerZero, true);

        // Each side only accepts messages from the other's endpoint.
        source
            .adapter
            .core()
            .trusted_remotes()
            .set(ChainId::Arbitrum, DEST_ENDPOINT);
        dest.adapter
            .core()
            .trusted_remotes()
            .set(ChainId::Ethereum, SOURCE_ENDPOINT);

        source.ledger.credit(ALICE, 10_000).await;

        Self {
            clock,
            source,
            dest,
        }
    }

    /// Alice bridges `amount` to Bob on the destination chain.
    pub async fn bridge(&self, amount: Amount) -> Result<Hash, RouterError> {
        self.source
            .router
            .bridge_token(
                ALICE,
                ChainId::Arbitrum,
                BOB,
                amount,
                Protocol::LayerZero,
                10_000,
                Vec::new(),
            )
            .await
    }

    /// Deliver the most recently dispatched source message to the
    /// destination adapter, as the relayer would.
    pub async fn deliver_last(&self) -> Result<(), AdapterError> {
        let (_, message) = self
            .source
            .network
            .last_dispatched()
            .expect("no message has been dispatched");
        self.dest
            .adapter
            .handle_inbound(ChainId::Ethereum, SOURCE_ENDPOINT, &message)
            .await
    }
}

/// Router wrapper for the oracle's circuit-breaker port.
pub struct PausableRouter(pub Arc<BridgeRouter>);

#[async_trait]
impl Pausable for PausableRouter {
    fn name(&self) -> &str {
        "bridge-router"
    }

    async fn pause(&self) -> Result<(), String> {
        self.0.pause();
        Ok(())
    }
}

/// Adapter wrapper for the oracle's circuit-breaker port.
pub struct PausableAdapter(pub Arc<LayerZeroAdapter>);

#[async_trait]
impl Pausable for PausableAdapter {
    fn name(&self) -> &str {
        "layerzero-adapter"
    }

    async fn pause(&self) -> Result<(), String> {
        self.0.pause();
        Ok(())
    }
}
