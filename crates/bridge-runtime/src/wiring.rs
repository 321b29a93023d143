//! # Subsystem Wiring
//!
//! Builds the node in dependency order: clock and limiter first, then the
//! ledger and network endpoints, the four protocol adapters, the router,
//! and finally the oracle with its circuit-breaker targets.

use crate::config::{parse_address, RuntimeConfig};
use async_trait::async_trait;
use lb_01_rate_limiter::SlidingWindowLimiter;
use lb_02_protocol_adapters::adapters::axelar::AxelarConfig;
use lb_02_protocol_adapters::adapters::hyperlane::HyperlaneConfig;
use lb_02_protocol_adapters::adapters::layerzero::LayerZeroConfig;
use lb_02_protocol_adapters::adapters::wormhole::WormholeConfig;
use lb_02_protocol_adapters::{
    AdapterDependencies, AxelarAdapter, BridgeAdapter, HyperlaneAdapter, InMemoryLedger,
    LayerZeroAdapter, MessagingNetwork, MockMessagingNetwork, TokenLedger, WormholeAdapter,
};
use lb_03_bridge_router::{
    AdapterId, AdminCap, BridgeRouter, EventSink, RouterDependencies, TracingEventSink,
};
use lb_04_supply_oracle::{
    OracleAdminCap, Pausable, SupplyOracle, TracingAlertSink,
};
use shared_types::{Protocol, SystemTimeSource, TimeSource};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// A fully wired bridge node.
pub struct BridgeNode {
    /// The routing service.
    pub router: Arc<BridgeRouter>,
    /// Router admin capability.
    pub router_cap: AdminCap,
    /// The supply oracle.
    pub oracle: Arc<SupplyOracle>,
    /// Oracle admin capability.
    pub oracle_cap: OracleAdminCap,
    /// The shared rate limiter.
    pub limiter: Arc<SlidingWindowLimiter>,
    /// The local token ledger.
    pub ledger: Arc<InMemoryLedger>,
    /// Issued adapter identities by protocol.
    pub adapter_ids: HashMap<Protocol, AdapterId>,
}

/// Router wrapper implementing the oracle's circuit-breaker port.
struct RouterPausable {
    router: Arc<BridgeRouter>,
}

#[async_trait]
impl Pausable for RouterPausable {
    fn name(&self) -> &str {
        "bridge-router"
    }

    async fn pause(&self) -> Result<(), String> {
        self.router.pause();
        Ok(())
    }
}

/// Adapter wrapper implementing the oracle's circuit-breaker port.
struct AdapterPausable {
    label: String,
    adapter: Arc<dyn BridgeAdapter>,
}

#[async_trait]
impl Pausable for AdapterPausable {
    fn name(&self) -> &str {
        &self.label
    }

    async fn pause(&self) -> Result<(), String> {
        self.adapter.pause();
        Ok(())
    }
}

/// Build a node from validated configuration.
///
/// Network endpoints are in-process stand-ins here; a deployment swaps them
/// behind the same `MessagingNetwork` port without touching the wiring
/// order.
pub fn build(config: &RuntimeConfig) -> anyhow::Result<BridgeNode> {
    let clock: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);
    let local_chain = config.local_chain_id();

    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit.clone(),
        Arc::clone(&clock),
    ));
    let ledger = Arc::new(InMemoryLedger::new());

    let deps = |network: Arc<dyn MessagingNetwork>| AdapterDependencies {
        limiter: Arc::clone(&limiter),
        ledger: Arc::clone(&ledger) as Arc<dyn TokenLedger>,
        network,
    };

    let layerzero = Arc::new(LayerZeroAdapter::new(
        local_chain,
        deps(Arc::new(MockMessagingNetwork::new(30, 60))),
        LayerZeroConfig::default(),
    ));
    let wormhole = Arc::new(WormholeAdapter::new(
        local_chain,
        deps(Arc::new(MockMessagingNetwork::new(40, 600))),
        WormholeConfig::default(),
    ));
    let axelar = Arc::new(AxelarAdapter::new(
        local_chain,
        deps(Arc::new(MockMessagingNetwork::new(20, 120))),
        AxelarConfig::default(),
    ));
    let hyperlane = Arc::new(HyperlaneAdapter::new(
        local_chain,
        deps(Arc::new(MockMessagingNetwork::new(15, 90))),
        HyperlaneConfig::default(),
    ));

    let adapters: Vec<Arc<dyn BridgeAdapter>> = vec![
        Arc::clone(&layerzero) as _,
        Arc::clone(&wormhole) as _,
        Arc::clone(&axelar) as _,
        Arc::clone(&hyperlane) as _,
    ];

    let (router, router_cap) = BridgeRouter::new(RouterDependencies {
        local_chain,
        limiter: Arc::clone(&limiter),
        events: Arc::new(TracingEventSink) as Arc<dyn EventSink>,
        clock: Arc::clone(&clock),
    });
    let router = Arc::new(router);

    let mut adapter_ids = HashMap::new();
    for adapter in &adapters {
        let id = router.register_adapter(&router_cap, Arc::clone(adapter));
        adapter_ids.insert(adapter.protocol(), id);
    }

    for route in &config.routes {
        let chain = route.chain.parse().map_err(anyhow::Error::msg)?;
        let protocol = route.protocol.parse().map_err(anyhow::Error::msg)?;
        router.set_chain_support(&router_cap, chain, protocol, true);
    }

    let (oracle, oracle_cap) = SupplyOracle::new(
        config.oracle.clone(),
        Arc::new(TracingAlertSink),
        Arc::clone(&clock),
    );
    let oracle = Arc::new(oracle);

    for signer in &config.signers {
        let address = parse_address(&signer.address)?;
        oracle.register_signer(&oracle_cap, address, signer.secret.as_bytes().to_vec());
    }

    oracle.register_pausable(
        &oracle_cap,
        Arc::new(RouterPausable {
            router: Arc::clone(&router),
        }),
    );
    for adapter in &adapters {
        oracle.register_pausable(
            &oracle_cap,
            Arc::new(AdapterPausable {
                label: format!("{}-adapter", adapter.protocol()),
                adapter: Arc::clone(adapter),
            }),
        );
    }

    info!(
        local_chain = %local_chain,
        adapters = adapters.len(),
        routes = config.routes.len(),
        signers = config.signers.len(),
        "bridge node wired"
    );

    Ok(BridgeNode {
        router,
        router_cap,
        oracle,
        oracle_cap,
        limiter,
        ledger,
        adapter_ids,
    })
}
