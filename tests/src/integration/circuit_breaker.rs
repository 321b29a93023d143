//! # Circuit Breaker
//!
//! A lost destination mint shows up as supply drift; reconciliation must
//! pause the router and adapters, and paused components must refuse the
//! next operation.

use super::harness::{PausableAdapter, PausableRouter, TwoChainHarness, ALICE};
use lb_02_protocol_adapters::{AdapterError, BridgeAdapter, TokenLedger};
use lb_03_bridge_router::RouterError;
use lb_04_supply_oracle::{
    AlertSink, OracleConfig, Pausable, RecordingAlertSink, ReconcileOutcome, SupplyOracle,
    SupplyReport, UpdateOutcome,
};
use shared_types::{Address, ChainId, Protocol, TimeSource};
use std::sync::Arc;

const SIGNER_A: Address = [0xA1; 20];
const SIGNER_B: Address = [0xB2; 20];

struct OracleFixture {
    oracle: Arc<SupplyOracle>,
    alerts: Arc<RecordingAlertSink>,
}

async fn create_oracle(harness: &TwoChainHarness, expected: u128) -> OracleFixture {
    let alerts = Arc::new(RecordingAlertSink::new());
    let (oracle, cap) = SupplyOracle::new(
        OracleConfig {
            required_signatures: 2,
            expected_supply: expected,
            tolerance_threshold: 10,
            chains: vec![ChainId::Ethereum, ChainId::Arbitrum],
            ..Default::default()
        },
        Arc::clone(&alerts) as Arc<dyn AlertSink>,
        Arc::clone(&harness.clock) as Arc<dyn TimeSource>,
    );
    oracle.register_signer(&cap, SIGNER_A, b"secret-a".to_vec());
    oracle.register_signer(&cap, SIGNER_B, b"secret-b".to_vec());

    oracle.register_pausable(
        &cap,
        Arc::new(PausableRouter(Arc::clone(&harness.source.router))) as Arc<dyn Pausable>,
    );
    oracle.register_pausable(
        &cap,
        Arc::new(PausableAdapter(Arc::clone(&harness.source.adapter))) as Arc<dyn Pausable>,
    );
    oracle.register_pausable(
        &cap,
        Arc::new(PausableAdapter(Arc::clone(&harness.dest.adapter))) as Arc<dyn Pausable>,
    );

    OracleFixture {
        oracle: Arc::new(oracle),
        alerts,
    }
}

async fn report_both_chains(
    fixture: &OracleFixture,
    harness: &TwoChainHarness,
    eth_total: u128,
    arb_total: u128,
) {
    let now = harness.clock.now();
    for (chain, total) in [(ChainId::Ethereum, eth_total), (ChainId::Arbitrum, arb_total)] {
        let report = SupplyReport {
            chain_id: chain,
            total_supply: total,
            locked_supply: 0,
            nonce: now,
        };
        fixture
            .oracle
            .propose_update(report, SIGNER_A, &report.sign(b"secret-a"))
            .await
            .unwrap();
        let outcome = fixture
            .oracle
            .propose_update(report, SIGNER_B, &report.sign(b"secret-b"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);
    }
}

#[tokio::test]
async fn test_lost_mint_trips_the_breaker() {
    let harness = TwoChainHarness::new().await;
    let fixture = create_oracle(&harness, 10_000).await;

    // 100 burned on Ethereum, but the destination mint never landed.
    harness.bridge(100).await.unwrap();
    let eth_total = 10_000 - harness.source.ledger.total_burned().await;
    report_both_chains(&fixture, &harness, eth_total, 0).await;

    let outcome = fixture.oracle.reconcile().await;
    assert_eq!(outcome, ReconcileOutcome::MismatchPaused { deviation: 100 });
    assert_eq!(fixture.alerts.mismatches.lock().len(), 1);

    // Every registered component took the pause.
    assert!(harness.source.router.is_paused());
    assert!(harness.source.adapter.is_paused());
    assert!(harness.dest.adapter.is_paused());
}

#[tokio::test]
async fn test_paused_components_refuse_the_next_operation() {
    let harness = TwoChainHarness::new().await;
    let fixture = create_oracle(&harness, 10_000).await;

    harness.bridge(100).await.unwrap();
    let eth_total = 10_000 - harness.source.ledger.total_burned().await;
    report_both_chains(&fixture, &harness, eth_total, 0).await;
    fixture.oracle.reconcile().await;

    // Router refuses new requests.
    let bridged = harness.bridge(50).await;
    assert!(matches!(bridged, Err(RouterError::RouterPaused)));

    // The in-flight message cannot mint on the paused destination either.
    let delivered = harness.deliver_last().await;
    assert!(matches!(delivered, Err(AdapterError::Paused)));

    // Alice's balance only reflects the first, pre-pause bridge.
    assert_eq!(harness.source.ledger.balance_of(&ALICE).await, 9_900);
}

#[tokio::test]
async fn test_balanced_supply_leaves_components_running() {
    let harness = TwoChainHarness::new().await;
    let fixture = create_oracle(&harness, 10_000).await;

    harness.bridge(100).await.unwrap();
    harness.deliver_last().await.unwrap();

    let eth_total = 10_000 - harness.source.ledger.total_burned().await;
    let arb_total = harness.dest.ledger.total_minted().await;
    report_both_chains(&fixture, &harness, eth_total, arb_total).await;

    assert_eq!(
        fixture.oracle.reconcile().await,
        ReconcileOutcome::Balanced { actual: 10_000 }
    );
    assert!(!harness.source.router.is_paused());
    assert!(!harness.source.adapter.is_paused());
    assert!(fixture.alerts.mismatches.lock().is_empty());

    // The unaffected route keeps working.
    assert!(harness
        .source
        .router
        .supported_protocols(ChainId::Arbitrum)
        .contains(&Protocol::LayerZero));
    harness.bridge(50).await.unwrap();
}
