//! # Replay Idempotence and Refund Saga
//!
//! The two failure-containment guarantees: a duplicated delivery mints
//! exactly once, and a dispatch failure after the burn refunds before the
//! error surfaces.

use super::harness::{TwoChainHarness, ALICE, BOB};
use lb_01_rate_limiter::RateLimitConfig;
use lb_02_protocol_adapters::{AdapterError, TokenLedger};
use lb_03_bridge_router::{RouterError, TransferStatus};

#[tokio::test]
async fn test_duplicate_delivery_mints_exactly_once() {
    let harness = TwoChainHarness::new().await;
    harness.bridge(100).await.unwrap();

    harness.deliver_last().await.unwrap();
    assert_eq!(harness.dest.ledger.total_minted().await, 100);

    // The relayer redelivers the same message.
    let replay = harness.deliver_last().await;
    assert!(matches!(
        replay,
        Err(AdapterError::NonceAlreadyProcessed { .. })
    ));
    assert_eq!(harness.dest.ledger.total_minted().await, 100);
    assert_eq!(harness.dest.ledger.balance_of(&BOB).await, 100);
}

#[tokio::test]
async fn test_dispatch_failure_refunds_and_never_completes() {
    let harness = TwoChainHarness::new().await;
    harness.source.network.set_fail_dispatch(true);

    let result = harness.bridge(100).await;
    assert!(matches!(result, Err(RouterError::DispatchFailed { .. })));

    // Alice is whole again; the record shows the refund.
    assert_eq!(harness.source.ledger.balance_of(&ALICE).await, 10_000);
    assert_eq!(harness.source.events.refunded.lock().len(), 1);
    assert!(harness.source.events.completed.lock().is_empty());

    let record = harness
        .source
        .router
        .get_transfer(&harness.source.events.refunded.lock()[0].transfer_id)
        .unwrap();
    assert_eq!(record.status, TransferStatus::Refunded);

    // The network recovers and bridging works again.
    harness.source.network.set_fail_dispatch(false);
    harness.bridge(100).await.unwrap();
    assert_eq!(harness.source.ledger.balance_of(&ALICE).await, 9_900);
}

#[tokio::test]
async fn test_rate_limit_boundary_through_router() {
    let rate_limit = RateLimitConfig {
        window_duration_secs: 3600,
        base_max_tokens: 1_000_000,
        max_tx_per_window: 3,
        global_multiplier: 50,
        enabled: true,
    };
    let harness = TwoChainHarness::with_rate_limit(rate_limit).await;

    // Bridge counts against (sender, bridge) and burn against (sender,
    // burn); the bridge scope has the tighter count here.
    for _ in 0..3 {
        harness.bridge(10).await.unwrap();
    }
    let fourth = harness.bridge(10).await;
    assert!(matches!(fourth, Err(RouterError::RateLimited(_))));

    // A new window opens and the same account can bridge again.
    harness.clock.advance(3601);
    harness.bridge(10).await.unwrap();
}

#[tokio::test]
async fn test_failed_bridge_does_not_consume_window_capacity() {
    let rate_limit = RateLimitConfig {
        window_duration_secs: 3600,
        base_max_tokens: 300,
        max_tx_per_window: 100,
        global_multiplier: 50,
        enabled: true,
    };
    let harness = TwoChainHarness::with_rate_limit(rate_limit).await;
    harness.source.network.set_fail_dispatch(true);

    // Each failed attempt is compensated, so the token window stays open.
    for _ in 0..5 {
        let result = harness.bridge(200).await;
        assert!(matches!(result, Err(RouterError::DispatchFailed { .. })));
    }

    harness.source.network.set_fail_dispatch(false);
    harness.bridge(200).await.unwrap();
}
