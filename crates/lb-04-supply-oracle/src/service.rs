//! # Supply Oracle Service
//!
//! Signature collection, threshold application, and drift reconciliation.
//!
//! ## Concurrency
//!
//! Appending a vote and checking the threshold happen inside one critical
//! section per update hash, so two concurrent final votes cannot both
//! apply. Reconciliation runs on its own task and never blocks proposal
//! processing; transfer paths observe a triggered pause through each
//! component's own paused flag.

use crate::config::OracleConfig;
use crate::domain::{ChainSupply, OracleError, PendingSignatureBatch, SupplyReport, UpdateOutcome};
use crate::ports::{AlertSink, Pausable, SupplyMismatch};
use parking_lot::{Mutex, RwLock};
use shared_types::{verify_report, Address, Amount, ChainId, ReportSignature, TimeSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Capability token for oracle administration.
///
/// Issued exactly once per oracle; holding a reference is the authorization.
pub struct OracleAdminCap {
    _sealed: (),
}

/// Outcome of one reconciliation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Drift within tolerance.
    Balanced {
        /// Summed circulating supply.
        actual: Amount,
    },
    /// Drift beyond tolerance; registered components were paused.
    MismatchPaused {
        /// `|actual - expected|`.
        deviation: Amount,
    },
    /// Drift beyond tolerance, but emergency mode suppressed pausing.
    MismatchSuppressed {
        /// `|actual - expected|`.
        deviation: Amount,
    },
}

/// Multi-signer supply reconciliation service.
pub struct SupplyOracle {
    config: OracleConfig,
    /// Shared secret per registered signer.
    signers: RwLock<HashMap<Address, Vec<u8>>>,
    /// Supply record per registered chain.
    chains: RwLock<HashMap<ChainId, ChainSupply>>,
    /// Vote batches keyed by update hash.
    pending: Mutex<HashMap<shared_types::Hash, PendingSignatureBatch>>,
    /// Consumed `(chain, nonce)` pairs with their retention deadline.
    used_nonces: Mutex<HashMap<(ChainId, u64), u64>>,
    /// Components to pause on a detected mismatch.
    pausables: RwLock<Vec<Arc<dyn Pausable>>>,
    emergency_mode: AtomicBool,
    last_reconcile: AtomicU64,
    alerts: Arc<dyn AlertSink>,
    clock: Arc<dyn TimeSource>,
}

impl SupplyOracle {
    /// Create an oracle and its admin capability.
    pub fn new(
        config: OracleConfig,
        alerts: Arc<dyn AlertSink>,
        clock: Arc<dyn TimeSource>,
    ) -> (Self, OracleAdminCap) {
        let chains = config
            .chains
            .iter()
            .map(|chain| (*chain, ChainSupply::new(*chain)))
            .collect();

        // The interval clock starts now; the first update-triggered
        // reconciliation waits a full interval.
        let started_at = clock.now();
        let oracle = Self {
            config,
            signers: RwLock::new(HashMap::new()),
            chains: RwLock::new(chains),
            pending: Mutex::new(HashMap::new()),
            used_nonces: Mutex::new(HashMap::new()),
            pausables: RwLock::new(Vec::new()),
            emergency_mode: AtomicBool::new(false),
            last_reconcile: AtomicU64::new(started_at),
            alerts,
            clock,
        };
        (oracle, OracleAdminCap { _sealed: () })
    }

    // === ADMIN SURFACE ===

    /// Register a signer and its shared secret.
    pub fn register_signer(&self, _cap: &OracleAdminCap, signer: Address, secret: Vec<u8>) {
        info!(signer = %hex::encode(signer), "oracle signer registered");
        self.signers.write().insert(signer, secret);
    }

    /// Remove a signer.
    pub fn remove_signer(&self, _cap: &OracleAdminCap, signer: &Address) {
        self.signers.write().remove(signer);
    }

    /// Register a component the circuit breaker will pause.
    pub fn register_pausable(&self, _cap: &OracleAdminCap, component: Arc<dyn Pausable>) {
        info!(component = component.name(), "pausable component registered");
        self.pausables.write().push(component);
    }

    /// Suppress automatic pausing while an incident is investigated.
    pub fn activate_emergency_mode(&self, _cap: &OracleAdminCap) {
        warn!("emergency mode activated; automatic pausing suppressed");
        self.emergency_mode.store(true, Ordering::SeqCst);
    }

    /// Restore automatic circuit breaking.
    pub fn deactivate_emergency_mode(&self, _cap: &OracleAdminCap) {
        info!("emergency mode deactivated");
        self.emergency_mode.store(false, Ordering::SeqCst);
    }

    /// Whether emergency mode is active.
    pub fn is_emergency_mode(&self) -> bool {
        self.emergency_mode.load(Ordering::SeqCst)
    }

    // === QUERIES ===

    /// Supply record for a chain.
    pub fn chain_supply(&self, chain: ChainId) -> Option<ChainSupply> {
        self.chains.read().get(&chain).copied()
    }

    /// Summed circulating supply across all chains.
    pub fn global_circulating(&self) -> Amount {
        self.chains
            .read()
            .values()
            .map(|s| s.circulating_supply)
            .sum()
    }

    /// Number of open vote batches.
    pub fn pending_batches(&self) -> usize {
        self.pending.lock().len()
    }

    // === PROPOSALS ===

    /// Record a signed supply report vote; apply once the threshold holds.
    pub async fn propose_update(
        &self,
        report: SupplyReport,
        signer: Address,
        signature: &ReportSignature,
    ) -> Result<UpdateOutcome, OracleError> {
        if !self.chains.read().contains_key(&report.chain_id) {
            return Err(OracleError::UnknownChain(report.chain_id));
        }

        let secret = self
            .signers
            .read()
            .get(&signer)
            .cloned()
            .ok_or_else(|| OracleError::UnknownSigner(hex::encode(signer)))?;
        if !verify_report(&report.canonical_bytes(), signature, &secret) {
            return Err(OracleError::InvalidSignature);
        }

        let now = self.clock.now();
        if report.nonce < now.saturating_sub(self.config.validity_period_secs) {
            return Err(OracleError::StaleProposal {
                nonce: report.nonce,
                now,
                validity_period_secs: self.config.validity_period_secs,
            });
        }
        if report.nonce > now + self.config.clock_skew_secs {
            return Err(OracleError::FutureProposal {
                nonce: report.nonce,
                now,
                clock_skew_secs: self.config.clock_skew_secs,
            });
        }

        {
            // Vote append and threshold check are one critical section.
            let mut pending = self.pending.lock();

            let mut used = self.used_nonces.lock();
            if used.contains_key(&(report.chain_id, report.nonce)) {
                return Err(OracleError::NonceAlreadyUsed {
                    chain: report.chain_id,
                    nonce: report.nonce,
                });
            }

            let hash = report.update_hash();
            let batch = pending
                .entry(hash)
                .or_insert_with(|| PendingSignatureBatch::new(now));
            if !batch.signers.insert(signer) {
                return Err(OracleError::DuplicateSignature(hex::encode(signer)));
            }

            let votes = batch.signers.len();
            if votes < self.config.required_signatures {
                debug!(
                    chain = %report.chain_id,
                    votes,
                    required = self.config.required_signatures,
                    "supply vote recorded"
                );
                return Ok(UpdateOutcome::Recorded {
                    votes,
                    required: self.config.required_signatures,
                });
            }

            // Threshold reached: apply atomically and retire the nonce so
            // the same proposal cannot be replayed into a fresh batch.
            pending.remove(&hash);
            used.insert(
                (report.chain_id, report.nonce),
                now + 2 * self.config.validity_period_secs,
            );

            let mut chains = self.chains.write();
            if let Some(supply) = chains.get_mut(&report.chain_id) {
                supply.apply(report.total_supply, report.locked_supply, now);
            }

            info!(
                chain = %report.chain_id,
                total = report.total_supply,
                locked = report.locked_supply,
                "supply update applied"
            );
        }

        let due = now
            >= self
                .last_reconcile
                .load(Ordering::SeqCst)
                .saturating_add(self.config.reconciliation_interval_secs);
        if due {
            self.reconcile().await;
        }
        Ok(UpdateOutcome::Applied)
    }

    // === RECONCILIATION ===

    /// Compare summed supply against the expected total; trip the circuit
    /// breaker on drift beyond tolerance.
    pub async fn reconcile(&self) -> ReconcileOutcome {
        let now = self.clock.now();
        self.last_reconcile.store(now, Ordering::SeqCst);

        let actual = self.global_circulating();
        let expected = self.config.expected_supply;
        let deviation = actual.abs_diff(expected);

        if deviation <= self.config.tolerance_threshold {
            debug!(actual, expected, deviation, "reconciliation balanced");
            return ReconcileOutcome::Balanced { actual };
        }

        let alert = SupplyMismatch {
            actual,
            expected,
            deviation,
            timestamp: now,
        };
        self.alerts.supply_mismatch(alert).await;

        if self.is_emergency_mode() {
            warn!(deviation, "mismatch detected; pausing suppressed by emergency mode");
            return ReconcileOutcome::MismatchSuppressed { deviation };
        }

        // Best effort: one component refusing to pause must not shield the
        // rest from the circuit breaker.
        let components: Vec<_> = self.pausables.read().iter().cloned().collect();
        for component in components {
            if let Err(e) = component.pause().await {
                warn!(component = component.name(), error = %e, "pause failed");
            } else {
                info!(component = component.name(), "component paused");
            }
        }
        ReconcileOutcome::MismatchPaused { deviation }
    }

    /// Drop vote batches older than the validity window and expired nonce
    /// retention entries. Nothing pends forever.
    pub fn prune_expired(&self) {
        let now = self.clock.now();
        let validity = self.config.validity_period_secs;

        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.retain(|_, batch| batch.first_seen + validity >= now);
        let dropped = before - pending.len();
        drop(pending);

        self.used_nonces.lock().retain(|_, deadline| *deadline >= now);

        if dropped > 0 {
            debug!(dropped, "expired vote batches pruned");
        }
    }
}

/// Background reconciliation loop.
///
/// Runs independently of proposal processing; a triggered pause takes
/// effect for the next operation on each paused component.
pub async fn run_reconciliation_loop(oracle: Arc<SupplyOracle>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        oracle.prune_expired();
        oracle.reconcile().await;
    }
}
