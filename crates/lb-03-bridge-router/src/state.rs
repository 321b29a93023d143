//! # Router State
//!
//! Encapsulates the mutable state of the router service: the ordered
//! protocol registry, adapter identities, the chain × protocol support
//! matrix, and the transfer store.

use crate::domain::Transfer;
use lb_02_protocol_adapters::BridgeAdapter;
use parking_lot::RwLock;
use shared_types::{ChainId, Hash, Protocol};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Identity issued to an adapter at registration time.
///
/// Status updates are authorized against the set of issued identities, so
/// authorization automatically covers every registered adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AdapterId(Uuid);

impl AdapterId {
    pub(crate) fn issue() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for AdapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Mutable state of the router service.
pub struct RouterState {
    /// Protocols in registration order; drives tie-breaking.
    pub(crate) protocols: RwLock<Vec<Protocol>>,
    /// Registered adapter per protocol.
    pub(crate) adapters: RwLock<HashMap<Protocol, Arc<dyn BridgeAdapter>>>,
    /// Issued adapter identities.
    pub(crate) adapter_ids: RwLock<HashMap<AdapterId, Protocol>>,
    /// Chain × protocol support matrix; value is the enabled flag.
    pub(crate) support: RwLock<HashMap<(ChainId, Protocol), bool>>,
    /// Transfer records by id.
    pub(crate) transfers: RwLock<HashMap<Hash, Transfer>>,
    /// Transfer id sequence.
    pub(crate) sequence: AtomicU64,
    /// Router-wide pause flag.
    pub(crate) paused: AtomicBool,
}

impl RouterState {
    /// Create empty state.
    pub fn new() -> Self {
        Self {
            protocols: RwLock::new(Vec::new()),
            adapters: RwLock::new(HashMap::new()),
            adapter_ids: RwLock::new(HashMap::new()),
            support: RwLock::new(HashMap::new()),
            transfers: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0),
            paused: AtomicBool::new(false),
        }
    }

    /// Next transfer sequence number.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    /// Whether the router refuses new bridge requests.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Set the router-wide pause flag.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    /// Whether an identity was issued by this router.
    pub fn is_registered_adapter(&self, id: &AdapterId) -> bool {
        self.adapter_ids.read().contains_key(id)
    }
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new()
    }
}
