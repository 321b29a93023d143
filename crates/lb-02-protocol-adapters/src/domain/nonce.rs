//! # Nonce Registries
//!
//! Replay protection for inbound messages and sequence numbering for
//! outbound ones. Both are adapter-local: protocols never share nonce
//! space.

use dashmap::DashMap;
use shared_types::ChainId;

/// Write-once set of consumed `(origin chain, nonce)` pairs.
///
/// `check_and_mark` is the replay-protection primitive: the underlying map
/// insert is atomic, so two concurrent deliveries of the same pair resolve
/// to exactly one success.
#[derive(Default)]
pub struct ProcessedNonceRegistry {
    seen: DashMap<(ChainId, u64), ()>,
}

impl ProcessedNonceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically consume a nonce.
    ///
    /// Returns `true` if the pair was fresh and is now consumed, `false` if
    /// it had already been processed.
    pub fn check_and_mark(&self, chain: ChainId, nonce: u64) -> bool {
        self.seen.insert((chain, nonce), ()).is_none()
    }

    /// Whether a pair has been consumed, without consuming it.
    pub fn is_processed(&self, chain: ChainId, nonce: u64) -> bool {
        self.seen.contains_key(&(chain, nonce))
    }

    /// Number of consumed pairs.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no pair has been consumed yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Monotonic outbound sequence per destination chain.
#[derive(Default)]
pub struct OutboundNonceSequence {
    next: DashMap<ChainId, u64>,
}

impl OutboundNonceSequence {
    /// Create a sequence starting at zero for every chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next nonce for a destination chain.
    pub fn next(&self, chain: ChainId) -> u64 {
        let mut entry = self.next.entry(chain).or_insert(0);
        let nonce = *entry;
        *entry += 1;
        nonce
    }
}
