//! # Bridge Options
//!
//! Ephemeral, per-query view of the routes currently available to a
//! destination chain. Never persisted; recomputed on demand.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, Protocol};

/// One available route to a destination chain.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BridgeOption {
    /// Protocol offering the route.
    pub protocol: Protocol,
    /// Quoted total fee.
    pub fee: Amount,
    /// Quoted end-to-end delivery time in seconds.
    pub estimated_time_secs: u64,
    /// Relative trust-model ranking (higher is stronger).
    pub security_level: u8,
    /// Whether the route is currently usable.
    pub available: bool,
    /// Smallest transfer the protocol accepts.
    pub min_amount: Amount,
    /// Largest transfer the protocol accepts.
    pub max_amount: Amount,
}

/// What the caller wants optimized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutePreference {
    /// Minimum fee.
    Cheapest,
    /// Minimum estimated delivery time.
    Fastest,
    /// Maximum security level.
    MostSecure,
}

/// Pick the best route by linear scan.
///
/// Ties break toward the earliest option, so iteration order (protocol
/// registration order) makes selection deterministic.
pub fn select_route(options: &[BridgeOption], preference: RoutePreference) -> Option<Protocol> {
    let mut best: Option<&BridgeOption> = None;
    for option in options.iter().filter(|o| o.available) {
        let better = match (best, preference) {
            (None, _) => true,
            (Some(b), RoutePreference::Cheapest) => option.fee < b.fee,
            (Some(b), RoutePreference::Fastest) => {
                option.estimated_time_secs < b.estimated_time_secs
            }
            (Some(b), RoutePreference::MostSecure) => option.security_level > b.security_level,
        };
        if better {
            best = Some(option);
        }
    }
    best.map(|o| o.protocol)
}
