//! # Protocol Adapters
//!
//! One module per messaging protocol, plus the in-memory ledger reference
//! adapter. Each protocol module owns its wire framing, chain-id mapping,
//! fee model, and coverage; everything else goes through [`crate::core`].

pub mod axelar;
pub mod hyperlane;
pub mod layerzero;
pub mod ledger;
pub mod wormhole;

pub use axelar::AxelarAdapter;
pub use hyperlane::HyperlaneAdapter;
pub use layerzero::LayerZeroAdapter;
pub use ledger::InMemoryLedger;
pub use wormhole::WormholeAdapter;
