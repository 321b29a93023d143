//! # LB-02 Protocol Adapters
//!
//! One adapter per external messaging protocol, each enforcing the same
//! contract: validate origin, refuse replays, trigger mint/burn on the token
//! ledger, and keep its own fault domain.
//!
//! ## Purpose
//!
//! Adapters are the only components aware of a protocol's wire format. They
//! are mutually independent by design: per-adapter nonce registries,
//! per-adapter pause flags, and per-adapter trusted-remote tables mean a
//! fault or pause in one protocol never blocks another.
//!
//! ## Security Features
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Trusted remotes | Inbound messages accepted only from the configured counterpart per chain |
//! | Replay protection | `(origin chain, nonce)` consumed atomically before any mint |
//! | Rate limiting | Every mint and burn reserves sliding-window capacity first |
//! | Compensation | A dispatch failure after a burn re-mints before surfacing the error |
//!
//! ## Module Structure
//!
//! ```text
//! lb-02-protocol-adapters/
//! ├── domain/          # Payload codec, nonce registries, trusted remotes, errors
//! ├── ports/           # BridgeAdapter API, MessagingNetwork + TokenLedger ports
//! ├── core.rs          # AdapterCore: the shared burn/mint/replay pipeline
//! └── adapters/        # LayerZero, Wormhole, Axelar, Hyperlane
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod core;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    AxelarAdapter, HyperlaneAdapter, InMemoryLedger, LayerZeroAdapter, WormholeAdapter,
};
pub use self::core::{AdapterCore, AdapterDependencies};
pub use domain::{
    AdapterError, BridgePayload, OutboundNonceSequence, ProcessedNonceRegistry, TrustedRemotes,
};
pub use ports::{
    BridgeAdapter, BridgeOutRequest, FeeQuote, MessagingNetwork, MockMessagingNetwork, TokenLedger,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
