//! # Adapter Domain
//!
//! Payload codec, replay-protection registries, trusted remotes, and errors.

pub mod errors;
pub mod message;
pub mod nonce;
pub mod trusted;

pub use errors::AdapterError;
pub use message::BridgePayload;
pub use nonce::{OutboundNonceSequence, ProcessedNonceRegistry};
pub use trusted::TrustedRemotes;
