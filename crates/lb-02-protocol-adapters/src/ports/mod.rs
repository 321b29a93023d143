//! # Ports
//!
//! Inbound API (what an adapter offers) and outbound dependencies (what an
//! adapter needs).

pub mod inbound;
pub mod outbound;

pub use inbound::{BridgeAdapter, BridgeOutRequest, FeeQuote};
pub use outbound::{MessagingNetwork, MockMessagingNetwork, TokenLedger};
