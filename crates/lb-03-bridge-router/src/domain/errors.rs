//! # Router Errors

use super::transfer::TransferStatus;
use lb_01_rate_limiter::RateLimitError;
use lb_02_protocol_adapters::AdapterError;
use shared_types::{ChainId, Protocol};
use thiserror::Error;

/// Router error types.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Protocol was never registered for the chain.
    #[error("protocol {protocol} not configured for {chain}")]
    ProtocolNotConfigured {
        /// Destination chain.
        chain: ChainId,
        /// Requested protocol.
        protocol: Protocol,
    },

    /// Protocol is registered but administratively disabled for the chain.
    #[error("protocol {protocol} disabled for {chain}")]
    ProtocolDisabled {
        /// Destination chain.
        chain: ChainId,
        /// Requested protocol.
        protocol: Protocol,
    },

    /// The requested protocol's adapter is paused.
    #[error("protocol {0} is paused")]
    ProtocolPaused(Protocol),

    /// No protocol can serve the requested transfer right now.
    #[error("no route available to {chain}")]
    NoRouteAvailable {
        /// Destination chain.
        chain: ChainId,
    },

    /// Amount must be non-zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// Recipient must be non-zero.
    #[error("recipient must be non-zero")]
    ZeroRecipient,

    /// The router is paused.
    #[error("router is paused")]
    RouterPaused,

    /// Caller is not a registered adapter identity.
    #[error("caller {0} is not a registered adapter")]
    UnauthorizedStatusUpdate(String),

    /// No transfer record with that id.
    #[error("transfer not found: {0}")]
    TransferNotFound(String),

    /// The requested status change is not a legal transition.
    #[error("invalid transfer transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Current state.
        from: TransferStatus,
        /// Attempted state.
        to: TransferStatus,
    },

    /// Rate limit rejected the request.
    #[error("rate limited: {0}")]
    RateLimited(#[from] RateLimitError),

    /// The adapter rejected the request before touching funds.
    #[error("adapter rejected request: {0}")]
    AdapterRejected(AdapterError),

    /// Dispatch failed after the burn; the compensating refund has run.
    #[error("dispatch failed (amount refunded): {source}")]
    DispatchFailed {
        /// The underlying adapter failure.
        #[source]
        source: AdapterError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_display() {
        let err = RouterError::ProtocolNotConfigured {
            chain: ChainId::Base,
            protocol: Protocol::Axelar,
        };
        assert!(err.to_string().contains("axelar"));
        assert!(err.to_string().contains("base"));
    }

    #[test]
    fn test_dispatch_failed_mentions_refund() {
        let err = RouterError::DispatchFailed {
            source: AdapterError::Network("boom".to_string()),
        };
        assert!(err.to_string().contains("refunded"));
    }
}
