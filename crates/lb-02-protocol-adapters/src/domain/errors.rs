//! # Adapter Errors

use lb_01_rate_limiter::RateLimitError;
use shared_types::{Amount, ChainId};
use thiserror::Error;

/// Adapter error types.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Destination chain is not served by this protocol.
    #[error("chain not supported by this protocol: {0}")]
    UnsupportedChain(ChainId),

    /// Inbound sender does not match the configured trusted remote.
    #[error("untrusted remote on {chain}: {sender}")]
    UntrustedRemote {
        /// Origin chain of the message.
        chain: ChainId,
        /// Hex-encoded sender that failed the check.
        sender: String,
    },

    /// No trusted remote configured for the origin chain at all.
    #[error("no trusted remote configured for {0}")]
    NoTrustedRemote(ChainId),

    /// `(origin chain, nonce)` was already consumed.
    #[error("nonce {nonce} from {chain} already processed")]
    NonceAlreadyProcessed {
        /// Origin chain of the replayed message.
        chain: ChainId,
        /// The replayed nonce.
        nonce: u64,
    },

    /// Payload failed to decode.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Amount must be non-zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// Recipient must be non-zero.
    #[error("recipient must be non-zero")]
    ZeroRecipient,

    /// Adapter is paused.
    #[error("adapter is paused")]
    Paused,

    /// Amount is outside the protocol's transfer bounds.
    #[error("amount {amount} outside protocol bounds [{min}, {max}]")]
    TransferOutOfBounds {
        /// Requested amount.
        amount: Amount,
        /// Smallest accepted transfer.
        min: Amount,
        /// Largest accepted transfer.
        max: Amount,
    },

    /// Fee payment does not cover the quoted fee.
    #[error("insufficient fee: paid {paid}, required {required}")]
    InsufficientFee {
        /// Fee supplied by the caller.
        paid: Amount,
        /// Fee the quote requires.
        required: Amount,
    },

    /// Rate limit rejected the operation.
    #[error("rate limited: {0}")]
    RateLimited(#[from] RateLimitError),

    /// Token ledger refused the operation.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// Messaging network failure.
    #[error("network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_chain_error() {
        let err = AdapterError::UnsupportedChain(ChainId::Polygon);
        assert!(err.to_string().contains("polygon"));
    }

    #[test]
    fn test_nonce_replay_error() {
        let err = AdapterError::NonceAlreadyProcessed {
            chain: ChainId::Ethereum,
            nonce: 42,
        };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_rate_limit_error_converts() {
        let inner = RateLimitError::TxCountExceeded {
            count: 3,
            max: 3,
            resets_at: 100,
        };
        let err: AdapterError = inner.into();
        assert!(matches!(err, AdapterError::RateLimited(_)));
    }
}
