//! # Oracle Errors

use shared_types::ChainId;
use thiserror::Error;

/// Supply oracle error types.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OracleError {
    /// Chain is not registered with the oracle.
    #[error("chain not registered: {0}")]
    UnknownChain(ChainId),

    /// Signer is not in the registered set.
    #[error("unknown signer: {0}")]
    UnknownSigner(String),

    /// Report signature did not verify.
    #[error("invalid report signature")]
    InvalidSignature,

    /// Proposal nonce is older than the validity window.
    #[error("stale proposal: nonce {nonce} older than {validity_period_secs}s before {now}")]
    StaleProposal {
        /// Proposal nonce.
        nonce: u64,
        /// Current time when checked.
        now: u64,
        /// Validity window length.
        validity_period_secs: u64,
    },

    /// Proposal nonce is further in the future than tolerated skew.
    #[error("proposal from the future: nonce {nonce} beyond {now} + {clock_skew_secs}s")]
    FutureProposal {
        /// Proposal nonce.
        nonce: u64,
        /// Current time when checked.
        now: u64,
        /// Tolerated forward skew.
        clock_skew_secs: u64,
    },

    /// `(chain, nonce)` already consumed by an applied update.
    #[error("nonce {nonce} for {chain} already used")]
    NonceAlreadyUsed {
        /// Chain of the replayed proposal.
        chain: ChainId,
        /// The replayed nonce.
        nonce: u64,
    },

    /// This signer already voted on this update hash.
    #[error("duplicate signature from {0}")]
    DuplicateSignature(String),
}
