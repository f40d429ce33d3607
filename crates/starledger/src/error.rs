//! Error types for the chain.

use starledger_core::{CoreError, DecodeError};
use thiserror::Error;

/// An append that would break the chain's invariants.
///
/// These should not happen; seeing one means the chain's own bookkeeping
/// is wrong, not that a caller did something invalid.
#[derive(Debug, Error)]
pub enum AppendError {
    /// The current tail was never hashed, so there is nothing to link to.
    #[error("record {height} has no identity hash to link to")]
    MissingPredecessorHash { height: u64 },

    /// A payload could not be serialized into a record body.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<CoreError> for AppendError {
    fn from(e: CoreError) -> Self {
        AppendError::Encoding(e.to_string())
    }
}

/// Reasons an ownership proof is turned away.
///
/// All of these are expected outcomes of `submit_proof`; none of them
/// changes the chain.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The message is not a challenge this chain issued for this address.
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    /// The challenge timestamp is ahead of the chain's clock.
    #[error("challenge is {ahead_secs}s in the future")]
    ChallengeFromFuture { ahead_secs: u64 },

    /// The challenge is older than the allowed window.
    #[error("challenge is {age_secs}s old, window is {window_secs}s")]
    ExpiredChallenge { age_secs: u64, window_secs: u64 },

    /// The signature does not prove control of the address.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[source] CoreError),

    /// The proof was accepted but the append failed.
    #[error(transparent)]
    Append(#[from] AppendError),
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Append invariant violation.
    #[error("append error: {0}")]
    Append(#[from] AppendError),

    /// Ownership proof rejected.
    #[error("proof rejected: {0}")]
    Submit(#[from] SubmitError),

    /// A stored body could not be decoded.
    #[error("record {height} could not be decoded: {source}")]
    Decode {
        height: u64,
        #[source]
        source: DecodeError,
    },
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
