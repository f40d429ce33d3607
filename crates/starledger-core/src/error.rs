//! Error types for Starledger Core.

use thiserror::Error;

use crate::types::RecordHash;

/// Core errors from key handling and payload encoding.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("malformed wallet address: {0}")]
    MalformedAddress(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A record body that could not be turned back into structured data.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A tampering finding for one record.
///
/// These are results, not faults: a validation pass that produces findings
/// has still succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("record {height} has no identity hash")]
    MissingHash { height: u64 },

    #[error("record {height} hash mismatch: stored {stored}, computed {computed}")]
    HashMismatch {
        height: u64,
        stored: RecordHash,
        computed: RecordHash,
    },

    #[error("record at position {position} claims height {height}")]
    HeightMismatch { position: u64, height: u64 },

    #[error("record {height} links to {found:?}, predecessor hash is {expected:?}")]
    BrokenLink {
        height: u64,
        expected: Option<RecordHash>,
        found: Option<RecordHash>,
    },
}

impl ValidationError {
    /// Position of the record this finding is about.
    pub fn height(&self) -> u64 {
        match self {
            ValidationError::MissingHash { height }
            | ValidationError::HashMismatch { height, .. }
            | ValidationError::BrokenLink { height, .. } => *height,
            ValidationError::HeightMismatch { position, .. } => *position,
        }
    }
}
