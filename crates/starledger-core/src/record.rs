//! Record: one entry in the chain.
//!
//! A record carries an opaque body (hex of UTF-8 JSON), its position, the
//! time it was appended, the identity hash of its predecessor, and its own
//! identity hash. Only the chain's append protocol fills in the last four.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::{canonical_bytes, decode_body, decode_body_as, encode_body};
use crate::crypto::Sha256Hash;
use crate::error::{CoreError, DecodeError};
use crate::payload::GENESIS_BODY;
use crate::types::RecordHash;

/// A ledger record, in its wire form.
///
/// Field order matches the canonical encoding: `hash`, `height`, `body`,
/// `time`, `previousBlockHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identity hash; `None` until the record is appended.
    pub hash: Option<RecordHash>,

    /// Position in the chain. 0 is the genesis record.
    pub height: u64,

    /// Hex-encoded JSON payload.
    pub body: String,

    /// Append time, seconds since the Unix epoch.
    pub time: u64,

    /// Identity hash of the record at `height - 1`; `None` for genesis.
    #[serde(rename = "previousBlockHash")]
    pub previous_hash: Option<RecordHash>,
}

impl Record {
    /// Wrap a payload into an unappended record.
    ///
    /// Position, time, and both hashes are placeholders until the chain
    /// appends it.
    pub fn new<T: Serialize + ?Sized>(payload: &T) -> Result<Self, CoreError> {
        Ok(Self {
            hash: None,
            height: 0,
            body: encode_body(payload)?,
            time: 0,
            previous_hash: None,
        })
    }

    /// An unappended record carrying the genesis marker.
    pub fn genesis() -> Self {
        Self {
            hash: None,
            height: 0,
            body: hex::encode(GENESIS_BODY),
            time: 0,
            previous_hash: None,
        }
    }

    /// Compute the identity hash from every field except `hash`.
    pub fn compute_hash(&self) -> RecordHash {
        Sha256Hash::hash(&canonical_bytes(self)).into()
    }

    /// Whether the stored hash still matches the record's content.
    ///
    /// A record that was never hashed does not validate.
    pub fn validate(&self) -> bool {
        self.hash == Some(self.compute_hash())
    }

    /// Decode the body back into structured data.
    pub fn decode_payload(&self) -> Result<Value, DecodeError> {
        decode_body(&self.body)
    }

    /// Decode the body into a concrete payload type.
    pub fn decode_payload_as<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        decode_body_as(&self.body)
    }

    /// Whether this record sits at the genesis position.
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }
}
