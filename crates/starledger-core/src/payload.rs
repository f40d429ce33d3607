//! The two payload shapes a record body can carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text of the genesis marker's `data` field.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Serialized genesis marker, exactly as `GenesisMarker::default()` encodes.
pub const GENESIS_BODY: &str = r#"{"data":"Genesis Block"}"#;

/// Body of the genesis record: `{"data":"Genesis Block"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisMarker {
    pub data: String,
}

impl Default for GenesisMarker {
    fn default() -> Self {
        Self {
            data: GENESIS_DATA.to_string(),
        }
    }
}

/// Body of every admitted claim.
///
/// `star` holds the caller's claim data verbatim; the other three fields
/// are the proof that admitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEnvelope {
    pub address: String,
    pub message: String,
    pub signature: String,
    pub star: Value,
}
