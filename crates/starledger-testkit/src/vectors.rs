//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding and identity hash of a short
//! chain, so any implementation of the record format can be checked
//! against them.

use serde_json::Value;

use starledger_core::{Record, RecordHash};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Payload as JSON text.
    pub payload: &'static str,
    /// Position in the chain.
    pub height: u64,
    /// Append time, seconds since the Unix epoch.
    pub time: u64,
    /// Predecessor's identity hash (hex).
    pub previous_hash: Option<&'static str>,
    /// Expected hex body.
    pub expected_body: &'static str,
    /// Expected identity hash (hex).
    pub expected_hash: &'static str,
}

/// Get all golden test vectors, in chain order.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis",
            payload: r#"{"data":"Genesis Block"}"#,
            height: 0,
            time: 1_700_000_000, // 2023-11-14T22:13:20Z
            previous_hash: None,
            expected_body: "7b2264617461223a2247656e6573697320426c6f636b227d",
            expected_hash: "99d9b323e139544c08ece9a306af9bc59befe5ef63c33f63aec4ca7535f62809",
        },
        GoldenVector {
            name: "small object linked to genesis",
            payload: r#"{"n":1}"#,
            height: 1,
            time: 1_700_000_060,
            previous_hash: Some(
                "99d9b323e139544c08ece9a306af9bc59befe5ef63c33f63aec4ca7535f62809",
            ),
            expected_body: "7b226e223a317d",
            expected_hash: "9a1b70be14656d7fb031685211e429dc1cee027211fad54888c40993522532b7",
        },
        GoldenVector {
            name: "claim envelope with non-ASCII claim data",
            payload: r#"{"address":"alice","message":"alice:1700000000:starRegistry","signature":"00","star":{"dec":"68° 52' 56.9","ra":"16h 29m 1.0s","story":"Found star using https://www.google.com/sky/"}}"#,
            height: 2,
            time: 1_700_000_120,
            previous_hash: Some(
                "9a1b70be14656d7fb031685211e429dc1cee027211fad54888c40993522532b7",
            ),
            expected_body: "7b2261646472657373223a22616c696365222c226d657373616765223a22616c6963653a313730303030303030303a737461725265676973747279222c227369676e6174757265223a223030222c2273746172223a7b22646563223a223638c2b0203532272035362e39222c227261223a223136682032396d20312e3073222c2273746f7279223a22466f756e642073746172207573696e672068747470733a2f2f7777772e676f6f676c652e636f6d2f736b792f227d7d",
            expected_hash: "b9758d604906092eba20e1aab83d4c90bf46a5671a043361b8fb51d49c4bcb98",
        },
    ]
}

/// Build the hashed record a golden vector describes.
pub fn record_from_vector(vector: &GoldenVector) -> Record {
    let payload: Value =
        serde_json::from_str(vector.payload).expect("golden payloads are valid JSON");
    let mut record = Record::new(&payload).expect("JSON values always encode");
    record.height = vector.height;
    record.time = vector.time;
    record.previous_hash = vector
        .previous_hash
        .map(|h| RecordHash::from_hex(h).expect("golden hashes are valid hex"));
    record.hash = Some(record.compute_hash());
    record
}

/// Check every golden vector against this implementation.
///
/// Returns `(name, matches, computed_hash)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let record = record_from_vector(v);
            let hex = record.compute_hash().to_hex();
            let matches = record.body == v.expected_body && hex == v.expected_hash;
            (v.name.to_string(), matches, hex)
        })
        .collect()
}
