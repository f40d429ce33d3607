//! Canonical JSON encoding for identity hashing, and the body codec.
//!
//! The canonical form of a record is a compact JSON object with exactly
//! these keys, in this order:
//!
//! ```text
//! {"hash":null,"height":<u64>,"body":"<hex>","time":<u64>,"previousBlockHash":<hex|null>}
//! ```
//!
//! The `hash` slot is always written as `null`, so a record's identity hash
//! never covers itself. Keys are emitted by hand rather than through a map
//! type, because `serde_json::Map` reorders keys.
//!
//! **CRITICAL**: This encoding is FROZEN. Changing it changes every hash.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, DecodeError};
use crate::record::Record;
use crate::types::RecordHash;

/// Wire and canonical key names.
pub(crate) mod keys {
    pub const HASH: &str = "hash";
    pub const HEIGHT: &str = "height";
    pub const BODY: &str = "body";
    pub const TIME: &str = "time";
    pub const PREVIOUS_HASH: &str = "previousBlockHash";
}

/// Encode a record to its canonical bytes, with the hash slot blanked.
pub fn canonical_bytes(record: &Record) -> Vec<u8> {
    let mut buf = String::with_capacity(record.body.len() + 192);
    buf.push('{');
    push_key(&mut buf, keys::HASH);
    buf.push_str("null");
    buf.push(',');
    push_key(&mut buf, keys::HEIGHT);
    buf.push_str(&record.height.to_string());
    buf.push(',');
    push_key(&mut buf, keys::BODY);
    push_string(&mut buf, &record.body);
    buf.push(',');
    push_key(&mut buf, keys::TIME);
    buf.push_str(&record.time.to_string());
    buf.push(',');
    push_key(&mut buf, keys::PREVIOUS_HASH);
    push_hash(&mut buf, record.previous_hash.as_ref());
    buf.push('}');
    buf.into_bytes()
}

/// Serialize a payload to JSON text and hex encode it.
pub fn encode_body<T: Serialize + ?Sized>(payload: &T) -> Result<String, CoreError> {
    let json = serde_json::to_vec(payload).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(hex::encode(json))
}

/// Reverse [`encode_body`]: hex, then UTF-8, then JSON.
pub fn decode_body(body: &str) -> Result<Value, DecodeError> {
    decode_body_as(body)
}

/// Typed variant of [`decode_body`].
pub fn decode_body_as<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    let bytes = hex::decode(body)?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

fn push_key(buf: &mut String, key: &str) {
    push_string(buf, key);
    buf.push(':');
}

/// Append a JSON string literal, escaped the way serde_json escapes it.
fn push_string(buf: &mut String, s: &str) {
    buf.push_str(&Value::String(s.to_owned()).to_string());
}

fn push_hash(buf: &mut String, hash: Option<&RecordHash>) {
    match hash {
        Some(h) => {
            buf.push('"');
            buf.push_str(&h.to_hex());
            buf.push('"');
        }
        None => buf.push_str("null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(body: &str) -> Record {
        Record {
            hash: None,
            height: 3,
            body: body.to_string(),
            time: 1_700_000_000,
            previous_hash: Some(RecordHash::from_bytes([0x11; 32])),
        }
    }

    #[test]
    fn test_canonical_layout() {
        let record = sample("7b7d");
        let text = String::from_utf8(canonical_bytes(&record)).unwrap();
        assert_eq!(
            text,
            format!(
                r#"{{"hash":null,"height":3,"body":"7b7d","time":1700000000,"previousBlockHash":"{}"}}"#,
                "11".repeat(32)
            )
        );
    }

    #[test]
    fn test_canonical_ignores_stored_hash() {
        let mut a = sample("7b7d");
        let b = sample("7b7d");
        a.hash = Some(RecordHash::from_bytes([0xff; 32]));
        assert_eq!(canonical_bytes(&a), canonical_bytes(&b));
    }

    #[test]
    fn test_canonical_null_previous() {
        let mut record = sample("00");
        record.previous_hash = None;
        let text = String::from_utf8(canonical_bytes(&record)).unwrap();
        assert!(text.ends_with(r#""previousBlockHash":null}"#));
    }

    #[test]
    fn test_canonical_escapes_tampered_body() {
        let record = sample("not \"hex\"");
        let text = String::from_utf8(canonical_bytes(&record)).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["body"], json!("not \"hex\""));
    }

    #[test]
    fn test_body_roundtrip() {
        let value = json!({"address": "abc", "star": {"ra": "16h 29m", "dec": 12}});
        let body = encode_body(&value).unwrap();
        assert!(body.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(decode_body(&body).unwrap(), value);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_body("zz"), Err(DecodeError::Hex(_))));
        assert!(matches!(decode_body("ff"), Err(DecodeError::Utf8(_))));
        // "{" alone
        assert!(matches!(decode_body("7b"), Err(DecodeError::Json(_))));
    }
}
