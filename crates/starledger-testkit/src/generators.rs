//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

use starledger_core::{Keypair, Record, RecordHash};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random RecordHash.
pub fn record_hash() -> impl Strategy<Value = RecordHash> {
    any::<[u8; 32]>().prop_map(RecordHash::from_bytes)
}

/// Generate a reasonable append time.
pub fn timestamp() -> impl Strategy<Value = u64> {
    0u64..=4_102_444_800
}

/// Generate arbitrary JSON claim data.
///
/// Floats are left out: they do not survive a text round-trip bit-for-bit.
pub fn claim_data() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(Number::from(n))),
        any::<u64>().prop_map(|n| Value::Number(Number::from(n))),
        "\\PC{0,24}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Parameters for generating an appended record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub payload: Value,
    pub height: u64,
    pub time: u64,
    pub previous_hash: Option<RecordHash>,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            claim_data(),
            0u64..=1_000_000u64, // height
            timestamp(),
            proptest::option::of(record_hash()),
        )
            .prop_map(|(payload, height, time, previous_hash)| RecordParams {
                payload,
                height,
                time,
                previous_hash,
            })
            .boxed()
    }
}

/// Build a hashed record from parameters.
pub fn record_from_params(params: &RecordParams) -> Record {
    let mut record = Record::new(&params.payload).expect("JSON values always encode");
    record.height = params.height;
    record.time = params.time;
    record.previous_hash = params.previous_hash;
    record.hash = Some(record.compute_hash());
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use starledger_core::{canonical_bytes, verify_challenge_signature};

    proptest! {
        #[test]
        fn test_decode_inverts_encode(params: RecordParams) {
            let record = record_from_params(&params);
            prop_assert_eq!(record.decode_payload().unwrap(), params.payload);
        }

        #[test]
        fn test_hash_deterministic(params: RecordParams) {
            let r1 = record_from_params(&params);
            let r2 = record_from_params(&params);

            prop_assert_eq!(r1.hash, r2.hash);
            prop_assert_eq!(canonical_bytes(&r1), canonical_bytes(&r2));
            prop_assert!(r1.validate());
        }

        #[test]
        fn test_time_change_breaks_validation(params: RecordParams, delta in 1u64..1000) {
            let mut record = record_from_params(&params);
            record.time = record.time.wrapping_add(delta);
            prop_assert!(!record.validate());
        }

        #[test]
        fn test_previous_hash_change_breaks_validation(
            params: RecordParams,
            other in record_hash(),
        ) {
            prop_assume!(params.previous_hash != Some(other));

            let mut record = record_from_params(&params);
            record.previous_hash = Some(other);
            prop_assert!(!record.validate());
        }

        #[test]
        fn test_different_payloads_different_hashes(
            p1 in claim_data(),
            p2 in claim_data(),
        ) {
            prop_assume!(p1 != p2);

            let params = |payload| RecordParams {
                payload,
                height: 1,
                time: 1000,
                previous_hash: None,
            };
            let r1 = record_from_params(&params(p1));
            let r2 = record_from_params(&params(p2));

            prop_assert_ne!(r1.hash, r2.hash);
        }

        #[test]
        fn test_signatures_bind_the_message(
            kp in keypair(),
            stamp in timestamp(),
        ) {
            let message = format!("{}:{}:starRegistry", kp.address(), stamp);
            let signature = kp.sign_challenge(&message).to_hex();
            prop_assert!(verify_challenge_signature(&kp.address(), &message, &signature).is_ok());

            let other = format!("{}:{}:starRegistry", kp.address(), stamp + 1);
            prop_assert!(verify_challenge_signature(&kp.address(), &other, &signature).is_err());
        }
    }
}
