//! # Starledger Testkit
//!
//! Testing utilities for Starledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known records with expected bodies and identity hashes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A wallet paired with a chain, for proof-workflow tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use starledger_testkit::vectors::{all_vectors, record_from_vector};
//!
//! for vector in all_vectors() {
//!     let record = record_from_vector(&vector);
//!     assert_eq!(record.compute_hash().to_hex(), vector.expected_hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starledger_testkit::generators::{record_from_params, RecordParams};
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: RecordParams) {
//!         let r1 = record_from_params(&params);
//!         let r2 = record_from_params(&params);
//!         prop_assert_eq!(r1.hash, r2.hash);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use starledger_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let record = fixture.claim(serde_json::json!({"story": "x"})).await?;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_wallet, TestFixture, FIXTURE_EPOCH};
pub use generators::{record_from_params, RecordParams};
pub use vectors::{all_vectors, record_from_vector, verify_all_vectors, GoldenVector};
