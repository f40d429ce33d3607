//! # Starledger Core
//!
//! Pure primitives for Starledger: records, identity hashes, canonical
//! encoding, and wallet signatures.
//!
//! This crate contains no I/O, no locking, no clock. It is pure computation
//! over the record data model; the chain itself lives in `starledger`.
//!
//! ## Key Types
//!
//! - [`Record`] - One entry in the chain: body, position, time, links
//! - [`RecordHash`] - SHA-256 identity hash over the canonical form
//! - [`ClaimEnvelope`] - The decoded body of an admitted claim
//! - [`WalletKey`] / [`Keypair`] - Ed25519 wallet keys and addresses
//!
//! ## Canonicalization
//!
//! Identity hashes cover a fixed-order compact JSON object with the hash
//! slot blanked. See [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod record;
pub mod types;
pub mod validation;

pub use canonical::{canonical_bytes, decode_body, decode_body_as, encode_body};
pub use crypto::{
    verify_challenge_signature, Keypair, Sha256Hash, WalletKey, WalletSignature,
    CHALLENGE_SIGN_DOMAIN,
};
pub use error::{CoreError, DecodeError, ValidationError};
pub use payload::{ClaimEnvelope, GenesisMarker, GENESIS_BODY, GENESIS_DATA};
pub use record::Record;
pub use types::RecordHash;
pub use validation::{validate_link, validate_records, validate_record};
