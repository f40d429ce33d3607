//! # Starledger
//!
//! An in-memory, append-only, tamper-evident ledger of wallet-signed
//! ownership claims.
//!
//! ## Overview
//!
//! - **Records**: Each record stores its body, height, time, and the hash of
//!   the record before it. Its identity hash covers all of those.
//! - **Chain**: A sequence of records starting at a genesis record. Records
//!   are never modified or removed once appended.
//! - **Ownership proofs**: A wallet asks for a challenge, signs it, and
//!   submits the signature with its claim. Valid proofs become new records.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use starledger::{Chain, ChainConfig};
//! use starledger::core::Keypair;
//! use serde_json::json;
//!
//! async fn example() {
//!     let chain = Chain::new(ChainConfig::default());
//!     let wallet = Keypair::generate();
//!
//!     let message = chain.request_challenge(&wallet.address());
//!     let signature = wallet.sign_challenge(&message).to_hex();
//!
//!     let record = chain
//!         .submit_proof(&wallet.address(), &message, &signature, json!({"ra": "16h"}))
//!         .await
//!         .unwrap();
//!     assert_eq!(record.height, 1);
//!
//!     let claims = chain.get_records_for_owner(&wallet.address()).await.unwrap();
//!     assert_eq!(claims.len(), 1);
//!     assert!(chain.validate_chain().await.is_empty());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `starledger::core` - Core primitives (Record, RecordHash, keys, etc.)

pub mod chain;
pub mod clock;
pub mod config;
pub mod error;
pub mod ownership;

pub use starledger_core as core;

pub use chain::Chain;
pub use clock::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use config::{ChainConfig, DEFAULT_PROTOCOL_TAG};
pub use error::{AppendError, ChainError, Result, SubmitError};
pub use ownership::Challenge;

pub use starledger_core::{ClaimEnvelope, Record, RecordHash, ValidationError};
