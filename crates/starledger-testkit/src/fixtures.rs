//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a wallet that can answer
//! challenges, paired with a fresh chain on a hand-driven clock.

use serde_json::Value;

use starledger::{Chain, ChainConfig, Challenge, ManualTimeSource, SubmitError};
use starledger_core::{Keypair, Record};

/// Clock reading a fresh fixture starts at (2023-11-14T22:13:20Z).
pub const FIXTURE_EPOCH: u64 = 1_700_000_000;

/// A test fixture with a wallet, a clock, and an in-memory chain.
pub struct TestFixture {
    pub keypair: Keypair,
    pub clock: ManualTimeSource,
    pub chain: Chain,
}

impl TestFixture {
    /// Create a new test fixture with a random wallet.
    pub fn new() -> Self {
        Self::build(Keypair::generate(), ChainConfig::default())
    }

    /// Create with a deterministic wallet from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::build(Keypair::from_seed(&seed), ChainConfig::default())
    }

    /// Create with a deterministic wallet and a custom configuration.
    pub fn with_config(seed: [u8; 32], config: ChainConfig) -> Self {
        Self::build(Keypair::from_seed(&seed), config)
    }

    fn build(keypair: Keypair, config: ChainConfig) -> Self {
        let clock = ManualTimeSource::new(FIXTURE_EPOCH);
        let chain = Chain::with_time_source(config, clock.clone());
        Self {
            keypair,
            clock,
            chain,
        }
    }

    /// The wallet address.
    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// Sign a challenge message, returning the signature as hex.
    pub fn sign(&self, message: &str) -> String {
        self.keypair.sign_challenge(message).to_hex()
    }

    /// A challenge for this wallet issued `age_secs` before the clock's
    /// current reading.
    pub fn aged_challenge(&self, age_secs: u64) -> String {
        let issued = self.chain.now_secs().saturating_sub(age_secs);
        Challenge::new(
            self.address(),
            issued,
            self.chain.config().protocol_tag.as_str(),
        )
        .to_string()
    }

    /// Move the clock to `now`, then run the full proof workflow for `claim`.
    pub async fn claim_at(&self, claim: Value, now: u64) -> Result<Record, SubmitError> {
        self.clock.set(now);
        self.claim(claim).await
    }

    /// Run the full proof workflow for `claim` at the clock's current reading.
    pub async fn claim(&self, claim: Value) -> Result<Record, SubmitError> {
        let message = self.chain.request_challenge(&self.address());
        let signature = self.sign(&message);
        self.chain
            .submit_proof(&self.address(), &message, &signature, claim)
            .await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create deterministic wallets for multi-owner tests.
pub fn multi_wallet(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            Keypair::from_seed(&seed)
        })
        .collect()
}
