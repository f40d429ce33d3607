//! Ownership proofs: challenge issuance and proof admission.
//!
//! A caller asks for a challenge, signs it with the wallet key behind the
//! address, and submits address, challenge, signature, and claim data.
//! Nothing is remembered between the two steps: the challenge carries its
//! own issue time, and expiry is checked against that.

use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use starledger_core::{verify_challenge_signature, ClaimEnvelope, Record};

use crate::chain::Chain;
use crate::error::SubmitError;

/// A parsed challenge message: `<address>:<unix_seconds>:<tag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub address: String,
    pub timestamp: u64,
    pub tag: String,
}

impl Challenge {
    /// Create a challenge.
    pub fn new(address: impl Into<String>, timestamp: u64, tag: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timestamp,
            tag: tag.into(),
        }
    }

    /// Parse a challenge message.
    pub fn parse(message: &str) -> Result<Self, SubmitError> {
        let parts: Vec<&str> = message.split(':').collect();
        let [address, timestamp, tag] = parts.as_slice() else {
            return Err(SubmitError::MalformedChallenge(format!(
                "expected 3 fields, got {}",
                parts.len()
            )));
        };

        if address.is_empty() {
            return Err(SubmitError::MalformedChallenge("empty address".into()));
        }

        let timestamp = timestamp.parse::<u64>().map_err(|e| {
            SubmitError::MalformedChallenge(format!("bad timestamp {timestamp:?}: {e}"))
        })?;

        Ok(Self::new(*address, timestamp, *tag))
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.address, self.timestamp, self.tag)
    }
}

impl Chain {
    /// Issue a challenge for `address` to sign, stamped with the chain's clock.
    pub fn request_challenge(&self, address: &str) -> String {
        let now = self.now_secs();
        let challenge = Challenge::new(address, now, self.config().protocol_tag.as_str());
        debug!(address, timestamp = now, "issued challenge");
        challenge.to_string()
    }

    /// Admit a claim if `signature` proves control of `address`.
    ///
    /// On success the new record is returned. On any rejection the chain is
    /// left exactly as it was.
    pub async fn submit_proof(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        claim_data: Value,
    ) -> Result<Record, SubmitError> {
        let result = self.admit(address, message, signature, claim_data).await;

        match &result {
            Ok(record) => info!(address, height = record.height, "claim admitted"),
            Err(e) => warn!(address, error = %e, "claim rejected"),
        }
        result
    }

    async fn admit(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        claim_data: Value,
    ) -> Result<Record, SubmitError> {
        self.check_challenge(address, message, self.now_secs())?;

        verify_challenge_signature(address, message, signature)
            .map_err(SubmitError::InvalidSignature)?;

        let envelope = ClaimEnvelope {
            address: address.to_string(),
            message: message.to_string(),
            signature: signature.to_string(),
            star: claim_data,
        };
        let record = Record::new(&envelope).map_err(crate::error::AppendError::from)?;

        Ok(self.append(record).await?)
    }

    /// Check shape, binding, and age of a challenge.
    fn check_challenge(
        &self,
        address: &str,
        message: &str,
        now: u64,
    ) -> Result<Challenge, SubmitError> {
        let challenge = Challenge::parse(message)?;
        let config = self.config();

        if challenge.tag != config.protocol_tag {
            return Err(SubmitError::MalformedChallenge(format!(
                "unknown protocol tag {:?}",
                challenge.tag
            )));
        }
        if challenge.address != address {
            return Err(SubmitError::MalformedChallenge(
                "challenge was issued for a different address".into(),
            ));
        }

        if challenge.timestamp > now {
            let ahead_secs = challenge.timestamp - now;
            if ahead_secs > config.max_clock_skew.as_secs() {
                return Err(SubmitError::ChallengeFromFuture { ahead_secs });
            }
        }

        let age_secs = now.saturating_sub(challenge.timestamp);
        let window_secs = config.challenge_window.as_secs();
        if age_secs > window_secs {
            return Err(SubmitError::ExpiredChallenge {
                age_secs,
                window_secs,
            });
        }

        Ok(challenge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTimeSource;
    use crate::config::ChainConfig;
    use serde_json::json;
    use starledger_core::Keypair;

    const NOW: u64 = 1_700_000_000;

    /// A default-config chain on a clock that reads `NOW` until moved.
    fn chain_at_now() -> (Chain, ManualTimeSource) {
        let clock = ManualTimeSource::new(NOW);
        let chain = Chain::with_time_source(ChainConfig::default(), clock.clone());
        (chain, clock)
    }

    /// Challenge for `keypair` issued at `issued_at`, with its signature.
    fn signed(keypair: &Keypair, issued_at: u64) -> (String, String) {
        let message = Challenge::new(keypair.address(), issued_at, "starRegistry").to_string();
        let signature = keypair.sign_challenge(&message).to_hex();
        (message, signature)
    }

    #[test]
    fn test_challenge_roundtrip() {
        let challenge = Challenge::new("addr1", 1_700_000_000, "starRegistry");
        let text = challenge.to_string();
        assert_eq!(text, "addr1:1700000000:starRegistry");
        assert_eq!(Challenge::parse(&text).unwrap(), challenge);
    }

    #[test]
    fn test_challenge_parse_rejects_bad_shapes() {
        for message in [
            "",
            "addr:1",
            "addr:1:tag:extra",
            ":1:tag",
            "addr:-5:tag",
            "addr:soon:tag",
        ] {
            assert!(
                matches!(
                    Challenge::parse(message),
                    Err(SubmitError::MalformedChallenge(_))
                ),
                "{message:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_request_challenge_uses_chain_clock() {
        let (chain, clock) = chain_at_now();
        assert_eq!(chain.request_challenge("addr1"), "addr1:1700000000:starRegistry");

        clock.advance(42);
        let parsed = Challenge::parse(&chain.request_challenge("addr1")).unwrap();
        assert_eq!(parsed.timestamp, NOW + 42);
    }

    #[tokio::test]
    async fn test_submit_valid_proof() {
        let (chain, clock) = chain_at_now();
        let keypair = Keypair::from_seed(&[1; 32]);
        let message = chain.request_challenge(&keypair.address());
        let signature = keypair.sign_challenge(&message).to_hex();

        clock.advance(10);
        let record = chain
            .submit_proof(&keypair.address(), &message, &signature, json!({"id": 7}))
            .await
            .unwrap();

        assert_eq!(record.height, 1);
        assert_eq!(record.time, NOW + 10);
        assert!(record.validate());

        let envelope: ClaimEnvelope = record.decode_payload_as().unwrap();
        assert_eq!(envelope.address, keypair.address());
        assert_eq!(envelope.message, message);
        assert_eq!(envelope.signature, signature);
        assert_eq!(envelope.star, json!({"id": 7}));
    }

    #[tokio::test]
    async fn test_window_boundary() {
        let (chain, clock) = chain_at_now();
        let keypair = Keypair::from_seed(&[2; 32]);
        let (message, signature) = signed(&keypair, NOW);

        clock.set(NOW + 300);
        let at_edge = chain
            .submit_proof(&keypair.address(), &message, &signature, json!(1))
            .await;
        assert!(at_edge.is_ok());

        clock.set(NOW + 301);
        let past_edge = chain
            .submit_proof(&keypair.address(), &message, &signature, json!(2))
            .await;
        assert!(matches!(
            past_edge,
            Err(SubmitError::ExpiredChallenge {
                age_secs: 301,
                window_secs: 300
            })
        ));
        assert_eq!(chain.get_height().await, 2);
    }

    #[tokio::test]
    async fn test_backdated_challenge_cannot_backdate_record() {
        let chain = Chain::default();
        let genesis_time = chain.get_by_index(0).await.unwrap().time;
        let keypair = Keypair::from_seed(&[9; 32]);

        let (message, signature) = signed(&keypair, 1_600_000_000);
        let result = chain
            .submit_proof(&keypair.address(), &message, &signature, json!(1))
            .await;
        assert!(matches!(result, Err(SubmitError::ExpiredChallenge { .. })));

        let (message, signature) = signed(&keypair, chain.now_secs());
        let record = chain
            .submit_proof(&keypair.address(), &message, &signature, json!(2))
            .await
            .unwrap();
        assert!(record.time >= genesis_time);
        assert_eq!(chain.get_height().await, 2);
    }

    #[tokio::test]
    async fn test_future_challenge() {
        let (chain, _clock) = chain_at_now();
        let keypair = Keypair::from_seed(&[3; 32]);

        let (message, signature) = signed(&keypair, NOW + 10);
        assert!(chain
            .submit_proof(&keypair.address(), &message, &signature, json!(1))
            .await
            .is_ok());

        let (message, signature) = signed(&keypair, NOW + 3600);
        let result = chain
            .submit_proof(&keypair.address(), &message, &signature, json!(2))
            .await;
        assert!(matches!(
            result,
            Err(SubmitError::ChallengeFromFuture { ahead_secs: 3600 })
        ));
    }

    #[tokio::test]
    async fn test_wrong_tag_and_wrong_address() {
        let (chain, _clock) = chain_at_now();
        let keypair = Keypair::from_seed(&[4; 32]);
        let address = keypair.address();

        let message = format!("{address}:{NOW}:otherRegistry");
        let signature = keypair.sign_challenge(&message).to_hex();
        let result = chain
            .submit_proof(&address, &message, &signature, json!(1))
            .await;
        assert!(matches!(result, Err(SubmitError::MalformedChallenge(_))));

        let other = Keypair::from_seed(&[5; 32]);
        let (message, signature) = signed(&keypair, NOW);
        let result = chain
            .submit_proof(&other.address(), &message, &signature, json!(1))
            .await;
        assert!(matches!(result, Err(SubmitError::MalformedChallenge(_))));

        assert_eq!(chain.get_height().await, 1);
    }

    #[tokio::test]
    async fn test_signature_failures() {
        let (chain, _clock) = chain_at_now();
        let owner = Keypair::from_seed(&[6; 32]);
        let forger = Keypair::from_seed(&[7; 32]);
        let message = chain.request_challenge(&owner.address());

        let forged = forger.sign_challenge(&message).to_hex();
        for signature in [forged.as_str(), "", "xyz", "abcd"] {
            let result = chain
                .submit_proof(&owner.address(), &message, signature, json!(1))
                .await;
            assert!(
                matches!(result, Err(SubmitError::InvalidSignature(_))),
                "{signature:?} should be rejected"
            );
        }

        // Address that is not a key at all.
        let message = chain.request_challenge("addr1");
        let signature = owner.sign_challenge(&message).to_hex();
        let result = chain
            .submit_proof("addr1", &message, &signature, json!(1))
            .await;
        assert!(matches!(result, Err(SubmitError::InvalidSignature(_))));

        assert_eq!(chain.get_height().await, 1);
    }

    #[tokio::test]
    async fn test_uppercase_address_is_rejected() {
        let (chain, _clock) = chain_at_now();
        let keypair = Keypair::from_seed(&[10; 32]);
        let upper = keypair.address().to_uppercase();

        let message = chain.request_challenge(&upper);
        let signature = keypair.sign_challenge(&message).to_hex();
        let result = chain
            .submit_proof(&upper, &message, &signature, json!({"id": 1}))
            .await;

        assert!(matches!(
            result,
            Err(SubmitError::InvalidSignature(
                starledger_core::CoreError::MalformedAddress(_)
            ))
        ));
        assert_eq!(chain.get_height().await, 1);
        assert!(chain
            .get_records_for_owner(&keypair.address())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_identity_point_address_cannot_be_claimed() {
        let (chain, _clock) = chain_at_now();
        let address = format!("01{}", "00".repeat(31));
        let message = chain.request_challenge(&address);
        let signature = format!("01{}", "00".repeat(63));

        let result = chain
            .submit_proof(&address, &message, &signature, json!(1))
            .await;
        assert!(matches!(result, Err(SubmitError::InvalidSignature(_))));
        assert_eq!(chain.get_height().await, 1);
    }

    #[tokio::test]
    async fn test_custom_window_and_tag() {
        let clock = ManualTimeSource::new(NOW);
        let chain = Chain::with_time_source(
            ChainConfig {
                challenge_window: std::time::Duration::from_secs(10),
                protocol_tag: "testTag".into(),
                ..ChainConfig::default()
            },
            clock.clone(),
        );
        let keypair = Keypair::from_seed(&[8; 32]);
        let message = chain.request_challenge(&keypair.address());
        let signature = keypair.sign_challenge(&message).to_hex();
        assert!(message.ends_with(":testTag"));

        clock.advance(11);
        let result = chain
            .submit_proof(&keypair.address(), &message, &signature, json!(1))
            .await;
        assert!(matches!(result, Err(SubmitError::ExpiredChallenge { .. })));
    }
}
