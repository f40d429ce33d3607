//! Cryptographic primitives: SHA-256 identity digests and Ed25519 wallet keys.
//!
//! A wallet address is the lowercase hex of a 32-byte Ed25519 public key, so
//! the address alone is enough to check a signature made by its owner.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::CoreError;

/// Domain separation prefix for challenge signatures.
///
/// Wallets sign `CHALLENGE_SIGN_DOMAIN || message`, never the bare message,
/// so a challenge signature cannot be replayed as any other kind of signature.
pub const CHALLENGE_SIGN_DOMAIN: &[u8] = b"starledger/challenge-sig/v1";

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

/// A wallet's Ed25519 public key. Its hex form is the wallet address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalletKey(pub [u8; 32]);

impl WalletKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The wallet address: lowercase hex of the key.
    pub fn address(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a wallet address back into a key.
    ///
    /// Only the canonical lowercase spelling is accepted, so each key has
    /// exactly one address.
    pub fn from_address(address: &str) -> Result<Self, CoreError> {
        let bytes =
            hex::decode(address).map_err(|e| CoreError::MalformedAddress(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::MalformedAddress("expected 32 bytes".into()))?;
        let key = Self(arr);
        if key.address() != address {
            return Err(CoreError::MalformedAddress("not lowercase hex".into()));
        }
        Ok(key)
    }

    /// Verify a signature over a challenge message.
    pub fn verify(&self, message: &str, signature: &WalletSignature) -> Result<(), CoreError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;
        // Small-order keys verify signatures nobody holds a secret for.
        if verifying_key.is_weak() {
            return Err(CoreError::InvalidPublicKey);
        }
        let sig = DalekSignature::from_bytes(&signature.0);
        verifying_key
            .verify_strict(&signed_challenge(message), &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletKey({}...)", &self.address()[..8])
    }
}

/// A 64-byte Ed25519 signature over a challenge message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WalletSignature(pub [u8; 64]);

impl WalletSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::MalformedSignature(e.to_string()))?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CoreError::MalformedSignature("expected 64 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for WalletSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}...)", &self.to_hex()[..8])
    }
}

/// Check that `signature_hex` is the owner of `address` signing `message`.
///
/// Every failure mode (bad address, bad signature encoding, wrong key) comes
/// back as an error; callers that only care about accept/reject can map all
/// of them to a single rejection.
pub fn verify_challenge_signature(
    address: &str,
    message: &str,
    signature_hex: &str,
) -> Result<(), CoreError> {
    let key = WalletKey::from_address(address)?;
    let signature = WalletSignature::from_hex(signature_hex)?;
    key.verify(message, &signature)
}

/// Build the signed bytes for a challenge message.
fn signed_challenge(message: &str) -> Vec<u8> {
    let mut msg = Vec::with_capacity(CHALLENGE_SIGN_DOMAIN.len() + message.len());
    msg.extend_from_slice(CHALLENGE_SIGN_DOMAIN);
    msg.extend_from_slice(message.as_bytes());
    msg
}

/// A wallet keypair.
///
/// The ledger itself never holds private keys; this type exists for clients
/// and tests that need to answer a challenge.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the public key.
    pub fn wallet_key(&self) -> WalletKey {
        WalletKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Get the wallet address.
    pub fn address(&self) -> String {
        self.wallet_key().address()
    }

    /// Sign a challenge message.
    pub fn sign_challenge(&self, message: &str) -> WalletSignature {
        let sig = self.signing_key.sign(&signed_challenge(message));
        WalletSignature(sig.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.wallet_key())
    }
}
