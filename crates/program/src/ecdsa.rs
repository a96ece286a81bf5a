use core::fmt;

use k256::ecdsa::{signature::hazmat::PrehashVerifier, Signature, VerifyingKey};
use types::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaError {
    InvalidPublicKey,
    InvalidSignature,
    InvalidMessageHash,
    VerificationFailed,
}

impl fmt::Display for EcdsaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcdsaError::InvalidPublicKey => write!(f, "Invalid public key"),
            EcdsaError::InvalidSignature => write!(f, "Invalid signature"),
            EcdsaError::InvalidMessageHash => write!(f, "Message hash must be 32 bytes"),
            EcdsaError::VerificationFailed => write!(f, "Signature verification failed"),
        }
    }
}

/// Parses a SEC1 public key, 33 bytes compressed or 65 bytes uncompressed.
pub fn parse_pubkey(pubkey: &[u8]) -> Result<VerifyingKey, EcdsaError> {
    if pubkey.len() != Config::PUBKEY_COMPRESSED_SIZE
        && pubkey.len() != Config::PUBKEY_UNCOMPRESSED_SIZE
    {
        return Err(EcdsaError::InvalidPublicKey);
    }
    VerifyingKey::from_sec1_bytes(pubkey).map_err(|_| EcdsaError::InvalidPublicKey)
}

/// Parses a strict DER-encoded signature.
pub fn parse_der_signature(sig: &[u8]) -> Result<Signature, EcdsaError> {
    Signature::from_der(sig).map_err(|_| EcdsaError::InvalidSignature)
}

/// Parses a compact r||s signature. A 65th recovery byte, if present, is
/// ignored.
pub fn parse_compact_signature(sig: &[u8]) -> Result<Signature, EcdsaError> {
    if sig.len() != Config::SIGNATURE_SIZE && sig.len() != Config::RECOVERABLE_SIGNATURE_SIZE {
        return Err(EcdsaError::InvalidSignature);
    }
    Signature::from_slice(&sig[..Config::SIGNATURE_SIZE]).map_err(|_| EcdsaError::InvalidSignature)
}

/// Verifies a parsed signature against a pre-hashed message.
///
/// The message is NOT hashed again.
pub fn verify_prehash(
    key: &VerifyingKey,
    sig: &Signature,
    message_hash: &[u8],
) -> Result<(), EcdsaError> {
    if message_hash.len() != 32 {
        return Err(EcdsaError::InvalidMessageHash);
    }
    key.verify_prehash(message_hash, sig)
        .map_err(|_| EcdsaError::VerificationFailed)
}

/// Verifies an ECDSA signature against a pre-hashed message (32-byte hash).
///
/// # Arguments
/// * `pubkey` - The public key in SEC1 format (33 bytes compressed or 65 bytes uncompressed)
/// * `sig` - The signature as r||s (64 bytes), or r||s||recovery id (65 bytes)
/// * `message_hash` - The pre-computed hash of the message (must be exactly 32 bytes)
pub fn verify_signature_hash(
    pubkey: &[u8],
    sig: &[u8],
    message_hash: &[u8],
) -> Result<(), EcdsaError> {
    if message_hash.len() != 32 {
        return Err(EcdsaError::InvalidMessageHash);
    }
    let verifying_key = parse_pubkey(pubkey)?;
    let signature = parse_compact_signature(sig)?;
    verify_prehash(&verifying_key, &signature, message_hash)
}
