use program::ecdsa::{self, EcdsaError};

use crate::error::Error;
use crate::witness::LockField;

fn map_ecdsa(err: EcdsaError) -> Error {
    match err {
        EcdsaError::InvalidPublicKey => Error::PubkeyParse,
        EcdsaError::InvalidSignature => Error::SignatureParse,
        EcdsaError::VerificationFailed => Error::SignatureVerification,
        EcdsaError::InvalidMessageHash => Error::Unknown,
    }
}

/// DER signature over the array sighash, checked against `pubkey`.
pub fn verify_array(pubkey: &[u8], signature: &[u8], sighash: &[u8; 32]) -> Result<(), Error> {
    let key = ecdsa::parse_pubkey(pubkey).map_err(map_ecdsa)?;
    let sig = ecdsa::parse_der_signature(signature).map_err(map_ecdsa)?;
    ecdsa::verify_prehash(&key, &sig, sighash).map_err(map_ecdsa)
}

/// Compact signature from the lock field, checked against the pubkey that
/// follows it in the same field.
///
/// A 65-byte signature carries a recovery id; it is ignored and no key is
/// ever recovered from it.
pub fn verify_table(lock: &LockField<'_>, sighash: &[u8; 32]) -> Result<(), Error> {
    ecdsa::verify_signature_hash(lock.pubkey(), lock.signature(), sighash).map_err(map_ecdsa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey};

    fn signing_key() -> SigningKey {
        SigningKey::from_slice(&[0x11; 32]).expect("valid sk bytes")
    }

    #[test]
    fn array_errors_are_distinguished() {
        let key = signing_key();
        let pubkey = key.verifying_key().to_encoded_point(true);
        let sighash = [5u8; 32];
        let sig: Signature = key.sign_prehash(&sighash).expect("sign");
        let der = sig.to_der();

        assert!(verify_array(pubkey.as_bytes(), der.as_bytes(), &sighash).is_ok());
        assert_eq!(
            verify_array(pubkey.as_bytes(), der.as_bytes(), &[6u8; 32]),
            Err(Error::SignatureVerification)
        );
        assert_eq!(
            verify_array(pubkey.as_bytes(), &sig.to_bytes(), &sighash),
            Err(Error::SignatureParse)
        );
        assert_eq!(
            verify_array(&[0x05; 33], der.as_bytes(), &sighash),
            Err(Error::PubkeyParse)
        );
    }
}
