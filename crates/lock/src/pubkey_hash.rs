use program::hash::hash160;
use types::PubkeyHash;

use crate::error::Error;

/// Checks that `pubkey` hashes to `expected`. Exact match only.
pub fn verify(expected: &PubkeyHash, pubkey: &[u8]) -> Result<(), Error> {
    if hash160(pubkey) != *expected {
        return Err(Error::PubkeyHashMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_exact_key() {
        let pubkey = [0x02u8; 33];
        let expected = hash160(&pubkey);
        assert!(verify(&expected, &pubkey).is_ok());

        let mut other = pubkey;
        other[32] ^= 1;
        assert_eq!(verify(&expected, &other), Err(Error::PubkeyHashMismatch));

        let mut near = expected;
        near.0[19] ^= 1;
        assert_eq!(verify(&near, &pubkey), Err(Error::PubkeyHashMismatch));
    }
}
