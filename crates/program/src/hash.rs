//! Hash primitives consumed by the lock.
use blake2::Blake2b;
use blake2::digest::consts::U32;
use ripemd::Ripemd160;
use types::{Config, PubkeyHash};

pub use sha2::{Digest, Sha256};

/// BLAKE2b with a 32-byte output and no personalization.
pub type Blake2b256 = Blake2b<U32>;

pub fn sha256(data: &[u8]) -> [u8; Config::SHA256_SIZE] {
    let mut out = [0u8; Config::SHA256_SIZE];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

pub fn ripemd160(data: &[u8]) -> [u8; Config::RIPEMD160_SIZE] {
    let mut out = [0u8; Config::RIPEMD160_SIZE];
    out.copy_from_slice(&Ripemd160::digest(data));
    out
}

/// RIPEMD160(SHA256(data)).
pub fn hash160(data: &[u8]) -> PubkeyHash {
    PubkeyHash(ripemd160(&sha256(data)))
}

pub fn blake2b_256(data: &[u8]) -> [u8; Config::BLAKE2B_SIZE] {
    let mut out = [0u8; Config::BLAKE2B_SIZE];
    out.copy_from_slice(&Blake2b256::digest(data));
    out
}

/// Finalizes any 32-byte digest into a plain array.
pub fn finalize_32<D: Digest>(hasher: D) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize()[..32]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_abc() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn ripemd160_empty() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn hash160_of_pubkey() {
        let pubkey = hex::decode("126999eabe3f84a3a9f5c09e87faab27484818a0ec1d67b94c9a02e40268499d98538cf770198550adfb9d1d473e5e926bb00e4c58baec1fb42ffa6069781003e4").unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey).0),
            "3c231b5e624a42e99a87160c6e4231718a6d77c0"
        );
    }

    #[test]
    fn blake2b_256_empty() {
        assert_eq!(
            hex::encode(blake2b_256(b"")),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut hasher = Blake2b256::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(finalize_32(hasher), blake2b_256(b"hello world"));
    }
}
