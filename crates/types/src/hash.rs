use core::fmt;

pub const TX_HASH_LEN: usize = 32;
pub const PUBKEY_HASH_LEN: usize = 20;

/// Hash of the transaction being validated, loaded once per run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct TxHash(pub [u8; TX_HASH_LEN]);

/// RIPEMD160(SHA256(pubkey)), the owner fingerprint stored in script args.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct PubkeyHash(pub [u8; PUBKEY_HASH_LEN]);

impl TxHash {
    pub fn new(bytes: [u8; TX_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns `None` unless `slice` is exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; TX_HASH_LEN] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PubkeyHash {
    pub fn new(bytes: [u8; PUBKEY_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns `None` unless `slice` is exactly 20 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; PUBKEY_HASH_LEN] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Debug for PubkeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Display for PubkeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl From<[u8; TX_HASH_LEN]> for TxHash {
    fn from(bytes: [u8; TX_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; PUBKEY_HASH_LEN]> for PubkeyHash {
    fn from(bytes: [u8; PUBKEY_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_exact_length() {
        assert!(PubkeyHash::from_slice(&[0u8; 19]).is_none());
        assert!(PubkeyHash::from_slice(&[0u8; 21]).is_none());
        assert_eq!(PubkeyHash::from_slice(&[7u8; 20]), Some(PubkeyHash([7u8; 20])));
        assert!(TxHash::from_slice(&[0u8; 31]).is_none());
        assert_eq!(TxHash::from_slice(&[1u8; 32]), Some(TxHash([1u8; 32])));
    }
}
