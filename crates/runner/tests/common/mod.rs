#![allow(dead_code)]

use k256::ecdsa::SigningKey;
use runner::fixtures::{lock_script, pubkey_bytes, pubkey_hash};
use runner::TxSnapshot;
use types::TxHash;

/// Owner of the locked inputs.
pub const OWNER_SK_BYTES: [u8; 32] = [
    0x3c, 0x9a, 0x11, 0x5f, 0x28, 0x61, 0x0e, 0x4b, 0x7d, 0x92, 0xa4, 0x05, 0xc8, 0x3e, 0x51, 0x77,
    0x19, 0xe2, 0x6a, 0x0b, 0x94, 0x2f, 0xd3, 0x48, 0x80, 0x6c, 0x15, 0xbe, 0x27, 0x59, 0xa1, 0x06,
];

/// Someone else.
pub const OTHER_SK_BYTES: [u8; 32] = [
    0x71, 0x0d, 0xe4, 0x3a, 0x58, 0x9c, 0x22, 0xf1, 0x6b, 0x07, 0xd5, 0x9e, 0x41, 0xb8, 0x13, 0x6a,
    0xcf, 0x30, 0x85, 0x5d, 0x2e, 0x97, 0x4c, 0x08, 0xba, 0x66, 0xf3, 0x1d, 0x74, 0xe0, 0x29, 0x5b,
];

pub const TX_HASH: TxHash = TxHash([0x42; 32]);

pub fn owner() -> SigningKey {
    SigningKey::from_slice(&OWNER_SK_BYTES).expect("valid sk bytes")
}

pub fn other() -> SigningKey {
    SigningKey::from_slice(&OTHER_SK_BYTES).expect("valid sk bytes")
}

/// Script locked to `key`'s public key in the given encoding.
pub fn script_for(key: &SigningKey, compressed: bool) -> Vec<u8> {
    lock_script(&pubkey_hash(&pubkey_bytes(key, compressed)))
}

/// Empty transaction locked to the owner's compressed key.
pub fn owner_tx() -> TxSnapshot {
    TxSnapshot::new(TX_HASH, script_for(&owner(), true))
}
