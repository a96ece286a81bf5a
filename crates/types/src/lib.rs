#![no_std]

pub mod hash;
pub use hash::{PubkeyHash, TxHash, PUBKEY_HASH_LEN, TX_HASH_LEN};

pub mod result;
pub use result::Result;

pub mod global;
pub use global::Config;
