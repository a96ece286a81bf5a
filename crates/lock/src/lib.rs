//! secp256k1 / RIPEMD160 pay-to-pubkey-hash lock.
//!
//! A spender proves ownership of the key behind a 20-byte pubkey hash by
//! revealing the pubkey and an ECDSA signature in the witness. Two witness
//! layouts are supported, each with its own signed-message construction:
//!
//! - [`WitnessFormat::Array`]: a list `[pubkey, der_signature, extra...]`,
//!   signed message `BLAKE2b-256(tx_hash || extra...)`, checked per grouped
//!   input.
//! - [`WitnessFormat::Table`]: a `WitnessArgs` table whose `lock` field is
//!   `signature || pubkey`, signed message is a SHA-256 over the tx hash and
//!   every grouped and trailing witness, checked once for the group.
#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod pubkey_hash;
pub mod sighash;
pub mod signature;
pub mod verifier;
pub mod witness;

pub use error::Error;
pub use verifier::{entry, verify, Phase, Scratch, Verifier, WitnessFormat};
