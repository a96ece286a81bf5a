//! Encoders and signers for building transactions the lock accepts.
//!
//! Used by the snapshot loader to serialize scripts, and by tests to produce
//! correctly signed witnesses in both layouts.
use anyhow::{Context, Result};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use program::hash::{blake2b_256, finalize_32, hash160, Digest, Sha256};
use types::{Config, PubkeyHash, TxHash};

fn push_u32(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&(value as u32).to_le_bytes());
}

fn pad4(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

/// Flatbuffers `Witness { data: [Bytes] }`, built front to back with one
/// vtable shared by every `Bytes` entry.
pub fn encode_array_witness(entries: &[&[u8]]) -> Vec<u8> {
    const BYTES_VTABLE: usize = 20;

    let mut out = Vec::new();
    push_u32(&mut out, 12); // root table
    out.extend_from_slice(&[6, 0, 8, 0, 4, 0, 0, 0]); // Witness vtable @4
    push_u32(&mut out, 8); // root table @12
    push_u32(&mut out, 12); // data vector @28
    out.extend_from_slice(&[6, 0, 8, 0, 4, 0, 0, 0]); // Bytes vtable @20
    push_u32(&mut out, entries.len());

    let slots = out.len();
    out.resize(slots + 4 * entries.len(), 0);
    for (i, entry) in entries.iter().enumerate() {
        let table = out.len();
        let slot = slots + 4 * i;
        out[slot..slot + 4].copy_from_slice(&((table - slot) as u32).to_le_bytes());
        push_u32(&mut out, table - BYTES_VTABLE);
        push_u32(&mut out, 4);
        push_u32(&mut out, entry.len());
        out.extend_from_slice(entry);
        pad4(&mut out);
    }
    out
}

/// molecule `Bytes`
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + data.len());
    push_u32(&mut out, data.len());
    out.extend_from_slice(data);
    out
}

/// molecule `BytesOpt`, empty when absent.
pub fn encode_bytes_opt(data: Option<&[u8]>) -> Vec<u8> {
    data.map(encode_bytes).unwrap_or_default()
}

/// molecule table from already encoded fields.
pub fn encode_table(fields: &[Vec<u8>]) -> Vec<u8> {
    let header = 4 * (fields.len() + 1);
    let total = header + fields.iter().map(Vec::len).sum::<usize>();
    let mut out = Vec::with_capacity(total);
    push_u32(&mut out, total);
    let mut offset = header;
    for field in fields {
        push_u32(&mut out, offset);
        offset += field.len();
    }
    for field in fields {
        out.extend_from_slice(field);
    }
    out
}

pub fn encode_witness_args(
    lock: Option<&[u8]>,
    input_type: Option<&[u8]>,
    output_type: Option<&[u8]>,
) -> Vec<u8> {
    encode_table(&[
        encode_bytes_opt(lock),
        encode_bytes_opt(input_type),
        encode_bytes_opt(output_type),
    ])
}

pub fn encode_script(code_hash: &[u8; 32], hash_type: u8, args: &[u8]) -> Vec<u8> {
    encode_table(&[code_hash.to_vec(), vec![hash_type], encode_bytes(args)])
}

/// A script whose args are `pubkey_hash`.
pub fn lock_script(pubkey_hash: &PubkeyHash) -> Vec<u8> {
    encode_script(&[0u8; 32], 1, pubkey_hash.as_bytes())
}

/// SEC1 encoding of the key's public half.
pub fn pubkey_bytes(key: &SigningKey, compressed: bool) -> Vec<u8> {
    key.verifying_key()
        .to_encoded_point(compressed)
        .as_bytes()
        .to_vec()
}

pub fn pubkey_hash(pubkey: &[u8]) -> PubkeyHash {
    hash160(pubkey)
}

/// Signs one array witness: `[pubkey, der_signature, extras...]` with the
/// signature over `BLAKE2b-256(tx_hash || extras...)`.
pub fn sign_array_witness(
    key: &SigningKey,
    tx_hash: &TxHash,
    compressed: bool,
    extras: &[&[u8]],
) -> Result<Vec<u8>> {
    let mut message = tx_hash.as_bytes().to_vec();
    for extra in extras {
        message.extend_from_slice(extra);
    }
    let sighash = blake2b_256(&message);
    let signature: Signature = key.sign_prehash(&sighash).context("signing array sighash")?;
    let der = signature.to_der();

    let pubkey = pubkey_bytes(key, compressed);
    let mut entries: Vec<&[u8]> = vec![&pubkey, der.as_bytes()];
    entries.extend_from_slice(extras);
    Ok(encode_array_witness(&entries))
}

/// Sighash-all over an already zero-filled first witness and every witness
/// after it that the lock hashes, in the order it hashes them.
pub fn sighash_all(tx_hash: &TxHash, first_witness: &[u8], rest: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tx_hash.as_bytes());
    for witness in std::iter::once(first_witness).chain(rest.iter().copied()) {
        hasher.update((witness.len() as u64).to_le_bytes());
        hasher.update(witness);
    }
    finalize_32(hasher)
}

/// Shape of a table lock field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockLayout {
    /// 64 for plain `r || s`, 65 when a recovery id is appended.
    pub signature_len: usize,
    pub compressed: bool,
}

impl LockLayout {
    pub const ALL: [LockLayout; 4] = [
        LockLayout::new(Config::SIGNATURE_SIZE, true),
        LockLayout::new(Config::SIGNATURE_SIZE, false),
        LockLayout::new(Config::RECOVERABLE_SIGNATURE_SIZE, true),
        LockLayout::new(Config::RECOVERABLE_SIGNATURE_SIZE, false),
    ];

    pub const fn new(signature_len: usize, compressed: bool) -> Self {
        Self {
            signature_len,
            compressed,
        }
    }

    pub fn pubkey_len(&self) -> usize {
        if self.compressed {
            Config::PUBKEY_COMPRESSED_SIZE
        } else {
            Config::PUBKEY_UNCOMPRESSED_SIZE
        }
    }

    pub fn lock_len(&self) -> usize {
        self.signature_len + self.pubkey_len()
    }
}

/// Offset of the lock payload in a `WitnessArgs` whose lock is present:
/// 16-byte table header, then the 4-byte `Bytes` length.
pub const LOCK_PAYLOAD_OFFSET: usize = 20;

/// Builds and signs the first witness of a table-format group.
///
/// `rest` lists the further group witnesses followed by the trailing
/// witnesses, exactly as the lock will hash them.
pub fn sign_table_witness(
    key: &SigningKey,
    tx_hash: &TxHash,
    layout: LockLayout,
    input_type: Option<&[u8]>,
    output_type: Option<&[u8]>,
    rest: &[&[u8]],
) -> Result<Vec<u8>> {
    let mut lock = vec![0u8; layout.signature_len];
    lock.extend_from_slice(&pubkey_bytes(key, layout.compressed));
    let mut witness = encode_witness_args(Some(&lock), input_type, output_type);

    let sighash = sighash_all(tx_hash, &witness, rest);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&sighash)
        .context("signing table sighash")?;

    let start = LOCK_PAYLOAD_OFFSET;
    witness[start..start + Config::SIGNATURE_SIZE].copy_from_slice(&signature.to_bytes());
    if layout.signature_len == Config::RECOVERABLE_SIGNATURE_SIZE {
        witness[start + Config::RECID_INDEX] = recovery_id.to_byte();
    }
    Ok(witness)
}
