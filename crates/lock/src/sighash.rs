//! Reconstruction of the message the spender signed.
use program::hash::{finalize_32, Blake2b256, Digest, Sha256};
use program::syscalls::count_inputs;
use program::{debug, Source, SysError, TransactionContext};
use types::{Config, TxHash};

use crate::error::Error;
use crate::witness::{ArrayWitness, LockField};

const ZERO_SIGNATURE: [u8; Config::RECOVERABLE_SIGNATURE_SIZE] =
    [0u8; Config::RECOVERABLE_SIGNATURE_SIZE];

/// `BLAKE2b-256(tx_hash || extra[0] || extra[1] || ...)`, no length prefixes.
pub fn array_sighash(tx_hash: &TxHash, witness: &ArrayWitness<'_>) -> Result<[u8; 32], Error> {
    let mut hasher = Blake2b256::new();
    hasher.update(tx_hash.as_bytes());
    for index in 0..witness.extra_count() {
        hasher.update(witness.extra(index)?);
    }
    Ok(finalize_32(hasher))
}

/// Sighash-all for the table layout.
///
/// Hashes, in order: the tx hash; the first group witness with the signature
/// bytes of its lock zeroed; every further group witness; every witness past
/// the last transaction input. Each witness is preceded by its length as a
/// little-endian `u64`. `chunk` is scratch for streaming witnesses other than
/// the first.
pub fn sighash_all<C: TransactionContext + ?Sized>(
    ctx: &C,
    tx_hash: &TxHash,
    first_witness: &[u8],
    lock: &LockField<'_>,
    chunk: &mut [u8],
) -> Result<[u8; 32], Error> {
    let mut hasher = Sha256::new();
    hasher.update(tx_hash.as_bytes());

    let zeroed = lock.signature_range();
    hasher.update((first_witness.len() as u64).to_le_bytes());
    hasher.update(&first_witness[..zeroed.start]);
    hasher.update(&ZERO_SIGNATURE[..lock.signature_len]);
    hasher.update(&first_witness[zeroed.end..]);

    let mut index = 1;
    while hash_witness(ctx, &mut hasher, index, Source::GroupInput, chunk)? {
        index += 1;
    }
    debug!(ctx, "sighash_all: {} group witnesses", index);

    let mut index = count_inputs(ctx, Source::Input)?;
    let first_trailing = index;
    while hash_witness(ctx, &mut hasher, index, Source::Input, chunk)? {
        index += 1;
    }
    debug!(ctx, "sighash_all: {} trailing witnesses", index - first_trailing);

    Ok(finalize_32(hasher))
}

/// Feeds `len || bytes` of one witness into `hasher`, streaming through
/// `chunk`. Returns `false` when `index` is past the end of `source`.
fn hash_witness<C: TransactionContext + ?Sized, D: Digest>(
    ctx: &C,
    hasher: &mut D,
    index: usize,
    source: Source,
    chunk: &mut [u8],
) -> Result<bool, Error> {
    if chunk.is_empty() {
        return Err(Error::BufferTooSmall);
    }
    let len = match ctx.load_witness(chunk, 0, index, source) {
        Ok(len) => len,
        Err(SysError::IndexOutOfBound) => return Ok(false),
        Err(err) => return Err(err.into()),
    };
    hasher.update((len as u64).to_le_bytes());

    let mut loaded = len.min(chunk.len());
    hasher.update(&chunk[..loaded]);
    while loaded < len {
        let remaining = ctx.load_witness(chunk, loaded, index, source)?;
        let take = remaining.min(chunk.len());
        if take == 0 || remaining != len - loaded {
            // the environment changed the witness under us
            return Err(Error::Syscall);
        }
        hasher.update(&chunk[..take]);
        loaded += take;
    }
    Ok(true)
}
