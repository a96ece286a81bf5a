//! Read-only access to the transaction being validated.
//!
//! The lock never sees the transaction directly. Every piece of data it needs
//! comes through `TransactionContext`, which the execution environment
//! implements against an immutable snapshot. Loads are synchronous and copy
//! into caller-owned buffers.
use core::fmt;

use types::TxHash;

/// Which index space a load refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// All inputs of the transaction. For witnesses this is the raw witness
    /// index, independent of how many inputs exist.
    Input,
    /// Only the inputs locked by the script currently executing.
    GroupInput,
}

/// Failure reported by the environment for a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysError {
    /// The index is past the last item in the requested source. This is the
    /// end-of-sequence signal, not necessarily an error.
    IndexOutOfBound,
    /// The index is valid but the requested item does not exist.
    ItemMissing,
    /// The requested offset lies beyond the end of the item.
    InvalidOffset,
    /// Any other environment failure, carrying the raw code.
    Unknown(u64),
}

impl fmt::Display for SysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SysError::IndexOutOfBound => write!(f, "index out of bound"),
            SysError::ItemMissing => write!(f, "item missing"),
            SysError::InvalidOffset => write!(f, "offset beyond item length"),
            SysError::Unknown(code) => write!(f, "environment error {}", code),
        }
    }
}

/// Data-access surface the lock consumes.
///
/// Byte loads follow partial-load semantics: copy
/// `min(buf.len(), item_len - offset)` bytes of the item starting at `offset`
/// into `buf` and return `item_len - offset`. A return value larger than
/// `buf.len()` tells the caller the item did not fit.
pub trait TransactionContext {
    /// Hash of the whole transaction.
    fn load_tx_hash(&self) -> Result<TxHash, SysError>;

    /// Serialized script currently executing.
    fn load_script(&self, buf: &mut [u8], offset: usize) -> Result<usize, SysError>;

    /// Witness bytes at `index` within `source`.
    fn load_witness(
        &self,
        buf: &mut [u8],
        offset: usize,
        index: usize,
        source: Source,
    ) -> Result<usize, SysError>;

    /// The `since` field of an input. Its fixed 8-byte size makes it the
    /// cheapest way to ask whether an input exists at `index`.
    fn load_input_since(&self, index: usize, source: Source) -> Result<u64, SysError>;

    /// Environment debug channel. Discarded unless the host captures it.
    fn debug(&self, _args: fmt::Arguments<'_>) {}
}

/// Counts inputs in `source` by probing `since` until the environment reports
/// the end of the sequence.
pub fn count_inputs<C: TransactionContext + ?Sized>(
    ctx: &C,
    source: Source,
) -> Result<usize, SysError> {
    let mut index = 0;
    loop {
        match ctx.load_input_since(index, source) {
            Ok(_) => index += 1,
            Err(SysError::IndexOutOfBound) => return Ok(index),
            Err(err) => return Err(err),
        }
    }
}
