//! Decoders for the two witness layouts.
//!
//! Both hand back slices borrowed from the raw witness; nothing is copied.
use core::ops::Range;

use program::schema::flatbuf::WitnessReader;
use program::schema::molecule::WitnessArgsReader;
use types::Config;

use crate::error::Error;

/// `[pubkey, der_signature, extra...]`
#[derive(Debug, Clone, Copy)]
pub struct ArrayWitness<'a> {
    reader: WitnessReader<'a>,
    pub pubkey: &'a [u8],
    pub signature: &'a [u8],
}

impl<'a> ArrayWitness<'a> {
    pub const PUBKEY_INDEX: usize = 0;
    pub const SIGNATURE_INDEX: usize = 1;
    pub const EXTRA_START: usize = 2;

    pub fn decode(raw: &'a [u8]) -> Result<Self, Error> {
        let reader = WitnessReader::verify(raw)?;
        if reader.len() < Self::EXTRA_START {
            return Err(Error::ArgumentCount);
        }
        // every entry must fit the field scratch, extras included
        for index in 0..reader.len() {
            if reader.get(index)?.len() > Config::TEMP_SIZE {
                return Err(Error::BufferTooSmall);
            }
        }
        Ok(Self {
            reader,
            pubkey: reader.get(Self::PUBKEY_INDEX)?,
            signature: reader.get(Self::SIGNATURE_INDEX)?,
        })
    }

    /// Number of entries after pubkey and signature.
    pub fn extra_count(&self) -> usize {
        self.reader.len() - Self::EXTRA_START
    }

    pub fn extra(&self, index: usize) -> Result<&'a [u8], Error> {
        Ok(self.reader.get(Self::EXTRA_START + index)?)
    }
}

/// Accepted (signature, pubkey) length pairs for the table lock field.
const LOCK_LAYOUTS: [(usize, usize); 4] = [
    (Config::SIGNATURE_SIZE, Config::PUBKEY_COMPRESSED_SIZE),
    (Config::SIGNATURE_SIZE, Config::PUBKEY_UNCOMPRESSED_SIZE),
    (Config::RECOVERABLE_SIGNATURE_SIZE, Config::PUBKEY_COMPRESSED_SIZE),
    (Config::RECOVERABLE_SIGNATURE_SIZE, Config::PUBKEY_UNCOMPRESSED_SIZE),
];

/// `signature || pubkey` extracted from a table witness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockField<'a> {
    /// Offset of the lock payload within the witness.
    pub offset: usize,
    pub signature_len: usize,
    pub pubkey_len: usize,
    lock: &'a [u8],
}

impl<'a> LockField<'a> {
    pub fn decode(raw: &'a [u8]) -> Result<Self, Error> {
        let reader = WitnessArgsReader::verify(raw)?;
        let range = reader.lock_range()?.ok_or(Error::MalformedEncoding)?;
        let lock = &raw[range.clone()];
        let (signature_len, pubkey_len) = Self::layout(lock.len())?;
        Ok(Self {
            offset: range.start,
            signature_len,
            pubkey_len,
            lock,
        })
    }

    /// Splits a lock length into (signature_len, pubkey_len).
    pub fn layout(lock_len: usize) -> Result<(usize, usize), Error> {
        LOCK_LAYOUTS
            .iter()
            .find(|(sig, pubkey)| sig + pubkey == lock_len)
            .map(|(sig, pubkey)| (*sig, *pubkey))
            .ok_or(Error::WitnessTooLarge)
    }

    pub fn signature(&self) -> &'a [u8] {
        &self.lock[..self.signature_len]
    }

    pub fn pubkey(&self) -> &'a [u8] {
        &self.lock[self.signature_len..]
    }

    /// Bytes of the witness that are zeroed when building the signed message.
    pub fn signature_range(&self) -> Range<usize> {
        self.offset..self.offset + self.signature_len
    }
}
