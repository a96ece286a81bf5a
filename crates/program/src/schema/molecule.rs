//! Reader for the molecule encoding used by table witnesses and scripts.
//!
//! ```text
//! vector Bytes <byte>;
//! option BytesOpt (Bytes);
//! array  Byte32 [byte; 32];
//! table  WitnessArgs { lock: BytesOpt, input_type: BytesOpt, output_type: BytesOpt }
//! table  Script      { code_hash: Byte32, hash_type: byte, args: Bytes }
//! ```
//!
//! A fixvec is `u32 item_count` followed by the items. A table is
//! `u32 total_size`, one `u32` start offset per field (relative to the table),
//! then the field bodies; each field ends where the next begins and the last
//! ends at `total_size`. An absent option is zero bytes.
use core::ops::Range;

use super::SchemaError;
use crate::parser::DataParser;

pub const NUMBER_SIZE: usize = 4;

/// Verifies a fixvec of `item_size`-byte items spanning all of `raw` and
/// returns its payload.
pub fn fixvec(raw: &[u8], item_size: usize) -> Result<&[u8], SchemaError> {
    let mut parser = DataParser::new(raw);
    let count = parser.read_u32()? as usize;
    let expected = count
        .checked_mul(item_size)
        .and_then(|size| size.checked_add(NUMBER_SIZE))
        .ok_or(SchemaError::InvalidSize)?;
    if expected != raw.len() {
        return Err(SchemaError::InvalidSize);
    }
    Ok(&raw[NUMBER_SIZE..])
}

/// `vector Bytes <byte>`
pub fn bytes(raw: &[u8]) -> Result<&[u8], SchemaError> {
    fixvec(raw, 1)
}

/// `option BytesOpt (Bytes)`
pub fn bytes_opt(raw: &[u8]) -> Result<Option<&[u8]>, SchemaError> {
    if raw.is_empty() {
        return Ok(None);
    }
    bytes(raw).map(Some)
}

#[derive(Debug, Clone, Copy)]
pub struct TableReader<'a> {
    raw: &'a [u8],
    field_count: usize,
}

impl<'a> TableReader<'a> {
    /// Verifies the table header. With `compatible` set, tables carrying more
    /// fields than `expected_fields` are accepted and the extras ignored.
    pub fn verify(
        raw: &'a [u8],
        expected_fields: usize,
        compatible: bool,
    ) -> Result<Self, SchemaError> {
        let mut parser = DataParser::new(raw);
        let total_size = parser.read_u32()? as usize;
        if total_size != raw.len() {
            return Err(SchemaError::InvalidSize);
        }

        let field_count = if total_size == NUMBER_SIZE {
            0
        } else {
            let first = parser.read_u32()? as usize;
            if first % NUMBER_SIZE != 0 || first < NUMBER_SIZE * 2 || first > total_size {
                return Err(SchemaError::InvalidOffset);
            }
            first / NUMBER_SIZE - 1
        };

        if field_count < expected_fields || (!compatible && field_count > expected_fields) {
            return Err(SchemaError::FieldCount);
        }

        let mut previous = NUMBER_SIZE * (field_count + 1);
        let mut offsets = DataParser::at(raw, NUMBER_SIZE)?;
        for _ in 0..field_count {
            let offset = offsets.read_u32()? as usize;
            if offset < previous || offset > total_size {
                return Err(SchemaError::InvalidOffset);
            }
            previous = offset;
        }

        Ok(Self { raw, field_count })
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Byte range of field `index` relative to the start of the table.
    pub fn field_range(&self, index: usize) -> Result<Range<usize>, SchemaError> {
        if index >= self.field_count {
            return Err(SchemaError::FieldCount);
        }
        let mut parser = DataParser::at(self.raw, NUMBER_SIZE * (index + 1))?;
        let start = parser.read_u32()? as usize;
        let end = if index + 1 == self.field_count {
            self.raw.len()
        } else {
            parser.read_u32()? as usize
        };
        if start > end || end > self.raw.len() {
            return Err(SchemaError::InvalidOffset);
        }
        Ok(start..end)
    }

    pub fn field(&self, index: usize) -> Result<&'a [u8], SchemaError> {
        Ok(&self.raw[self.field_range(index)?])
    }
}

/// Verified view over a table witness.
#[derive(Debug, Clone, Copy)]
pub struct WitnessArgsReader<'a> {
    table: TableReader<'a>,
}

impl<'a> WitnessArgsReader<'a> {
    pub const FIELD_COUNT: usize = 3;

    pub fn verify(raw: &'a [u8]) -> Result<Self, SchemaError> {
        let table = TableReader::verify(raw, Self::FIELD_COUNT, false)?;
        for index in 0..Self::FIELD_COUNT {
            bytes_opt(table.field(index)?)?;
        }
        Ok(Self { table })
    }

    /// Range of the lock payload within the witness, `None` if absent.
    pub fn lock_range(&self) -> Result<Option<Range<usize>>, SchemaError> {
        self.payload_range(0)
    }

    pub fn lock(&self) -> Result<Option<&'a [u8]>, SchemaError> {
        bytes_opt(self.table.field(0)?)
    }

    pub fn input_type(&self) -> Result<Option<&'a [u8]>, SchemaError> {
        bytes_opt(self.table.field(1)?)
    }

    pub fn output_type(&self) -> Result<Option<&'a [u8]>, SchemaError> {
        bytes_opt(self.table.field(2)?)
    }

    fn payload_range(&self, index: usize) -> Result<Option<Range<usize>>, SchemaError> {
        let range = self.table.field_range(index)?;
        if range.is_empty() {
            return Ok(None);
        }
        Ok(Some(range.start + NUMBER_SIZE..range.end))
    }
}

/// Verified view over a serialized script.
#[derive(Debug, Clone, Copy)]
pub struct ScriptReader<'a> {
    table: TableReader<'a>,
}

impl<'a> ScriptReader<'a> {
    pub const FIELD_COUNT: usize = 3;
    pub const CODE_HASH_SIZE: usize = 32;

    pub fn verify(raw: &'a [u8]) -> Result<Self, SchemaError> {
        let table = TableReader::verify(raw, Self::FIELD_COUNT, false)?;
        if table.field(0)?.len() != Self::CODE_HASH_SIZE || table.field(1)?.len() != 1 {
            return Err(SchemaError::InvalidSize);
        }
        bytes(table.field(2)?)?;
        Ok(Self { table })
    }

    pub fn code_hash(&self) -> Result<&'a [u8], SchemaError> {
        self.table.field(0)
    }

    pub fn hash_type(&self) -> Result<u8, SchemaError> {
        Ok(self.table.field(1)?[0])
    }

    pub fn args(&self) -> Result<&'a [u8], SchemaError> {
        bytes(self.table.field(2)?)
    }
}
