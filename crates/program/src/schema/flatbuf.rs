//! Reader for the flatbuffers wire layout of the array witness:
//!
//! ```text
//! table Bytes   { seq: [ubyte]; }
//! table Witness { data: [Bytes]; }
//! root_type Witness;
//! ```
//!
//! Layout rules enforced here: the buffer starts with a `u32` offset to the
//! root table; a table starts with an `i32` back-offset to its vtable; a
//! vtable is `u16 vtable_len, u16 table_len, u16 field_offset...`; references
//! to vectors and tables are `u32` offsets relative to where they are stored;
//! a vector is a `u32` element count followed by the elements.
use super::SchemaError;
use crate::parser::DataParser;

const UOFFSET_SIZE: usize = 4;
const VTABLE_HEADER_SIZE: usize = 4;

fn check_aligned(pos: usize, align: usize) -> Result<(), SchemaError> {
    if pos % align != 0 {
        return Err(SchemaError::Misaligned);
    }
    Ok(())
}

fn read_u32_at(buf: &[u8], pos: usize) -> Result<u32, SchemaError> {
    DataParser::at(buf, pos)?.read_u32()
}

/// Follows the `u32` forward offset stored at `pos`.
fn follow(buf: &[u8], pos: usize) -> Result<usize, SchemaError> {
    check_aligned(pos, UOFFSET_SIZE)?;
    let target = pos
        .checked_add(read_u32_at(buf, pos)? as usize)
        .ok_or(SchemaError::OutOfBounds)?;
    if target >= buf.len() {
        return Err(SchemaError::OutOfBounds);
    }
    Ok(target)
}

#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    buf: &'a [u8],
    pos: usize,
    vtable: usize,
    vtable_len: usize,
    table_len: usize,
}

impl<'a> Table<'a> {
    /// Resolves the root table of `buf`.
    pub fn root(buf: &'a [u8]) -> Result<Self, SchemaError> {
        let pos = follow(buf, 0)?;
        Self::at(buf, pos)
    }

    /// Validates the table header and vtable found at `pos`.
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self, SchemaError> {
        check_aligned(pos, UOFFSET_SIZE)?;
        let soffset = DataParser::at(buf, pos)?.read_i32()? as i64;
        let vtable = pos as i64 - soffset;
        if vtable < 0 || vtable as usize >= buf.len() {
            return Err(SchemaError::OutOfBounds);
        }
        let vtable = vtable as usize;
        check_aligned(vtable, 2)?;

        let mut header = DataParser::at(buf, vtable)?;
        let vtable_len = header.read_u16()? as usize;
        let table_len = header.read_u16()? as usize;
        if vtable_len < VTABLE_HEADER_SIZE || vtable_len % 2 != 0 {
            return Err(SchemaError::InvalidSize);
        }
        if vtable + vtable_len > buf.len() {
            return Err(SchemaError::OutOfBounds);
        }
        if table_len < UOFFSET_SIZE || pos + table_len > buf.len() {
            return Err(SchemaError::InvalidSize);
        }

        Ok(Self {
            buf,
            pos,
            vtable,
            vtable_len,
            table_len,
        })
    }

    /// Absolute position of field `id`, or `None` when the field is absent.
    fn field_pos(&self, id: usize) -> Result<Option<usize>, SchemaError> {
        let slot = VTABLE_HEADER_SIZE + 2 * id;
        if slot + 2 > self.vtable_len {
            return Ok(None);
        }
        let offset = DataParser::at(self.buf, self.vtable + slot)?.read_u16()? as usize;
        if offset == 0 {
            return Ok(None);
        }
        if offset + UOFFSET_SIZE > self.table_len {
            return Err(SchemaError::InvalidOffset);
        }
        Ok(Some(self.pos + offset))
    }

    /// Vector referenced by field `id`, with elements of `elem_size` bytes.
    pub fn vector(&self, id: usize, elem_size: usize) -> Result<Option<Vector<'a>>, SchemaError> {
        match self.field_pos(id)? {
            Some(pos) => Vector::at(self.buf, follow(self.buf, pos)?, elem_size).map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Vector<'a> {
    buf: &'a [u8],
    /// Position of the first element.
    start: usize,
    len: usize,
    elem_size: usize,
}

impl<'a> Vector<'a> {
    pub fn at(buf: &'a [u8], pos: usize, elem_size: usize) -> Result<Self, SchemaError> {
        check_aligned(pos, UOFFSET_SIZE)?;
        let len = read_u32_at(buf, pos)? as usize;
        let start = pos + UOFFSET_SIZE;
        let end = len
            .checked_mul(elem_size)
            .and_then(|size| start.checked_add(size))
            .ok_or(SchemaError::InvalidSize)?;
        if end > buf.len() {
            return Err(SchemaError::OutOfBounds);
        }
        Ok(Self {
            buf,
            start,
            len,
            elem_size,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw element bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.start..self.start + self.len * self.elem_size]
    }

    /// Table referenced by element `index` of a vector of tables.
    pub fn table(&self, index: usize) -> Result<Table<'a>, SchemaError> {
        if index >= self.len || self.elem_size != UOFFSET_SIZE {
            return Err(SchemaError::OutOfBounds);
        }
        let pos = follow(self.buf, self.start + index * UOFFSET_SIZE)?;
        Table::at(self.buf, pos)
    }
}

/// `table Bytes { seq: [ubyte]; }`
fn bytes_seq<'a>(table: &Table<'a>) -> Result<&'a [u8], SchemaError> {
    Ok(table
        .vector(0, 1)?
        .map(|seq| seq.as_bytes())
        .unwrap_or(&[]))
}

/// Verified view over an array witness.
#[derive(Debug, Clone, Copy)]
pub struct WitnessReader<'a> {
    data: Option<Vector<'a>>,
}

impl<'a> WitnessReader<'a> {
    /// Checks every table and vector reachable from the root before handing
    /// out a reader. An absent `data` field reads as an empty list.
    pub fn verify(buf: &'a [u8]) -> Result<Self, SchemaError> {
        let root = Table::root(buf)?;
        let data = root.vector(0, UOFFSET_SIZE)?;
        if let Some(entries) = data {
            for index in 0..entries.len() {
                bytes_seq(&entries.table(index)?)?;
            }
        }
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Contents of entry `index`.
    pub fn get(&self, index: usize) -> Result<&'a [u8], SchemaError> {
        let entries = self.data.ok_or(SchemaError::OutOfBounds)?;
        bytes_seq(&entries.table(index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u32(out: &mut Vec<u8>, value: u32) {
        out.extend_from_slice(&value.to_le_bytes());
    }

    fn pad4(out: &mut Vec<u8>) {
        while out.len() % 4 != 0 {
            out.push(0);
        }
    }

    /// Minimal front-to-back encoder sharing one vtable for every `Bytes`.
    fn encode(entries: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        push_u32(&mut out, 12); // root table
        out.extend_from_slice(&[6, 0, 8, 0, 4, 0, 0, 0]); // vtable @4
        push_u32(&mut out, 8); // root table @12, vtable at 12 - 8
        push_u32(&mut out, 12); // data vector at 16 + 12
        out.extend_from_slice(&[6, 0, 8, 0, 4, 0, 0, 0]); // Bytes vtable @20
        push_u32(&mut out, entries.len() as u32); // vector @28
        let slots = out.len();
        out.resize(slots + 4 * entries.len(), 0);
        for (i, entry) in entries.iter().enumerate() {
            let table = out.len();
            let slot = slots + 4 * i;
            out[slot..slot + 4].copy_from_slice(&((table - slot) as u32).to_le_bytes());
            push_u32(&mut out, (table - 20) as u32);
            push_u32(&mut out, 4);
            push_u32(&mut out, entry.len() as u32);
            out.extend_from_slice(entry);
            pad4(&mut out);
        }
        out
    }

    #[test]
    fn reads_entries_in_order() {
        let buf = encode(&[b"first", &[], &[0xaa; 9]]);
        let reader = WitnessReader::verify(&buf).expect("valid witness");
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.get(0).unwrap(), b"first");
        assert_eq!(reader.get(1).unwrap(), b"");
        assert_eq!(reader.get(2).unwrap(), &[0xaa; 9]);
        assert!(reader.get(3).is_err());
    }

    #[test]
    fn empty_vector_is_valid() {
        let buf = encode(&[]);
        let reader = WitnessReader::verify(&buf).expect("valid witness");
        assert!(reader.is_empty());
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let buf = encode(&[b"pubkey", b"signature"]);
        for cut in [0, 3, 10, 20, buf.len() - 8] {
            assert!(WitnessReader::verify(&buf[..cut]).is_err(), "cut at {}", cut);
        }
    }

    #[test]
    fn oversized_seq_length_is_rejected() {
        let mut buf = encode(&[b"abc"]);
        // seq length of the only entry sits right after its table
        let len_pos = buf.len() - 8;
        buf[len_pos..len_pos + 4].copy_from_slice(&1000u32.to_le_bytes());
        assert_eq!(WitnessReader::verify(&buf).unwrap_err(), SchemaError::OutOfBounds);
    }

    #[test]
    fn misaligned_root_is_rejected() {
        let mut buf = encode(&[b"abc"]);
        buf[0] = 13;
        assert_eq!(WitnessReader::verify(&buf).unwrap_err(), SchemaError::Misaligned);
    }
}
