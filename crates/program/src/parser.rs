//! Bounds-checked little-endian reader over a byte slice.
use crate::schema::SchemaError;

pub struct DataParser<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> DataParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Starts reading at `offset`, which must lie within `data`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self, SchemaError> {
        if offset > data.len() {
            return Err(SchemaError::OutOfBounds);
        }
        Ok(Self { data, offset })
    }

    fn ensure(&self, bytes: usize) -> Result<(), SchemaError> {
        match self.offset.checked_add(bytes) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(SchemaError::OutOfBounds),
        }
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], SchemaError> {
        self.ensure(len)?;
        let start = self.offset;
        self.offset += len;
        Ok(&self.data[start..start + len])
    }

    /// Peek at the upcoming bytes without advancing the cursor.
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8], SchemaError> {
        self.ensure(len)?;
        Ok(&self.data[self.offset..self.offset + len])
    }

    pub fn read_u16(&mut self) -> Result<u16, SchemaError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, SchemaError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, SchemaError> {
        Ok(self.read_u32()? as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_values() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xff, 0xff, 0xff, 0xff];
        let mut parser = DataParser::new(&data);
        assert_eq!(parser.read_u16().unwrap(), 0x0201);
        assert_eq!(parser.read_u32().unwrap(), 0x0605_0403);
        assert_eq!(parser.read_i32().unwrap(), -1);
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn short_reads_fail_without_advancing() {
        let data = [0u8; 3];
        let mut parser = DataParser::new(&data);
        assert_eq!(parser.read_u32(), Err(SchemaError::OutOfBounds));
        assert_eq!(parser.position(), 0);
        assert_eq!(parser.peek_bytes(3).unwrap(), &data[..]);
        assert!(DataParser::at(&data, 4).is_err());
    }
}
