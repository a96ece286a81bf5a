//! Readers for the two binary schemas witnesses and scripts are encoded in.
//!
//! Both readers verify the whole structure up front; accessors on a verified
//! reader only hand out slices already known to be in bounds.
use core::fmt;

pub mod flatbuf;
pub mod molecule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaError {
    /// A read or offset points past the end of the buffer.
    OutOfBounds,
    /// An offset that must be 2- or 4-byte aligned is not.
    Misaligned,
    /// A length or size header disagrees with the data.
    InvalidSize,
    /// A field offset is inconsistent with its neighbours.
    InvalidOffset,
    /// The structure has a different number of fields than the schema.
    FieldCount,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::OutOfBounds => write!(f, "read out of bounds"),
            SchemaError::Misaligned => write!(f, "misaligned offset"),
            SchemaError::InvalidSize => write!(f, "invalid size header"),
            SchemaError::InvalidOffset => write!(f, "invalid field offset"),
            SchemaError::FieldCount => write!(f, "unexpected field count"),
        }
    }
}
