use core::fmt;

use program::schema::SchemaError;
use program::SysError;

/// Every way a verification run can fail. The first error ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Fallback that no reachable path should produce.
    Unknown,
    /// Script args are not a 20-byte hash, or the witness has fewer than two
    /// entries.
    ArgumentCount,
    PubkeyHashMismatch,
    /// The environment failed a load, or an expected item was missing.
    Syscall,
    PubkeyParse,
    SignatureParse,
    SignatureVerification,
    /// A field or script does not fit its fixed-capacity buffer.
    BufferTooSmall,
    /// Schema framing failed verification.
    MalformedEncoding,
    /// The witness exceeds the witness buffer, or the lock field has a length
    /// matching none of the supported signature/pubkey combinations.
    WitnessTooLarge,
}

impl Error {
    /// Result code reported across the process boundary.
    pub const fn code(&self) -> i8 {
        match self {
            Error::Unknown => -1,
            Error::ArgumentCount => -2,
            Error::PubkeyHashMismatch => -3,
            Error::Syscall => -4,
            Error::PubkeyParse => -7,
            Error::SignatureParse => -8,
            Error::SignatureVerification => -9,
            Error::BufferTooSmall => -10,
            Error::MalformedEncoding => -11,
            Error::WitnessTooLarge => -12,
        }
    }

    /// Inverse of [`Error::code`].
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Error::Unknown),
            -2 => Some(Error::ArgumentCount),
            -3 => Some(Error::PubkeyHashMismatch),
            -4 => Some(Error::Syscall),
            -7 => Some(Error::PubkeyParse),
            -8 => Some(Error::SignatureParse),
            -9 => Some(Error::SignatureVerification),
            -10 => Some(Error::BufferTooSmall),
            -11 => Some(Error::MalformedEncoding),
            -12 => Some(Error::WitnessTooLarge),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::Unknown => "unknown internal error",
            Error::ArgumentCount => "wrong number of arguments",
            Error::PubkeyHashMismatch => "pubkey hash mismatch",
            Error::Syscall => "syscall failed",
            Error::PubkeyParse => "invalid public key",
            Error::SignatureParse => "invalid signature encoding",
            Error::SignatureVerification => "signature verification failed",
            Error::BufferTooSmall => "buffer not enough",
            Error::MalformedEncoding => "malformed encoding",
            Error::WitnessTooLarge => "witness size mismatch",
        };
        write!(f, "{} ({})", msg, self.code())
    }
}

impl From<SysError> for Error {
    fn from(_: SysError) -> Self {
        Error::Syscall
    }
}

impl From<SchemaError> for Error {
    fn from(_: SchemaError) -> Self {
        Error::MalformedEncoding
    }
}

impl From<Error> for types::Result {
    fn from(err: Error) -> Self {
        types::Result::failure(err.code())
    }
}
