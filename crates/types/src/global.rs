/// Static limits shared by the lock and the host runner.
///
/// Every buffer the lock touches is sized from these values; exceeding one is
/// a hard error, never a reallocation.
pub struct Config;

impl Config {
    /// Largest witness the lock will load and decode (32 KB).
    pub const WITNESS_SIZE: usize = 32 * 1024;
    /// Largest serialized script (32 KB).
    pub const SCRIPT_SIZE: usize = 32 * 1024;
    /// Scratch capacity for a single decoded field, also the chunk size used
    /// when streaming witnesses into a hasher.
    pub const TEMP_SIZE: usize = 1024;

    pub const BLAKE2B_SIZE: usize = 32;
    pub const SHA256_SIZE: usize = 32;
    pub const RIPEMD160_SIZE: usize = 20;

    pub const PUBKEY_COMPRESSED_SIZE: usize = 33;
    pub const PUBKEY_UNCOMPRESSED_SIZE: usize = 65;
    /// r || s
    pub const SIGNATURE_SIZE: usize = 64;
    /// r || s || recovery id
    pub const RECOVERABLE_SIGNATURE_SIZE: usize = 65;
    /// Position of the recovery id inside a 65-byte compact signature.
    pub const RECID_INDEX: usize = 64;
}
