#![cfg_attr(not(test), no_std)]

pub mod ecdsa;
pub mod hash;
pub mod log;
pub mod parser;
pub mod schema;
pub mod syscalls;

pub use parser::DataParser;
pub use syscalls::{Source, SysError, TransactionContext};

pub use types;
