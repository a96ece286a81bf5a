use std::cell::RefCell;
use std::fmt;

use program::{Source, SysError, TransactionContext};
use types::TxHash;

/// In-memory transaction the lock runs against.
///
/// `group_inputs` holds indices into `inputs`; grouped input `i` owns the
/// witness at the same transaction index, `witnesses[group_inputs[i]]`.
/// Witnesses past the last input are allowed and are only reachable through
/// `Source::Input`.
#[derive(Debug, Default)]
pub struct TxSnapshot {
    pub tx_hash: TxHash,
    pub script: Vec<u8>,
    pub inputs: Vec<u64>,
    pub group_inputs: Vec<usize>,
    pub witnesses: Vec<Vec<u8>>,
    verbose: bool,
    debug_lines: RefCell<Vec<String>>,
}

impl TxSnapshot {
    pub fn new(tx_hash: TxHash, script: Vec<u8>) -> Self {
        Self {
            tx_hash,
            script,
            ..Default::default()
        }
    }

    /// Adds a transaction input with the given `since` value.
    pub fn with_input(mut self, since: u64) -> Self {
        self.inputs.push(since);
        self
    }

    /// Adds a transaction input locked by the executing script, paired with
    /// the witness at the same index.
    pub fn with_group_input(mut self, since: u64) -> Self {
        self.group_inputs.push(self.inputs.len());
        self.inputs.push(since);
        self
    }

    pub fn with_witness(mut self, witness: Vec<u8>) -> Self {
        self.witnesses.push(witness);
        self
    }

    /// Echo debug lines to stdout as they arrive.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Debug lines emitted by the lock so far.
    pub fn debug_lines(&self) -> Vec<String> {
        self.debug_lines.borrow().clone()
    }

    fn group_index(&self, index: usize) -> Result<usize, SysError> {
        self.group_inputs
            .get(index)
            .copied()
            .ok_or(SysError::IndexOutOfBound)
    }
}

/// A clone is a fresh transaction: debug lines from earlier runs stay behind.
impl Clone for TxSnapshot {
    fn clone(&self) -> Self {
        Self {
            tx_hash: self.tx_hash,
            script: self.script.clone(),
            inputs: self.inputs.clone(),
            group_inputs: self.group_inputs.clone(),
            witnesses: self.witnesses.clone(),
            verbose: self.verbose,
            debug_lines: RefCell::default(),
        }
    }
}

/// Copies `data[offset..]` into `buf`, as much as fits, and returns the full
/// remaining length.
fn partial_load(data: &[u8], buf: &mut [u8], offset: usize) -> Result<usize, SysError> {
    let rest = data.get(offset..).ok_or(SysError::InvalidOffset)?;
    let n = rest.len().min(buf.len());
    buf[..n].copy_from_slice(&rest[..n]);
    Ok(rest.len())
}

impl TransactionContext for TxSnapshot {
    fn load_tx_hash(&self) -> Result<TxHash, SysError> {
        Ok(self.tx_hash)
    }

    fn load_script(&self, buf: &mut [u8], offset: usize) -> Result<usize, SysError> {
        partial_load(&self.script, buf, offset)
    }

    fn load_witness(
        &self,
        buf: &mut [u8],
        offset: usize,
        index: usize,
        source: Source,
    ) -> Result<usize, SysError> {
        let witness = match source {
            Source::Input => self.witnesses.get(index).ok_or(SysError::IndexOutOfBound)?,
            Source::GroupInput => {
                let index = self.group_index(index)?;
                self.witnesses.get(index).ok_or(SysError::ItemMissing)?
            }
        };
        partial_load(witness, buf, offset)
    }

    fn load_input_since(&self, index: usize, source: Source) -> Result<u64, SysError> {
        match source {
            Source::Input => self.inputs.get(index).copied().ok_or(SysError::IndexOutOfBound),
            Source::GroupInput => {
                let index = self.group_index(index)?;
                self.inputs.get(index).copied().ok_or(SysError::ItemMissing)
            }
        }
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        let line = args.to_string();
        if self.verbose {
            println!("[debug] {}", line);
        }
        self.debug_lines.borrow_mut().push(line);
    }
}
