//! Drives one verification run from loading the context to a final result.
//!
//! ```text
//! Init -> LoadContext -> VerifyLoop -> Success
//!              |             |  ^
//!              v             v  | (array: next grouped input)
//!           Failure       Failure
//! ```
use program::schema::molecule::ScriptReader;
use program::{debug, Source, SysError, TransactionContext};
use types::{Config, PubkeyHash, TxHash};

use crate::error::Error;
use crate::pubkey_hash;
use crate::sighash;
use crate::signature;
use crate::witness::{ArrayWitness, LockField};

/// Witness layout in force for the script being executed. Chosen once, before
/// any witness is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitnessFormat {
    /// Flatbuffers list `[pubkey, der_signature, extra...]`, one signature per
    /// grouped input, BLAKE2b sighash.
    Array,
    /// Molecule `WitnessArgs` with `lock = signature || pubkey`, one signature
    /// for the whole group, SHA-256 sighash-all.
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    LoadContext,
    VerifyLoop,
    Success,
    Failure(Error),
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Success | Phase::Failure(_))
    }
}

/// Caller-owned buffers for one run. Nothing grows; an item that does not
/// fit is an error.
pub struct Scratch {
    pub witness: [u8; Config::WITNESS_SIZE],
    pub script: [u8; Config::SCRIPT_SIZE],
    pub temp: [u8; Config::TEMP_SIZE],
}

impl Scratch {
    pub const fn new() -> Self {
        Self {
            witness: [0u8; Config::WITNESS_SIZE],
            script: [0u8; Config::SCRIPT_SIZE],
            temp: [0u8; Config::TEMP_SIZE],
        }
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Verifier<'a, C: TransactionContext + ?Sized> {
    ctx: &'a C,
    format: WitnessFormat,
    scratch: &'a mut Scratch,
    phase: Phase,
    tx_hash: TxHash,
    expected: PubkeyHash,
    /// Next grouped input to check.
    index: usize,
}

impl<'a, C: TransactionContext + ?Sized> Verifier<'a, C> {
    pub fn new(ctx: &'a C, format: WitnessFormat, scratch: &'a mut Scratch) -> Self {
        Self {
            ctx,
            format,
            scratch,
            phase: Phase::Init,
            tx_hash: TxHash::default(),
            expected: PubkeyHash::default(),
            index: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Grouped inputs fully verified so far.
    pub fn verified_inputs(&self) -> usize {
        self.index
    }

    /// Advances the state machine by one transition. Terminal phases are
    /// sticky.
    pub fn step(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Init => Phase::LoadContext,
            Phase::LoadContext => match self.load_context() {
                Ok(()) => Phase::VerifyLoop,
                Err(err) => Phase::Failure(err),
            },
            Phase::VerifyLoop => match self.verify_next() {
                Ok(true) => Phase::VerifyLoop,
                Ok(false) => Phase::Success,
                Err(err) => Phase::Failure(err),
            },
            done => done,
        };
        if let Phase::Failure(err) = self.phase {
            debug!(self.ctx, "verification failed: {}", err);
        }
        self.phase
    }

    /// Steps until a terminal phase is reached.
    pub fn run(mut self) -> Result<(), Error> {
        loop {
            match self.step() {
                Phase::Success => return Ok(()),
                Phase::Failure(err) => return Err(err),
                _ => {}
            }
        }
    }

    fn load_context(&mut self) -> Result<(), Error> {
        self.tx_hash = self.ctx.load_tx_hash()?;

        let len = self.ctx.load_script(&mut self.scratch.script, 0)?;
        if len > Config::SCRIPT_SIZE {
            return Err(Error::BufferTooSmall);
        }
        let script = ScriptReader::verify(&self.scratch.script[..len])?;
        self.expected = PubkeyHash::from_slice(script.args()?).ok_or(Error::ArgumentCount)?;

        debug!(self.ctx, "tx_hash={} pubkey_hash={}", self.tx_hash, self.expected);
        Ok(())
    }

    /// One pass of the verify loop. Returns whether more work remains.
    fn verify_next(&mut self) -> Result<bool, Error> {
        match self.format {
            WitnessFormat::Array => self.verify_array_input(),
            WitnessFormat::Table => self.verify_table_group(),
        }
    }

    fn verify_array_input(&mut self) -> Result<bool, Error> {
        match self.ctx.load_input_since(self.index, Source::GroupInput) {
            Ok(_) => {}
            Err(SysError::IndexOutOfBound) => return Ok(false),
            Err(err) => return Err(err.into()),
        }

        let len = self.load_witness(self.index, Source::GroupInput)?;
        let witness = ArrayWitness::decode(&self.scratch.witness[..len])?;
        pubkey_hash::verify(&self.expected, witness.pubkey)?;
        let message = sighash::array_sighash(&self.tx_hash, &witness)?;
        signature::verify_array(witness.pubkey, witness.signature, &message)?;

        debug!(self.ctx, "group input {} verified", self.index);
        self.index += 1;
        Ok(true)
    }

    fn verify_table_group(&mut self) -> Result<bool, Error> {
        let len = self.load_witness(0, Source::GroupInput)?;
        let Scratch { witness, temp, .. } = &mut *self.scratch;
        let witness = &witness[..len];

        let lock = LockField::decode(witness)?;
        pubkey_hash::verify(&self.expected, lock.pubkey())?;
        let message = sighash::sighash_all(self.ctx, &self.tx_hash, witness, &lock, temp)?;
        signature::verify_table(&lock, &message)?;

        debug!(
            self.ctx,
            "group verified: signature_len={} pubkey_len={}", lock.signature_len, lock.pubkey_len
        );
        self.index = 1;
        Ok(false)
    }

    /// Loads a witness into the witness buffer, rejecting anything larger.
    fn load_witness(&mut self, index: usize, source: Source) -> Result<usize, Error> {
        let len = self
            .ctx
            .load_witness(&mut self.scratch.witness, 0, index, source)?;
        if len > Config::WITNESS_SIZE {
            debug!(self.ctx, "witness {} is {} bytes", index, len);
            return Err(Error::WitnessTooLarge);
        }
        Ok(len)
    }
}

/// Runs a full verification with buffers owned by this frame.
pub fn verify<C: TransactionContext + ?Sized>(ctx: &C, format: WitnessFormat) -> Result<(), Error> {
    let mut scratch = Scratch::new();
    Verifier::new(ctx, format, &mut scratch).run()
}

/// Process-boundary entry: the integer outcome of a run.
pub fn entry<C: TransactionContext + ?Sized>(ctx: &C, format: WitnessFormat) -> types::Result {
    match verify(ctx, format) {
        Ok(()) => types::Result::ok(),
        Err(err) => err.into(),
    }
}
