//! JSON snapshot files describing a transaction to verify.
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use lock::WitnessFormat;
use serde::{Deserialize, Serialize};
use types::TxHash;

use crate::fixtures::encode_script;
use crate::snapshot::TxSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatName {
    Array,
    Table,
}

impl From<FormatName> for WitnessFormat {
    fn from(name: FormatName) -> Self {
        match name {
            FormatName::Array => WitnessFormat::Array,
            FormatName::Table => WitnessFormat::Table,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptFile {
    /// Defaults to all zeroes.
    #[serde(default)]
    pub code_hash: Option<String>,
    #[serde(default)]
    pub hash_type: u8,
    pub args: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InputFile {
    #[serde(default)]
    pub since: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub format: FormatName,
    pub tx_hash: String,
    pub script: ScriptFile,
    #[serde(default)]
    pub inputs: Vec<InputFile>,
    /// Indices into `inputs` locked by the script.
    #[serde(default)]
    pub group_inputs: Vec<usize>,
    #[serde(default)]
    pub witnesses: Vec<String>,
}

/// Decodes hex with an optional `0x` prefix.
fn decode_hex(value: &str, what: &str) -> Result<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).with_context(|| format!("{} is not valid hex", what))
}

fn decode_32(value: &str, what: &str) -> Result<[u8; 32]> {
    let bytes = decode_hex(value, what)?;
    match <[u8; 32]>::try_from(bytes.as_slice()) {
        Ok(array) => Ok(array),
        Err(_) => bail!("{} must be 32 bytes, got {}", what, bytes.len()),
    }
}

impl SnapshotFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse snapshot JSON")
    }

    /// Builds the in-memory transaction. Group indices must point at
    /// existing inputs.
    pub fn to_snapshot(&self) -> Result<TxSnapshot> {
        let tx_hash = TxHash(decode_32(&self.tx_hash, "tx_hash")?);

        let code_hash = match &self.script.code_hash {
            Some(value) => decode_32(value, "script.code_hash")?,
            None => [0u8; 32],
        };
        let args = decode_hex(&self.script.args, "script.args")?;
        let script = encode_script(&code_hash, self.script.hash_type, &args);

        let mut snapshot = TxSnapshot::new(tx_hash, script);
        snapshot.inputs = self.inputs.iter().map(|input| input.since).collect();
        for &index in &self.group_inputs {
            if index >= snapshot.inputs.len() {
                bail!(
                    "group input {} out of range, transaction has {} inputs",
                    index,
                    snapshot.inputs.len()
                );
            }
        }
        snapshot.group_inputs = self.group_inputs.clone();
        for (i, witness) in self.witnesses.iter().enumerate() {
            let bytes = decode_hex(witness, &format!("witnesses[{}]", i))?;
            snapshot.witnesses.push(bytes);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use program::{Source, TransactionContext};

    const SAMPLE: &str = r#"{
        "format": "table",
        "tx_hash": "0x0101010101010101010101010101010101010101010101010101010101010101",
        "script": { "hash_type": 1, "args": "5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a" },
        "inputs": [ { "since": 0 }, { "since": 7 } ],
        "group_inputs": [1],
        "witnesses": ["", "abcd"]
    }"#;

    #[test]
    fn parses_sample_snapshot() {
        let file = SnapshotFile::parse(SAMPLE).expect("valid snapshot");
        assert_eq!(file.format, FormatName::Table);
        let snapshot = file.to_snapshot().expect("valid snapshot");
        assert_eq!(snapshot.tx_hash, TxHash([1u8; 32]));
        assert_eq!(snapshot.load_input_since(0, Source::GroupInput), Ok(7));

        let mut buf = [0u8; 4];
        assert_eq!(snapshot.load_witness(&mut buf, 0, 0, Source::GroupInput), Ok(2));
        assert_eq!(&buf[..2], &[0xab, 0xcd]);
    }

    #[test]
    fn rejects_bad_tx_hash_and_group_index() {
        let mut file = SnapshotFile::parse(SAMPLE).expect("valid snapshot");
        file.tx_hash = "abcd".into();
        assert!(file.to_snapshot().is_err());

        let mut file = SnapshotFile::parse(SAMPLE).expect("valid snapshot");
        file.group_inputs = vec![2];
        let err = file.to_snapshot().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
