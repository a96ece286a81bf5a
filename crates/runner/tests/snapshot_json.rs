mod common;

use common::{owner, TX_HASH};
use lock::{entry, Error, WitnessFormat};
use runner::fixtures::{
    pubkey_bytes, pubkey_hash, sign_array_witness, sign_table_witness, LockLayout,
};
use runner::{FormatName, SnapshotFile};
use serde_json::json;

fn snapshot_json(format: &str, witness: &[u8]) -> String {
    let args = pubkey_hash(&pubkey_bytes(&owner(), true));
    json!({
        "format": format,
        "tx_hash": format!("0x{}", hex::encode(TX_HASH.0)),
        "script": { "hash_type": 1, "args": hex::encode(args.0) },
        "inputs": [ { "since": 0 } ],
        "group_inputs": [0],
        "witnesses": [ hex::encode(witness) ],
    })
    .to_string()
}

#[test]
fn test_array_snapshot_file_unlocks() {
    println!("=== Testing array snapshot loaded from disk ===");
    let witness = sign_array_witness(&owner(), &TX_HASH, true, &[b"memo"]).expect("signing");
    let path = std::env::temp_dir().join(format!("p2pkh-array-{}.json", std::process::id()));
    std::fs::write(&path, snapshot_json("array", &witness)).expect("write snapshot");

    let file = SnapshotFile::load(&path).expect("load snapshot");
    std::fs::remove_file(&path).ok();
    assert_eq!(file.format, FormatName::Array);
    let tx = file.to_snapshot().expect("build snapshot");
    assert!(entry(&tx, file.format.into()).success);

    // the same witness read as a table is not a WitnessArgs
    assert_eq!(
        entry(&tx, WitnessFormat::Table).error_code,
        Error::MalformedEncoding.code()
    );
}

#[test]
fn test_table_snapshot_unlocks() {
    let layout = LockLayout::new(65, true);
    let witness =
        sign_table_witness(&owner(), &TX_HASH, layout, None, None, &[]).expect("signing");
    let file = SnapshotFile::parse(&snapshot_json("table", &witness)).expect("parse snapshot");
    let tx = file.to_snapshot().expect("build snapshot");
    let result = entry(&tx, file.format.into());
    assert!(result.success);
    assert_eq!(result.exit_code(), 0);
}

#[test]
fn test_missing_file_and_bad_hex() {
    let missing = std::env::temp_dir().join("p2pkh-does-not-exist.json");
    let err = SnapshotFile::load(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read snapshot"));

    let file = SnapshotFile::parse(&snapshot_json("array", &[]).replace("\"0x", "\"0xzz"))
        .expect("parse snapshot");
    let err = file.to_snapshot().unwrap_err();
    assert!(err.to_string().contains("tx_hash"));

    assert!(SnapshotFile::parse(r#"{"format": "other"}"#).is_err());
}
