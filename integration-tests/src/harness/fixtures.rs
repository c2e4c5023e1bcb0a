use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use waflens_core::ingest::{DecodedBatch, read_inputs};
use waflens_core::record::{Node, Path as FieldPath, Record};

pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file)
}

pub fn load_fixture(file: &str) -> DecodedBatch {
    let path = fixture_path(file).to_string_lossy().into_owned();
    read_inputs(&[path]).expect("failed to decode fixture")
}

pub fn records(values: Vec<Value>) -> Vec<Record> {
    values.into_iter().map(|v| Arc::new(Node::from(v))).collect()
}

/// Write `lines` verbatim, one per line.
pub fn write_ndjson(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("failed to write ndjson");
    path
}

/// Textual value of `field` for every record, `-` when missing.
pub fn ids(records: &[Record], field: &str) -> Vec<String> {
    let path = FieldPath::parse(field);
    records
        .iter()
        .map(|r| {
            r.get(&path)
                .map(|n| n.text().into_owned())
                .unwrap_or_else(|| "-".to_string())
        })
        .collect()
}
