use crate::ingest::discover::{STDIN_INPUT, resolve_inputs};
use crate::ingest::error::IngestError;
use crate::record::{Node, Record};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct DecodedBatch {
    pub records: Vec<Record>,
    /// Non-blank lines that could not be decoded.
    pub skipped: usize,
}

impl DecodedBatch {
    fn extend(&mut self, other: DecodedBatch) {
        self.records.extend(other.records);
        self.skipped += other.skipped;
    }
}

/// Decode one NDJSON stream.
pub fn decode_ndjson<R: BufRead>(reader: R) -> Result<DecodedBatch, IngestError> {
    let batch = decode_lines(reader, "input")?;
    if batch.records.is_empty() {
        return Err(IngestError::NoValidRecords {
            skipped: batch.skipped,
        });
    }
    Ok(batch)
}

/// Decode every input (files, glob patterns, or `-` for stdin) in order and
/// concatenate the records.
pub fn read_inputs(inputs: &[String]) -> Result<DecodedBatch, IngestError> {
    let mut batch = DecodedBatch::default();

    for path in resolve_inputs(inputs)? {
        let origin = path.display().to_string();
        let decoded = if origin == STDIN_INPUT {
            decode_lines(io::stdin().lock(), "stdin")?
        } else {
            let file = File::open(&path).map_err(|e| IngestError::Open {
                path: path.clone(),
                source: e,
            })?;
            decode_lines(BufReader::new(file), &origin)?
        };

        debug!(
            input = %origin,
            records = decoded.records.len(),
            skipped = decoded.skipped,
            "decoded input"
        );
        batch.extend(decoded);
    }

    if batch.records.is_empty() {
        return Err(IngestError::NoValidRecords {
            skipped: batch.skipped,
        });
    }
    Ok(batch)
}

fn decode_lines<R: BufRead>(reader: R, origin: &str) -> Result<DecodedBatch, IngestError> {
    let mut batch = DecodedBatch::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;

        let line = match line {
            Ok(line) => line,
            // Invalid UTF-8 is a bad line, not a bad stream.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(input = origin, line = line_no, error = %e, "skipping undecodable line");
                batch.skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(IngestError::Read {
                    origin: origin.to_string(),
                    source: e,
                });
            }
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(text) {
            Ok(Value::Null) => {
                warn!(input = origin, line = line_no, "skipping null record");
                batch.skipped += 1;
            }
            Ok(value) => batch.records.push(Arc::new(Node::from(value))),
            Err(e) => {
                warn!(input = origin, line = line_no, error = %e, "skipping malformed line");
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}
