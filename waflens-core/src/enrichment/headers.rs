use crate::record::{Fields, Node, Path, Record};
use ahash::AHashSet;
use std::sync::Arc;

/// Headers extracted even when the analyst asked for none.
pub const DEFAULT_HEADER_NAMES: &[&str] = &["host", "user-agent", "referer", "x-forwarded-for"];

/// Where the raw `{name, value}` list lives in a WAF record.
pub const DEFAULT_HEADER_SOURCE: &str = "httpRequest.headers";

/// Field added to enriched records.
pub const HEADER_FIELD: &str = "header";

#[derive(Debug, Clone)]
pub struct HeaderEnricher {
    wanted: AHashSet<String>,
    source: Path,
}

impl HeaderEnricher {
    /// Names are matched case-insensitively.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            wanted: names
                .into_iter()
                .map(|n| n.as_ref().to_ascii_lowercase())
                .collect(),
            source: Path::parse(DEFAULT_HEADER_SOURCE),
        }
    }

    pub fn with_source(mut self, source: Path) -> Self {
        self.source = source;
        self
    }

    pub fn enrich(&self, records: &[Record]) -> Vec<Record> {
        records.iter().map(|r| self.enrich_record(r)).collect()
    }

    /// Returns the same `Arc` when there is nothing to add.
    pub fn enrich_record(&self, record: &Record) -> Record {
        let Node::Fields(fields) = record.as_ref() else {
            return Arc::clone(record);
        };
        let Some(entries) = record.get(&self.source).and_then(Node::as_sequence) else {
            return Arc::clone(record);
        };

        let mut extracted = Fields::new();
        for entry in entries {
            let Some((name, value)) = header_entry(entry) else {
                continue;
            };
            if self.wanted.contains(&name.to_ascii_lowercase()) {
                extracted.insert(name.to_string(), value.clone());
            }
        }

        if extracted.is_empty() {
            return Arc::clone(record);
        }

        let mut enriched = fields.clone();
        enriched.insert(HEADER_FIELD.to_string(), Node::Fields(extracted));
        Arc::new(Node::Fields(enriched))
    }
}

/// An entry counts only with a non-empty name and a non-null, non-empty value.
fn header_entry(entry: &Node) -> Option<(&str, &Node)> {
    let fields = entry.as_fields()?;
    let name = fields.get("name")?.as_str().filter(|n| !n.is_empty())?;
    let value = fields
        .get("value")
        .filter(|v| !v.is_null() && !v.is_empty_string())?;
    Some((name, value))
}

/// Enrich with the default header names plus `extra_header_names`.
pub fn enrich(records: &[Record], extra_header_names: &[String]) -> Vec<Record> {
    let names = DEFAULT_HEADER_NAMES
        .iter()
        .copied()
        .chain(extra_header_names.iter().map(String::as_str));
    HeaderEnricher::new(names).enrich(records)
}
