//! Header enrichment
//!
//! WAF logs carry request headers as a list of `{name, value}` entries, which is
//! awkward to filter or group on. Enrichment lifts the interesting ones into a
//! synthetic `header` field map keyed by the header's original casing, so
//! `header.User-Agent` becomes an ordinary path.

mod header_set;
mod headers;

#[cfg(test)]
mod tests;

pub use header_set::HeaderSet;
pub use headers::{
    DEFAULT_HEADER_NAMES, DEFAULT_HEADER_SOURCE, HEADER_FIELD, HeaderEnricher, enrich,
};
