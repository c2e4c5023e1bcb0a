//! The two expensive stages run by the coordinator.
//!
//! Both are plain functions of their inputs. All caller state (header names,
//! filters, sort, time window) arrives as parameters; nothing is kept between
//! calls.

use crate::catalog::{PathCatalog, build_catalog};
use crate::conf::EngineConfig;
use crate::enrichment::HeaderEnricher;
use crate::filter::{FilterPredicate, TimeRange, apply_time_window_on, filter};
use crate::record::Record;
use crate::sort::{SortSpec, sort_by_spec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedLogs {
    pub records: Vec<Record>,
    pub catalog: PathCatalog,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSortQuery {
    #[serde(default)]
    pub predicates: Vec<FilterPredicate>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub time_range: TimeRange,
}

/// Enrich headers, then catalog the enriched records.
pub fn process_logs(
    records: &[Record],
    extra_header_names: &[String],
    cfg: &EngineConfig,
) -> ProcessedLogs {
    let names = cfg
        .default_headers
        .iter()
        .chain(cfg.extra_headers.iter())
        .chain(extra_header_names.iter());
    let enricher = HeaderEnricher::new(names).with_source(cfg.header_source.clone());

    let records = enricher.enrich(records);
    let catalog = build_catalog(&records, cfg.sample_threshold);

    ProcessedLogs { records, catalog }
}

/// Predicates, then the time window, then the sort.
pub fn filter_and_sort(records: &[Record], query: &FilterSortQuery, cfg: &EngineConfig) -> Vec<Record> {
    let filtered = filter(records, &query.predicates);
    let windowed = apply_time_window_on(&filtered, &query.time_range, &cfg.timestamp_field);

    match &query.sort {
        Some(spec) => sort_by_spec(&windowed, spec),
        None => windowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Operator;
    use crate::record::{Node, Path};
    use crate::sort::SortDirection;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn records() -> Vec<Record> {
        [
            json!({ "id": 1, "timestamp": 1_700_000_003_000u64, "action": "BLOCK",
                    "httpRequest": { "headers": [ { "name": "Host", "value": "a.example" } ] } }),
            json!({ "id": 2, "timestamp": 1_700_000_001u64, "action": "BLOCK",
                    "httpRequest": { "headers": [ { "name": "X-Trace", "value": "t-2" } ] } }),
            json!({ "id": 3, "timestamp": 1_700_000_002_000u64, "action": "ALLOW" }),
            json!({ "id": 4, "timestamp": 1_600_000_000_000u64, "action": "BLOCK" }),
        ]
        .into_iter()
        .map(|v| Arc::new(Node::from(v)))
        .collect()
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get(&Path::parse("id")).map(|n| n.text().into_owned()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn process_logs_enriches_then_catalogs() {
        let out = process_logs(&records(), &["x-trace".to_string()], &EngineConfig::default());

        assert!(out.catalog.contains("header.Host"));
        assert!(out.catalog.contains("header.X-Trace"));
        assert_eq!(out.records.len(), 4);
    }

    #[test]
    fn configured_extra_headers_are_extracted() {
        let cfg = EngineConfig {
            extra_headers: vec!["X-Trace".into()],
            ..EngineConfig::default()
        };

        let out = process_logs(&records(), &[], &cfg);

        assert!(out.catalog.contains("header.X-Trace"));
    }

    #[test]
    fn filter_and_sort_runs_all_stages_in_order() {
        let query = FilterSortQuery {
            predicates: vec![FilterPredicate::new("action", Operator::Equals, "block")],
            sort: Some(SortSpec::new("timestamp", SortDirection::Desc)),
            time_range: TimeRange::new(Some(Utc.timestamp_millis_opt(1_650_000_000_000).unwrap()), None),
        };

        let out = filter_and_sort(&records(), &query, &EngineConfig::default());

        // Record 2 is in seconds and normalizes below record 1.
        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[test]
    fn no_sort_keeps_filtered_order() {
        let out = filter_and_sort(&records(), &FilterSortQuery::default(), &EngineConfig::default());

        assert_eq!(ids(&out), vec!["1", "2", "3", "4"]);
    }
}
