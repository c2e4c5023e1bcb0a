//! Path catalog
//!
//! The catalog is the list of columns offered to the analyst. Collections up to the
//! sample threshold are scanned exhaustively. Larger ones are scanned through a
//! uniform random sample of exactly `sample_threshold` distinct records, so a path
//! that only appears in unsampled records is missing from the catalog. Callers must
//! treat a sampled catalog as a best-effort approximation (see
//! [`PathCatalog::is_sampled`]).

use crate::record::{Record, flatten};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_SAMPLE_THRESHOLD: usize = 5000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCatalog {
    paths: Vec<String>,
    sampled: bool,
}

impl PathCatalog {
    /// Sorted, unique paths.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }

    pub fn find_ignore_case(&self, path: &str) -> Option<&str> {
        self.paths
            .iter()
            .find(|p| p.eq_ignore_ascii_case(path))
            .map(String::as_str)
    }

    /// True when the catalog was built from a sample and may be incomplete.
    pub fn is_sampled(&self) -> bool {
        self.sampled
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Build a catalog with a fresh RNG seeded for this call only.
pub fn build_catalog(records: &[Record], sample_threshold: usize) -> PathCatalog {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    build_catalog_with_rng(records, sample_threshold, &mut rng)
}

pub fn build_catalog_with_rng<R: Rng + ?Sized>(
    records: &[Record],
    sample_threshold: usize,
    rng: &mut R,
) -> PathCatalog {
    let mut paths = BTreeSet::new();

    let sampled = records.len() > sample_threshold;
    if sampled {
        tracing::debug!(
            records = records.len(),
            sample = sample_threshold,
            "sampling records for path catalog"
        );
        for i in index::sample(rng, records.len(), sample_threshold) {
            paths.extend(flatten(&records[i]).into_paths());
        }
    } else {
        for record in records {
            paths.extend(flatten(record).into_paths());
        }
    }

    PathCatalog {
        paths: paths.into_iter().collect(),
        sampled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Node;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn records(values: Vec<serde_json::Value>) -> Vec<Record> {
        values.into_iter().map(|v| Arc::new(Node::from(v))).collect()
    }

    #[test]
    fn exhaustive_catalog_is_sorted_union() {
        let recs = records(vec![
            json!({ "b": 1, "a": { "y": 1 } }),
            json!({ "c": [1, 2], "a": { "x": 1 } }),
        ]);

        let catalog = build_catalog(&recs, DEFAULT_SAMPLE_THRESHOLD);

        assert_eq!(catalog.paths(), &["a.x", "a.y", "b", "c[0]", "c[1]"]);
        assert!(!catalog.is_sampled());
        assert!(catalog.contains("c[1]"));
        assert!(!catalog.contains("c"));
    }

    #[test]
    fn exhaustive_at_exact_threshold() {
        let recs = records(vec![json!({ "a": 1 }), json!({ "b": 1 }), json!({ "c": 1 })]);

        let catalog = build_catalog(&recs, 3);

        assert_eq!(catalog.paths(), &["a", "b", "c"]);
        assert!(!catalog.is_sampled());
    }

    #[test]
    fn sampled_catalog_scans_exactly_threshold_records() {
        // Each record contributes one unique path, so the catalog size equals
        // the number of distinct records scanned.
        let recs = records((0..50).map(|i| json!({ format!("f{i:02}"): i })).collect());
        let mut rng = StdRng::seed_from_u64(7);

        let catalog = build_catalog_with_rng(&recs, 10, &mut rng);

        assert!(catalog.is_sampled());
        assert_eq!(catalog.len(), 10);
        let mut sorted = catalog.paths().to_vec();
        sorted.sort();
        assert_eq!(catalog.paths(), sorted.as_slice());
    }

    #[test]
    fn sampled_catalog_is_reproducible_with_same_seed() {
        let recs = records((0..40).map(|i| json!({ format!("k{i}"): i })).collect());

        let a = build_catalog_with_rng(&recs, 5, &mut StdRng::seed_from_u64(99));
        let b = build_catalog_with_rng(&recs, 5, &mut StdRng::seed_from_u64(99));

        assert_eq!(a, b);
    }

    #[test]
    fn find_ignore_case() {
        let recs = records(vec![json!({ "header": { "User-Agent": "curl" } })]);

        let catalog = build_catalog(&recs, DEFAULT_SAMPLE_THRESHOLD);

        assert_eq!(
            catalog.find_ignore_case("header.user-agent"),
            Some("header.User-Agent")
        );
        assert_eq!(catalog.find_ignore_case("header.host"), None);
    }

    #[test]
    fn empty_collection_gives_empty_catalog() {
        let catalog = build_catalog(&[], DEFAULT_SAMPLE_THRESHOLD);

        assert!(catalog.is_empty());
    }
}
