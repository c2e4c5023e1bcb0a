//! Column selection and cell text for tabular output.

use crate::catalog::PathCatalog;
use crate::conf::ViewConfig;
use crate::enrichment::HEADER_FIELD;
use crate::filter::{DEFAULT_TIMESTAMP_FIELD, normalize_epoch_millis};
use crate::record::{Node, Path, Scalar};
use chrono::DateTime;

/// Placeholder for missing, `null` and empty values.
pub const EMPTY_CELL: &str = "-";

const HUMAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";

/// Configured defaults present in the catalog, then every other top-level
/// path that is not excluded.
pub fn default_columns(catalog: &PathCatalog, cfg: &ViewConfig) -> Vec<String> {
    let defaults = cfg
        .default_columns
        .iter()
        .filter(|c| catalog.contains(c))
        .cloned();

    let top_level = catalog
        .paths()
        .iter()
        .filter(|p| !p.contains('.') && !p.contains('['))
        .filter(|p| !cfg.default_columns.contains(p) && !cfg.excluded_columns.contains(p))
        .cloned();

    defaults.chain(top_level).collect()
}

/// Show `header.<name>` once enrichment has produced it.
///
/// The column goes right after `timestamp`, or first when there is no
/// timestamp column. Returns false when the header is not in the catalog or
/// is already visible.
pub fn insert_header_column(columns: &mut Vec<String>, catalog: &PathCatalog, header: &str) -> bool {
    let wanted = format!("{HEADER_FIELD}.{header}");
    let Some(path) = catalog.find_ignore_case(&wanted) else {
        return false;
    };
    if columns.iter().any(|c| c == path) {
        return false;
    }

    let at = columns
        .iter()
        .position(|c| c == DEFAULT_TIMESTAMP_FIELD)
        .map_or(0, |i| i + 1);
    columns.insert(at, path.to_string());
    true
}

pub fn render_cell(record: &Node, path: &Path, human_time: bool) -> String {
    render_cell_on(record, path, human_time, &Path::parse(DEFAULT_TIMESTAMP_FIELD))
}

/// Text for one table cell. `timestamp_field` is rendered as a UTC date when
/// `human_time` is set and the value is numeric.
pub fn render_cell_on(record: &Node, path: &Path, human_time: bool, timestamp_field: &Path) -> String {
    let Some(value) = record.get(path) else {
        return EMPTY_CELL.to_string();
    };
    if value.is_null() || value.is_empty_string() {
        return EMPTY_CELL.to_string();
    }

    if human_time && path == timestamp_field {
        if let Some(text) = value.as_f64().and_then(format_human_time) {
            return text;
        }
    }

    match value {
        Node::Leaf(Scalar::String(s)) => s.clone(),
        other => other.text().into_owned(),
    }
}

/// Epoch seconds or milliseconds as `YYYY-MM-DD HH:MM:SS.mmm UTC`.
pub fn format_human_time(raw: f64) -> Option<String> {
    if !raw.is_finite() {
        return None;
    }
    let millis = normalize_epoch_millis(raw) as i64;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.format(HUMAN_TIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn catalog_of(value: serde_json::Value) -> PathCatalog {
        build_catalog(&[Arc::new(Node::from(value))], 10)
    }

    #[test]
    fn defaults_then_remaining_top_level_paths() {
        let catalog = catalog_of(json!({
            "timestamp": 1, "action": "BLOCK", "webaclId": "x", "terminatingRuleId": "r",
            "httpRequest": { "clientIp": "1.2.3.4", "args": "" },
            "labels": [ { "name": "l" } ]
        }));

        let columns = default_columns(&catalog, &ViewConfig::default());

        assert_eq!(
            columns,
            vec!["timestamp", "action", "httpRequest.clientIp", "terminatingRuleId"]
        );
    }

    #[test]
    fn header_column_goes_after_timestamp() {
        let catalog = catalog_of(json!({ "timestamp": 1, "header": { "X-Trace": "t" } }));
        let mut columns = vec!["action".to_string(), "timestamp".to_string(), "uri".to_string()];

        let inserted = insert_header_column(&mut columns, &catalog, "x-trace");

        assert!(inserted);
        assert_eq!(columns, vec!["action", "timestamp", "header.X-Trace", "uri"]);
    }

    #[test]
    fn header_column_goes_first_without_timestamp() {
        let catalog = catalog_of(json!({ "header": { "Host": "h" } }));
        let mut columns = vec!["action".to_string()];

        insert_header_column(&mut columns, &catalog, "host");

        assert_eq!(columns, vec!["header.Host", "action"]);
    }

    #[test]
    fn header_column_is_not_duplicated_or_invented() {
        let catalog = catalog_of(json!({ "header": { "Host": "h" } }));
        let mut columns = vec!["header.Host".to_string()];

        assert!(!insert_header_column(&mut columns, &catalog, "HOST"));
        assert!(!insert_header_column(&mut columns, &catalog, "referer"));
        assert_eq!(columns, vec!["header.Host"]);
    }

    #[test]
    fn cells_render_placeholders_and_json() {
        let record = Node::from(json!({
            "empty": "", "none": null, "ip": "1.2.3.4", "n": 403, "flag": true,
            "obj": { "a": [1, 2] }
        }));

        let cell = |p: &str| render_cell(&record, &Path::parse(p), false);

        assert_eq!(cell("missing"), "-");
        assert_eq!(cell("empty"), "-");
        assert_eq!(cell("none"), "-");
        assert_eq!(cell("ip"), "1.2.3.4");
        assert_eq!(cell("n"), "403");
        assert_eq!(cell("flag"), "true");
        assert_eq!(cell("obj"), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn human_time_normalizes_seconds() {
        let seconds = Node::from(json!({ "timestamp": 1_700_000_000 }));
        let millis = Node::from(json!({ "timestamp": 1_700_000_000_123u64 }));
        let ts = Path::parse("timestamp");

        assert_eq!(render_cell(&seconds, &ts, true), "2023-11-14 22:13:20.000 UTC");
        assert_eq!(render_cell(&millis, &ts, true), "2023-11-14 22:13:20.123 UTC");
        assert_eq!(render_cell(&millis, &ts, false), "1700000000123");
    }

    #[test]
    fn human_time_leaves_other_columns_alone() {
        let record = Node::from(json!({ "n": 1_700_000_000 }));

        assert_eq!(render_cell(&record, &Path::parse("n"), true), "1700000000");
    }
}
