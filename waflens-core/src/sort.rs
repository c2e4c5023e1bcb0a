//! Stable single-key sorting.
//!
//! Values of different kinds are ordered by rank, ascending:
//!
//! missing < null < booleans < numbers < strings < sequences < field maps
//!
//! Within a rank, booleans sort `false` first, numbers numerically, strings
//! bytewise, and sequences/field maps by their compact JSON text. Descending
//! order is the exact reverse, so missing values sort last. Ties always keep
//! their input order.

use crate::filter::DEFAULT_TIMESTAMP_FIELD;
use crate::record::{Node, Path, Record, Scalar};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortParseError {
    #[error("invalid sort direction '{0}', expected asc or desc")]
    Direction(String),

    #[error("sort field must not be empty")]
    EmptyField,
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(SortParseError::Direction(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: Path,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<Path>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Clicking a column: the current ascending column flips to descending,
    /// anything else sorts the clicked column ascending.
    pub fn toggle(&self, field: &str) -> SortSpec {
        let direction = if self.field.as_str() == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortSpec::new(field, direction)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::new(DEFAULT_TIMESTAMP_FIELD, SortDirection::Desc)
    }
}

/// `field[:asc|desc]`, ascending when no direction is given.
impl FromStr for SortSpec {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.rsplit_once(':') {
            Some((field, dir)) => (field, dir.parse()?),
            None => (s, SortDirection::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(SortParseError::EmptyField);
        }
        Ok(SortSpec::new(field, direction))
    }
}

pub fn sort(records: &[Record], field: &Path, direction: SortDirection) -> Vec<Record> {
    let mut keyed: Vec<(Option<&Node>, &Record)> =
        records.iter().map(|r| (r.get(field), r)).collect();

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Asc => compare_values(*a, *b),
        SortDirection::Desc => compare_values(*b, *a),
    });

    keyed.into_iter().map(|(_, r)| Arc::clone(r)).collect()
}

pub fn sort_by_spec(records: &[Record], spec: &SortSpec) -> Vec<Record> {
    sort(records, &spec.field, spec.direction)
}

/// Total order over resolved values, ascending.
pub fn compare_values(a: Option<&Node>, b: Option<&Node>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
        (Node::Leaf(Scalar::Bool(x)), Node::Leaf(Scalar::Bool(y))) => x.cmp(y),
        (Node::Leaf(Scalar::Number(x)), Node::Leaf(Scalar::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Node::Leaf(Scalar::String(x)), Node::Leaf(Scalar::String(y))) => x.cmp(y),
        (Node::Leaf(Scalar::Null), Node::Leaf(Scalar::Null)) => Ordering::Equal,
        _ => a.text().cmp(&b.text()),
    })
}

fn rank(node: &Node) -> u8 {
    match node {
        Node::Leaf(Scalar::Null) => 0,
        Node::Leaf(Scalar::Bool(_)) => 1,
        Node::Leaf(Scalar::Number(_)) => 2,
        Node::Leaf(Scalar::String(_)) => 3,
        Node::Sequence(_) => 4,
        Node::Fields(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn records(values: Vec<serde_json::Value>) -> Vec<Record> {
        values.into_iter().map(|v| Arc::new(Node::from(v))).collect()
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.get(&Path::parse("id")).and_then(Node::as_f64).unwrap_or(-1.0) as i64)
            .collect()
    }

    #[test]
    fn sorts_numbers_ascending_and_descending() {
        let recs = records(vec![
            json!({ "id": 1, "n": 10 }),
            json!({ "id": 2, "n": 2 }),
            json!({ "id": 3, "n": 33.5 }),
        ]);

        assert_eq!(ids(&sort(&recs, &"n".into(), SortDirection::Asc)), vec![2, 1, 3]);
        assert_eq!(ids(&sort(&recs, &"n".into(), SortDirection::Desc)), vec![3, 1, 2]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let recs = records(vec![
            json!({ "id": 1, "action": "BLOCK" }),
            json!({ "id": 2, "action": "ALLOW" }),
            json!({ "id": 3, "action": "BLOCK" }),
            json!({ "id": 4, "action": "ALLOW" }),
        ]);

        assert_eq!(
            ids(&sort(&recs, &"action".into(), SortDirection::Asc)),
            vec![2, 4, 1, 3]
        );
        assert_eq!(
            ids(&sort(&recs, &"action".into(), SortDirection::Desc)),
            vec![1, 3, 2, 4]
        );
    }

    #[test]
    fn mixed_kinds_follow_rank_order() {
        let recs = records(vec![
            json!({ "id": 1, "v": "text" }),
            json!({ "id": 2, "v": 5 }),
            json!({ "id": 3 }),
            json!({ "id": 4, "v": null }),
            json!({ "id": 5, "v": true }),
            json!({ "id": 6, "v": { "a": 1 } }),
            json!({ "id": 7, "v": [1] }),
        ]);

        assert_eq!(
            ids(&sort(&recs, &"v".into(), SortDirection::Asc)),
            vec![3, 4, 5, 2, 1, 7, 6]
        );
        assert_eq!(
            ids(&sort(&recs, &"v".into(), SortDirection::Desc)),
            vec![6, 7, 1, 2, 5, 4, 3]
        );
    }

    #[test]
    fn toggle_flips_only_the_current_ascending_field() {
        let spec = SortSpec::new("timestamp", SortDirection::Asc);

        assert_eq!(spec.toggle("timestamp"), SortSpec::new("timestamp", SortDirection::Desc));
        assert_eq!(
            spec.toggle("timestamp").toggle("timestamp"),
            SortSpec::new("timestamp", SortDirection::Asc)
        );
        assert_eq!(spec.toggle("action"), SortSpec::new("action", SortDirection::Asc));
    }

    #[test]
    fn parse_sort_spec() {
        assert_eq!("action".parse::<SortSpec>(), Ok(SortSpec::new("action", SortDirection::Asc)));
        assert_eq!(
            "timestamp:DESC".parse::<SortSpec>(),
            Ok(SortSpec::new("timestamp", SortDirection::Desc))
        );
        assert_eq!(
            "timestamp:sideways".parse::<SortSpec>(),
            Err(SortParseError::Direction("sideways".into()))
        );
        assert_eq!(":asc".parse::<SortSpec>(), Err(SortParseError::EmptyField));
    }

    #[test]
    fn default_is_timestamp_descending() {
        assert_eq!(SortSpec::default(), SortSpec::new("timestamp", SortDirection::Desc));
    }
}
