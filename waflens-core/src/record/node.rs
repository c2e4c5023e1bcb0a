use crate::record::path::{Path, Segment};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Records are shared, never mutated. Enrichment builds a new tree and swaps the
/// `Arc`; untouched records are handed through by pointer.
pub type Record = Arc<Node>;

/// Field maps keep insertion order so output columns stay stable.
pub type Fields = IndexMap<String, Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Textual form used by string predicates, grouping and rendering.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Null => Cow::Borrowed("null"),
            Scalar::Bool(true) => Cow::Borrowed("true"),
            Scalar::Bool(false) => Cow::Borrowed("false"),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::String(s) => Cow::Borrowed(s),
        }
    }

    /// Numeric coercion for `gt`/`lt` and timestamps.
    ///
    /// Strings are trimmed and parsed; empty or non-numeric strings, `null` and
    /// NaN all fail. Booleans coerce to `1`/`0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Number(n) => n.as_f64(),
            Scalar::String(s) => parse_number(s),
        }
    }
}

pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    Leaf(Scalar),
    Sequence(Vec<Node>),
    Fields(Fields),
}

impl Node {
    pub fn string(s: impl Into<String>) -> Self {
        Node::Leaf(Scalar::String(s.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Leaf(Scalar::Null))
    }

    pub fn is_empty_string(&self) -> bool {
        matches!(self, Node::Leaf(Scalar::String(s)) if s.is_empty())
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Leaf(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Leaf(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Node::Fields(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    /// Leaves render as their scalar text, inner nodes as compact JSON.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Node::Leaf(s) => s.as_text(),
            _ => Cow::Owned(self.to_json().to_string()),
        }
    }

    /// Resolve `path` against this node.
    ///
    /// A numeric segment also addresses a field literally named by that number,
    /// so `a[0]` finds `{"a": {"0": ..}}` as well as `{"a": [..]}`. When the
    /// segment walk misses, the raw path is matched against field keys as
    /// written, so every path produced by `flatten` resolves, including keys
    /// that contain `.` or `[`.
    pub fn get(&self, path: &Path) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match (node, segment) {
                (Node::Fields(fields), Segment::Key(key)) => fields.get(key.as_str()),
                (Node::Fields(fields), Segment::Index(i)) => fields.get(i.to_string().as_str()),
                (Node::Sequence(items), Segment::Index(i)) => items.get(*i),
                _ => None,
            })
            .or_else(|| resolve_literal(self, path.as_str(), true))
    }

    pub fn to_json(&self) -> Value {
        match self {
            Node::Leaf(Scalar::Null) => Value::Null,
            Node::Leaf(Scalar::Bool(b)) => Value::Bool(*b),
            Node::Leaf(Scalar::Number(n)) => Value::Number(n.clone()),
            Node::Leaf(Scalar::String(s)) => Value::String(s.clone()),
            Node::Sequence(items) => Value::Array(items.iter().map(Node::to_json).collect()),
            Node::Fields(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

/// Walks `rest` the way `flatten` builds paths, trying longer matching keys
/// first.
fn resolve_literal<'a>(node: &'a Node, rest: &str, root: bool) -> Option<&'a Node> {
    if rest.is_empty() && !root {
        return Some(node);
    }

    match node {
        Node::Fields(fields) => {
            let body = if root { rest } else { rest.strip_prefix('.')? };
            let mut keys: Vec<(&String, &Node)> = fields
                .iter()
                .filter(|(key, _)| {
                    body.strip_prefix(key.as_str())
                        .is_some_and(|after| after.is_empty() || after.starts_with(['.', '[']))
                })
                .collect();
            keys.sort_by_key(|(key, _)| std::cmp::Reverse(key.len()));

            keys.into_iter()
                .find_map(|(key, child)| resolve_literal(child, &body[key.len()..], false))
        }
        Node::Sequence(items) => {
            let inner = rest.strip_prefix('[')?;
            let close = inner.find(']')?;
            let index = inner[..close].parse::<usize>().ok()?;
            resolve_literal(items.get(index)?, &inner[close + 1..], false)
        }
        Node::Leaf(_) => None,
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Leaf(Scalar::Null),
            Value::Bool(b) => Node::Leaf(Scalar::Bool(b)),
            Value::Number(n) => Node::Leaf(Scalar::Number(n)),
            Value::String(s) => Node::Leaf(Scalar::String(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Node::Fields(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Leaf(Scalar::Null) => Value::Null,
            Node::Leaf(Scalar::Bool(b)) => Value::Bool(b),
            Node::Leaf(Scalar::Number(n)) => Value::Number(n),
            Node::Leaf(Scalar::String(s)) => Value::String(s),
            Node::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Fields(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
