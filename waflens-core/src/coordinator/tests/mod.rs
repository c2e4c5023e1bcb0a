mod sequence_tests;

use crate::record::{Node, Record};
use std::sync::Arc;

pub(super) fn records(values: Vec<serde_json::Value>) -> Vec<Record> {
    values.into_iter().map(|v| Arc::new(Node::from(v))).collect()
}
