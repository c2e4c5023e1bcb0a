
use crate::record::{Node, Record};
use std::sync::Arc;

pub(super) fn record(value: serde_json::Value) -> Record {
    Arc::new(Node::from(value))
}
