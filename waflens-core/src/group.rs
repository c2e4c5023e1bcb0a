//! Grouping by the textual value of one path.
//!
//! Groups come out largest first. Groups of equal size keep the order in which
//! their key was first seen in the input.

use crate::record::{Path, Record};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Key for records where the path is missing or `null`.
pub const UNDEFINED_GROUP_KEY: &str = "Undefined";

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub members: Vec<Record>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn summary(&self) -> GroupSummary<'_> {
        GroupSummary {
            key: &self.key,
            count: self.members.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary<'a> {
    pub key: &'a str,
    pub count: usize,
}

pub fn group(records: &[Record], field: &Path) -> Vec<Group> {
    let mut buckets: IndexMap<String, Vec<Record>, ahash::RandomState> = IndexMap::default();

    for record in records {
        let key = match record.get(field) {
            Some(node) if !node.is_null() => node.text().into_owned(),
            _ => UNDEFINED_GROUP_KEY.to_string(),
        };
        buckets.entry(key).or_default().push(Arc::clone(record));
    }

    let mut groups: Vec<Group> = buckets
        .into_iter()
        .map(|(key, members)| Group { key, members })
        .collect();

    // Stable, so equal sizes stay in first-seen order.
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups
}

/// Keep the `limit` largest groups.
pub fn top_groups(mut groups: Vec<Group>, limit: usize) -> Vec<Group> {
    groups.truncate(limit);
    groups
}
