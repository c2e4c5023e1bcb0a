//! Built-in analysis presets.
//!
//! Each preset groups by one field, optionally after a predicate, and keeps
//! the largest [`SHORTCUT_GROUP_LIMIT`] groups.

use crate::catalog::PathCatalog;
use crate::filter::{FilterPredicate, Operator};
use crate::record::Path;
use serde::Serialize;
use thiserror::Error;

pub const SHORTCUT_GROUP_LIMIT: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("unknown shortcut '{0}'")]
    Unknown(String),

    #[error("field '{field}' not found in logs")]
    FieldNotFound { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetFilter {
    pub field: &'static str,
    pub operator: Operator,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortcut {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub group_by: &'static str,
    pub filter: Option<PresetFilter>,
}

/// What a preset asks the engine to do.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPlan {
    pub group_by: Path,
    pub predicates: Vec<FilterPredicate>,
    pub limit: usize,
}

const BLOCKED: PresetFilter = PresetFilter {
    field: "action",
    operator: Operator::Equals,
    value: "BLOCK",
};

pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        id: "top-100-ips",
        name: "Top 100 IPs",
        description: "Group by client IP and show top 100",
        group_by: "httpRequest.clientIp",
        filter: None,
    },
    Shortcut {
        id: "top-100-countries",
        name: "Top 100 Countries",
        description: "Group by country and show top 100",
        group_by: "httpRequest.country",
        filter: None,
    },
    Shortcut {
        id: "top-100-user-agents",
        name: "Top 100 User-Agents",
        description: "Group by User-Agent and show top 100",
        group_by: "header.User-Agent",
        filter: None,
    },
    Shortcut {
        id: "top-100-uris",
        name: "Top 100 URIs",
        description: "Group by URI path and show top 100",
        group_by: "httpRequest.uri",
        filter: None,
    },
    Shortcut {
        id: "top-100-referers",
        name: "Top 100 Referers",
        description: "Group by Referer header and show top 100",
        group_by: "header.Referer",
        filter: None,
    },
    Shortcut {
        id: "top-100-hosts",
        name: "Top 100 Hosts",
        description: "Group by Host header and show top 100",
        group_by: "header.Host",
        filter: None,
    },
    Shortcut {
        id: "blocked-ips",
        name: "IPs Causing Blocks",
        description: "Filter by BLOCK action and group by IP",
        group_by: "httpRequest.clientIp",
        filter: Some(BLOCKED),
    },
    Shortcut {
        id: "blocked-countries",
        name: "Countries Causing Blocks",
        description: "Filter by BLOCK action and group by country",
        group_by: "httpRequest.country",
        filter: Some(BLOCKED),
    },
];

pub fn find_shortcut(id: &str) -> Result<&'static Shortcut, ShortcutError> {
    SHORTCUTS
        .iter()
        .find(|s| s.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| ShortcutError::Unknown(id.to_string()))
}

impl Shortcut {
    /// Fails when the grouped field was never seen in the data.
    pub fn apply(&self, catalog: &PathCatalog) -> Result<AnalysisPlan, ShortcutError> {
        if !catalog.contains(self.group_by) {
            return Err(ShortcutError::FieldNotFound {
                field: self.group_by.to_string(),
            });
        }

        let predicates = self
            .filter
            .iter()
            .map(|f| FilterPredicate::new(f.field, f.operator, f.value))
            .collect();

        Ok(AnalysisPlan {
            group_by: Path::parse(self.group_by),
            predicates,
            limit: SHORTCUT_GROUP_LIMIT,
        })
    }
}
