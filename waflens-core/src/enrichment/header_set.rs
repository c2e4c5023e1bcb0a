use serde::{Deserialize, Serialize};

/// Extra header names requested by the analyst.
///
/// Keeps the first spelling that was added and ignores case when de-duplicating.
/// Any change to the set means records have to be enriched again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSet {
    names: Vec<String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` for blank names and names already present.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| !n.eq_ignore_ascii_case(name.trim()));
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for name in iter {
            set.add(name.as_ref());
        }
        set
    }
}
