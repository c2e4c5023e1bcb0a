use crate::record::node::{Node, Scalar};
use indexmap::IndexMap;

/// Path → leaf projection of one record, in document order.
///
/// Only scalar leaves are addressable: empty field maps and empty sequences
/// produce no entry at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatView<'a> {
    entries: IndexMap<String, &'a Scalar>,
}

impl<'a> FlatView<'a> {
    pub fn get(&self, path: &str) -> Option<&'a Scalar> {
        self.entries.get(path).copied()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_paths(self) -> impl Iterator<Item = String> {
        self.entries.into_keys()
    }
}

pub fn flatten(node: &Node) -> FlatView<'_> {
    let mut view = FlatView::default();
    let mut prefix = String::new();
    walk(node, &mut prefix, &mut view.entries);
    view
}

fn walk<'a>(node: &'a Node, prefix: &mut String, out: &mut IndexMap<String, &'a Scalar>) {
    match node {
        Node::Leaf(scalar) => {
            out.insert(prefix.clone(), scalar);
        }
        Node::Fields(fields) => {
            for (key, child) in fields {
                let mark = prefix.len();
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(key);
                walk(child, prefix, out);
                prefix.truncate(mark);
            }
        }
        Node::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                let mark = prefix.len();
                prefix.push('[');
                prefix.push_str(&index.to_string());
                prefix.push(']');
                walk(child, prefix, out);
                prefix.truncate(mark);
            }
        }
    }
}
