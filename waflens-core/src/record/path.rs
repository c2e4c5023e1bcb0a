use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A structural address into a record: keys joined by `.`, sequence positions
/// appended as `[i]`.
///
/// Parsing never fails. A bracket whose content is not an index is read as a
/// key. Keys that themselves contain `.` or `[` split into the wrong segments;
/// `Node::get` resolves those through the raw string instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Path {
    raw: String,
    segments: SmallVec<[Segment; 6]>,
}

impl Path {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = parse_segments(&raw);
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

fn parse_segments(raw: &str) -> SmallVec<[Segment; 6]> {
    let mut segments = SmallVec::new();

    for part in raw.split('.') {
        let (head, mut rest) = match part.find('[') {
            Some(i) => (&part[..i], &part[i..]),
            None => (part, ""),
        };

        if !head.is_empty() || rest.is_empty() {
            segments.push(Segment::Key(head.to_string()));
        }

        while !rest.is_empty() {
            let Some(close) = rest.strip_prefix('[').and_then(|r| r.find(']')) else {
                // Unbalanced or trailing text: keep the remainder literally.
                segments.push(Segment::Key(rest.to_string()));
                break;
            };

            let inner = &rest[1..=close];
            segments.push(match inner.parse::<usize>() {
                Ok(i) => Segment::Index(i),
                Err(_) => Segment::Key(inner.to_string()),
            });
            rest = &rest[close + 2..];
        }
    }

    segments
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Path {
    fn from(raw: &str) -> Self {
        Path::parse(raw)
    }
}

impl From<String> for Path {
    fn from(raw: String) -> Self {
        Path::parse(raw)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.raw
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
