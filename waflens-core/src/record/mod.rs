//! Record model
//!
//! Every decoded log line becomes a [`Node`]: a tree whose leaves are scalars and
//! whose inner nodes are either ordered field maps or sequences. Nothing about the
//! WAF log shape is baked in here - the engine only ever sees trees and addresses
//! into them.
//!
//! Addresses are [`Path`]s such as `httpRequest.headers[0].name`. They are derived
//! from the tree (see [`flatten`]) and parsed back into segments for lookups.

mod flatten;
mod node;
mod path;

#[cfg(test)]
mod tests;

pub use flatten::{FlatView, flatten};
pub use node::{Fields, Node, Record, Scalar};
pub(crate) use node::parse_number;
pub use path::{Path, Segment};
