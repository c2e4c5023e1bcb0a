//! NDJSON input
//!
//! One record per line. Lines that do not decode are dropped with a warning
//! and counted; they never fail the batch. A batch with no records at all is
//! reported as [`IngestError::NoValidRecords`].

mod decode;
mod discover;
mod error;


pub use decode::{DecodedBatch, decode_ndjson, read_inputs};
pub use discover::{STDIN_INPUT, resolve_inputs};
pub use error::IngestError;
