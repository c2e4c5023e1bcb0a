pub mod fixtures;
pub mod tracing;

pub use fixtures::{fixture_path, ids, load_fixture, records, write_ndjson};
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};
