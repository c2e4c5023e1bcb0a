//! Record filtering
//!
//! Two independent passes:
//! - predicates, combined by conjunction ([`filter`])
//! - an inclusive UTC time window ([`apply_time_window`])
//!
//! Missing fields are handled asymmetrically. A predicate on a missing field
//! always fails, for every operator including `exists`. The time window instead
//! lets records without a usable timestamp through, so time filtering only ever
//! applies to records that carry one.

mod error;
mod predicate;
mod time_window;

#[cfg(test)]
mod tests;

pub use error::{FilterParseError, TimeBoundError};
pub use predicate::{FilterPredicate, Operator, filter};
pub use time_window::{
    DEFAULT_TIMESTAMP_FIELD, SECONDS_THRESHOLD, TimeRange, apply_time_window,
    apply_time_window_on, normalize_epoch_millis, parse_bound, record_timestamp_millis,
};
