use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("unknown filter operator '{0}'")]
    UnknownOperator(String),

    #[error("operator '{operator}' on '{field}' requires a value")]
    MissingValue { field: String, operator: String },

    #[error("filter must not have an empty field")]
    EmptyField,

    #[error("invalid filter '{0}', expected field:operator[:value]")]
    Malformed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid time bound '{value}', expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or epoch milliseconds")]
pub struct TimeBoundError {
    pub value: String,
}
