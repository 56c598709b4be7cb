use thiserror::Error;

pub type Result<T> = std::result::Result<T, AggregationError>;

/// Errors raised while reading an aggregation node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Aggregation '{aggregation}' must be an object, found {found}")]
    NotAnObject {
        aggregation: String,
        found: &'static str,
    },

    #[error("Aggregation '{aggregation}' field '{field}' has unexpected value: {found}")]
    InvalidField {
        aggregation: String,
        field: String,
        found: String,
    },
}
