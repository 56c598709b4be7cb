use hitmap_aggregation::AggregationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Core(#[from] hitmap_core::Error),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("Invalid '{field}' in search response: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
