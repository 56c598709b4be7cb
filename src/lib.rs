//! # hitmap
//!
//! Typed response mapping for search-engine REST APIs.
//!
//! hitmap takes raw JSON response bodies and turns them into typed values:
//! it locates nested source documents along a delimited result path,
//! deserializes each one into a caller-chosen type, back-fills the document
//! id into that type's identifier field, and parses aggregation nodes such as
//! geo bounds and stats.
//!
//! ## Quick Start
//!
//! ### As a Library
//!
//! ```rust
//! use hitmap::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Article {
//!     id: Option<String>,
//!     title: String,
//! }
//! document!(Article, id = id);
//!
//! let body = r#"{
//!     "hits": {"total": 1, "hits": [{"_id": "a1", "_source": {"title": "Hello"}}]},
//!     "aggregations": {"viewport": {}}
//! }"#;
//!
//! let mapper = ResponseMapper::default();
//! let result = SearchResult::parse(&mapper, body, 200, "OK").unwrap();
//!
//! let articles: Vec<Article> = result.source_as_object_list().unwrap();
//! assert_eq!(articles[0].id.as_deref(), Some("a1"));
//!
//! let viewport = result.aggregations().unwrap().geo_bounds("viewport").unwrap().unwrap();
//! assert_eq!(viewport.top_left_lat(), None);
//! ```
//!
//! ### From the Command Line
//!
//! ```bash
//! curl -s localhost:9200/twitter/_search | hitmap --path hits/hits/_source
//! ```
//!
//! ## Crate Structure
//!
//! - [`hitmap-core`](https://docs.rs/hitmap-core) - Result paths, fragment extraction, materialization
//! - [`hitmap-aggregation`](https://docs.rs/hitmap-aggregation) - Geo bounds, stats and value aggregations
//! - [`hitmap-search`](https://docs.rs/hitmap-search) - Typed search responses and hits

// Re-export core types
pub use hitmap_core::{
    document,
    ApiResult, Action, ResponseMapper, MapperConfig,
    ResultPath, PathCache, Fragment,
    Document, IdSlot, MetadataId,
    Materialized, Diagnostic,
    Error, Result,
    ES_METADATA_ID, ID_KEY,
};

// Re-export aggregations
pub use hitmap_aggregation::{
    Aggregations, AggregationError,
    GeoBoundsAggregation, StatsAggregation, ValueAggregation,
};

// Re-export search
pub use hitmap_search::{SearchResult, SearchError, Hit, Hits, Shards};

/// Low-level extraction and materialization functions
pub mod engine {
    pub use hitmap_core::{extract, extract_with, materialize, materialize_all, inject_metadata_id};
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        document,
        ApiResult, Action, ResponseMapper, MapperConfig,
        ResultPath, Fragment,
        Document,
        Materialized,
        Error, Result,
        Aggregations, GeoBoundsAggregation, StatsAggregation, ValueAggregation,
        SearchResult, Hit, Hits,
    };
}
