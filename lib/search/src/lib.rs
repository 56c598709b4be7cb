//! # hitmap Search
//!
//! Typed view of search responses built on [`hitmap_core::ApiResult`].
//!
//! - [`SearchResult`] - hits, totals, shards and aggregations of one search call
//! - [`Hit`] - a single hit, generic over source and explanation types
//! - [`Hits`] - the hits section: total, max score and the hit list
//!
//! Hit ids are injected into the source's identifier field the same way the
//! core materializer does for `hits/hits/_source` extraction.

pub mod error;
pub mod hit;
pub mod result;

pub use error::{Result, SearchError};
pub use hit::{
    Hit, Hits, EXPLANATION_KEY, HIGHLIGHT_KEY, INDEX_KEY, SCORE_KEY, SORT_KEY, SOURCE_KEY, TYPE_KEY,
};
pub use result::{SearchResult, Shards};
