//! # hitmap Aggregation
//!
//! Typed views over the `aggregations` section of a search response.
//!
//! Each aggregation kind reads a fixed set of scalar fields out of its named
//! node. Missing sub-structures are not errors: the matching fields are simply
//! `None`, which is how empty buckets come back.
//!
//! ```rust
//! use hitmap_aggregation::Aggregations;
//! use serde_json::json;
//!
//! let response = json!({
//!     "aggregations": {
//!         "viewport": {
//!             "bounds": {
//!                 "top_left": {"lat": 1.0, "lon": 2.0},
//!                 "bottom_right": {"lat": 3.0, "lon": 4.0}
//!             }
//!         }
//!     }
//! });
//!
//! let aggs = Aggregations::from_response(&response).unwrap();
//! let viewport = aggs.geo_bounds("viewport").unwrap().unwrap();
//! assert_eq!(viewport.top_left_lon(), Some(2.0));
//! ```

pub mod error;
pub mod field;
pub mod geo_bounds;
pub mod stats;
pub mod value;
pub mod aggregations;

pub use error::{AggregationError, Result};
pub use field::AggregationField;
pub use geo_bounds::GeoBoundsAggregation;
pub use stats::StatsAggregation;
pub use value::ValueAggregation;
pub use aggregations::{Aggregations, AGGREGATIONS_KEY};
