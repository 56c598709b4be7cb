//! # hitmap Core
//!
//! Core library for mapping search-engine REST responses into typed values.
//!
//! This crate provides the result-extraction engine:
//!
//! - [`ResultPath`] - Delimited descent instructions such as `hits/hits/_source`
//! - [`extract()`] - Locates result fragments and their sibling `_id`
//! - [`materialize()`] - Deserializes fragments into a [`Document`] and back-fills its id
//! - [`ApiResult`] - The interpreted response of one call
//! - [`ResponseMapper`] - Configured entry point with a shared path cache
//!
//! ## Example
//!
//! ```rust
//! use hitmap_core::{document, ResponseMapper};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Tweet {
//!     id: Option<u64>,
//!     user: String,
//! }
//! document!(Tweet, id = id);
//!
//! let body = r#"{"hits": {"hits": [{"_id": "7", "_source": {"user": "kimchy"}}]}}"#;
//! let mapper = ResponseMapper::default();
//! let result = mapper.parse(body, 200, "OK", Some("hits/hits/_source")).unwrap();
//!
//! let tweets: Vec<Tweet> = result.source_as_object_list().unwrap();
//! assert_eq!(tweets[0].id, Some(7));
//! assert_eq!(tweets[0].user, "kimchy");
//! ```

pub mod error;
pub mod path;
pub mod extract;
pub mod identifier;
pub mod document;
pub mod materialize;
pub mod response;
pub mod mapper;

pub use error::{Error, Result};
pub use path::{ResultPath, PathCache};
pub use extract::{extract, extract_with, Fragment, ES_METADATA_ID, ID_KEY};
pub use identifier::{IdSlot, MetadataId};
pub use document::Document;
pub use materialize::{materialize, materialize_all, inject_metadata_id, Materialized, Diagnostic};
pub use response::{ApiResult, Action};
pub use mapper::{MapperConfig, ResponseMapper};
