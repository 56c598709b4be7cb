//! Named aggregation container
//!
//! Wraps the `aggregations` object of a search response and parses its
//! entries into typed results on demand.

use crate::error::{AggregationError, Result};
use crate::field::as_object;
use crate::geo_bounds::GeoBoundsAggregation;
use crate::stats::StatsAggregation;
use crate::value::ValueAggregation;
use serde_json::{Map, Value};

/// Key of the aggregation container in a search response
pub const AGGREGATIONS_KEY: &str = "aggregations";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregations {
    root: Map<String, Value>,
}

impl Aggregations {
    /// Wrap an `aggregations` object. Null means no aggregations were requested.
    pub fn new(node: &Value) -> Result<Self> {
        if node.is_null() {
            return Ok(Self::default());
        }
        Ok(Self {
            root: as_object(AGGREGATIONS_KEY, node)?.clone(),
        })
    }

    /// Read the `aggregations` object from a whole response
    pub fn from_response(response: &Value) -> Result<Self> {
        match response.get(AGGREGATIONS_KEY) {
            Some(node) => Self::new(node),
            None => Ok(Self::default()),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Raw node of a named aggregation
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    pub fn geo_bounds(&self, name: &str) -> Result<Option<GeoBoundsAggregation>> {
        self.parse(name, |name, node| GeoBoundsAggregation::new(name, node))
    }

    pub fn stats(&self, name: &str) -> Result<Option<StatsAggregation>> {
        self.parse(name, |name, node| StatsAggregation::new(name, node))
    }

    pub fn value(&self, name: &str) -> Result<Option<ValueAggregation>> {
        self.parse(name, |name, node| ValueAggregation::new(name, node))
    }

    fn parse<T>(
        &self,
        name: &str,
        parser: impl FnOnce(&str, &Value) -> std::result::Result<T, AggregationError>,
    ) -> Result<Option<T>> {
        self.root.get(name).map(|node| parser(name, node)).transpose()
    }
}
