use crate::error::Result;
use crate::field::{as_object, count_field, number_field, AggregationField};
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::Value;

/// Count, min, max, avg and sum over a numeric field
///
/// An empty bucket reports a zero count and null for the other fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StatsAggregation {
    name: String,
    count: Option<u64>,
    min: Option<OrderedFloat<f64>>,
    max: Option<OrderedFloat<f64>>,
    avg: Option<OrderedFloat<f64>>,
    sum: Option<OrderedFloat<f64>>,
}

impl StatsAggregation {
    pub const TYPE: &'static str = "stats";

    pub fn new(name: impl Into<String>, node: &Value) -> Result<Self> {
        let name = name.into();
        let object = as_object(&name, node)?;

        Ok(Self {
            count: count_field(&name, object, AggregationField::Count)?,
            min: number_field(&name, object, AggregationField::Min)?,
            max: number_field(&name, object, AggregationField::Max)?,
            avg: number_field(&name, object, AggregationField::Avg)?,
            sum: number_field(&name, object, AggregationField::Sum)?,
            name,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    #[inline]
    pub fn min(&self) -> Option<f64> {
        self.min.map(|v| v.0)
    }

    #[inline]
    pub fn max(&self) -> Option<f64> {
        self.max.map(|v| v.0)
    }

    #[inline]
    pub fn avg(&self) -> Option<f64> {
        self.avg.map(|v| v.0)
    }

    #[inline]
    pub fn sum(&self) -> Option<f64> {
        self.sum.map(|v| v.0)
    }
}
