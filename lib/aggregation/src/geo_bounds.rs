use crate::error::Result;
use crate::field::{as_object, number_field, object_field, AggregationField};
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::Value;

/// Bounding box of all geo points in a bucket
///
/// Every coordinate is `None` when the response carries no `bounds`, which is
/// what an empty bucket looks like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GeoBoundsAggregation {
    name: String,
    top_left_lat: Option<OrderedFloat<f64>>,
    top_left_lon: Option<OrderedFloat<f64>>,
    bottom_right_lat: Option<OrderedFloat<f64>>,
    bottom_right_lon: Option<OrderedFloat<f64>>,
}

impl GeoBoundsAggregation {
    pub const TYPE: &'static str = "geo_bounds";

    pub fn new(name: impl Into<String>, node: &Value) -> Result<Self> {
        let name = name.into();
        let object = as_object(&name, node)?;

        let mut aggregation = Self {
            name,
            top_left_lat: None,
            top_left_lon: None,
            bottom_right_lat: None,
            bottom_right_lon: None,
        };

        let Some(bounds) = object_field(&aggregation.name, object, AggregationField::Bounds)? else {
            return Ok(aggregation);
        };

        if let Some(top_left) = object_field(&aggregation.name, bounds, AggregationField::TopLeft)? {
            aggregation.top_left_lat = number_field(&aggregation.name, top_left, AggregationField::Lat)?;
            aggregation.top_left_lon = number_field(&aggregation.name, top_left, AggregationField::Lon)?;
        }
        if let Some(bottom_right) = object_field(&aggregation.name, bounds, AggregationField::BottomRight)? {
            aggregation.bottom_right_lat = number_field(&aggregation.name, bottom_right, AggregationField::Lat)?;
            aggregation.bottom_right_lon = number_field(&aggregation.name, bottom_right, AggregationField::Lon)?;
        }

        Ok(aggregation)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top left latitude if bounds exist
    #[inline]
    pub fn top_left_lat(&self) -> Option<f64> {
        self.top_left_lat.map(|v| v.0)
    }

    /// Top left longitude if bounds exist
    #[inline]
    pub fn top_left_lon(&self) -> Option<f64> {
        self.top_left_lon.map(|v| v.0)
    }

    /// Bottom right latitude if bounds exist
    #[inline]
    pub fn bottom_right_lat(&self) -> Option<f64> {
        self.bottom_right_lat.map(|v| v.0)
    }

    /// Bottom right longitude if bounds exist
    #[inline]
    pub fn bottom_right_lon(&self) -> Option<f64> {
        self.bottom_right_lon.map(|v| v.0)
    }

    pub fn has_bounds(&self) -> bool {
        self.top_left_lat.is_some()
            || self.top_left_lon.is_some()
            || self.bottom_right_lat.is_some()
            || self.bottom_right_lon.is_some()
    }
}
