//! Field names found inside aggregation nodes, and tolerant readers for them

use crate::error::{AggregationError, Result};
use ordered_float::OrderedFloat;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationField {
    Bounds,
    TopLeft,
    BottomRight,
    Lat,
    Lon,
    Value,
    Count,
    Min,
    Max,
    Avg,
    Sum,
}

impl AggregationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationField::Bounds => "bounds",
            AggregationField::TopLeft => "top_left",
            AggregationField::BottomRight => "bottom_right",
            AggregationField::Lat => "lat",
            AggregationField::Lon => "lon",
            AggregationField::Value => "value",
            AggregationField::Count => "count",
            AggregationField::Min => "min",
            AggregationField::Max => "max",
            AggregationField::Avg => "avg",
            AggregationField::Sum => "sum",
        }
    }
}

impl fmt::Display for AggregationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View an aggregation node as an object
pub(crate) fn as_object<'a>(aggregation: &str, node: &'a Value) -> Result<&'a Map<String, Value>> {
    node.as_object().ok_or_else(|| AggregationError::NotAnObject {
        aggregation: aggregation.to_string(),
        found: kind(node),
    })
}

/// Nested object under `field`; absent or null gives `None`
pub(crate) fn object_field<'a>(
    aggregation: &str,
    node: &'a Map<String, Value>,
    field: AggregationField,
) -> Result<Option<&'a Map<String, Value>>> {
    match node.get(field.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(other) => Err(invalid(aggregation, field, other)),
    }
}

/// Double-precision value under `field`; absent or null gives `None`.
/// Numeric strings are accepted.
pub(crate) fn number_field(
    aggregation: &str,
    node: &Map<String, Value>,
    field: AggregationField,
) -> Result<Option<OrderedFloat<f64>>> {
    match node.get(field.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|v| Some(OrderedFloat(v)))
            .ok_or_else(|| invalid(aggregation, field, &Value::Number(n.clone()))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(|v| Some(OrderedFloat(v)))
            .map_err(|_| invalid(aggregation, field, &Value::String(s.clone()))),
        Some(other) => Err(invalid(aggregation, field, other)),
    }
}

/// Unsigned count under `field`; absent or null gives `None`
pub(crate) fn count_field(
    aggregation: &str,
    node: &Map<String, Value>,
    field: AggregationField,
) -> Result<Option<u64>> {
    match node.get(field.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<u64>().ok()))
            .map(Some)
            .ok_or_else(|| invalid(aggregation, field, value)),
    }
}

fn invalid(aggregation: &str, field: AggregationField, found: &Value) -> AggregationError {
    AggregationError::InvalidField {
        aggregation: aggregation.to_string(),
        field: field.to_string(),
        found: found.to_string(),
    }
}

// Same naming as hitmap_core's json_kind; this crate does not depend on core
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_field_variants() {
        let node = json!({"lat": 1.5, "lon": "2.5", "value": null, "min": true});
        let node = node.as_object().unwrap();
        assert_eq!(number_field("agg", node, AggregationField::Lat).unwrap(), Some(OrderedFloat(1.5)));
        assert_eq!(number_field("agg", node, AggregationField::Lon).unwrap(), Some(OrderedFloat(2.5)));
        assert_eq!(number_field("agg", node, AggregationField::Value).unwrap(), None);
        assert_eq!(number_field("agg", node, AggregationField::Max).unwrap(), None);
        assert!(matches!(
            number_field("agg", node, AggregationField::Min),
            Err(AggregationError::InvalidField { ref field, .. }) if field == "min"
        ));
    }

    #[test]
    fn test_object_field_rejects_scalars() {
        let node = json!({"bounds": 3});
        let err = object_field("viewport", node.as_object().unwrap(), AggregationField::Bounds).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Aggregation 'viewport' field 'bounds' has unexpected value: 3"
        );
    }
}
