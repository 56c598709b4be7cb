use crate::error::Result;
use crate::field::{as_object, number_field, AggregationField};
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::Value;

/// Any metric that reports a single `value`: avg, min, max, sum, cardinality, value_count
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValueAggregation {
    name: String,
    value: Option<OrderedFloat<f64>>,
}

impl ValueAggregation {
    pub const TYPE: &'static str = "value";

    pub fn new(name: impl Into<String>, node: &Value) -> Result<Self> {
        let name = name.into();
        let object = as_object(&name, node)?;
        let value = number_field(&name, object, AggregationField::Value)?;
        Ok(Self { name, value })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value.map(|v| v.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_parsed() {
        let agg = ValueAggregation::new("avg_price", &json!({"value": 12.5})).unwrap();
        assert_eq!(agg.name(), "avg_price");
        assert_eq!(agg.value(), Some(12.5));
    }

    #[test]
    fn test_null_value() {
        let agg = ValueAggregation::new("avg_price", &json!({"value": null})).unwrap();
        assert_eq!(agg.value(), None);
    }

    #[test]
    fn test_formatted_value_ignored() {
        let node = json!({"value": 1.5e3, "value_as_string": "1500.0"});
        let agg = ValueAggregation::new("max_price", &node).unwrap();
        assert_eq!(agg.value(), Some(1500.0));
    }
}
