use crate::error::{Result, SearchError};
use crate::hit::{Hit, Hits};
use hitmap_aggregation::Aggregations;
use hitmap_core::error::json_kind;
use hitmap_core::{
    inject_metadata_id, ApiResult, Diagnostic, Document, Error, Materialized, ResponseMapper,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shard summary of a search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shards {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub successful: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<u32>,
    #[serde(default)]
    pub failed: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Value>,
}

/// Typed view of a search response
///
/// Sources are located through `hits/hits/_source` unless the underlying
/// [`ApiResult`] was built with another path.
#[derive(Debug, Clone)]
pub struct SearchResult {
    inner: ApiResult,
}

impl SearchResult {
    pub const PATH_TO_RESULT: &'static str = "hits/hits/_source";

    pub fn new(inner: ApiResult) -> Self {
        Self { inner }
    }

    pub fn parse(
        mapper: &ResponseMapper,
        body: &str,
        status_code: u16,
        reason_phrase: &str,
    ) -> Result<Self> {
        let inner = mapper.parse(body, status_code, reason_phrase, Some(Self::PATH_TO_RESULT))?;
        Ok(Self::new(inner))
    }

    #[inline]
    pub fn api_result(&self) -> &ApiResult {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> ApiResult {
        self.inner
    }

    #[inline]
    pub fn is_succeeded(&self) -> bool {
        self.inner.is_succeeded()
    }

    #[inline]
    pub fn error_message(&self) -> Option<&str> {
        self.inner.error_message()
    }

    pub fn source_as_object_list<T: Document>(&self) -> Result<Vec<T>> {
        Ok(self.inner.source_as_object_list()?)
    }

    pub fn source_as_object<T: Document>(&self) -> Result<Option<T>> {
        Ok(self.inner.source_as_object()?)
    }

    fn hits_node(&self) -> Option<&Value> {
        self.inner.json_object().get("hits").filter(|v| !v.is_null())
    }

    /// Every hit with its metadata, sources carrying the hit id.
    ///
    /// Hits that fail to deserialize, or whose id does not fit the source's
    /// identifier type, are reported as diagnostics and left out.
    pub fn hits<S: Document, E: DeserializeOwned>(&self) -> Result<Materialized<Hit<S, E>>> {
        let mut materialized = Materialized::default();
        if !self.is_succeeded() {
            return Ok(materialized);
        }

        let elements = match self.hits_node().and_then(|hits| hits.get("hits")) {
            None | Some(Value::Null) => return Ok(materialized),
            Some(Value::Array(elements)) => elements,
            Some(other) => {
                return Err(Error::PathTraversal {
                    segment: "hits".to_string(),
                    expected: "array",
                    found: json_kind(other),
                }
                .into())
            }
        };

        let id_key = self.inner.id_key();
        for (index, element) in elements.iter().enumerate() {
            let metadata_id = element.get(id_key);
            match materialize_hit::<S, E>(element, metadata_id) {
                Ok(hit) => materialized.objects.push(hit),
                Err(error) => {
                    tracing::warn!(index, error = %error, "failed to materialize hit");
                    materialized.diagnostics.push(Diagnostic {
                        index,
                        metadata_id: metadata_id.cloned(),
                        error,
                    });
                }
            }
        }

        Ok(materialized)
    }

    /// The hits section as one value: total, max score and materialized hits
    pub fn search_hits<S: Document, E: DeserializeOwned>(&self) -> Result<Hits<S, E>> {
        let materialized = self.hits::<S, E>()?;
        Ok(Hits {
            total: self.total(),
            max_score: self.max_score(),
            hits: materialized.objects,
            diagnostics: materialized.diagnostics,
        })
    }

    pub fn first_hit<S: Document, E: DeserializeOwned>(&self) -> Result<Option<Hit<S, E>>> {
        Ok(self.hits::<S, E>()?.objects.into_iter().next())
    }

    /// Total hit count; accepts both `"total": 5` and `"total": {"value": 5}`
    pub fn total(&self) -> Option<u64> {
        match self.hits_node()?.get("total")? {
            Value::Object(total) => total.get("value").and_then(Value::as_u64),
            other => other.as_u64(),
        }
    }

    pub fn max_score(&self) -> Option<f64> {
        self.hits_node()?.get("max_score").and_then(Value::as_f64)
    }

    pub fn took(&self) -> Option<u64> {
        self.inner.json_object().get("took").and_then(Value::as_u64)
    }

    pub fn timed_out(&self) -> Option<bool> {
        self.inner.json_object().get("timed_out").and_then(Value::as_bool)
    }

    pub fn shards(&self) -> Result<Option<Shards>> {
        match self.inner.json_object().get("_shards") {
            None | Some(Value::Null) => Ok(None),
            Some(node) => Shards::deserialize(node)
                .map(Some)
                .map_err(|source| SearchError::InvalidField { field: "_shards", source }),
        }
    }

    pub fn aggregations(&self) -> Result<Aggregations> {
        Ok(Aggregations::from_response(self.inner.json_object())?)
    }
}

fn materialize_hit<S: Document, E: DeserializeOwned>(
    element: &Value,
    metadata_id: Option<&Value>,
) -> hitmap_core::Result<Hit<S, E>> {
    let mut hit = Hit::<S, E>::deserialize(element).map_err(Error::Deserialization)?;
    if let (Some(source), Some(id)) = (hit.source.as_mut(), metadata_id) {
        inject_metadata_id(source, id)?;
    }
    Ok(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tweet {
        #[serde(default)]
        id: Option<u32>,
        user: String,
    }
    hitmap_core::document!(Tweet, id = id);

    fn search(body: Value) -> SearchResult {
        let mapper = ResponseMapper::default();
        SearchResult::parse(&mapper, &body.to_string(), 200, "OK").unwrap()
    }

    fn body() -> Value {
        json!({
            "took": 5,
            "timed_out": false,
            "_shards": {"total": 5, "successful": 5, "skipped": 0, "failed": 0},
            "hits": {
                "total": {"value": 2, "relation": "eq"},
                "max_score": 1.5,
                "hits": [
                    {"_index": "twitter", "_id": "1", "_score": 1.5, "_source": {"user": "kimchy"}},
                    {"_index": "twitter", "_id": "2", "_score": 0.5, "_source": {"user": "dogukan"}}
                ]
            },
            "aggregations": {
                "viewport": {"bounds": {
                    "top_left": {"lat": 1.0, "lon": 2.0},
                    "bottom_right": {"lat": 3.0, "lon": 4.0}
                }}
            }
        })
    }

    #[test]
    fn test_envelope_fields() {
        let result = search(body());
        assert_eq!(result.took(), Some(5));
        assert_eq!(result.timed_out(), Some(false));
        assert_eq!(result.total(), Some(2));
        assert_eq!(result.max_score(), Some(1.5));

        let shards = result.shards().unwrap().unwrap();
        assert_eq!(shards.total, 5);
        assert_eq!(shards.skipped, Some(0));
        assert!(shards.failures.is_empty());
    }

    #[test]
    fn test_legacy_integer_total() {
        let result = search(json!({"hits": {"total": 7, "hits": []}}));
        assert_eq!(result.total(), Some(7));
    }

    #[test]
    fn test_hits_carry_ids_into_sources() {
        let result = search(body());
        let hits = result.hits::<Tweet, Value>().unwrap();

        assert!(hits.is_clean());
        assert_eq!(hits.objects.len(), 2);
        assert_eq!(hits.objects[0].source, Some(Tweet { id: Some(1), user: "kimchy".to_string() }));
        assert_eq!(hits.objects[1].score, Some(0.5));
        assert_eq!(hits.objects[1].index.as_deref(), Some("twitter"));

        let first = result.first_hit::<Tweet, Value>().unwrap().unwrap();
        assert_eq!(first.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_numeric_hit_ids_agree_with_sources() {
        let result = search(json!({"hits": {"hits": [
            {"_id": 7, "_source": {"user": "a"}},
            {"_id": "8", "_source": {"user": "b"}}
        ]}}));
        let hits = result.hits::<Tweet, Value>().unwrap();
        let sources: Vec<Tweet> = result.source_as_object_list().unwrap();

        assert!(hits.is_clean());
        assert_eq!(hits.objects.len(), sources.len());
        assert_eq!(hits.objects[0].id.as_deref(), Some("7"));
        assert_eq!(hits.objects[0].source, Some(Tweet { id: Some(7), user: "a".to_string() }));
        assert_eq!(sources[0], Tweet { id: Some(7), user: "a".to_string() });
    }

    #[test]
    fn test_search_hits_section() {
        let hits = search(body()).search_hits::<Tweet, Value>().unwrap();
        assert_eq!(hits.total, Some(2));
        assert_eq!(hits.max_score, Some(1.5));
        assert_eq!(hits.len(), 2);
        assert!(hits.diagnostics.is_empty());
        assert_eq!(hits.hits[1].source, Some(Tweet { id: Some(2), user: "dogukan".to_string() }));

        let again = search(body()).search_hits::<Tweet, Value>().unwrap();
        assert_eq!(hits, again);

        let empty = search(json!({"took": 1})).search_hits::<Tweet, Value>().unwrap();
        assert!(empty.is_empty());
        assert_ne!(hits, empty);
        assert_eq!(empty, Hits::default());
    }

    #[test]
    fn test_sources_through_default_path() {
        let tweets: Vec<Tweet> = search(body()).source_as_object_list().unwrap();
        assert_eq!(tweets.iter().map(|t| t.id).collect::<Vec<_>>(), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_bad_hit_isolated() {
        let result = search(json!({"hits": {"hits": [
            {"_id": "x", "_source": {"user": "a"}},
            {"_id": "2", "_source": {"user": "b"}}
        ]}}));
        let hits = result.hits::<Tweet, Value>().unwrap();

        assert_eq!(hits.objects.len(), 1);
        assert_eq!(hits.diagnostics[0].index, 0);
        assert_eq!(hits.diagnostics[0].metadata_id, Some(json!("x")));
        assert!(matches!(hits.diagnostics[0].error, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_no_hits() {
        let result = search(json!({"took": 1}));
        assert!(result.hits::<Tweet, Value>().unwrap().objects.is_empty());
        assert!(result.first_hit::<Tweet, Value>().unwrap().is_none());
        assert_eq!(result.total(), None);
        assert!(result.shards().unwrap().is_none());
        assert!(result.aggregations().unwrap().is_empty());
    }

    #[test]
    fn test_hits_not_array_is_error() {
        let result = search(json!({"hits": {"hits": {"a": 1}}}));
        assert!(matches!(
            result.hits::<Tweet, Value>(),
            Err(SearchError::Core(Error::PathTraversal { found: "object", .. }))
        ));
    }

    #[test]
    fn test_failed_search() {
        let mapper = ResponseMapper::default();
        let result = SearchResult::parse(&mapper, r#"{"error": "boom"}"#, 500, "Internal Server Error").unwrap();
        assert!(!result.is_succeeded());
        assert_eq!(result.error_message(), Some("boom"));
        assert!(result.hits::<Tweet, Value>().unwrap().objects.is_empty());
    }

    #[test]
    fn test_aggregations_reachable() {
        let aggs = search(body()).aggregations().unwrap();
        let viewport = aggs.geo_bounds("viewport").unwrap().unwrap();
        assert_eq!(viewport.bottom_right_lat(), Some(3.0));
    }
}
