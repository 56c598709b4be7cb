use crate::document::Document;
use crate::error::{Error, Result};
use crate::extract::{extract_with, Fragment, ES_METADATA_ID, ID_KEY};
use crate::mapper::ResponseMapper;
use crate::materialize::{materialize_all, Materialized};
use crate::path::ResultPath;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Interpreted response of a single API call
///
/// Holds the raw body, the parsed JSON tree, the transport status, and the
/// result path used for typed extraction. Nothing is extracted until asked.
#[derive(Debug, Clone)]
pub struct ApiResult {
    json_string: String,
    json: Value,
    path_to_result: Option<String>,
    path: Option<Arc<ResultPath>>,
    response_code: u16,
    reason_phrase: String,
    succeeded: bool,
    error_message: Option<String>,
    id_key: String,
    metadata_id_field: String,
}

impl ApiResult {
    /// Parse a response body with the default id conventions and no path cache
    pub fn parse(
        body: impl Into<String>,
        status_code: u16,
        reason_phrase: impl Into<String>,
        path_to_result: Option<&str>,
    ) -> Result<Self> {
        let path = ResultPath::resolve(path_to_result).map(Arc::new);
        Self::with_path(body.into(), status_code, reason_phrase.into(), path_to_result, path)
    }

    pub(crate) fn with_path(
        json_string: String,
        status_code: u16,
        reason_phrase: String,
        path_to_result: Option<&str>,
        path: Option<Arc<ResultPath>>,
    ) -> Result<Self> {
        let json = if json_string.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(&json_string).map_err(Error::InvalidJson)?
        };

        let succeeded = (200..300).contains(&status_code);
        let error_message = if succeeded {
            None
        } else {
            Some(
                error_from_body(&json)
                    .unwrap_or_else(|| format!("{} {}", status_code, reason_phrase).trim().to_string()),
            )
        };

        Ok(Self {
            json_string,
            json,
            path_to_result: path_to_result.map(str::to_string),
            path,
            response_code: status_code,
            reason_phrase,
            succeeded,
            error_message,
            id_key: ID_KEY.to_string(),
            metadata_id_field: ES_METADATA_ID.to_string(),
        })
    }

    pub(crate) fn with_id_conventions(mut self, id_key: &str, metadata_id_field: &str) -> Self {
        self.id_key = id_key.to_string();
        self.metadata_id_field = metadata_id_field.to_string();
        self
    }

    #[inline]
    pub fn is_succeeded(&self) -> bool {
        self.succeeded
    }

    #[inline]
    pub fn json_string(&self) -> &str {
        &self.json_string
    }

    #[inline]
    pub fn json_object(&self) -> &Value {
        &self.json
    }

    #[inline]
    pub fn response_code(&self) -> u16 {
        self.response_code
    }

    #[inline]
    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    #[inline]
    pub fn path_to_result(&self) -> Option<&str> {
        self.path_to_result.as_deref()
    }

    #[inline]
    pub fn result_path(&self) -> Option<&ResultPath> {
        self.path.as_deref()
    }

    #[inline]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Override the error message, e.g. for a status the caller treats specially
    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    #[inline]
    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    #[inline]
    pub fn metadata_id_field(&self) -> &str {
        &self.metadata_id_field
    }

    /// Locate result fragments along the result path
    pub fn fragments(&self) -> Result<Vec<Fragment<'_>>> {
        extract_with(&self.json, self.path.as_deref(), &self.id_key)
    }

    /// Fragments as owned JSON, each carrying its metadata id under
    /// [`ApiResult::metadata_id_field`]
    pub fn source_as_json_list(&self) -> Result<Vec<Value>> {
        Ok(self
            .fragments()?
            .iter()
            .map(|fragment| fragment.to_tagged_value(&self.metadata_id_field))
            .collect())
    }

    /// Materialize every source, keeping per-fragment failures as diagnostics.
    ///
    /// A failed call yields an empty batch.
    pub fn materialize_sources<T: Document>(&self) -> Result<Materialized<T>> {
        if !self.succeeded {
            return Ok(Materialized::default());
        }
        let fragments = self.fragments()?;
        Ok(materialize_all(&fragments))
    }

    pub fn source_as_object_list<T: Document>(&self) -> Result<Vec<T>> {
        self.materialize_sources::<T>().map(Materialized::into_objects)
    }

    pub fn source_as_object<T: Document>(&self) -> Result<Option<T>> {
        Ok(self.source_as_object_list::<T>()?.into_iter().next())
    }
}

/// Message carried by an `"error"` field in the response body
fn error_from_body(json: &Value) -> Option<String> {
    match json.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => Some(
            error
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(error.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}

/// A REST action whose response this crate interprets
///
/// Request building lives with the implementor; only the result side is
/// described here.
pub trait Action {
    fn uri(&self) -> String;

    fn rest_method_name(&self) -> &str;

    fn path_to_result(&self) -> Option<&str> {
        None
    }

    fn headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    fn create_result(
        &self,
        mapper: &ResponseMapper,
        response_body: &str,
        status_code: u16,
        reason_phrase: &str,
    ) -> Result<ApiResult> {
        mapper.parse(response_body, status_code, reason_phrase, self.path_to_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tweet {
        #[serde(default)]
        id: Option<String>,
        user: String,
    }
    crate::document!(Tweet, id = id);

    const SEARCH_BODY: &str = r#"{
        "took": 2,
        "hits": {
            "total": 2,
            "hits": [
                {"_id": "1", "_source": {"user": "kimchy"}},
                {"_id": "2", "_source": {"user": "dogukan"}}
            ]
        }
    }"#;

    #[test]
    fn test_successful_result() {
        let result = ApiResult::parse(SEARCH_BODY, 200, "OK", Some("hits/hits/_source")).unwrap();
        assert!(result.is_succeeded());
        assert!(result.error_message().is_none());
        assert_eq!(result.response_code(), 200);
        assert_eq!(result.json_object()["took"], 2);

        let tweets: Vec<Tweet> = result.source_as_object_list().unwrap();
        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[0].id.as_deref(), Some("1"));
        assert_eq!(tweets[1].user, "dogukan");

        let first: Option<Tweet> = result.source_as_object().unwrap();
        assert_eq!(first.unwrap().user, "kimchy");
    }

    #[test]
    fn test_json_list_carries_metadata_id() {
        let result = ApiResult::parse(SEARCH_BODY, 200, "OK", Some("hits/hits/_source")).unwrap();
        let sources = result.source_as_json_list().unwrap();
        assert_eq!(sources[1]["es_metadata_id"], "2");
        assert_eq!(sources[1]["user"], "dogukan");
    }

    #[test]
    fn test_failed_result_yields_no_sources() {
        let body = r#"{"error": {"type": "index_not_found_exception", "reason": "no such index [x]"}, "status": 404}"#;
        let result = ApiResult::parse(body, 404, "Not Found", Some("hits/hits/_source")).unwrap();

        assert!(!result.is_succeeded());
        assert_eq!(result.error_message(), Some("no such index [x]"));
        assert!(result.source_as_object_list::<Tweet>().unwrap().is_empty());
        assert!(result.source_as_object::<Tweet>().unwrap().is_none());
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        let mut result = ApiResult::parse("", 503, "Service Unavailable", None).unwrap();
        assert_eq!(result.error_message(), Some("503 Service Unavailable"));
        assert_eq!(result.json_object(), &Value::Object(Map::new()));

        result.set_error_message("cluster is down");
        assert_eq!(result.error_message(), Some("cluster is down"));
    }

    #[test]
    fn test_string_error_field() {
        let result = ApiResult::parse(r#"{"error": "IndexMissingException[[x] missing]"}"#, 404, "Not Found", None).unwrap();
        assert_eq!(result.error_message(), Some("IndexMissingException[[x] missing]"));
    }

    #[test]
    fn test_invalid_body_is_error() {
        assert!(matches!(
            ApiResult::parse("{not json", 200, "OK", None),
            Err(Error::InvalidJson(_))
        ));
    }

    #[test]
    fn test_no_path_materializes_whole_document() {
        let result = ApiResult::parse(r#"{"user": "kimchy"}"#, 200, "OK", None).unwrap();
        let tweet: Tweet = result.source_as_object().unwrap().unwrap();
        assert_eq!(tweet, Tweet { id: None, user: "kimchy".to_string() });
    }

    #[test]
    fn test_traversal_error_propagates() {
        let result = ApiResult::parse(r#"{"hits": {"hits": 3}}"#, 200, "OK", Some("hits/hits/_source")).unwrap();
        assert!(matches!(
            result.source_as_object_list::<Tweet>(),
            Err(Error::PathTraversal { .. })
        ));
    }
}
