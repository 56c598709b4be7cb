use hitmap_core::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::HashMap;

pub const EXPLANATION_KEY: &str = "_explanation";
pub const HIGHLIGHT_KEY: &str = "highlight";
pub const SORT_KEY: &str = "sort";
pub const INDEX_KEY: &str = "_index";
pub const TYPE_KEY: &str = "_type";
pub const SCORE_KEY: &str = "_score";
pub const SOURCE_KEY: &str = "_source";

/// One search hit
///
/// `S` is the source document type, `E` the explanation type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit<S, E = Value> {
    #[serde(rename = "_source", default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub source: Option<S>,

    #[serde(rename = "_explanation", default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<E>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HashMap<String, Vec<String>>>,

    /// Sort values; numbers or strings depending on the sort field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Value>>,

    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Document id as text; numeric ids are rendered in decimal
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "id_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(Number),
}

fn id_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

/// Hits compare by content: source, explanation, highlight and sort
impl<S: PartialEq, E: PartialEq> PartialEq for Hit<S, E> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.explanation == other.explanation
            && self.highlight == other.highlight
            && self.sort == other.sort
    }
}

/// The hits section of a search response
///
/// Equality covers the total, the max score and the hits themselves.
/// Hits that could not be materialized are kept aside in `diagnostics`.
#[derive(Debug)]
pub struct Hits<S, E = Value> {
    pub total: Option<u64>,
    pub max_score: Option<f64>,
    pub hits: Vec<Hit<S, E>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<S, E> Hits<S, E> {
    #[inline]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

impl<S, E> Default for Hits<S, E> {
    fn default() -> Self {
        Self {
            total: None,
            max_score: None,
            hits: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<S: PartialEq, E: PartialEq> PartialEq for Hits<S, E> {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total && self.max_score == other.max_score && self.hits == other.hits
    }
}
