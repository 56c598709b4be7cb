//! Fragment extraction
//!
//! Walks a parsed response along a [`ResultPath`] and yields the individual
//! result fragments together with the `_id` that sat next to each of them.

use crate::error::{json_kind, Error, Result};
use crate::path::ResultPath;
use serde_json::{Map, Value};

/// Key holding the document id next to a source payload
pub const ID_KEY: &str = "_id";

/// Synthetic field carrying the metadata id when a fragment is rendered as JSON
pub const ES_METADATA_ID: &str = "es_metadata_id";

/// A single result located inside a response
///
/// Borrows from the response tree; extraction never mutates the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment<'a> {
    pub source: &'a Value,
    pub metadata_id: Option<&'a Value>,
}

impl<'a> Fragment<'a> {
    #[inline]
    pub fn new(source: &'a Value, metadata_id: Option<&'a Value>) -> Self {
        Self { source, metadata_id }
    }

    /// Owned copy of the source with the metadata id attached under `field`.
    ///
    /// Only object sources can carry the id; other sources are copied as is.
    pub fn to_tagged_value(&self, field: &str) -> Value {
        let mut value = self.source.clone();
        if let (Value::Object(map), Some(id)) = (&mut value, self.metadata_id) {
            map.insert(field.to_string(), id.clone());
        }
        value
    }
}

/// Extract fragments using the default `_id` key
pub fn extract<'a>(doc: &'a Value, path: Option<&ResultPath>) -> Result<Vec<Fragment<'a>>> {
    extract_with(doc, path, ID_KEY)
}

/// Extract fragments, reading metadata ids from `id_key`.
///
/// Absent keys anywhere along the path produce an empty result. A node whose
/// kind does not allow keyed descent is a [`Error::PathTraversal`].
pub fn extract_with<'a>(
    doc: &'a Value,
    path: Option<&ResultPath>,
    id_key: &str,
) -> Result<Vec<Fragment<'a>>> {
    let path = match path {
        Some(path) => path,
        None => return Ok(vec![Fragment::new(doc, None)]),
    };

    let root = descend(doc, path.root_key())?;
    let node = match present(root.get(path.root_key())) {
        Some(node) => node,
        None => return Ok(Vec::new()),
    };

    let source_key = match path.source_key() {
        Some(key) => key,
        None => {
            let id = present(root.get(id_key)).filter(|_| node.is_object());
            return Ok(vec![Fragment::new(node, id)]);
        }
    };

    let mut container = node;
    for segment in path.intermediate() {
        let object = descend(container, segment)?;
        container = match present(object.get(segment)) {
            Some(next) => next,
            None => return Ok(Vec::new()),
        };
    }

    let fragments = match container {
        Value::Object(object) => present(object.get(source_key))
            .map(|source| vec![Fragment::new(source, present(object.get(id_key)))])
            .unwrap_or_default(),
        Value::Array(elements) => elements
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|element| {
                present(element.get(source_key))
                    .map(|source| Fragment::new(source, present(element.get(id_key))))
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            return Err(Error::PathTraversal {
                segment: source_key.to_string(),
                expected: "object or array",
                found: json_kind(other),
            })
        }
    };

    tracing::debug!(path = %path, fragments = fragments.len(), "extracted fragments");
    Ok(fragments)
}

fn descend<'a>(node: &'a Value, segment: &str) -> Result<&'a Map<String, Value>> {
    node.as_object().ok_or_else(|| Error::PathTraversal {
        segment: segment.to_string(),
        expected: "object",
        found: json_kind(node),
    })
}

/// Explicit JSON null counts as absent
#[inline]
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
