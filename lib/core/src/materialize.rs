//! Typed materialization
//!
//! Deserializes fragments into caller-chosen [`Document`] types and back-fills
//! the identifier attribute from the fragment's metadata id.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::extract::Fragment;
use serde_json::Value;

/// Objects produced from a batch of fragments, plus what went wrong on the way
#[derive(Debug)]
pub struct Materialized<T> {
    pub objects: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Materialized<T> {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[inline]
    pub fn into_objects(self) -> Vec<T> {
        self.objects
    }
}

impl<T> Default for Materialized<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

/// A fragment that produced no object
#[derive(Debug)]
pub struct Diagnostic {
    /// Position of the fragment in extraction order
    pub index: usize,
    pub metadata_id: Option<Value>,
    pub error: Error,
}

/// Deserialize one fragment and fill its identifier slot
pub fn materialize<T: Document>(fragment: &Fragment<'_>) -> Result<T> {
    let mut object = T::deserialize(fragment.source).map_err(Error::Deserialization)?;
    if let Some(id) = fragment.metadata_id {
        inject_metadata_id(&mut object, id)?;
    }
    Ok(object)
}

/// Fill the identifier slot of `object` if it has one and it is still unset.
///
/// Values produced by ordinary deserialization are never overwritten.
pub fn inject_metadata_id<T: Document>(object: &mut T, id: &Value) -> Result<()> {
    match object.metadata_id_slot() {
        Some(slot) if slot.is_unset() => slot.assign(id),
        _ => Ok(()),
    }
}

/// Materialize every fragment, isolating failures per fragment.
///
/// Output order follows fragment order; failed fragments are left out and
/// recorded as diagnostics.
pub fn materialize_all<T: Document>(fragments: &[Fragment<'_>]) -> Materialized<T> {
    let mut materialized = Materialized {
        objects: Vec::with_capacity(fragments.len()),
        diagnostics: Vec::new(),
    };

    for (index, fragment) in fragments.iter().enumerate() {
        match materialize::<T>(fragment) {
            Ok(object) => materialized.objects.push(object),
            Err(error) => {
                tracing::warn!(
                    index,
                    target_type = std::any::type_name::<T>(),
                    error = %error,
                    "failed to materialize fragment"
                );
                materialized.diagnostics.push(Diagnostic {
                    index,
                    metadata_id: fragment.metadata_id.cloned(),
                    error,
                });
            }
        }
    }

    materialized
}
