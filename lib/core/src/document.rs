use crate::identifier::IdSlot;
use serde::de::DeserializeOwned;

/// A type that fragments can be materialized into
///
/// Types with an identifier attribute return it from [`Document::metadata_id_slot`]
/// so the materializer can back-fill the metadata id. Use the [`document!`]
/// macro for the common cases.
///
/// [`document!`]: crate::document
pub trait Document: DeserializeOwned {
    fn metadata_id_slot(&mut self) -> Option<&mut dyn IdSlot> {
        None
    }
}

impl Document for serde_json::Value {}

impl Document for serde_json::Map<String, serde_json::Value> {}

/// Implement [`Document`] for a type, optionally naming its identifier field
///
/// ```rust
/// use hitmap_core::document;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Tweet {
///     id: Option<String>,
///     user: String,
/// }
///
/// #[derive(Deserialize)]
/// struct Count {
///     count: u64,
/// }
///
/// document!(Tweet, id = id);
/// document!(Count);
/// ```
#[macro_export]
macro_rules! document {
    ($ty:ty) => {
        impl $crate::Document for $ty {}
    };
    ($ty:ty, id = $field:ident) => {
        impl $crate::Document for $ty {
            fn metadata_id_slot(&mut self) -> ::std::option::Option<&mut dyn $crate::IdSlot> {
                ::std::option::Option::Some(&mut self.$field)
            }
        }
    };
}
