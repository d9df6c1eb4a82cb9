//! Lenient decoding helpers for service payloads.
//!
//! Records may carry their identifier as `id`, as `_id`, or as both.
//! Optional lists may arrive as `null`.

use serde::{Deserialize, Deserializer};

/// Identifier keys of a record, flattened into a wire struct.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordId {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
}

impl RecordId {
    /// `id` if present, otherwise `_id`.
    pub fn resolve(self) -> Option<String> {
        self.id.or(self.object_id)
    }

    /// Like [`resolve`](Self::resolve), but a record without any identifier
    /// is an error.
    pub fn require(self) -> Result<String, String> {
        self.resolve()
            .ok_or_else(|| "missing field `id` (or `_id`)".to_string())
    }
}

/// Deserialize `null` as the type's default, e.g. an empty list.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
