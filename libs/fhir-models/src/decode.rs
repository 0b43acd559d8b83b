//! Internal helpers for hand-written `from_value` decoders
//!
//! Resources with choice-type groups cannot use derived `Deserialize` (the
//! exclusivity check has to see the raw key set), so their decoders walk a
//! `serde_json::Map` with these helpers and delegate nested structures back
//! to serde.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Borrow `value` as an object, or fail with the owning type's name.
pub(crate) fn object<'a>(value: &'a Value, owner: &'static str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or(Error::ExpectedObject(owner))
}

/// Decode an optional field. Absent and `null` both mean "not present".
pub(crate) fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &'static str) -> Result<Option<T>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => Ok(Some(serde_json::from_value(raw.clone())?)),
    }
}

/// Decode a repeating field. An absent key yields an empty vec.
pub(crate) fn field_vec<T: DeserializeOwned>(map: &Map<String, Value>, key: &'static str) -> Result<Vec<T>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(raw) => Ok(serde_json::from_value(raw.clone())?),
    }
}

/// Decode a required field.
pub(crate) fn require<T: DeserializeOwned>(map: &Map<String, Value>, key: &'static str, path: &'static str) -> Result<T> {
    match map.get(key) {
        None | Some(Value::Null) => Err(Error::MissingField(path)),
        Some(raw) => Ok(serde_json::from_value(raw.clone())?),
    }
}

/// Decode one picked choice branch into its payload type.
pub(crate) fn branch<T: DeserializeOwned>(raw: &Value) -> Result<T> {
    Ok(serde_json::from_value(raw.clone())?)
}

/// Decode a repeating field through a hand-written item decoder, keeping
/// the item decoder's typed errors.
pub(crate) fn list<T>(
    map: &Map<String, Value>,
    key: &'static str,
    item: impl Fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(raw) => {
            let items: Vec<Value> = serde_json::from_value(raw.clone())?;
            items.iter().map(item).collect()
        }
    }
}

/// Decode an extension repetition through [`crate::Extension::from_value`]
/// so choice-exclusivity failures keep their typed error.
pub(crate) fn extensions(map: &Map<String, Value>, key: &'static str) -> Result<Vec<crate::Extension>> {
    list(map, key, crate::Extension::from_value)
}

/// Decode the `contained` repetition through
/// [`crate::AnyResource::from_value`], preserving typed errors from nested
/// resources.
pub(crate) fn contained(map: &Map<String, Value>) -> Result<Vec<crate::AnyResource>> {
    list(map, "contained", crate::AnyResource::from_value)
}
