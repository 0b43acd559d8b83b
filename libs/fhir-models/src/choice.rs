//! Decode-time guard for FHIR `value[x]` choice groups
//!
//! In-memory choice groups are sum types, so a validated graph cannot hold
//! two branches at once. Untrusted JSON can: nothing stops a payload from
//! carrying both `valueString` and `valueBoolean`. Every choice site decodes
//! through [`ChoiceGroup::pick`], which enforces the at-most-one rule with a
//! single shared policy.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// One logical choice-type group: a stable name for error reporting and the
/// ordered list of type-qualified wire keys it may appear under.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceGroup {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

impl ChoiceGroup {
    /// Scan `map` for this group's keys.
    ///
    /// Returns the single populated `(key, value)` pair, `None` when no key
    /// is present (an empty choice is always legal at this layer), or
    /// [`Error::ChoiceExclusivity`] when more than one key is populated.
    /// JSON `null` counts as absent.
    pub fn pick<'a>(&self, map: &'a Map<String, Value>) -> Result<Option<(&'static str, &'a Value)>> {
        let mut found = None;
        let mut seen = Vec::new();

        for key in self.keys {
            match map.get(*key) {
                None | Some(Value::Null) => continue,
                Some(value) => {
                    seen.push(*key);
                    if found.is_none() {
                        found = Some((*key, value));
                    }
                }
            }
        }

        if seen.len() > 1 {
            return Err(Error::ChoiceExclusivity {
                group: self.name,
                found: seen,
            });
        }
        Ok(found)
    }

    /// Strip this group's keys out of `map`, leaving the non-choice fields.
    pub fn strip(&self, map: &mut Map<String, Value>) {
        for key in self.keys {
            map.remove(*key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GROUP: ChoiceGroup = ChoiceGroup {
        name: "Extension.value[x]",
        keys: &["valueString", "valueBoolean", "valueInteger"],
    };

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn empty_group_is_valid() {
        let obj = map(json!({"url": "http://example.org/ext"}));
        assert!(GROUP.pick(&obj).unwrap().is_none());
    }

    #[test]
    fn single_value_is_returned() {
        let obj = map(json!({"valueBoolean": true}));
        let (key, value) = GROUP.pick(&obj).unwrap().unwrap();
        assert_eq!(key, "valueBoolean");
        assert_eq!(value, &json!(true));
    }

    #[test]
    fn null_counts_as_absent() {
        let obj = map(json!({"valueString": null, "valueInteger": 3}));
        let (key, _) = GROUP.pick(&obj).unwrap().unwrap();
        assert_eq!(key, "valueInteger");
    }

    #[test]
    fn two_values_are_rejected() {
        let obj = map(json!({"valueString": "a", "valueBoolean": false}));
        let err = GROUP.pick(&obj).unwrap_err();
        assert!(matches!(
            err,
            Error::ChoiceExclusivity { group: "Extension.value[x]", ref found }
                if found == &["valueString", "valueBoolean"]
        ));
    }
}
