//! The FHIR element and extension model
//!
//! Every FHIR structure is an element: it may carry an element id and any
//! number of URL-keyed extensions. Backbone elements add the modifier
//! extension channel, which consumers must not silently ignore.

use crate::choice::ChoiceGroup;
use crate::datatypes::Period;
use crate::decode;
use crate::error::Result;
use crate::primitives::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Base element: optional element id plus attached extensions.
///
/// Flattened into every datatype and backbone element rather than inherited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extension: Vec<Extension>,
}

impl Element {
    pub fn has_extensions(&self) -> bool {
        !self.extension.is_empty()
    }
}

/// A (url, value) extension pair.
///
/// The value slot is a choice type: exactly one branch may be populated, or
/// none at all (a valueless extension is legal).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    /// Identifies the meaning of the extension
    pub url: Uri,

    #[serde(flatten)]
    pub value: Option<ExtensionValue>,
}

/// Extension `value[x]` choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExtensionValue {
    #[serde(rename = "valueString")]
    String(FhirString),
    #[serde(rename = "valueBoolean")]
    Boolean(Boolean),
    #[serde(rename = "valueInteger")]
    Integer(Integer),
    #[serde(rename = "valueDecimal")]
    Decimal(FhirDecimal),
    #[serde(rename = "valueDateTime")]
    DateTime(FhirDateTime),
    #[serde(rename = "valuePeriod")]
    Period(Period),
}

impl ExtensionValue {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "Extension.value[x]",
        keys: &[
            "valueString",
            "valueBoolean",
            "valueInteger",
            "valueDecimal",
            "valueDateTime",
            "valuePeriod",
        ],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let value = match key {
            "valueString" => Self::String(decode::branch(raw)?),
            "valueBoolean" => Self::Boolean(decode::branch(raw)?),
            "valueInteger" => Self::Integer(decode::branch(raw)?),
            "valueDecimal" => Self::Decimal(decode::branch(raw)?),
            "valueDateTime" => Self::DateTime(decode::branch(raw)?),
            "valuePeriod" => Self::Period(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(value))
    }
}

impl Extension {
    /// A valueless extension
    pub fn new(url: impl Into<Uri>) -> Self {
        Self {
            id: None,
            url: url.into(),
            value: None,
        }
    }

    pub fn with_value(url: impl Into<Uri>, value: ExtensionValue) -> Self {
        Self {
            id: None,
            url: url.into(),
            value: Some(value),
        }
    }

    /// Decode from untrusted JSON, enforcing value[x] exclusivity.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "Extension")?;
        Ok(Self {
            id: decode::field(map, "id")?,
            url: decode::require(map, "url", "Extension.url")?,
            value: ExtensionValue::from_map(map)?,
        })
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Extension::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Element defined inline within a resource, carrying the modifier
/// extension channel in addition to ordinary extensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackboneElement {
    #[serde(flatten)]
    pub element: Element,

    /// Extensions that cannot be ignored even if unrecognized
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub modifier_extension: Vec<Extension>,
}

impl BackboneElement {
    pub fn has_modifier_extensions(&self) -> bool {
        !self.modifier_extension.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn decode_extension_with_single_value() {
        let ext = Extension::from_value(&json!({
            "url": "http://example.org/fhir/StructureDefinition/preferred-contact",
            "valueString": "after hours"
        }))
        .unwrap();
        assert_eq!(ext.url, "http://example.org/fhir/StructureDefinition/preferred-contact");
        assert_eq!(ext.value, Some(ExtensionValue::String("after hours".into())));
    }

    #[test]
    fn decode_valueless_extension() {
        let ext = Extension::from_value(&json!({"url": "http://example.org/ext"})).unwrap();
        assert!(ext.value.is_none());
    }

    #[test]
    fn decode_rejects_two_values() {
        let err = Extension::from_value(&json!({
            "url": "http://example.org/ext",
            "valueString": "yes",
            "valueBoolean": true
        }))
        .unwrap_err();
        assert!(matches!(err, Error::ChoiceExclusivity { group: "Extension.value[x]", .. }));
    }

    #[test]
    fn serialize_emits_type_qualified_key() {
        let ext = Extension::with_value("http://example.org/ext", ExtensionValue::Boolean(true));
        let json = serde_json::to_value(&ext).unwrap();
        assert_eq!(json, json!({"url": "http://example.org/ext", "valueBoolean": true}));
    }

    #[test]
    fn backbone_element_wire_key_is_modifier_extension() {
        let backbone = BackboneElement {
            element: Element {
                id: Some("b1".into()),
                extension: vec![],
            },
            modifier_extension: vec![Extension::with_value(
                "http://example.org/do-not-process",
                ExtensionValue::Boolean(true),
            )],
        };
        let json = serde_json::to_value(&backbone).unwrap();
        assert_eq!(json["id"], "b1");
        assert_eq!(json["modifierExtension"][0]["valueBoolean"], true);
        assert!(json.get("extension").is_none());
    }
}
