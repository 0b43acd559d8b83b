//! Reusable FHIR complex datatypes
//!
//! Serde does the wire work: camelCase keys, absent optionals and empty
//! repetitions omitted. Every datatype carries the base [`Element`]
//! (element id + extensions) by flattening.

use crate::choice::ChoiceGroup;
use crate::decode;
use crate::element::Element;
use crate::error::Result;
use crate::primitives::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A reference from one resource to another, always serialized as a literal
/// `Type/id` reference object, never dereferenced inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(flatten)]
    pub element: Element,

    /// Literal reference, relative or absolute url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<FhirString>,

    /// Text alternative for the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<FhirString>,
}

impl Reference {
    /// Relative reference to a local resource, e.g. `Patient/123`.
    pub fn to(resource_type: &str, logical_id: &str) -> Self {
        Self {
            reference: Some(format!("{resource_type}/{logical_id}")),
            ..Default::default()
        }
    }

    pub fn literal(reference: impl Into<FhirString>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }

    /// Target resource type of a relative literal reference, if parseable.
    pub fn target_type(&self) -> Option<&str> {
        self.reference.as_deref()?.split('/').next()
    }
}

/// A coded value defined by a terminology system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<Boolean>,
}

impl Coding {
    pub fn new(system: impl Into<Uri>, code: impl Into<Code>) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            ..Default::default()
        }
    }
}

/// Concept, possibly coded in one or more terminologies, possibly just text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn text(text: impl Into<FhirString>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn coded(system: impl Into<Uri>, code: impl Into<Code>) -> Self {
        Self {
            coding: vec![Coding::new(system, code)],
            ..Default::default()
        }
    }
}

/// How an identifier is intended to be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

/// Business identifier for an entity, unique within a naming system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(flatten)]
    pub element: Element,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<IdentifierUse>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl Identifier {
    pub fn new(system: impl Into<Uri>, value: impl Into<FhirString>) -> Self {
        Self {
            system: Some(system.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointSystem {
    Phone,
    Fax,
    Email,
    Pager,
    Url,
    Sms,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointUse {
    Home,
    Work,
    Temp,
    Old,
    Mobile,
}

/// Details for a technology-mediated contact point (phone, email, etc.)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(flatten)]
    pub element: Element,

    /// Required when `value` is populated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<ContactPointSystem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FhirString>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<ContactPointUse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl ContactPoint {
    pub fn new(system: ContactPointSystem, value: impl Into<FhirString>) -> Self {
        Self {
            system: Some(system),
            value: Some(value.into()),
            ..Default::default()
        }
    }
}

/// Name and contact channels of an individual to contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FhirString>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub telecom: Vec<ContactPoint>,
}

/// Contact information usable across several purposes (R5)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedContactDetail {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub telecom: Vec<ContactPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// Time range defined by start and end instants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<FhirDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<FhirDateTime>,
}

impl Period {
    pub fn new(start: FhirDateTime, end: FhirDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    pub fn from(start: FhirDateTime) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }
}

/// How a measured quantity relates to its stated value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityComparator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "ad")]
    SufficientToAchieve,
}

/// A measured or measurable amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FhirDecimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<QuantityComparator>,

    /// Unit representation for humans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    /// Coded form of the unit, e.g. a UCUM code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

impl Quantity {
    pub fn ucum(value: FhirDecimal, code: impl Into<Code>) -> Self {
        Self {
            value: Some(value),
            system: Some("http://unitsofmeasure.org".to_string()),
            code: Some(code.into()),
            ..Default::default()
        }
    }
}

/// A length of time; structurally a [`Quantity`]
pub type Duration = Quantity;

/// Set of values bounded by low and high quantities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameUse {
    Usual,
    Official,
    Temp,
    Nickname,
    Anonymous,
    Old,
    Maiden,
}

/// Name of a human, with parts and usage information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanName {
    #[serde(flatten)]
    pub element: Element,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<NameUse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<FhirString>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub given: Vec<FhirString>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub prefix: Vec<FhirString>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suffix: Vec<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl HumanName {
    pub fn official(family: impl Into<FhirString>, given: impl Into<FhirString>) -> Self {
        Self {
            use_: Some(NameUse::Official),
            family: Some(family.into()),
            given: vec![given.into()],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUse {
    Home,
    Work,
    Temp,
    Old,
    Billing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Postal,
    Physical,
    Both,
}

/// Postal address, both physical and mailing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(flatten)]
    pub element: Element,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<AddressUse>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<AddressType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<FhirString>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub line: Vec<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<FhirString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStatus {
    Generated,
    Extensions,
    Additional,
    Empty,
}

/// Human-readable summary of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    #[serde(flatten)]
    pub element: Element,

    pub status: NarrativeStatus,

    /// Limited xhtml content
    pub div: FhirString,
}

impl Narrative {
    pub fn generated(div: impl Into<FhirString>) -> Self {
        Self {
            element: Element::default(),
            status: NarrativeStatus::Generated,
            div: div.into(),
        }
    }
}

/// Text note with attribution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(flatten)]
    pub element: Element,

    #[serde(flatten)]
    pub author: Option<AnnotationAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<FhirDateTime>,

    pub text: Markdown,
}

/// Annotation `author[x]` choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnnotationAuthor {
    #[serde(rename = "authorReference")]
    Reference(Reference),
    #[serde(rename = "authorString")]
    String(FhirString),
}

impl AnnotationAuthor {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "Annotation.author[x]",
        keys: &["authorReference", "authorString"],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let author = match key {
            "authorReference" => Self::Reference(decode::branch(raw)?),
            "authorString" => Self::String(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(author))
    }
}

impl Annotation {
    pub fn text(text: impl Into<Markdown>) -> Self {
        Self {
            element: Element::default(),
            author: None,
            time: None,
            text: text.into(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "Annotation")?;
        Ok(Self {
            element: Element {
                id: decode::field(map, "id")?,
                extension: decode::field_vec(map, "extension")?,
            },
            author: AnnotationAuthor::from_map(map)?,
            time: decode::field(map, "time")?,
            text: decode::require(map, "text", "Annotation.text")?,
        })
    }
}

impl<'de> Deserialize<'de> for Annotation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Annotation::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Context in which definitional content applies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageContext {
    #[serde(flatten)]
    pub element: Element,

    pub code: Coding,

    #[serde(flatten)]
    pub value: UsageContextValue,
}

/// UsageContext `value[x]` choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UsageContextValue {
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueRange")]
    Range(Range),
    #[serde(rename = "valueReference")]
    Reference(Reference),
}

impl UsageContextValue {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "UsageContext.value[x]",
        keys: &["valueCodeableConcept", "valueQuantity", "valueRange", "valueReference"],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let value = match key {
            "valueCodeableConcept" => Self::CodeableConcept(decode::branch(raw)?),
            "valueQuantity" => Self::Quantity(decode::branch(raw)?),
            "valueRange" => Self::Range(decode::branch(raw)?),
            "valueReference" => Self::Reference(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(value))
    }
}

impl UsageContext {
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "UsageContext")?;
        Ok(Self {
            element: Element {
                id: decode::field(map, "id")?,
                extension: decode::field_vec(map, "extension")?,
            },
            code: decode::require(map, "code", "UsageContext.code")?,
            value: UsageContextValue::from_map(map)?
                .ok_or(crate::error::Error::MissingField("UsageContext.value[x]"))?,
        })
    }
}

impl<'de> Deserialize<'de> for UsageContext {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        UsageContext::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Metadata about a resource: version, audit and security labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(flatten)]
    pub element: Element,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Instant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Uri>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub profile: Vec<Canonical>,

    /// Security labels applied to this resource
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security: Vec<Coding>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tag: Vec<Coding>,
}

impl Meta {
    pub fn has_version_info(&self) -> bool {
        self.version_id.is_some() || self.last_updated.is_some()
    }
}

/// Sex assigned for administrative purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_serializes_as_single_field_object() {
        let subject = Reference::to("Patient", "p-1");
        let json = serde_json::to_value(&subject).unwrap();
        assert_eq!(json, json!({"reference": "Patient/p-1"}));
    }

    #[test]
    fn reference_target_type() {
        assert_eq!(Reference::to("Encounter", "e-9").target_type(), Some("Encounter"));
        assert_eq!(Reference::default().target_type(), None);
    }

    #[test]
    fn codeable_concept_round_trip() {
        let cc = CodeableConcept {
            coding: vec![Coding::new("http://loinc.org", "55284-4")],
            text: Some("Blood pressure".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&cc).unwrap();
        assert_eq!(json["coding"][0]["system"], "http://loinc.org");
        assert_eq!(json["text"], "Blood pressure");

        let back: CodeableConcept = serde_json::from_value(json).unwrap();
        assert_eq!(back, cc);
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let ident = Identifier::new("http://example.com/ids", "12345");
        let json = serde_json::to_value(&ident).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("system"));
        assert!(obj.contains_key("value"));
    }

    #[test]
    fn quantity_value_is_a_json_number() {
        let qty = Quantity::ucum("85.5".parse().unwrap(), "kg");
        let json = serde_json::to_value(&qty).unwrap();
        assert!(json["value"].is_number());
        assert_eq!(json["code"], "kg");
    }

    #[test]
    fn usage_context_requires_exactly_one_value() {
        let err = UsageContext::from_value(&json!({
            "code": {"system": "http://terminology.hl7.org/CodeSystem/usage-context-type", "code": "focus"},
            "valueCodeableConcept": {"text": "adults"},
            "valueRange": {}
        }))
        .unwrap_err();
        assert!(matches!(err, crate::Error::ChoiceExclusivity { .. }));

        let err = UsageContext::from_value(&json!({
            "code": {"code": "focus"}
        }))
        .unwrap_err();
        assert!(matches!(err, crate::Error::MissingField("UsageContext.value[x]")));
    }

    #[test]
    fn annotation_author_choice() {
        let ann = Annotation::from_value(&json!({
            "authorString": "Dr. Adams",
            "text": "Reviewed overnight"
        }))
        .unwrap();
        assert_eq!(ann.author, Some(AnnotationAuthor::String("Dr. Adams".into())));

        let json = serde_json::to_value(&ann).unwrap();
        assert_eq!(json["authorString"], "Dr. Adams");
        assert!(json.get("authorReference").is_none());
    }
}
