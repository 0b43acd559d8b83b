//! FHIR Observation
//!
//! Measurements and simple assertions made about a patient, device or other
//! subject. Carries two independent choice groups (`effective[x]` and
//! `value[x]`); components nest their own `value[x]` storage, distinct from
//! the parent's.

use crate::choice::ChoiceGroup;
use crate::datatypes::*;
use crate::decode;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status of the observation result value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Cancelled,
    EnteredInError,
    Unknown,
}

/// Observation `effective[x]` choice: clinically relevant time or period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObservationEffective {
    #[serde(rename = "effectiveDateTime")]
    DateTime(FhirDateTime),
    #[serde(rename = "effectiveInstant")]
    Instant(Instant),
    #[serde(rename = "effectivePeriod")]
    Period(Period),
}

impl ObservationEffective {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "Observation.effective[x]",
        keys: &["effectiveDateTime", "effectiveInstant", "effectivePeriod"],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let effective = match key {
            "effectiveDateTime" => Self::DateTime(decode::branch(raw)?),
            "effectiveInstant" => Self::Instant(decode::branch(raw)?),
            "effectivePeriod" => Self::Period(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(effective))
    }
}

/// Observation `value[x]` choice: the actual result.
///
/// The same nine branches apply to components, but each site owns its own
/// storage; a component's value never aliases the parent observation's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObservationValue {
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueString")]
    String(FhirString),
    #[serde(rename = "valueBoolean")]
    Boolean(Boolean),
    #[serde(rename = "valueInteger")]
    Integer(Integer),
    #[serde(rename = "valueRange")]
    Range(Range),
    #[serde(rename = "valuePeriod")]
    Period(Period),
    #[serde(rename = "valueDateTime")]
    DateTime(FhirDateTime),
    #[serde(rename = "valueTime")]
    Time(Time),
}

impl ObservationValue {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "Observation.value[x]",
        keys: &[
            "valueQuantity",
            "valueCodeableConcept",
            "valueString",
            "valueBoolean",
            "valueInteger",
            "valueRange",
            "valuePeriod",
            "valueDateTime",
            "valueTime",
        ],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let value = match key {
            "valueQuantity" => Self::Quantity(decode::branch(raw)?),
            "valueCodeableConcept" => Self::CodeableConcept(decode::branch(raw)?),
            "valueString" => Self::String(decode::branch(raw)?),
            "valueBoolean" => Self::Boolean(decode::branch(raw)?),
            "valueInteger" => Self::Integer(decode::branch(raw)?),
            "valueRange" => Self::Range(decode::branch(raw)?),
            "valuePeriod" => Self::Period(decode::branch(raw)?),
            "valueDateTime" => Self::DateTime(decode::branch(raw)?),
            "valueTime" => Self::Time(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(value))
    }
}

/// Measurements and simple assertions about a subject
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Resource type - always "Observation"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// Business identifier for this observation (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// The status of the result value (1..1)
    pub status: ObservationStatus,

    /// Classification of the type of observation (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub category: Vec<CodeableConcept>,

    /// Type of observation (1..1)
    pub code: CodeableConcept,

    /// Who and/or what the observation is about (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// What the observation is about, when not the subject of record (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub focus: Vec<Reference>,

    /// Healthcare event during which this observation was made (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    /// Clinically relevant time/time-period (0..1)
    #[serde(flatten)]
    pub effective: Option<ObservationEffective>,

    /// Date/time this version was made available (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<Instant>,

    /// Who is responsible for the observation (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub performer: Vec<Reference>,

    /// Actual result (0..1)
    #[serde(flatten)]
    pub value: Option<ObservationValue>,

    /// Why the result is missing; only legal when no value is present (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    /// High, low, normal, etc. (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub interpretation: Vec<CodeableConcept>,

    /// Comments about the observation (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub note: Vec<Annotation>,

    /// Observed body part (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,

    /// How the observation was performed (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    /// Specimen used for this observation (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Reference>,

    /// Device that generated the measurement (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Reference>,

    /// Guide for interpretation (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reference_range: Vec<ObservationReferenceRange>,

    /// Related observations belonging to this group (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub has_member: Vec<Reference>,

    /// Measurements this observation is derived from (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub derived_from: Vec<Reference>,

    /// Fulfills plan, proposal or order (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub based_on: Vec<Reference>,

    /// Part of referenced event (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub part_of: Vec<Reference>,

    /// Triggering observations (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub triggered_by: Vec<ObservationTriggeredBy>,

    /// Component results (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub component: Vec<ObservationComponent>,
}

fn default_resource_type() -> String {
    "Observation".to_string()
}

impl Observation {
    pub fn new(status: ObservationStatus, code: CodeableConcept) -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            status,
            category: Vec::new(),
            code,
            subject: None,
            focus: Vec::new(),
            encounter: None,
            effective: None,
            issued: None,
            performer: Vec::new(),
            value: None,
            data_absent_reason: None,
            interpretation: Vec::new(),
            note: Vec::new(),
            body_site: None,
            method: None,
            specimen: None,
            device: None,
            reference_range: Vec::new(),
            has_member: Vec::new(),
            derived_from: Vec::new(),
            based_on: Vec::new(),
            part_of: Vec::new(),
            triggered_by: Vec::new(),
            component: Vec::new(),
        }
    }

    /// Decode from untrusted JSON, enforcing choice-group exclusivity for
    /// both `effective[x]` and `value[x]`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "Observation")?;
        Ok(Self {
            resource_type: default_resource_type(),
            domain: DomainResource::decode(value)?,
            identifier: decode::field_vec(map, "identifier")?,
            status: decode::require(map, "status", "Observation.status")?,
            category: decode::field_vec(map, "category")?,
            code: decode::require(map, "code", "Observation.code")?,
            subject: decode::field(map, "subject")?,
            focus: decode::field_vec(map, "focus")?,
            encounter: decode::field(map, "encounter")?,
            effective: ObservationEffective::from_map(map)?,
            issued: decode::field(map, "issued")?,
            performer: decode::field_vec(map, "performer")?,
            value: ObservationValue::from_map(map)?,
            data_absent_reason: decode::field(map, "dataAbsentReason")?,
            interpretation: decode::field_vec(map, "interpretation")?,
            note: decode::field_vec(map, "note")?,
            body_site: decode::field(map, "bodySite")?,
            method: decode::field(map, "method")?,
            specimen: decode::field(map, "specimen")?,
            device: decode::field(map, "device")?,
            reference_range: decode::field_vec(map, "referenceRange")?,
            has_member: decode::field_vec(map, "hasMember")?,
            derived_from: decode::field_vec(map, "derivedFrom")?,
            based_on: decode::field_vec(map, "basedOn")?,
            part_of: decode::field_vec(map, "partOf")?,
            triggered_by: decode::field_vec(map, "triggeredBy")?,
            component: decode::list(map, "component", ObservationComponent::from_value)?,
        })
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<'de> Deserialize<'de> for Observation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Observation::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Component results for multi-component observations.
///
/// The `value[x]` group here is independent of the parent observation's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationComponent {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// Type of component observation (1..1)
    pub code: CodeableConcept,

    /// Actual component result (0..1)
    #[serde(flatten)]
    pub value: Option<ObservationValue>,

    /// Why the component result is missing (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    /// High, low, normal, etc. (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub interpretation: Vec<CodeableConcept>,

    /// Guide for interpretation of the component result (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reference_range: Vec<ObservationReferenceRange>,
}

impl ObservationComponent {
    pub fn new(code: CodeableConcept) -> Self {
        Self {
            backbone: BackboneElement::default(),
            code,
            value: None,
            data_absent_reason: None,
            interpretation: Vec::new(),
            reference_range: Vec::new(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "ObservationComponent")?;
        Ok(Self {
            backbone: serde_json::from_value(value.clone())?,
            code: decode::require(map, "code", "Observation.component.code")?,
            value: ObservationValue::from_map(map)?,
            data_absent_reason: decode::field(map, "dataAbsentReason")?,
            interpretation: decode::field_vec(map, "interpretation")?,
            reference_range: decode::field_vec(map, "referenceRange")?,
        })
    }
}

impl<'de> Deserialize<'de> for ObservationComponent {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ObservationComponent::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Guide for interpretation of a result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationReferenceRange {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// Low range, if relevant (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    /// High range, if relevant (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,

    /// Reference range population normal value (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_value: Option<CodeableConcept>,

    /// Reference range qualifier (0..1)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Reference range population (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub applies_to: Vec<CodeableConcept>,

    /// Applicable age range, if relevant (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Range>,

    /// Text based reference range (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Markdown>,
}

/// What triggered this observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggeredByType {
    Reflex,
    Repeat,
    ReRun,
}

/// Identifies an observation that triggered this one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationTriggeredBy {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// The triggering observation (1..1)
    pub observation: Reference,

    /// reflex | repeat | re-run (1..1)
    #[serde(rename = "type")]
    pub type_: TriggeredByType,

    /// Reason the observation was triggered (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FhirString>,
}
