//! FHIR Patient
//!
//! Demographics and administrative information about an individual
//! receiving care. Carries two choice groups (`deceased[x]`,
//! `multipleBirth[x]`) and the link element referencing exactly one other
//! Patient or RelatedPerson.

use crate::choice::ChoiceGroup;
use crate::datatypes::*;
use crate::decode;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `deceased[x]` choice, shared by Patient and Practitioner (both use the
/// same wire keys)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Deceased {
    #[serde(rename = "deceasedBoolean")]
    Boolean(Boolean),
    #[serde(rename = "deceasedDateTime")]
    DateTime(FhirDateTime),
}

impl Deceased {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "deceased[x]",
        keys: &["deceasedBoolean", "deceasedDateTime"],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let deceased = match key {
            "deceasedBoolean" => Self::Boolean(decode::branch(raw)?),
            "deceasedDateTime" => Self::DateTime(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(deceased))
    }
}

/// Patient `multipleBirth[x]` choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MultipleBirth {
    #[serde(rename = "multipleBirthBoolean")]
    Boolean(Boolean),
    #[serde(rename = "multipleBirthInteger")]
    Integer(Integer),
}

impl MultipleBirth {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "Patient.multipleBirth[x]",
        keys: &["multipleBirthBoolean", "multipleBirthInteger"],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let multiple_birth = match key {
            "multipleBirthBoolean" => Self::Boolean(decode::branch(raw)?),
            "multipleBirthInteger" => Self::Integer(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(multiple_birth))
    }
}

/// Demographics and administrative information about a person receiving care
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Resource type - always "Patient"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// An identifier for this patient (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Whether this patient record is in active use (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Boolean>,

    /// A name associated with the patient (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub name: Vec<HumanName>,

    /// A contact detail for the individual (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub telecom: Vec<ContactPoint>,

    /// Administrative gender (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    /// The date of birth for the individual (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Date>,

    /// Indicates if the individual is deceased (0..1)
    #[serde(flatten)]
    pub deceased: Option<Deceased>,

    /// An address for the individual (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub address: Vec<Address>,

    /// Marital (civil) status of the patient (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<CodeableConcept>,

    /// Whether the patient is part of a multiple birth (0..1)
    #[serde(flatten)]
    pub multiple_birth: Option<MultipleBirth>,

    /// A contact party for the patient (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contact: Vec<PatientContact>,

    /// A language which may be used to communicate about health (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub communication: Vec<PatientCommunication>,

    /// Patient's nominated primary care providers (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub general_practitioner: Vec<Reference>,

    /// Organization that is the custodian of the patient record (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managing_organization: Option<Reference>,

    /// Links to other resources concerning the same actual person (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub link: Vec<PatientLink>,
}

fn default_resource_type() -> String {
    "Patient".to_string()
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            active: None,
            name: Vec::new(),
            telecom: Vec::new(),
            gender: None,
            birth_date: None,
            deceased: None,
            address: Vec::new(),
            marital_status: None,
            multiple_birth: None,
            contact: Vec::new(),
            communication: Vec::new(),
            general_practitioner: Vec::new(),
            link: Vec::new(),
            managing_organization: None,
        }
    }
}

impl Patient {
    pub fn with_id(id: impl Into<Id>) -> Self {
        Self {
            domain: DomainResource::with_id(id),
            ..Default::default()
        }
    }

    /// Decode from untrusted JSON, enforcing deceased[x] and
    /// multipleBirth[x] exclusivity.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "Patient")?;
        Ok(Self {
            resource_type: default_resource_type(),
            domain: DomainResource::decode(value)?,
            identifier: decode::field_vec(map, "identifier")?,
            active: decode::field(map, "active")?,
            name: decode::field_vec(map, "name")?,
            telecom: decode::field_vec(map, "telecom")?,
            gender: decode::field(map, "gender")?,
            birth_date: decode::field(map, "birthDate")?,
            deceased: Deceased::from_map(map)?,
            address: decode::field_vec(map, "address")?,
            marital_status: decode::field(map, "maritalStatus")?,
            multiple_birth: MultipleBirth::from_map(map)?,
            contact: decode::field_vec(map, "contact")?,
            communication: decode::field_vec(map, "communication")?,
            general_practitioner: decode::field_vec(map, "generalPractitioner")?,
            managing_organization: decode::field(map, "managingOrganization")?,
            link: decode::field_vec(map, "link")?,
        })
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<'de> Deserialize<'de> for Patient {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Patient::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A contact party (e.g. guardian, partner, friend) for the patient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContact {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// The kind of relationship (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relationship: Vec<CodeableConcept>,

    /// A name associated with the contact person (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<HumanName>,

    /// A contact detail for the person (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub telecom: Vec<ContactPoint>,

    /// Address for the contact person (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Administrative gender (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    /// Organization that is associated with the contact (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Reference>,

    /// Period this contact was or is in use (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// A language which may be used to communicate with the patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCommunication {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// The language (1..1)
    pub language: CodeableConcept,

    /// Language preference indicator (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred: Option<Boolean>,
}

/// Type of link between this patient record and another record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientLinkType {
    ReplacedBy,
    Replaces,
    Refer,
    Seealso,
}

/// Link to another Patient or RelatedPerson concerning the same person.
///
/// Exactly one of the two target slots must be populated; both serialize
/// under the single wire key `other`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientLink {
    pub backbone: BackboneElement,

    /// The other Patient record, when the link targets a Patient (0..1)
    pub other_patient: Option<Reference>,

    /// The RelatedPerson record, when the link targets one (0..1)
    pub other_related_person: Option<Reference>,

    /// replaced-by | replaces | refer | seealso (1..1)
    pub type_: Option<PatientLinkType>,
}

impl PatientLink {
    pub fn to_patient(other: Reference, type_: PatientLinkType) -> Self {
        Self {
            other_patient: Some(other),
            type_: Some(type_),
            ..Default::default()
        }
    }

    pub fn to_related_person(other: Reference, type_: PatientLinkType) -> Self {
        Self {
            other_related_person: Some(other),
            type_: Some(type_),
            ..Default::default()
        }
    }

    /// Whichever target slot is populated
    pub fn other(&self) -> Option<&Reference> {
        self.other_patient.as_ref().or(self.other_related_person.as_ref())
    }
}

impl Serialize for PatientLink {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.backbone.element.id {
            map.serialize_entry("id", id)?;
        }
        if !self.backbone.element.extension.is_empty() {
            map.serialize_entry("extension", &self.backbone.element.extension)?;
        }
        if !self.backbone.modifier_extension.is_empty() {
            map.serialize_entry("modifierExtension", &self.backbone.modifier_extension)?;
        }
        if let Some(other) = self.other() {
            map.serialize_entry("other", other)?;
        }
        if let Some(type_) = &self.type_ {
            map.serialize_entry("type", type_)?;
        }
        map.end()
    }
}

impl PatientLink {
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "PatientLink")?;
        let other: Option<Reference> = decode::field(map, "other")?;
        // The wire carries a single `other`; route it to the matching
        // storage slot by its target type.
        let (other_patient, other_related_person) = match other {
            Some(r) if r.target_type() == Some("RelatedPerson") => (None, Some(r)),
            Some(r) => (Some(r), None),
            None => (None, None),
        };
        Ok(Self {
            backbone: serde_json::from_value(value.clone())?,
            other_patient,
            other_related_person,
            type_: decode::field(map, "type")?,
        })
    }
}

impl<'de> Deserialize<'de> for PatientLink {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        PatientLink::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn decode_rejects_both_deceased_branches() {
        let err = Patient::from_value(&json!({
            "resourceType": "Patient",
            "deceasedBoolean": true,
            "deceasedDateTime": "2024-11-02T10:00:00Z"
        }))
        .unwrap_err();
        assert!(matches!(err, Error::ChoiceExclusivity { group: "deceased[x]", .. }));
    }

    #[test]
    fn decode_rejects_both_multiple_birth_branches() {
        let err = Patient::from_value(&json!({
            "resourceType": "Patient",
            "multipleBirthBoolean": true,
            "multipleBirthInteger": 2
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ChoiceExclusivity { group: "Patient.multipleBirth[x]", .. }
        ));
    }

    #[test]
    fn deceased_serializes_type_qualified() {
        let mut patient = Patient::with_id("pt-1");
        patient.deceased = Some(Deceased::Boolean(false));
        let json = patient.to_value().unwrap();
        assert_eq!(json["deceasedBoolean"], false);
        assert!(json.get("deceasedDateTime").is_none());
    }

    #[test]
    fn patient_link_other_routes_by_target_type() {
        let link = PatientLink::from_value(&json!({
            "other": {"reference": "RelatedPerson/rp-1"},
            "type": "seealso"
        }))
        .unwrap();
        assert!(link.other_patient.is_none());
        assert!(link.other_related_person.is_some());

        let link = PatientLink::from_value(&json!({
            "other": {"reference": "Patient/pt-2"},
            "type": "replaced-by"
        }))
        .unwrap();
        assert!(link.other_patient.is_some());
        assert_eq!(link.type_, Some(PatientLinkType::ReplacedBy));
    }

    #[test]
    fn patient_link_serializes_single_other_key() {
        let link = PatientLink::to_patient(Reference::to("Patient", "pt-2"), PatientLinkType::Refer);
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json, json!({"other": {"reference": "Patient/pt-2"}, "type": "refer"}));
    }

    #[test]
    fn decode_full_demographics() {
        let patient = Patient::from_value(&json!({
            "resourceType": "Patient",
            "id": "pt-1",
            "active": true,
            "name": [{"use": "official", "family": "Osei", "given": ["Ama"]}],
            "gender": "female",
            "birthDate": "1988-04-12",
            "multipleBirthInteger": 2,
            "communication": [{"language": {"text": "English"}, "preferred": true}]
        }))
        .unwrap();
        assert_eq!(patient.gender, Some(AdministrativeGender::Female));
        assert_eq!(patient.multiple_birth, Some(MultipleBirth::Integer(2)));
        assert_eq!(patient.communication[0].preferred, Some(true));
    }
}
