//! FHIR Practitioner and PractitionerRole
//!
//! A person with formal responsibility in the provisioning of healthcare,
//! and the roles they are authorized to perform for an organization.

use crate::datatypes::*;
use crate::decode;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use crate::resources::patient::Deceased;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A person with formal responsibility in the provisioning of healthcare
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    /// Resource type - always "Practitioner"
    #[serde(default = "default_practitioner_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// An identifier for the person as this agent (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Whether this practitioner's record is in active use (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Boolean>,

    /// The name(s) associated with the practitioner (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub name: Vec<HumanName>,

    /// A contact detail for the practitioner (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub telecom: Vec<ContactPoint>,

    /// Administrative gender (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    /// The date of birth for the practitioner (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Date>,

    /// Indicates if the practitioner is deceased (0..1)
    #[serde(flatten)]
    pub deceased: Option<Deceased>,

    /// Address(es) of the practitioner, typically home (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub address: Vec<Address>,

    /// Certification, licenses or training pertaining to care (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub qualification: Vec<PractitionerQualification>,
}

fn default_practitioner_type() -> String {
    "Practitioner".to_string()
}

impl Default for Practitioner {
    fn default() -> Self {
        Self {
            resource_type: default_practitioner_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            active: None,
            name: Vec::new(),
            telecom: Vec::new(),
            gender: None,
            birth_date: None,
            deceased: None,
            address: Vec::new(),
            qualification: Vec::new(),
        }
    }
}

impl Practitioner {
    pub fn with_id(id: impl Into<Id>) -> Self {
        Self {
            domain: DomainResource::with_id(id),
            ..Default::default()
        }
    }

    /// Decode from untrusted JSON, enforcing deceased[x] exclusivity.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "Practitioner")?;
        Ok(Self {
            resource_type: default_practitioner_type(),
            domain: DomainResource::decode(value)?,
            identifier: decode::field_vec(map, "identifier")?,
            active: decode::field(map, "active")?,
            name: decode::field_vec(map, "name")?,
            telecom: decode::field_vec(map, "telecom")?,
            gender: decode::field(map, "gender")?,
            birth_date: decode::field(map, "birthDate")?,
            deceased: Deceased::from_map(map)?,
            address: decode::field_vec(map, "address")?,
            qualification: decode::field_vec(map, "qualification")?,
        })
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<'de> Deserialize<'de> for Practitioner {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Practitioner::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Certification, license or training of the practitioner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerQualification {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// An identifier for this qualification (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Coded representation of the qualification (1..1)
    pub code: CodeableConcept,

    /// Period during which the qualification is valid (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Organization that regulates and issues the qualification (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Reference>,
}

/// Roles a practitioner is authorized to perform for an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerRole {
    /// Resource type - always "PractitionerRole"
    #[serde(default = "default_role_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// Identifiers for a role/location (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Whether this role record is in active use (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Boolean>,

    /// Period during which the person is authorized to act (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Practitioner able to provide the defined services (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practitioner: Option<Reference>,

    /// Organization where the role is available (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Reference>,

    /// Roles the practitioner may perform (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub code: Vec<CodeableConcept>,

    /// Specific specialty of the practitioner (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub specialty: Vec<CodeableConcept>,

    /// Location(s) where the practitioner provides care (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub location: Vec<Reference>,

    /// Healthcare services provided in this role (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub healthcare_service: Vec<Reference>,

    /// Official contact details for this role (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contact: Vec<ExtendedContactDetail>,

    /// Endpoints for interacting with the practitioner in this role (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub endpoint: Vec<Reference>,
}

fn default_role_type() -> String {
    "PractitionerRole".to_string()
}

impl Default for PractitionerRole {
    fn default() -> Self {
        Self {
            resource_type: default_role_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            active: None,
            period: None,
            practitioner: None,
            organization: None,
            code: Vec::new(),
            specialty: Vec::new(),
            location: Vec::new(),
            healthcare_service: Vec::new(),
            contact: Vec::new(),
            endpoint: Vec::new(),
        }
    }
}

impl PractitionerRole {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
