//! FHIR RelatedPerson
//!
//! A person with a personal or non-healthcare-specific professional
//! relationship to a patient.

use crate::datatypes::*;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A person related to a patient, but not a care provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPerson {
    /// Resource type - always "RelatedPerson"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// An identifier for this person (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Whether this related person's record is in active use (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Boolean>,

    /// The patient this person is related to (1..1)
    pub patient: Reference,

    /// The relationship of the related person to the patient (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relationship: Vec<CodeableConcept>,

    /// A name associated with the person (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub name: Vec<HumanName>,

    /// A contact detail for the person (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub telecom: Vec<ContactPoint>,

    /// Administrative gender (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    /// The date of birth (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Date>,

    /// Address where the related person can be contacted (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub address: Vec<Address>,

    /// Period of time this relationship is considered valid (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

fn default_resource_type() -> String {
    "RelatedPerson".to_string()
}

impl RelatedPerson {
    pub fn for_patient(patient: Reference) -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            active: None,
            patient,
            relationship: Vec::new(),
            name: Vec::new(),
            telecom: Vec::new(),
            gender: None,
            birth_date: None,
            address: Vec::new(),
            period: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
