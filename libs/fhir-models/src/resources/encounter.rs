//! FHIR Encounter
//!
//! An interaction during which services are provided to the patient.

use crate::datatypes::*;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The lifecycle state of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncounterStatus {
    Planned,
    InProgress,
    OnHold,
    Discharged,
    Completed,
    Cancelled,
    Discontinued,
    EnteredInError,
    Unknown,
}

impl EncounterStatus {
    /// Statuses that imply the encounter has taken place and therefore
    /// must carry an actual period.
    pub fn is_concluded(self) -> bool {
        matches!(self, Self::Completed | Self::Discharged)
    }
}

/// An interaction during which services are provided to the patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    /// Resource type - always "Encounter"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// Identifier(s) by which this encounter is known (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// The current state of the encounter (1..1)
    pub status: EncounterStatus,

    /// Classification of patient encounter context (1..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub class: Vec<CodeableConcept>,

    /// Indicates the urgency of the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CodeableConcept>,

    /// Specific type of encounter (0..*)
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub type_: Vec<CodeableConcept>,

    /// Specific type of service (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub service_type: Vec<CodeableConcept>,

    /// The patient or group present at the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// The current status of the subject in relation to the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_status: Option<CodeableConcept>,

    /// Episode(s) of care this encounter should be recorded against (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub episode_of_care: Vec<Reference>,

    /// The request this encounter satisfies (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub based_on: Vec<Reference>,

    /// Care teams involved in this encounter (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub care_team: Vec<Reference>,

    /// Another Encounter this encounter is part of (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Reference>,

    /// Organization primarily responsible for this Encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<Reference>,

    /// List of participants involved in the encounter (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub participant: Vec<EncounterParticipant>,

    /// The appointment that scheduled this encounter (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub appointment: Vec<Reference>,

    /// The actual start and end time of the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_period: Option<Period>,

    /// The planned start date/time of the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start_date: Option<FhirDateTime>,

    /// The planned end date/time of the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end_date: Option<FhirDateTime>,

    /// Quantity of time the encounter lasted (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Duration>,

    /// The list of reasons relevant to this encounter (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reason: Vec<EncounterReason>,

    /// The list of diagnoses relevant to this encounter (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub diagnosis: Vec<EncounterDiagnosis>,

    /// Accounts that may be used for billing (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub account: Vec<Reference>,

    /// Diet preferences reported by the patient (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub diet_preference: Vec<CodeableConcept>,

    /// Wheelchair, translator, stretcher, etc. (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub special_arrangement: Vec<CodeableConcept>,

    /// Special courtesies such as VIP or board member (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub special_courtesy: Vec<CodeableConcept>,

    /// Details about the admission to a healthcare service (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission: Option<EncounterAdmission>,

    /// Locations the patient has been at during this encounter (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub location: Vec<EncounterLocation>,

    /// Additional comments about the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Markdown>,
}

fn default_resource_type() -> String {
    "Encounter".to_string()
}

impl Encounter {
    pub fn new(status: EncounterStatus, class: CodeableConcept) -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            status,
            class: vec![class],
            priority: None,
            type_: Vec::new(),
            service_type: Vec::new(),
            subject: None,
            subject_status: None,
            episode_of_care: Vec::new(),
            based_on: Vec::new(),
            care_team: Vec::new(),
            part_of: None,
            service_provider: None,
            participant: Vec::new(),
            appointment: Vec::new(),
            actual_period: None,
            planned_start_date: None,
            planned_end_date: None,
            length: None,
            reason: Vec::new(),
            diagnosis: Vec::new(),
            account: Vec::new(),
            diet_preference: Vec::new(),
            special_arrangement: Vec::new(),
            special_courtesy: Vec::new(),
            admission: None,
            location: Vec::new(),
            note: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A participant involved in the encounter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterParticipant {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// Role of participant in the encounter (0..*)
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub type_: Vec<CodeableConcept>,

    /// Period of time during the encounter that the participant
    /// participated (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Person or device which participated in the encounter (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Reference>,
}

/// Why the encounter takes place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterReason {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// What the reason value should be used for (0..*)
    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty", default)]
    pub use_: Vec<CodeableConcept>,

    /// Reason the encounter takes place, coded (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub value: Vec<CodeableConcept>,
}

/// A diagnosis relevant to the encounter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterDiagnosis {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// The diagnosis relevant to the encounter (1..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub condition: Vec<Reference>,

    /// Role that this diagnosis has within the encounter (0..*)
    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty", default)]
    pub use_: Vec<CodeableConcept>,
}

/// Details about the admission to a healthcare service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterAdmission {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// Pre-admission identifier (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_admission_identifier: Option<Identifier>,

    /// The location/organization the patient came from before admission (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Reference>,

    /// From where the patient was admitted (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admit_source: Option<CodeableConcept>,

    /// Indicates that this encounter is directly related to a prior
    /// admission (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_admission: Option<CodeableConcept>,

    /// Location/organization to which the patient is discharged (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Reference>,

    /// Category or kind of location after discharge (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_disposition: Option<CodeableConcept>,
}

/// Status of the participants' presence at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterLocationStatus {
    Planned,
    Active,
    Reserved,
    Completed,
}

/// A location the patient has been at during the encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterLocation {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// Location the encounter takes place (1..1)
    pub location: Reference,

    /// Status of the participants' presence at the location (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EncounterLocationStatus>,

    /// The physical type of the location (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CodeableConcept>,

    /// Time period the patient was present at the location (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl EncounterLocation {
    pub fn at(location: Reference) -> Self {
        Self {
            backbone: BackboneElement::default(),
            location,
            status: None,
            form: None,
            period: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ambulatory() -> CodeableConcept {
        CodeableConcept::coded("http://terminology.hl7.org/CodeSystem/v3-ActCode", "AMB")
    }

    #[test]
    fn status_codes_use_fhir_spelling() {
        assert_eq!(serde_json::to_value(EncounterStatus::InProgress).unwrap(), json!("in-progress"));
        assert_eq!(serde_json::to_value(EncounterStatus::EnteredInError).unwrap(), json!("entered-in-error"));
    }

    #[test]
    fn minimal_encounter_wire_shape() {
        let enc = Encounter::new(EncounterStatus::Planned, ambulatory());
        let json = enc.to_value().unwrap();
        assert_eq!(json["resourceType"], "Encounter");
        assert_eq!(json["status"], "planned");
        assert_eq!(json["class"][0]["coding"][0]["code"], "AMB");
        // absent optionals must be omitted, not null
        assert!(json.get("subject").is_none());
        assert!(json.get("participant").is_none());
    }

    #[test]
    fn decode_encounter_with_backbones() {
        let enc = Encounter::from_value(&json!({
            "resourceType": "Encounter",
            "id": "enc-1",
            "status": "in-progress",
            "class": [{"coding": [{"code": "IMP"}]}],
            "subject": {"reference": "Patient/p-1"},
            "participant": [
                {"actor": {"reference": "Practitioner/dr-1"}, "type": [{"text": "attender"}]}
            ],
            "diagnosis": [
                {"condition": [{"reference": "Condition/c-1"}], "use": [{"text": "working"}]}
            ],
            "location": [
                {"location": {"reference": "Location/ward-a"}, "status": "active"}
            ]
        }))
        .unwrap();

        assert_eq!(enc.domain.logical_id(), Some("enc-1"));
        assert_eq!(enc.status, EncounterStatus::InProgress);
        assert_eq!(enc.participant.len(), 1);
        assert_eq!(enc.diagnosis[0].condition[0].reference.as_deref(), Some("Condition/c-1"));
        assert_eq!(enc.location[0].status, Some(EncounterLocationStatus::Active));
    }

    #[test]
    fn planned_dates_round_trip_rfc3339() {
        let mut enc = Encounter::new(EncounterStatus::Planned, ambulatory());
        enc.planned_start_date = Some("2025-01-05T00:00:00Z".parse().unwrap());
        let json = enc.to_value().unwrap();
        assert_eq!(json["plannedStartDate"], "2025-01-05T00:00:00Z");

        let back = Encounter::from_value(&json).unwrap();
        assert_eq!(back.planned_start_date, enc.planned_start_date);
    }
}
