//! FHIR HealthcareService
//!
//! A service offered at a location by an organization.

use crate::datatypes::*;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The details of a healthcare service available at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcareService {
    /// Resource type - always "HealthcareService"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// External identifiers for this service (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Whether this service record is in active use (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Boolean>,

    /// Organization that provides this service (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_by: Option<Reference>,

    /// Services this one is offered within (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub offered_in: Vec<Reference>,

    /// Broad category of service being performed or delivered (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub category: Vec<CodeableConcept>,

    /// Type of service that may be delivered or performed (0..*)
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub type_: Vec<CodeableConcept>,

    /// Specialties handled by the service (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub specialty: Vec<CodeableConcept>,

    /// Location(s) where the service may be provided (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub location: Vec<Reference>,

    /// Description of the service as presented to a consumer (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FhirString>,

    /// Additional description or any specific issues (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Markdown>,

    /// Extra details about the service that can't be placed elsewhere (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_details: Option<Markdown>,

    /// Specific eligibility requirements to use the service (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub eligibility: Vec<HealthcareServiceEligibility>,

    /// Technical endpoints providing access to this service (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub endpoint: Vec<Reference>,
}

fn default_resource_type() -> String {
    "HealthcareService".to_string()
}

impl HealthcareService {
    pub fn named(name: impl Into<FhirString>) -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            active: None,
            provided_by: None,
            offered_in: Vec::new(),
            category: Vec::new(),
            type_: Vec::new(),
            specialty: Vec::new(),
            location: Vec::new(),
            name: Some(name.into()),
            comment: None,
            extra_details: None,
            eligibility: Vec::new(),
            endpoint: Vec::new(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Eligibility requirement for using the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcareServiceEligibility {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// Coded value for the eligibility (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// Describes the eligibility conditions for the service (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Markdown>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_service_with_eligibility() {
        let svc = HealthcareService::from_value(&json!({
            "resourceType": "HealthcareService",
            "id": "svc-1",
            "active": true,
            "name": "Specialized Care",
            "providedBy": {"reference": "Organization/org-1"},
            "offeredIn": [{"reference": "HealthcareService/parent"}],
            "eligibility": [{"code": {"text": "Age >= 18"}, "comment": "Adults only"}]
        }))
        .unwrap();
        assert_eq!(svc.name.as_deref(), Some("Specialized Care"));
        assert_eq!(svc.eligibility[0].comment.as_deref(), Some("Adults only"));
        assert_eq!(svc.offered_in.len(), 1);
    }

    #[test]
    fn empty_repetitions_are_omitted() {
        let svc = HealthcareService::named("Lab");
        let json = svc.to_value().unwrap();
        assert!(json.get("eligibility").is_none());
        assert!(json.get("location").is_none());
    }
}
