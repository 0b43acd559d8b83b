//! FHIR Organization
//!
//! A formally recognized grouping of people or organizations with a common
//! purpose.

use crate::datatypes::*;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A grouping of people or organizations with a common purpose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Resource type - always "Organization"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// Identifies this organization across multiple systems (0..*).
    /// An organization must carry at least a name or one identifier.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Whether the organization's record is still in active use (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Boolean>,

    /// Kind of organization (0..*)
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub type_: Vec<CodeableConcept>,

    /// Name used for the organization (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FhirString>,

    /// A list of alternate names (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub alias: Vec<FhirString>,

    /// Additional details about the organization (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Markdown>,

    /// Official contact details for the organization (0..*).
    /// Telecom entries may not use the `home` channel.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contact: Vec<ExtendedContactDetail>,

    /// The organization of which this organization forms a part (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Reference>,

    /// Technical endpoints providing access to services (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub endpoint: Vec<Reference>,

    /// Qualifications, certifications, accreditations, licenses (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub qualification: Vec<OrganizationQualification>,
}

fn default_resource_type() -> String {
    "Organization".to_string()
}

impl Organization {
    pub fn named(name: impl Into<FhirString>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::empty()
        }
    }

    /// An organization with no name and no identifiers; callers are
    /// expected to populate one of the two before validating.
    pub fn empty() -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            active: None,
            type_: Vec::new(),
            name: None,
            alias: Vec::new(),
            description: None,
            contact: Vec::new(),
            part_of: None,
            endpoint: Vec::new(),
            qualification: Vec::new(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Qualifications, certifications, accreditations, licenses, training, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationQualification {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_organization_wire_shape() {
        let org = Organization::named("Salus General Hospital");
        let json = org.to_value().unwrap();
        assert_eq!(json["resourceType"], "Organization");
        assert_eq!(json["name"], "Salus General Hospital");
        assert!(json.get("identifier").is_none());
        assert!(json.get("active").is_none());
    }

    #[test]
    fn decode_with_contacts_and_qualifications() {
        let org = Organization::from_value(&json!({
            "resourceType": "Organization",
            "id": "org-1",
            "active": true,
            "name": "Salus Labs",
            "alias": ["SL"],
            "contact": [{
                "telecom": [{"system": "phone", "value": "+1-555-0100", "use": "work"}]
            }],
            "qualification": [{
                "code": {"text": "ISO 15189 accreditation"},
                "issuer": {"reference": "Organization/accreditor"}
            }]
        }))
        .unwrap();
        assert_eq!(org.domain.logical_id(), Some("org-1"));
        assert_eq!(org.contact[0].telecom[0].use_, Some(ContactPointUse::Work));
        assert_eq!(org.qualification.len(), 1);
    }
}
