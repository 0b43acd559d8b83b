//! FHIR Location
//!
//! Details of a physical place where services are provided and resources
//! may be found.

use crate::datatypes::*;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Active,
    Suspended,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    Instance,
    Kind,
}

/// A physical place where services are provided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Resource type - always "Location"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// Unique code or number identifying the location (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// active | suspended | inactive (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LocationStatus>,

    /// Name of the location as used by humans (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FhirString>,

    /// A list of alternate names (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub alias: Vec<FhirString>,

    /// Additional details about the location (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Markdown>,

    /// instance | kind (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<LocationMode>,

    /// Type of function performed at the location (0..*)
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub type_: Vec<CodeableConcept>,

    /// Physical location (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Physical form of the location (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CodeableConcept>,

    /// The absolute geographic location (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LocationPosition>,

    /// Organization responsible for provisioning and upkeep (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managing_organization: Option<Reference>,

    /// Another location this one is physically a part of (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Reference>,

    /// Technical endpoints providing access to services (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub endpoint: Vec<Reference>,
}

fn default_resource_type() -> String {
    "Location".to_string()
}

impl Location {
    pub fn named(name: impl Into<FhirString>) -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            status: None,
            name: Some(name.into()),
            alias: Vec::new(),
            description: None,
            mode: None,
            type_: Vec::new(),
            address: None,
            form: None,
            position: None,
            managing_organization: None,
            part_of: None,
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

/// Absolute geographic location, expressed with the WGS84 datum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPosition {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// Longitude with WGS84 datum (1..1)
    pub longitude: FhirDecimal,

    /// Latitude with WGS84 datum (1..1)
    pub latitude: FhirDecimal,

    /// Altitude with WGS84 datum (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<FhirDecimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_location_with_position() {
        let loc = Location::from_value(&json!({
            "resourceType": "Location",
            "id": "ward-a",
            "status": "active",
            "name": "Ward A",
            "mode": "instance",
            "position": {"longitude": -122.084, "latitude": 37.422},
            "managingOrganization": {"reference": "Organization/org-1"}
        }))
        .unwrap();
        assert_eq!(loc.status, Some(LocationStatus::Active));
        let position = loc.position.as_ref().unwrap();
        assert_eq!(position.latitude.to_string(), "37.422");
        assert!(position.altitude.is_none());
    }

    #[test]
    fn part_of_serializes_as_reference() {
        let mut room = Location::named("Room 101");
        room.part_of = Some(Reference::to("Location", "main-building"));
        let json = room.to_value().unwrap();
        assert_eq!(json["partOf"], json!({"reference": "Location/main-building"}));
    }
}
