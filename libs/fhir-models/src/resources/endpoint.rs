//! FHIR Endpoint
//!
//! The technical details of an endpoint that can be used for electronic
//! services.

use crate::datatypes::*;
use crate::element::BackboneElement;
use crate::error::Result;
use crate::primitives::*;
use crate::resource::DomainResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointStatus {
    Active,
    Suspended,
    Error,
    Off,
    EnteredInError,
    Test,
}

/// Technical details of an endpoint for electronic services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Resource type - always "Endpoint"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(flatten)]
    pub domain: DomainResource,

    /// Identifies this endpoint across multiple systems (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// The current status of the endpoint (1..1)
    pub status: EndpointStatus,

    /// Protocol/profile/standard the endpoint supports (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub connection_type: Vec<CodeableConcept>,

    /// A name this endpoint can be identified by (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FhirString>,

    /// Additional details about the endpoint (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<FhirString>,

    /// Organization that manages this endpoint (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managing_organization: Option<Reference>,

    /// Contact details for source (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contact: Vec<ContactPoint>,

    /// Interval the endpoint is expected to be operational (0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Set of payloads that are acceptable (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub payload: Vec<EndpointPayload>,

    /// The technical base address for connecting to this endpoint (1..1)
    pub address: Url,

    /// Usage depends on the channel type (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub header: Vec<FhirString>,
}

fn default_resource_type() -> String {
    "Endpoint".to_string()
}

impl Endpoint {
    pub fn new(status: EndpointStatus, address: impl Into<Url>) -> Self {
        Self {
            resource_type: default_resource_type(),
            domain: DomainResource::default(),
            identifier: Vec::new(),
            status,
            connection_type: Vec::new(),
            name: None,
            description: None,
            managing_organization: None,
            contact: Vec::new(),
            period: None,
            payload: Vec::new(),
            address: address.into(),
            header: Vec::new(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A payload type and mime types the endpoint accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointPayload {
    #[serde(flatten)]
    pub backbone: BackboneElement,

    /// The type of content that may be used at this endpoint (0..*)
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub type_: Vec<CodeableConcept>,

    /// Mimetypes supported for the payloads (0..*)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub mime_type: Vec<Code>,
}
