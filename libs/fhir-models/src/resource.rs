//! Resource hierarchy cores
//!
//! FHIR layers Resource → DomainResource → CanonicalResource →
//! MetadataResource by inheritance; here each layer is a struct flattened
//! into the next, and concrete resources flatten [`DomainResource`].
//! [`AnyResource`] is the closed union over every concrete resource type,
//! used wherever "any resource" polymorphism is needed (containment, bundle
//! entries).

use crate::choice::ChoiceGroup;
use crate::datatypes::*;
use crate::decode;
use crate::element::Extension;
use crate::error::{Error, Result};
use crate::primitives::*;
use crate::resources::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields common to every resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// A set of rules under which this content was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<Uri>,

    /// Language of the resource content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Code>,
}

/// Fields common to every resource with narrative, containment and
/// extensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResource {
    #[serde(flatten)]
    pub resource: Resource,

    /// Text summary of the resource, for human interpretation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    /// Contained, inline resources, owned by this resource
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contained: Vec<AnyResource>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extension: Vec<Extension>,

    /// Extensions that cannot be ignored
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub modifier_extension: Vec<Extension>,
}

impl DomainResource {
    pub fn with_id(id: impl Into<Id>) -> Self {
        Self {
            resource: Resource {
                id: Some(id.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn logical_id(&self) -> Option<&str> {
        self.resource.id.as_deref()
    }

    /// Decode path used by the hand-written resource decoders: extensions
    /// and contained resources are routed through their own `from_value`
    /// so choice-exclusivity failures keep their typed error instead of
    /// being flattened into a serde message.
    pub(crate) fn decode(value: &Value) -> Result<Self> {
        let map = decode::object(value, "DomainResource")?;
        Ok(Self {
            resource: serde_json::from_value(value.clone())?,
            text: decode::field(map, "text")?,
            contained: decode::contained(map)?,
            extension: decode::extensions(map, "extension")?,
            modifier_extension: decode::extensions(map, "modifierExtension")?,
        })
    }
}

/// Publication lifecycle of definitional content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Draft,
    Active,
    Retired,
    Unknown,
}

/// CanonicalResource `versionAlgorithm[x]` choice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VersionAlgorithm {
    #[serde(rename = "versionAlgorithmString")]
    String(FhirString),
    #[serde(rename = "versionAlgorithmCoding")]
    Coding(Coding),
}

impl VersionAlgorithm {
    pub const GROUP: ChoiceGroup = ChoiceGroup {
        name: "CanonicalResource.versionAlgorithm[x]",
        keys: &["versionAlgorithmString", "versionAlgorithmCoding"],
    };

    pub(crate) fn from_map(map: &Map<String, Value>) -> Result<Option<Self>> {
        let Some((key, raw)) = Self::GROUP.pick(map)? else {
            return Ok(None);
        };
        let algorithm = match key {
            "versionAlgorithmString" => Self::String(decode::branch(raw)?),
            "versionAlgorithmCoding" => Self::Coding(decode::branch(raw)?),
            _ => unreachable!(),
        };
        Ok(Some(algorithm))
    }
}

/// Fields common to resources identified by a canonical url and published
/// as versioned definitional content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalResource {
    #[serde(flatten)]
    pub domain: DomainResource,

    /// Canonical identifier, unchanged across hosting environments.
    /// Must not embed `|` or `#`, which are reserved for version and
    /// fragment references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Uri>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,

    /// Business version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<FhirString>,

    #[serde(flatten)]
    pub version_algorithm: Option<VersionAlgorithm>,

    /// Computer friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FhirString>,

    /// Human friendly title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<FhirString>,

    pub status: PublicationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<Boolean>,

    /// Date last changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<FhirDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<FhirString>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contact: Vec<ContactDetail>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Markdown>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub use_context: Vec<UsageContext>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub jurisdiction: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Markdown>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<Markdown>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_label: Option<FhirString>,
}

impl CanonicalResource {
    pub fn new(status: PublicationStatus) -> Self {
        Self {
            domain: DomainResource::default(),
            url: None,
            identifier: Vec::new(),
            version: None,
            version_algorithm: None,
            name: None,
            title: None,
            status,
            experimental: None,
            date: None,
            publisher: None,
            contact: Vec::new(),
            description: None,
            use_context: Vec::new(),
            jurisdiction: Vec::new(),
            purpose: None,
            copyright: None,
            copyright_label: None,
        }
    }

    /// Decode from untrusted JSON, enforcing versionAlgorithm[x]
    /// exclusivity.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "CanonicalResource")?;
        Ok(Self {
            domain: DomainResource::decode(value)?,
            url: decode::field(map, "url")?,
            identifier: decode::field_vec(map, "identifier")?,
            version: decode::field(map, "version")?,
            version_algorithm: VersionAlgorithm::from_map(map)?,
            name: decode::field(map, "name")?,
            title: decode::field(map, "title")?,
            status: decode::require(map, "status", "CanonicalResource.status")?,
            experimental: decode::field(map, "experimental")?,
            date: decode::field(map, "date")?,
            publisher: decode::field(map, "publisher")?,
            contact: decode::field_vec(map, "contact")?,
            description: decode::field(map, "description")?,
            use_context: decode::field_vec(map, "useContext")?,
            jurisdiction: decode::field_vec(map, "jurisdiction")?,
            purpose: decode::field(map, "purpose")?,
            copyright: decode::field(map, "copyright")?,
            copyright_label: decode::field(map, "copyrightLabel")?,
        })
    }
}

impl<'de> Deserialize<'de> for CanonicalResource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        CanonicalResource::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Fields common to definitional resources carrying review and approval
/// metadata. Adds no structural invariants beyond the canonical layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResource {
    #[serde(flatten)]
    pub canonical: CanonicalResource,

    /// When the resource was approved by the publisher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<Date>,

    /// When the resource was last reviewed by the publisher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<Date>,

    /// When the resource is expected to be used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub topic: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub author: Vec<ContactDetail>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub editor: Vec<ContactDetail>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reviewer: Vec<ContactDetail>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub endorser: Vec<ContactDetail>,
}

impl MetadataResource {
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = decode::object(value, "MetadataResource")?;
        Ok(Self {
            canonical: CanonicalResource::from_value(value)?,
            approval_date: decode::field(map, "approvalDate")?,
            last_review_date: decode::field(map, "lastReviewDate")?,
            effective_period: decode::field(map, "effectivePeriod")?,
            topic: decode::field_vec(map, "topic")?,
            author: decode::field_vec(map, "author")?,
            editor: decode::field_vec(map, "editor")?,
            reviewer: decode::field_vec(map, "reviewer")?,
            endorser: decode::field_vec(map, "endorser")?,
        })
    }
}

impl<'de> Deserialize<'de> for MetadataResource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        MetadataResource::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Closed union over every concrete resource type served by this crate.
///
/// Serialization is untagged: each resource carries its own `resourceType`
/// discriminator field. Deserialization dispatches on that field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyResource {
    Encounter(Encounter),
    Observation(Observation),
    Organization(Organization),
    Patient(Patient),
    RelatedPerson(RelatedPerson),
    Practitioner(Practitioner),
    PractitionerRole(PractitionerRole),
    Location(Location),
    HealthcareService(HealthcareService),
    Endpoint(Endpoint),
}

impl AnyResource {
    pub fn from_value(value: &Value) -> Result<Self> {
        let resource_type = value
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or(Error::MissingResourceType)?;

        match resource_type {
            "Encounter" => Ok(Self::Encounter(serde_json::from_value(value.clone())?)),
            "Observation" => Ok(Self::Observation(Observation::from_value(value)?)),
            "Organization" => Ok(Self::Organization(serde_json::from_value(value.clone())?)),
            "Patient" => Ok(Self::Patient(Patient::from_value(value)?)),
            "RelatedPerson" => Ok(Self::RelatedPerson(serde_json::from_value(value.clone())?)),
            "Practitioner" => Ok(Self::Practitioner(Practitioner::from_value(value)?)),
            "PractitionerRole" => Ok(Self::PractitionerRole(serde_json::from_value(value.clone())?)),
            "Location" => Ok(Self::Location(serde_json::from_value(value.clone())?)),
            "HealthcareService" => Ok(Self::HealthcareService(serde_json::from_value(value.clone())?)),
            "Endpoint" => Ok(Self::Endpoint(serde_json::from_value(value.clone())?)),
            other => Err(Error::UnknownResourceType(other.to_string())),
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Encounter(_) => "Encounter",
            Self::Observation(_) => "Observation",
            Self::Organization(_) => "Organization",
            Self::Patient(_) => "Patient",
            Self::RelatedPerson(_) => "RelatedPerson",
            Self::Practitioner(_) => "Practitioner",
            Self::PractitionerRole(_) => "PractitionerRole",
            Self::Location(_) => "Location",
            Self::HealthcareService(_) => "HealthcareService",
            Self::Endpoint(_) => "Endpoint",
        }
    }

    /// The shared domain-resource core of the wrapped resource.
    pub fn domain(&self) -> &DomainResource {
        match self {
            Self::Encounter(r) => &r.domain,
            Self::Observation(r) => &r.domain,
            Self::Organization(r) => &r.domain,
            Self::Patient(r) => &r.domain,
            Self::RelatedPerson(r) => &r.domain,
            Self::Practitioner(r) => &r.domain,
            Self::PractitionerRole(r) => &r.domain,
            Self::Location(r) => &r.domain,
            Self::HealthcareService(r) => &r.domain,
            Self::Endpoint(r) => &r.domain,
        }
    }

    pub fn logical_id(&self) -> Option<&str> {
        self.domain().logical_id()
    }
}

impl<'de> Deserialize<'de> for AnyResource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        AnyResource::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_version_algorithm_is_exclusive() {
        let err = CanonicalResource::from_value(&json!({
            "status": "active",
            "versionAlgorithmString": "semver",
            "versionAlgorithmCoding": {"system": "http://hl7.org/fhir/version-algorithm", "code": "date"}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ChoiceExclusivity { group: "CanonicalResource.versionAlgorithm[x]", .. }
        ));
    }

    #[test]
    fn canonical_status_is_required() {
        let err = CanonicalResource::from_value(&json!({"url": "http://example.org/vs"})).unwrap_err();
        assert!(matches!(err, Error::MissingField("CanonicalResource.status")));
    }

    #[test]
    fn metadata_resource_decodes_review_metadata() {
        let md = MetadataResource::from_value(&json!({
            "status": "draft",
            "url": "http://example.org/def/weight-protocol",
            "approvalDate": "2024-03-01",
            "lastReviewDate": "2025-03-01",
            "topic": [{"text": "Assessment"}]
        }))
        .unwrap();
        assert_eq!(md.canonical.status, PublicationStatus::Draft);
        assert_eq!(md.approval_date.unwrap().to_string(), "2024-03-01");
        assert_eq!(md.topic.len(), 1);
    }

    #[test]
    fn any_resource_dispatches_on_resource_type() {
        let resource = AnyResource::from_value(&json!({
            "resourceType": "Organization",
            "id": "org-1",
            "name": "Salus Clinic"
        }))
        .unwrap();
        assert_eq!(resource.resource_type(), "Organization");
        assert_eq!(resource.logical_id(), Some("org-1"));
    }

    #[test]
    fn any_resource_rejects_unknown_type() {
        let err = AnyResource::from_value(&json!({"resourceType": "Medication"})).unwrap_err();
        assert!(matches!(err, Error::UnknownResourceType(t) if t == "Medication"));
    }

    #[test]
    fn any_resource_requires_discriminator() {
        let err = AnyResource::from_value(&json!({"id": "x"})).unwrap_err();
        assert!(matches!(err, Error::MissingResourceType));
    }
}
