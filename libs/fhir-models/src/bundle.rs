//! FHIR Bundle model
//!
//! Read-only container for search results and collections. Transaction,
//! batch and history bundles are out of scope for this server.

use crate::error::{Error, Result};
use crate::resource::AnyResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A container for a collection of resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Indicates the purpose of this bundle - how it is intended to be used
    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    /// When the bundle was assembled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// If search, the total number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    /// Links related to this Bundle
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub link: Vec<BundleLink>,

    /// Entry in the bundle - will have a resource or information
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entry: Vec<BundleEntry>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

/// Type of Bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    /// Search Results Bundle - results of a read/search operation
    Searchset,
    /// Collection Bundle - a set of resources collected for a purpose
    Collection,
}

/// Links related to this Bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleLink {
    /// See http://www.iana.org/assignments/link-relations/link-relations.xhtml#link-relations-1
    pub relation: String,

    /// Reference details for the link
    pub url: String,
}

/// Entry in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Full URL for the entry, relative to the base URL or absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// A resource in this bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<AnyResource>,

    /// Search-related information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<BundleEntrySearch>,
}

/// Search-related information for a Bundle entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntrySearch {
    /// Why this entry is in the result set
    #[serde(rename = "mode", skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<BundleEntrySearchMode>,

    /// Search ranking (between 0 and 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Why an entry is in the result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleEntrySearchMode {
    /// This resource matched the search specification
    Match,
    /// Returned because it is referred to from another resource in the set
    Include,
    /// An OperationOutcome with information about the search processing
    Outcome,
}

impl Bundle {
    /// Create a new Bundle with minimal required fields
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            resource_type: default_resource_type(),
            id: None,
            bundle_type,
            timestamp: None,
            total: None,
            link: Vec::new(),
            entry: Vec::new(),
        }
    }

    /// The searchset wire document produced by every read-list endpoint:
    /// `{resourceType: "Bundle", type: "searchset", entry: [...]}`.
    pub fn searchset(resources: Vec<AnyResource>) -> Self {
        let mut bundle = Self::new(BundleType::Searchset);
        bundle.total = Some(resources.len() as u32);
        for resource in resources {
            bundle.add_resource(resource);
        }
        bundle
    }

    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    /// Check if this is a search result bundle
    pub fn is_searchset(&self) -> bool {
        matches!(self.bundle_type, BundleType::Searchset)
    }

    /// Get the number of entries in the bundle
    pub fn entry_count(&self) -> usize {
        self.entry.len()
    }

    /// Append a resource entry, deriving its `fullUrl` from the logical id
    pub fn add_resource(&mut self, resource: AnyResource) {
        let full_url = resource
            .logical_id()
            .map(|id| format!("{}/{}", resource.resource_type(), id));
        self.entry.push(BundleEntry {
            full_url,
            resource: Some(resource),
            search: Some(BundleEntrySearch {
                search_mode: Some(BundleEntrySearchMode::Match),
                score: None,
            }),
        });
    }

    /// Add a link to the bundle
    pub fn add_link(&mut self, relation: impl Into<String>, url: impl Into<String>) {
        self.link.push(BundleLink {
            relation: relation.into(),
            url: url.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Organization;
    use serde_json::json;

    fn org(id: &str) -> AnyResource {
        let mut org = Organization::named("Salus Clinic");
        org.domain.resource.id = Some(id.to_string());
        AnyResource::Organization(org)
    }

    #[test]
    fn searchset_wire_shape() {
        let bundle = Bundle::searchset(vec![org("org-1"), org("org-2")]);
        let json = bundle.to_value().unwrap();
        assert_eq!(json["resourceType"], "Bundle");
        assert_eq!(json["type"], "searchset");
        assert_eq!(json["total"], 2);
        assert_eq!(json["entry"][0]["fullUrl"], "Organization/org-1");
        assert_eq!(json["entry"][0]["resource"]["resourceType"], "Organization");
        assert_eq!(json["entry"][1]["search"]["mode"], "match");
    }

    #[test]
    fn empty_searchset_omits_entry() {
        let bundle = Bundle::searchset(Vec::new());
        let json = bundle.to_value().unwrap();
        assert_eq!(json["total"], 0);
        assert!(json.get("entry").is_none());
    }

    #[test]
    fn deserialize_bundle() {
        let json = json!({
            "resourceType": "Bundle",
            "id": "example-bundle",
            "type": "searchset",
            "total": 1,
            "entry": [
                {
                    "fullUrl": "Patient/123",
                    "resource": {"resourceType": "Patient", "id": "123"},
                    "search": {"mode": "match", "score": 1.0}
                }
            ]
        });

        let bundle = Bundle::from_value(&json).unwrap();
        assert_eq!(bundle.id, Some("example-bundle".to_string()));
        assert!(bundle.is_searchset());
        assert_eq!(bundle.entry_count(), 1);
        assert_eq!(bundle.entry[0].resource.as_ref().unwrap().logical_id(), Some("123"));
    }

    #[test]
    fn add_link() {
        let mut bundle = Bundle::new(BundleType::Searchset);
        bundle.add_link("self", "http://example.org/fhir/Patient/");
        assert_eq!(bundle.link.len(), 1);
        assert_eq!(bundle.link[0].relation, "self");
    }
}
