//! FHIR R5 clinical data models
//!
//! This crate provides strongly-typed Rust structures for the clinical and
//! administrative FHIR resources served by salus, together with their
//! canonical JSON wire representation.
//!
//! # Module Organization
//!
//! - `primitives`: FHIR primitive types mapped onto ecosystem types
//! - `datatypes`: reusable complex datatypes (Identifier, CodeableConcept, ...)
//! - `element`: the element/extension model shared by every structure
//! - `choice`: decode-time guard for FHIR `value[x]` choice groups
//! - `resource`: the resource hierarchy cores and the `AnyResource` union
//! - `resources`: concrete resource models (Encounter, Observation, ...)
//! - `bundle`: searchset containers for read-endpoint responses
//!
//! # Design Philosophy
//!
//! - **Wire format by construction**: `Serialize` impls emit canonical FHIR
//!   JSON directly — absent optional fields and empty repetitions are omitted,
//!   never emitted as `null` or `[]`.
//! - **Choice types as sum types**: a `value[x]` group is one enum, so a
//!   validated in-memory graph cannot hold two branches at once. The runtime
//!   exclusivity check survives only where untrusted JSON enters, in
//!   [`choice::ChoiceGroup`].
//! - **Composition over inheritance**: the FHIR abstraction ladder
//!   (Element → Resource → DomainResource → CanonicalResource) is modeled as
//!   flattened member structs, not a class hierarchy.
//!
//! # Example
//!
//! ```rust
//! use salus_models::resources::Observation;
//! use serde_json::json;
//!
//! let obs = Observation::from_value(&json!({
//!     "resourceType": "Observation",
//!     "id": "bp-1",
//!     "status": "final",
//!     "code": {"text": "Systolic blood pressure"},
//!     "valueString": "Normal"
//! }))
//! .unwrap();
//!
//! assert_eq!(obs.domain.resource.id.as_deref(), Some("bp-1"));
//! ```

pub mod bundle;
pub mod choice;
pub mod datatypes;
pub mod element;
pub mod error;
pub mod primitives;
pub mod resource;
pub mod resources;

mod decode;

// Re-export commonly used types
pub use bundle::*;
pub use datatypes::*;
pub use element::*;
pub use error::{Error, Result};
pub use resource::*;
