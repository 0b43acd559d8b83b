//! Structural invariant engine for FHIR resources
//!
//! The FHIR abstraction ladder (Element → BackboneElement → Resource →
//! DomainResource → CanonicalResource) contributes validation rules at every
//! layer. Instead of virtual-method chaining, each concrete resource's
//! [`Validate`] impl is an explicit, ordered pipeline of rule functions from
//! [`steps`]: base-layer rules run first, resource-specific rules second,
//! and the first failure short-circuits.
//!
//! Validation is an explicit step — nothing validates implicitly on
//! construction or serialization, and a failed rule never mutates the
//! resource being checked.
//!
//! # Example
//!
//! ```rust
//! use salus_models::{CodeableConcept, resources::{Encounter, EncounterStatus}};
//! use salus_validator::{Validate, ValidationError};
//!
//! let encounter = Encounter::new(
//!     EncounterStatus::Completed,
//!     CodeableConcept::coded("http://terminology.hl7.org/CodeSystem/v3-ActCode", "AMB"),
//! );
//! // completed encounters must carry an actual period
//! assert!(matches!(
//!     encounter.validate(),
//!     Err(ValidationError::ConditionalRequirement { .. })
//! ));
//! ```

mod error;
pub mod steps;

pub use error::{ContainmentClause, Result, ValidationError};

use salus_models::AnyResource;

/// Explicitly-invoked structural validation.
pub trait Validate {
    /// Run every rule this type and its base layers contribute, stopping at
    /// the first failure. Does not mutate the receiver.
    fn validate(&self) -> Result<()>;
}

/// Validate a resource of any supported type.
pub fn validate_any(resource: &AnyResource) -> Result<()> {
    match resource {
        AnyResource::Encounter(r) => r.validate(),
        AnyResource::Observation(r) => r.validate(),
        AnyResource::Organization(r) => r.validate(),
        AnyResource::Patient(r) => r.validate(),
        AnyResource::RelatedPerson(r) => r.validate(),
        AnyResource::Practitioner(r) => r.validate(),
        AnyResource::PractitionerRole(r) => r.validate(),
        AnyResource::Location(r) => r.validate(),
        AnyResource::HealthcareService(r) => r.validate(),
        AnyResource::Endpoint(r) => r.validate(),
    }
}
