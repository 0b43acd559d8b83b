//! Concrete FHIR resource models

pub mod encounter;
pub mod endpoint;
pub mod healthcare_service;
pub mod location;
pub mod observation;
pub mod organization;
pub mod patient;
pub mod practitioner;
pub mod related_person;

pub use encounter::*;
pub use endpoint::*;
pub use healthcare_service::*;
pub use location::*;
pub use observation::*;
pub use organization::*;
pub use patient::*;
pub use practitioner::*;
pub use related_person::*;
