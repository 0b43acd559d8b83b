//! Rule functions, grouped by the layer or resource that contributes them
//!
//! Each function checks one independent rule (or one tight family of rules)
//! and is composed into per-resource pipelines by the `Validate` impls.

pub mod element;
pub mod encounter;
pub mod facility;
pub mod observation;
pub mod organization;
pub mod patient;
pub mod practitioner;
pub mod resource;
