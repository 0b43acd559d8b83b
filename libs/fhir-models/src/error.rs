//! Error types for FHIR models

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("expected a JSON object for {0}")]
    ExpectedObject(&'static str),

    #[error("missing resourceType property")]
    MissingResourceType,

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("only one {group} value may be set, found {found:?}")]
    ChoiceExclusivity {
        group: &'static str,
        found: Vec<&'static str>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
