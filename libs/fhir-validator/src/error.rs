//! Validation error taxonomy
//!
//! Every structural rule failure maps to exactly one of these kinds.
//! Validation is fail-fast: the first violated rule is reported and the
//! remaining rules do not run.

use thiserror::Error;

/// The three containment rules, checked in declaration order; only the
/// first violated clause is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContainmentClause {
    #[error("must not itself contain resources")]
    NestedContainment,

    #[error("must not have meta.versionId or meta.lastUpdated")]
    VersionedMeta,

    #[error("must not carry security labels")]
    SecurityLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A conditionally-required field is absent
    #[error("{field} is required ({condition})")]
    RequiredFieldMissing { field: String, condition: &'static str },

    /// One of the containment rules is violated
    #[error("contained resource {clause}")]
    ContainmentViolation { clause: ContainmentClause },

    /// Cross-field date ordering is violated
    #[error("{start} must be before or equal to {end}")]
    CrossFieldOrder { start: &'static str, end: &'static str },

    /// A state implies a companion-field requirement that does not hold
    #[error("{field} {requirement}")]
    ConditionalRequirement {
        field: &'static str,
        requirement: &'static str,
    },

    /// An "exactly one of" reference constraint is violated
    #[error("{element} must reference exactly one of: {targets}")]
    ReferenceCardinality {
        element: &'static str,
        targets: &'static str,
    },

    /// An entity lacks the minimum identifying information
    #[error("{resource} must have at least a name or an identifier")]
    IdentityIncomplete { resource: &'static str },

    /// A field value is outside its allowed lexical or semantic space
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
