//! Resource-layer rules: identity anchors, containment, canonical urls
//!
//! Containment is validated from the container side: every entry of a
//! resource's `contained` set is checked against the three containment
//! clauses (in order, first failure only) and then validated with its own
//! pipeline. Clause (a) rejects nesting below depth one, so the recursion
//! terminates.

use crate::error::{ContainmentClause, Result, ValidationError};
use crate::{validate_any, Validate};
use salus_models::{CanonicalResource, DomainResource, MetadataResource, Resource};

/// A resource created under implicit rules must be identifiable.
pub fn check_resource(resource: &Resource) -> Result<()> {
    if resource.implicit_rules.is_some() && resource.id.is_none() {
        return Err(ValidationError::RequiredFieldMissing {
            field: "Resource.id".into(),
            condition: "implicitRules is present",
        });
    }
    Ok(())
}

/// Base rules shared by every domain resource: the resource layer, the
/// extension anchor rule at resource level, and the containment rules for
/// every contained entry.
pub fn check_domain(domain: &DomainResource, type_name: &str) -> Result<()> {
    check_resource(&domain.resource)?;

    let has_extensions = !domain.extension.is_empty() || !domain.modifier_extension.is_empty();
    if has_extensions && domain.resource.id.is_none() {
        return Err(ValidationError::RequiredFieldMissing {
            field: format!("{type_name}.id"),
            condition: "extensions are attached",
        });
    }

    for contained in &domain.contained {
        check_containment(contained.domain())?;
        validate_any(contained)?;
    }
    Ok(())
}

/// The three containment clauses, evaluated (a) → (b) → (c).
fn check_containment(contained: &DomainResource) -> Result<()> {
    if !contained.contained.is_empty() {
        return Err(ValidationError::ContainmentViolation {
            clause: ContainmentClause::NestedContainment,
        });
    }
    if let Some(meta) = &contained.resource.meta {
        if meta.has_version_info() {
            return Err(ValidationError::ContainmentViolation {
                clause: ContainmentClause::VersionedMeta,
            });
        }
        if !meta.security.is_empty() {
            return Err(ValidationError::ContainmentViolation {
                clause: ContainmentClause::SecurityLabels,
            });
        }
    }
    Ok(())
}

/// Canonical-layer rule: the canonical url must stay resolvable.
/// `|` and `#` are reserved for version and fragment references.
pub fn check_canonical(canonical: &CanonicalResource) -> Result<()> {
    check_domain(&canonical.domain, "CanonicalResource")?;
    if let Some(url) = &canonical.url {
        if url.contains('|') || url.contains('#') {
            return Err(ValidationError::InvalidValue {
                field: "CanonicalResource.url",
                reason: "must not contain '|' or '#'",
            });
        }
    }
    Ok(())
}

impl Validate for CanonicalResource {
    fn validate(&self) -> Result<()> {
        check_canonical(self)
    }
}

impl Validate for MetadataResource {
    /// The metadata layer adds no structural invariants of its own.
    fn validate(&self) -> Result<()> {
        check_canonical(&self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salus_models::{Meta, PublicationStatus};

    #[test]
    fn implicit_rules_require_logical_id() {
        let resource = Resource {
            implicit_rules: Some("http://example.org/rules".into()),
            ..Default::default()
        };
        let err = check_resource(&resource).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::RequiredFieldMissing { condition: "implicitRules is present", .. }
        ));

        let identified = Resource {
            id: Some("r-1".into()),
            ..resource
        };
        assert!(check_resource(&identified).is_ok());
    }

    #[test]
    fn containment_clauses_fire_in_order() {
        // clause (b): versioned meta
        let versioned = DomainResource {
            resource: Resource {
                meta: Some(Meta {
                    version_id: Some("2".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            check_containment(&versioned).unwrap_err(),
            ValidationError::ContainmentViolation {
                clause: ContainmentClause::VersionedMeta
            }
        );

        // clause (c): security labels
        let labelled = DomainResource {
            resource: Resource {
                meta: Some(Meta {
                    security: vec![salus_models::Coding::new(
                        "http://terminology.hl7.org/CodeSystem/v3-Confidentiality",
                        "R",
                    )],
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            check_containment(&labelled).unwrap_err(),
            ValidationError::ContainmentViolation {
                clause: ContainmentClause::SecurityLabels
            }
        );
    }

    #[test]
    fn canonical_url_rejects_reserved_characters() {
        let mut canonical = CanonicalResource::new(PublicationStatus::Active);
        canonical.url = Some("http://example.org/ValueSet/vitals|1.0".into());
        assert_eq!(
            canonical.validate().unwrap_err(),
            ValidationError::InvalidValue {
                field: "CanonicalResource.url",
                reason: "must not contain '|' or '#'",
            }
        );

        canonical.url = Some("http://example.org/ValueSet/vitals".into());
        assert!(canonical.validate().is_ok());
    }

    #[test]
    fn version_algorithm_exclusivity_is_type_level() {
        // the sum type admits only one branch; validating either passes
        let mut canonical = CanonicalResource::new(PublicationStatus::Draft);
        canonical.version_algorithm = Some(salus_models::VersionAlgorithm::String("semver".into()));
        assert!(canonical.validate().is_ok());
    }
}
