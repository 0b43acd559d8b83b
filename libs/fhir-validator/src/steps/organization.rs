//! Organization rules

use crate::error::{Result, ValidationError};
use crate::steps::{element, resource};
use crate::Validate;
use salus_models::resources::Organization;
use salus_models::ContactPointUse;

/// An organization must be identifiable by at least a non-blank name or
/// one identifier.
pub fn check_identity(organization: &Organization) -> Result<()> {
    let has_name = organization
        .name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name && organization.identifier.is_empty() {
        return Err(ValidationError::IdentityIncomplete {
            resource: "Organization",
        });
    }
    Ok(())
}

/// Organizations are not persons; a `home` contact channel is a
/// person-only concept.
pub fn check_contacts(organization: &Organization) -> Result<()> {
    for contact in &organization.contact {
        for contact_point in &contact.telecom {
            if contact_point.use_ == Some(ContactPointUse::Home) {
                return Err(ValidationError::InvalidValue {
                    field: "Organization.contact.telecom.use",
                    reason: "organizations may not use 'home' contacts",
                });
            }
        }
        element::check_telecom(&contact.telecom, "Organization.contact.telecom")?;
    }
    Ok(())
}

impl Validate for Organization {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "Organization")?;
        check_identity(self)?;
        check_contacts(self)?;
        for qualification in &self.qualification {
            element::check_backbone(&qualification.backbone, "Organization.qualification")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salus_models::{ContactPoint, ContactPointSystem, ExtendedContactDetail, Identifier};

    #[test]
    fn nameless_unidentified_organization_is_incomplete() {
        let org = Organization::empty();
        assert_eq!(
            org.validate().unwrap_err(),
            ValidationError::IdentityIncomplete { resource: "Organization" }
        );
    }

    #[test]
    fn blank_name_does_not_count() {
        let org = Organization::named("   ");
        assert!(org.validate().is_err());
    }

    #[test]
    fn either_name_or_identifier_satisfies_the_rule() {
        let named = Organization::named("Salus Clinic");
        assert!(named.validate().is_ok());

        let mut identified = Organization::empty();
        identified.identifier = vec![Identifier::new("http://example.com/orgs", "org-42")];
        assert!(identified.validate().is_ok());
    }

    #[test]
    fn home_telecom_is_rejected() {
        let mut org = Organization::named("Salus Clinic");
        org.contact = vec![ExtendedContactDetail {
            telecom: vec![ContactPoint {
                use_: Some(ContactPointUse::Home),
                ..ContactPoint::new(ContactPointSystem::Phone, "+1-555-0100")
            }],
            ..Default::default()
        }];
        assert_eq!(
            org.validate().unwrap_err(),
            ValidationError::InvalidValue {
                field: "Organization.contact.telecom.use",
                reason: "organizations may not use 'home' contacts",
            }
        );

        org.contact[0].telecom[0].use_ = Some(ContactPointUse::Work);
        assert!(org.validate().is_ok());
    }
}
