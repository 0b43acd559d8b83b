//! Practitioner and PractitionerRole rules
//!
//! The deceased[x] choice is type-level; these pipelines contribute the
//! base-layer checks and backbone anchors.

use crate::error::Result;
use crate::steps::{element, resource};
use crate::Validate;
use salus_models::resources::{Practitioner, PractitionerRole};

impl Validate for Practitioner {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "Practitioner")?;
        element::check_telecom(&self.telecom, "Practitioner.telecom")?;
        for qualification in &self.qualification {
            element::check_backbone(&qualification.backbone, "Practitioner.qualification")?;
        }
        Ok(())
    }
}

impl Validate for PractitionerRole {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "PractitionerRole")?;
        for contact in &self.contact {
            element::check_telecom(&contact.telecom, "PractitionerRole.contact.telecom")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use salus_models::{ContactPoint, Extension};

    #[test]
    fn telecom_without_system_fails_through_pipeline() {
        let mut practitioner = Practitioner::with_id("dr-1");
        practitioner.telecom = vec![ContactPoint {
            value: Some("dr@example.org".into()),
            ..Default::default()
        }];
        assert!(matches!(
            practitioner.validate().unwrap_err(),
            ValidationError::RequiredFieldMissing { ref field, .. }
                if field == "Practitioner.telecom.system"
        ));
    }

    #[test]
    fn resource_level_extensions_require_id() {
        let mut practitioner = Practitioner::default();
        practitioner.domain.extension = vec![Extension::new("http://example.org/ext")];
        assert!(matches!(
            practitioner.validate().unwrap_err(),
            ValidationError::RequiredFieldMissing { ref field, .. } if field == "Practitioner.id"
        ));
    }
}
