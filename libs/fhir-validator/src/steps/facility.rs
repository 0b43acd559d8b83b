//! Location, HealthcareService and Endpoint rules
//!
//! These administrative resources have no cross-field rules of their own;
//! their pipelines are the base layers plus backbone anchors.

use crate::error::Result;
use crate::steps::{element, resource};
use crate::Validate;
use salus_models::resources::{Endpoint, HealthcareService, Location};

impl Validate for Location {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "Location")?;
        if let Some(position) = &self.position {
            element::check_backbone(&position.backbone, "Location.position")?;
        }
        Ok(())
    }
}

impl Validate for HealthcareService {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "HealthcareService")?;
        for eligibility in &self.eligibility {
            element::check_backbone(&eligibility.backbone, "HealthcareService.eligibility")?;
        }
        Ok(())
    }
}

impl Validate for Endpoint {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "Endpoint")?;
        element::check_telecom(&self.contact, "Endpoint.contact")?;
        for payload in &self.payload {
            element::check_backbone(&payload.backbone, "Endpoint.payload")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use salus_models::resources::{EndpointStatus, LocationPosition};
    use salus_models::{BackboneElement, Element, Extension};

    #[test]
    fn plain_location_passes() {
        assert!(Location::named("Ward A").validate().is_ok());
    }

    #[test]
    fn position_modifier_extension_needs_anchor() {
        let mut location = Location::named("Ward A");
        location.position = Some(LocationPosition {
            backbone: BackboneElement {
                element: Element::default(),
                modifier_extension: vec![Extension::new("http://example.org/approximate")],
            },
            longitude: "-122.084".parse().unwrap(),
            latitude: "37.422".parse().unwrap(),
            altitude: None,
        });
        assert!(matches!(
            location.validate().unwrap_err(),
            ValidationError::RequiredFieldMissing { ref field, .. } if field == "Location.position.id"
        ));
    }

    #[test]
    fn endpoint_passes_with_required_fields() {
        let endpoint = Endpoint::new(EndpointStatus::Active, "https://example.com/fhir");
        assert!(endpoint.validate().is_ok());
    }
}
