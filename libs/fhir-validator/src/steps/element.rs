//! Element-layer rules
//!
//! Extensions are meaningless without a stable anchor to reference them, so
//! any element carrying extensions must have an element id. The modifier
//! channel tightens the same rule for backbone elements.

use crate::error::{Result, ValidationError};
use crate::Validate;
use salus_models::{BackboneElement, ContactPoint, Element};

/// `id` is required whenever extensions are attached.
pub fn require_anchor(element: &Element, path: &str) -> Result<()> {
    if element.has_extensions() && element.id.is_none() {
        return Err(ValidationError::RequiredFieldMissing {
            field: format!("{path}.id"),
            condition: "extensions are attached",
        });
    }
    Ok(())
}

/// Backbone elements additionally require `id` when modifier extensions
/// are present.
pub fn check_backbone(backbone: &BackboneElement, path: &str) -> Result<()> {
    require_anchor(&backbone.element, path)?;
    if backbone.has_modifier_extensions() && backbone.element.id.is_none() {
        return Err(ValidationError::RequiredFieldMissing {
            field: format!("{path}.id"),
            condition: "modifier extensions are present",
        });
    }
    Ok(())
}

/// A contact point without a system cannot be routed.
pub fn check_contact_point(contact_point: &ContactPoint, path: &str) -> Result<()> {
    if contact_point.value.is_some() && contact_point.system.is_none() {
        return Err(ValidationError::RequiredFieldMissing {
            field: format!("{path}.system"),
            condition: "a value is present",
        });
    }
    Ok(())
}

/// Apply [`check_contact_point`] across a telecom repetition.
pub fn check_telecom(telecom: &[ContactPoint], path: &str) -> Result<()> {
    for contact_point in telecom {
        check_contact_point(contact_point, path)?;
    }
    Ok(())
}

impl Validate for Element {
    fn validate(&self) -> Result<()> {
        require_anchor(self, "Element")
    }
}

impl Validate for BackboneElement {
    fn validate(&self) -> Result<()> {
        check_backbone(self, "BackboneElement")
    }
}

impl Validate for ContactPoint {
    fn validate(&self) -> Result<()> {
        require_anchor(&self.element, "ContactPoint")?;
        check_contact_point(self, "ContactPoint")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salus_models::{ContactPointSystem, Extension};

    #[test]
    fn element_without_extensions_needs_no_id() {
        assert!(Element::default().validate().is_ok());
    }

    #[test]
    fn element_with_extensions_requires_id() {
        let element = Element {
            id: None,
            extension: vec![Extension::new("http://example.org/ext")],
        };
        let err = element.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::RequiredFieldMissing {
                field: "Element.id".into(),
                condition: "extensions are attached",
            }
        );

        let anchored = Element {
            id: Some("el-1".into()),
            ..element
        };
        assert!(anchored.validate().is_ok());
    }

    #[test]
    fn modifier_extension_requires_id() {
        let backbone = BackboneElement {
            element: Element::default(),
            modifier_extension: vec![Extension::new("http://example.org/mod")],
        };
        let err = backbone.validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::RequiredFieldMissing { condition: "modifier extensions are present", .. }
        ));
    }

    #[test]
    fn contact_point_value_requires_system() {
        let bare = ContactPoint {
            value: Some("+1-555-0100".into()),
            ..Default::default()
        };
        assert!(bare.validate().is_err());

        let routed = ContactPoint::new(ContactPointSystem::Phone, "+1-555-0100");
        assert!(routed.validate().is_ok());
    }
}
