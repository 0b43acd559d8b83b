//! Patient and RelatedPerson rules

use crate::error::{Result, ValidationError};
use crate::steps::{element, resource};
use crate::Validate;
use salus_models::resources::{Patient, PatientLink, RelatedPerson};

/// A link must name exactly one "other" party: another Patient or a
/// RelatedPerson, never both, never neither.
pub fn check_link(link: &PatientLink) -> Result<()> {
    element::check_backbone(&link.backbone, "Patient.link")?;
    match (&link.other_patient, &link.other_related_person) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => Err(ValidationError::ReferenceCardinality {
            element: "Patient.link.other",
            targets: "Patient, RelatedPerson",
        }),
    }
}

impl Validate for Patient {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "Patient")?;
        element::check_telecom(&self.telecom, "Patient.telecom")?;
        for contact in &self.contact {
            element::check_backbone(&contact.backbone, "Patient.contact")?;
            element::check_telecom(&contact.telecom, "Patient.contact.telecom")?;
        }
        for communication in &self.communication {
            element::check_backbone(&communication.backbone, "Patient.communication")?;
        }
        for link in &self.link {
            check_link(link)?;
        }
        Ok(())
    }
}

impl Validate for RelatedPerson {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "RelatedPerson")?;
        element::check_telecom(&self.telecom, "RelatedPerson.telecom")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salus_models::resources::PatientLinkType;
    use salus_models::Reference;

    #[test]
    fn link_with_no_target_is_rejected() {
        let link = PatientLink {
            type_: Some(PatientLinkType::Refer),
            ..Default::default()
        };
        assert_eq!(
            check_link(&link).unwrap_err(),
            ValidationError::ReferenceCardinality {
                element: "Patient.link.other",
                targets: "Patient, RelatedPerson",
            }
        );
    }

    #[test]
    fn link_with_both_targets_is_rejected() {
        let link = PatientLink {
            other_patient: Some(Reference::to("Patient", "pt-2")),
            other_related_person: Some(Reference::to("RelatedPerson", "rp-1")),
            type_: Some(PatientLinkType::Seealso),
            ..Default::default()
        };
        assert!(check_link(&link).is_err());
    }

    #[test]
    fn link_with_exactly_one_target_passes() {
        let to_patient = PatientLink::to_patient(Reference::to("Patient", "pt-2"), PatientLinkType::Refer);
        assert!(check_link(&to_patient).is_ok());

        let to_related = PatientLink::to_related_person(
            Reference::to("RelatedPerson", "rp-1"),
            PatientLinkType::Seealso,
        );
        assert!(check_link(&to_related).is_ok());
    }

    #[test]
    fn patient_pipeline_reaches_links() {
        let mut patient = Patient::with_id("pt-1");
        patient.link = vec![PatientLink::default()];
        assert!(matches!(
            patient.validate().unwrap_err(),
            ValidationError::ReferenceCardinality { .. }
        ));
    }
}
