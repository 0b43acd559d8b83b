//! Observation rules
//!
//! Choice exclusivity for `effective[x]` and `value[x]` is type-level; what
//! remains at runtime is the contradiction between carrying a value and a
//! reason for its absence. Unlike the relational ancestor of this rule, the
//! check does not wait for a stored identity: the value and the absence
//! reason are both in memory, so it runs on every validation.

use crate::error::{Result, ValidationError};
use crate::steps::{element, resource};
use crate::Validate;
use salus_models::resources::{Observation, ObservationComponent};

/// `dataAbsentReason` is only meaningful when no value is present.
pub fn check_absent_reason(observation: &Observation) -> Result<()> {
    if observation.value.is_some() && observation.data_absent_reason.is_some() {
        return Err(ValidationError::ConditionalRequirement {
            field: "Observation.dataAbsentReason",
            requirement: "shall only be present if value[x] is absent",
        });
    }
    Ok(())
}

/// The same contradiction rule, applied to a component's own value slot.
pub fn check_component(component: &ObservationComponent) -> Result<()> {
    element::check_backbone(&component.backbone, "Observation.component")?;
    if component.value.is_some() && component.data_absent_reason.is_some() {
        return Err(ValidationError::ConditionalRequirement {
            field: "Observation.component.dataAbsentReason",
            requirement: "shall only be present if value[x] is absent",
        });
    }
    Ok(())
}

impl Validate for Observation {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "Observation")?;
        check_absent_reason(self)?;
        for component in &self.component {
            check_component(component)?;
        }
        for range in &self.reference_range {
            element::check_backbone(&range.backbone, "Observation.referenceRange")?;
        }
        for trigger in &self.triggered_by {
            element::check_backbone(&trigger.backbone, "Observation.triggeredBy")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salus_models::resources::{ObservationStatus, ObservationValue};
    use salus_models::CodeableConcept;

    fn final_observation() -> Observation {
        Observation::new(
            ObservationStatus::Final,
            CodeableConcept::coded("http://loinc.org", "8302-2"),
        )
    }

    #[test]
    fn value_and_absent_reason_conflict() {
        let mut obs = final_observation();
        obs.domain.resource.id = Some("obs-1".into());
        obs.value = Some(ObservationValue::String("Normal".into()));
        obs.data_absent_reason = Some(CodeableConcept::coded(
            "http://terminology.hl7.org/CodeSystem/data-absent-reason",
            "unknown",
        ));
        assert_eq!(
            obs.validate().unwrap_err(),
            ValidationError::ConditionalRequirement {
                field: "Observation.dataAbsentReason",
                requirement: "shall only be present if value[x] is absent",
            }
        );
    }

    #[test]
    fn absent_reason_without_value_is_fine() {
        let mut obs = final_observation();
        obs.data_absent_reason = Some(CodeableConcept::text("specimen unsatisfactory"));
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn component_conflict_is_independent_of_parent() {
        let mut obs = final_observation();
        let mut component = ObservationComponent::new(CodeableConcept::coded("http://loinc.org", "8480-6"));
        component.value = Some(ObservationValue::Integer(120));
        component.data_absent_reason = Some(CodeableConcept::text("n/a"));
        obs.component.push(component);

        assert!(matches!(
            obs.validate().unwrap_err(),
            ValidationError::ConditionalRequirement {
                field: "Observation.component.dataAbsentReason",
                ..
            }
        ));
    }
}
