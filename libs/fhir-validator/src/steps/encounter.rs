//! Encounter rules

use crate::error::{Result, ValidationError};
use crate::steps::{element, resource};
use crate::Validate;
use salus_models::resources::Encounter;

/// `class` has cardinality 1..*.
pub fn check_class(encounter: &Encounter) -> Result<()> {
    if encounter.class.is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: "Encounter.class".into(),
            condition: "cardinality is 1..*",
        });
    }
    Ok(())
}

/// A planned window must not end before it starts.
pub fn check_planned_dates(encounter: &Encounter) -> Result<()> {
    if let (Some(start), Some(end)) = (encounter.planned_start_date, encounter.planned_end_date) {
        if start > end {
            return Err(ValidationError::CrossFieldOrder {
                start: "Encounter.plannedStartDate",
                end: "Encounter.plannedEndDate",
            });
        }
    }
    Ok(())
}

/// A concluded encounter must record when it actually happened.
pub fn check_concluded_period(encounter: &Encounter) -> Result<()> {
    if encounter.status.is_concluded() && encounter.actual_period.is_none() {
        return Err(ValidationError::ConditionalRequirement {
            field: "Encounter.actualPeriod",
            requirement: "is required when status is completed or discharged",
        });
    }
    Ok(())
}

/// Each diagnosis must point at at least one condition.
pub fn check_diagnoses(encounter: &Encounter) -> Result<()> {
    for diagnosis in &encounter.diagnosis {
        element::check_backbone(&diagnosis.backbone, "Encounter.diagnosis")?;
        if diagnosis.condition.is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "Encounter.diagnosis.condition".into(),
                condition: "cardinality is 1..*",
            });
        }
    }
    Ok(())
}

impl Validate for Encounter {
    fn validate(&self) -> Result<()> {
        resource::check_domain(&self.domain, "Encounter")?;
        check_class(self)?;
        check_planned_dates(self)?;
        check_concluded_period(self)?;
        for participant in &self.participant {
            element::check_backbone(&participant.backbone, "Encounter.participant")?;
        }
        for reason in &self.reason {
            element::check_backbone(&reason.backbone, "Encounter.reason")?;
        }
        check_diagnoses(self)?;
        if let Some(admission) = &self.admission {
            element::check_backbone(&admission.backbone, "Encounter.admission")?;
        }
        for location in &self.location {
            element::check_backbone(&location.backbone, "Encounter.location")?;
        }
        Ok(())
    }
}
