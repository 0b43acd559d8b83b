//! End-to-end invariant scenarios across decode, validation and
//! serialization.

use salus_models::resources::*;
use salus_models::{
    AnyResource, CodeableConcept, Coding, Error, Identifier, Meta, Period, Quantity, Reference,
};
use salus_validator::{validate_any, ContainmentClause, Validate, ValidationError};
use serde_json::{json, Value};

fn ambulatory() -> CodeableConcept {
    CodeableConcept::coded("http://terminology.hl7.org/CodeSystem/v3-ActCode", "AMB")
}

// ---------------------------------------------------------------------------
// Choice exclusivity, general law: every group rejects a payload with two
// populated branches at the decode boundary, through one shared check.
// ---------------------------------------------------------------------------

#[test]
fn choice_exclusivity_holds_across_every_group() {
    let payloads: Vec<Value> = vec![
        // Extension.value[x]
        json!({
            "resourceType": "Patient",
            "id": "pt-1",
            "extension": [{"url": "http://example.org/ext", "valueString": "a", "valueInteger": 1}]
        }),
        // Observation.effective[x]
        json!({
            "resourceType": "Observation",
            "status": "final",
            "code": {"text": "BP"},
            "effectiveDateTime": "2025-02-01T08:30:00Z",
            "effectiveInstant": "2025-02-01T08:30:00Z"
        }),
        // Observation.value[x]
        json!({
            "resourceType": "Observation",
            "status": "final",
            "code": {"text": "BP"},
            "valueBoolean": true,
            "valueInteger": 2
        }),
        // Observation.component.value[x]
        json!({
            "resourceType": "Observation",
            "status": "final",
            "code": {"text": "BP"},
            "component": [{"code": {"text": "sys"}, "valueString": "120", "valueInteger": 120}]
        }),
        // Patient.deceased[x]
        json!({
            "resourceType": "Patient",
            "deceasedBoolean": false,
            "deceasedDateTime": "2024-01-01T00:00:00Z"
        }),
        // Patient.multipleBirth[x]
        json!({
            "resourceType": "Patient",
            "multipleBirthBoolean": true,
            "multipleBirthInteger": 3
        }),
        // Practitioner.deceased[x]
        json!({
            "resourceType": "Practitioner",
            "deceasedBoolean": true,
            "deceasedDateTime": "2024-01-01T00:00:00Z"
        }),
    ];

    for payload in payloads {
        let err = AnyResource::from_value(&payload).unwrap_err();
        assert!(
            matches!(err, Error::ChoiceExclusivity { .. }),
            "expected choice failure for {payload}, got {err:?}"
        );
    }

    // CanonicalResource.versionAlgorithm[x]
    let err = salus_models::CanonicalResource::from_value(&json!({
        "status": "active",
        "versionAlgorithmString": "semver",
        "versionAlgorithmCoding": {"code": "semver"}
    }))
    .unwrap_err();
    assert!(matches!(err, Error::ChoiceExclusivity { .. }));
}

#[test]
fn single_branch_payloads_decode_and_validate() {
    let obs = AnyResource::from_value(&json!({
        "resourceType": "Observation",
        "id": "obs-1",
        "status": "final",
        "code": {"coding": [{"system": "http://loinc.org", "code": "29463-7"}]},
        "valueQuantity": {"value": 72.4, "unit": "kg", "system": "http://unitsofmeasure.org", "code": "kg"}
    }))
    .unwrap();
    assert!(validate_any(&obs).is_ok());
}

// ---------------------------------------------------------------------------
// Containment exclusion law
// ---------------------------------------------------------------------------

fn encounter_containing(contained: AnyResource) -> Encounter {
    let mut encounter = Encounter::new(EncounterStatus::Planned, ambulatory());
    encounter.domain.contained.push(contained);
    encounter
}

#[test]
fn contained_resources_cannot_nest() {
    let mut inner = Organization::named("Inner Lab");
    inner.domain.contained.push(AnyResource::Patient(Patient::default()));

    let encounter = encounter_containing(AnyResource::Organization(inner));
    assert_eq!(
        encounter.validate().unwrap_err(),
        ValidationError::ContainmentViolation {
            clause: ContainmentClause::NestedContainment
        }
    );
}

#[test]
fn contained_resources_cannot_carry_version_metadata() {
    let mut contained = Organization::named("Lab");
    contained.domain.resource.meta = Some(Meta {
        last_updated: Some("2025-03-01T00:00:00Z".parse().unwrap()),
        ..Default::default()
    });

    let encounter = encounter_containing(AnyResource::Organization(contained));
    assert_eq!(
        encounter.validate().unwrap_err(),
        ValidationError::ContainmentViolation {
            clause: ContainmentClause::VersionedMeta
        }
    );
}

#[test]
fn contained_resources_cannot_carry_security_labels() {
    let mut contained = Organization::named("Lab");
    contained.domain.resource.meta = Some(Meta {
        security: vec![Coding::new(
            "http://terminology.hl7.org/CodeSystem/v3-Confidentiality",
            "R",
        )],
        ..Default::default()
    });

    let encounter = encounter_containing(AnyResource::Organization(contained));
    assert!(matches!(
        encounter.validate().unwrap_err(),
        ValidationError::ContainmentViolation {
            clause: ContainmentClause::SecurityLabels
        }
    ));
}

#[test]
fn contained_resources_are_validated_recursively() {
    // the contained organization violates its own identity rule
    let encounter = encounter_containing(AnyResource::Organization(Organization::empty()));
    assert_eq!(
        encounter.validate().unwrap_err(),
        ValidationError::IdentityIncomplete { resource: "Organization" }
    );
}

#[test]
fn clean_containment_passes() {
    let encounter = encounter_containing(AnyResource::Organization(Organization::named("Lab")));
    assert!(encounter.validate().is_ok());
}

// ---------------------------------------------------------------------------
// Scenario: Encounter date order
// ---------------------------------------------------------------------------

#[test]
fn encounter_planned_dates_scenario() {
    let mut encounter = Encounter::new(EncounterStatus::Planned, ambulatory());
    encounter.planned_start_date = Some("2025-01-10T00:00:00Z".parse().unwrap());
    encounter.planned_end_date = Some("2025-01-05T00:00:00Z".parse().unwrap());
    assert!(matches!(
        encounter.validate().unwrap_err(),
        ValidationError::CrossFieldOrder { .. }
    ));

    std::mem::swap(&mut encounter.planned_start_date, &mut encounter.planned_end_date);
    assert!(encounter.validate().is_ok());
}

// ---------------------------------------------------------------------------
// Scenario: Observation value / dataAbsentReason conflict
// ---------------------------------------------------------------------------

#[test]
fn observation_value_absent_reason_scenario() {
    let mut obs = Observation::new(
        ObservationStatus::Final,
        CodeableConcept::coded("http://loinc.org", "8302-2"),
    );
    obs.domain.resource.id = Some("obs-1".into());
    obs.value = Some(ObservationValue::String("Normal".into()));
    obs.data_absent_reason = Some(CodeableConcept::coded(
        "http://terminology.hl7.org/CodeSystem/data-absent-reason",
        "unknown",
    ));

    assert!(matches!(
        obs.validate().unwrap_err(),
        ValidationError::ConditionalRequirement { field: "Observation.dataAbsentReason", .. }
    ));

    obs.data_absent_reason = None;
    assert!(obs.validate().is_ok());
}

// ---------------------------------------------------------------------------
// Scenario: Organization identity
// ---------------------------------------------------------------------------

#[test]
fn organization_identity_scenario() {
    let mut org = Organization::empty();
    assert_eq!(
        org.validate().unwrap_err(),
        ValidationError::IdentityIncomplete { resource: "Organization" }
    );

    org.name = Some("Salus General".into());
    assert!(org.validate().is_ok());

    org.name = None;
    org.identifier = vec![Identifier::new("http://example.com/orgs", "42")];
    assert!(org.validate().is_ok());
}

// ---------------------------------------------------------------------------
// Scenario: PatientLink cardinality
// ---------------------------------------------------------------------------

#[test]
fn patient_link_cardinality_scenario() {
    let mut patient = Patient::with_id("pt-1");
    patient.link = vec![PatientLink {
        type_: Some(PatientLinkType::Refer),
        ..Default::default()
    }];
    assert!(matches!(
        patient.validate().unwrap_err(),
        ValidationError::ReferenceCardinality { .. }
    ));

    patient.link = vec![PatientLink::to_patient(
        Reference::to("Patient", "pt-2"),
        PatientLinkType::Refer,
    )];
    assert!(patient.validate().is_ok());

    patient.link = vec![PatientLink::to_related_person(
        Reference::to("RelatedPerson", "rp-1"),
        PatientLinkType::Seealso,
    )];
    assert!(patient.validate().is_ok());
}

// ---------------------------------------------------------------------------
// Round-trip serialization: exactly the populated keys, nothing else
// ---------------------------------------------------------------------------

fn sorted_keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

#[test]
fn serialization_emits_exactly_the_populated_keys() {
    let mut obs = Observation::new(
        ObservationStatus::Final,
        CodeableConcept::coded("http://loinc.org", "29463-7"),
    );
    obs.domain.resource.id = Some("obs-1".into());
    obs.subject = Some(Reference::to("Patient", "pt-1"));
    obs.effective = Some(ObservationEffective::DateTime("2025-02-01T08:30:00Z".parse().unwrap()));
    obs.value = Some(ObservationValue::Quantity(Quantity::ucum("72.4".parse().unwrap(), "kg")));
    obs.interpretation = vec![CodeableConcept::text("normal")];

    let wire = obs.to_value().unwrap();
    assert_eq!(
        sorted_keys(&wire),
        vec![
            "code",
            "effectiveDateTime",
            "id",
            "interpretation",
            "resourceType",
            "status",
            "subject",
            "valueQuantity",
        ]
    );

    // references stay literal
    assert_eq!(wire["subject"], json!({"reference": "Patient/pt-1"}));

    // and the document decodes back to an equal value
    let back = Observation::from_value(&wire).unwrap();
    assert_eq!(back, obs);
}

#[test]
fn encounter_serialization_omits_empty_collections() {
    let mut encounter = Encounter::new(EncounterStatus::InProgress, ambulatory());
    encounter.domain.resource.id = Some("enc-1".into());
    encounter.subject = Some(Reference::to("Patient", "pt-1"));
    encounter.actual_period = Some(Period::from("2025-02-01T08:00:00Z".parse().unwrap()));

    let wire = encounter.to_value().unwrap();
    assert_eq!(
        sorted_keys(&wire),
        vec!["actualPeriod", "class", "id", "resourceType", "status", "subject"]
    );
}

// ---------------------------------------------------------------------------
// Read-endpoint boundary: searchset bundles
// ---------------------------------------------------------------------------

#[test]
fn searchset_bundle_wraps_serialized_resources() {
    let mut patient = Patient::with_id("pt-1");
    patient.active = Some(true);

    let bundle = salus_models::Bundle::searchset(vec![
        AnyResource::Patient(patient),
        AnyResource::Organization(Organization::named("Salus Clinic")),
    ]);
    let wire = bundle.to_value().unwrap();

    assert_eq!(wire["resourceType"], "Bundle");
    assert_eq!(wire["type"], "searchset");
    assert_eq!(wire["total"], 2);
    assert_eq!(wire["entry"][0]["resource"]["resourceType"], "Patient");
    assert_eq!(wire["entry"][0]["fullUrl"], "Patient/pt-1");
    assert_eq!(wire["entry"][1]["resource"]["name"], "Salus Clinic");
}
