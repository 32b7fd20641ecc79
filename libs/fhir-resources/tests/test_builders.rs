//! Builder discipline: staging, rebuilds, list setters, the validation
//! switch and contained resources.

use ferrum_element::{
    tree_hash, Error, HumanName, Narrative, Reference, ValidationMode,
};
use ferrum_resources::{AnyResource, Observation, Organization, Patient, Resource};

mod test_support;

#[test]
fn patient_round_trips_through_its_builder() {
    let patient = test_support::sample_patient();
    let rebuilt = patient.to_builder().build().unwrap();
    assert_eq!(patient, rebuilt);
    assert_eq!(tree_hash(&patient), tree_hash(&rebuilt));
}

#[test]
fn observation_round_trips_through_its_builder() {
    let observation = test_support::sample_observation();
    let rebuilt = observation.to_builder().build().unwrap();
    assert_eq!(observation, rebuilt);
    assert_eq!(tree_hash(&observation), tree_hash(&rebuilt));
}

#[test]
fn organization_round_trips_through_its_builder() {
    let organization = Organization::builder()
        .id("org1")
        .name("Example Hospital")
        .part_of(Reference::local("Organization", "parent").unwrap())
        .build()
        .unwrap();
    let rebuilt = organization.to_builder().build().unwrap();
    assert_eq!(organization, rebuilt);
}

#[test]
fn rebuild_can_change_one_field() {
    let patient = test_support::sample_patient();
    let inactive = patient.to_builder().active(false).build().unwrap();
    assert_ne!(patient, inactive);
    assert_eq!(inactive.active().unwrap().value(), Some(false));
    // The source is untouched.
    assert_eq!(patient.active().unwrap().value(), Some(true));
}

#[test]
fn rebuild_does_not_alias_list_storage() {
    let patient = test_support::sample_patient();
    let extended = patient
        .to_builder()
        .add_name(HumanName::builder().family("Byron").build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(patient.name().len(), 1);
    assert_eq!(extended.name().len(), 2);
}

#[test]
fn append_and_replace_yield_equal_resources() {
    let a = Patient::builder()
        .id("p")
        .add_name(test_support::ada())
        .unwrap()
        .add_name(HumanName::builder().family("Byron").build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    let b = Patient::builder()
        .id("p")
        .name(vec![
            test_support::ada(),
            HumanName::builder().family("Byron").build().unwrap(),
        ])
        .build()
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(tree_hash(&a), tree_hash(&b));
}

#[test]
fn append_rejects_an_empty_element_eagerly() {
    let err = Patient::builder()
        .add_name(HumanName::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn disabled_validation_builds_an_invalid_resource() {
    let observation = Observation::builder()
        .validation(ValidationMode::Disabled)
        .build()
        .unwrap();
    assert!(observation.status().is_none());
    // The escape hatch is per-builder: a fresh builder validates again.
    assert!(Observation::builder().build().is_err());
}

#[test]
fn contained_resources_stage_and_read_back() {
    let org = Organization::builder()
        .id("org1")
        .name("Example Hospital")
        .build()
        .unwrap();
    let patient = Patient::builder()
        .id("p1")
        .active(true)
        .add_contained(org.clone())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(patient.contained().len(), 1);
    assert_eq!(patient.contained()[0], AnyResource::Organization(org));
}

#[test]
fn empty_contained_resource_is_rejected_eagerly() {
    let err = Patient::builder()
        .add_contained(Organization::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn narrative_and_metadata_slots_survive_a_rebuild() {
    let narrative = Narrative::builder()
        .status("generated")
        .div("<div>Ada Lovelace</div>")
        .build()
        .unwrap();
    let patient = Patient::builder()
        .id("p1")
        .language("en")
        .text(narrative)
        .active(true)
        .build()
        .unwrap();
    let rebuilt = patient.to_builder().build().unwrap();
    assert_eq!(rebuilt.language(), Some("en"));
    assert!(rebuilt.narrative().is_some());
    assert_eq!(patient, rebuilt);
}
