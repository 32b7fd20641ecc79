//! Contract tests over the datatype layer: builders, equality, hashing
//! and the validation battery, without any resource model in play.

use ferrum_element::{
    elements_equal, tree_hash, ChoiceValue, CodeableConcept, Coding, Error, Extension,
    HumanName, Identifier, Period, Quantity, Range, Ratio, Reference, Rule, ValidationMode,
};
use rust_decimal::Decimal;

#[test]
fn datatypes_round_trip_through_their_builders() {
    let quantity = Quantity::builder()
        .value(Decimal::new(985, 1))
        .unit("degF")
        .system("http://unitsofmeasure.org")
        .code("[degF]")
        .build()
        .unwrap();
    assert_eq!(quantity, quantity.to_builder().build().unwrap());

    let range = Range::builder()
        .low(Quantity::builder().value(Decimal::new(60, 0)).build().unwrap())
        .high(Quantity::builder().value(Decimal::new(100, 0)).build().unwrap())
        .build()
        .unwrap();
    assert_eq!(range, range.to_builder().build().unwrap());

    let ratio = Ratio::builder()
        .numerator(Quantity::builder().value(Decimal::ONE).build().unwrap())
        .denominator(Quantity::builder().value(Decimal::TWO).build().unwrap())
        .build()
        .unwrap();
    assert_eq!(ratio, ratio.to_builder().build().unwrap());

    let identifier = Identifier::builder()
        .system("http://example.org/mrn")
        .value("12345")
        .build()
        .unwrap();
    assert_eq!(identifier, identifier.to_builder().build().unwrap());
}

#[test]
fn extension_value_accepts_every_catalog_variant() {
    for value in [
        ChoiceValue::from(true),
        ChoiceValue::from(12),
        ChoiceValue::from("text"),
        ChoiceValue::from(Decimal::new(15, 1)),
        ChoiceValue::Quantity(Quantity::builder().value(Decimal::ONE).build().unwrap()),
        ChoiceValue::Reference(Reference::local("Patient", "1").unwrap()),
    ] {
        let ext = Extension::of("http://example.org/x", value);
        assert!(ext.is_ok());
    }
}

#[test]
fn nested_extension_violations_surface_with_their_path() {
    // An extension with no url, smuggled in unvalidated.
    let bad = Extension::builder()
        .value(true)
        .validation(ValidationMode::Disabled)
        .build()
        .unwrap();
    let err = Coding::builder()
        .code("final")
        .add_extension(bad)
        .unwrap()
        .build()
        .unwrap_err();
    let outcome = err.outcome().expect("validation failure");
    assert!(outcome
        .issues
        .iter()
        .any(|i| i.rule == Rule::RequiredField && i.path == "Coding.extension[0].url"));
}

#[test]
fn equality_is_structural_not_positional_in_lists() {
    let a = CodeableConcept::builder()
        .add_coding(Coding::builder().code("a").build().unwrap())
        .unwrap()
        .add_coding(Coding::builder().code("b").build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    let b = CodeableConcept::builder()
        .add_coding(Coding::builder().code("b").build().unwrap())
        .unwrap()
        .add_coding(Coding::builder().code("a").build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    // Same members, different order: not equal.
    assert_ne!(a, b);
}

#[test]
fn equality_and_hash_agree_across_separately_built_trees() {
    let build = || {
        HumanName::builder()
            .text("Ada Lovelace")
            .family("Lovelace")
            .add_given("Ada")
            .unwrap()
            .build()
            .unwrap()
    };
    let (a, b) = (build(), build());
    assert!(elements_equal(&a, &b));
    assert_eq!(tree_hash(&a), tree_hash(&b));
}

#[test]
fn different_types_never_compare_equal() {
    let coding = Coding::builder().code("x").build().unwrap();
    let concept = CodeableConcept::builder().text("x").build().unwrap();
    assert!(!elements_equal(&coding, &concept));
}

#[test]
fn decimal_equality_ignores_trailing_zeros() {
    let a = Quantity::builder().value(Decimal::new(10, 1)).build().unwrap();
    let b = Quantity::builder()
        .value(Decimal::new(100, 2))
        .build()
        .unwrap();
    // 1.0 == 1.00, structurally and in the hash.
    assert_eq!(a, b);
    assert_eq!(tree_hash(&a), tree_hash(&b));
}

#[test]
fn period_builds_from_offset_datetimes() {
    use chrono::{FixedOffset, TimeZone};
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let period = Period::builder()
        .start(tz.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap())
        .end(tz.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap())
        .build()
        .unwrap();
    assert!(period.start().is_some());
    assert_eq!(period, period.to_builder().build().unwrap());
}

#[test]
fn validation_never_mutates_the_candidate() {
    let reference = Reference::builder()
        .reference("Observation/1")
        .validation(ValidationMode::Disabled)
        .build()
        .unwrap();
    let before = tree_hash(&reference);
    // Running the battery over it leaves the node untouched.
    let _ = ferrum_element::validate_tree(
        "Reference",
        &reference,
        &ferrum_element::ValidatorSettings::default(),
    );
    assert_eq!(before, tree_hash(&reference));
}

#[test]
fn invalid_argument_and_validation_failed_are_distinct() {
    let append_err = HumanName::builder()
        .add_given(ferrum_element::FhirString::default())
        .unwrap_err();
    assert!(matches!(append_err, Error::InvalidArgument(_)));

    let build_err = Extension::builder().build().unwrap_err();
    assert!(matches!(build_err, Error::ValidationFailed(_)));
}
