#![allow(dead_code)]

use chrono::NaiveDate;
use ferrum_element::{CodeableConcept, HumanName, Quantity, Reference};
use ferrum_resources::{Observation, Patient};
use rust_decimal::Decimal;

pub fn heart_rate_code() -> CodeableConcept {
    CodeableConcept::of("http://loinc.org", "8867-4").unwrap()
}

pub fn bpm(value: i64) -> Quantity {
    Quantity::builder()
        .value(Decimal::new(value, 0))
        .unit("beats/min")
        .system("http://unitsofmeasure.org")
        .code("/min")
        .build()
        .unwrap()
}

pub fn ada() -> HumanName {
    HumanName::builder()
        .family("Lovelace")
        .add_given("Ada")
        .unwrap()
        .build()
        .unwrap()
}

pub fn sample_patient() -> Patient {
    Patient::builder()
        .id("p1")
        .active(true)
        .add_name(ada())
        .unwrap()
        .birth_date(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
        .build()
        .unwrap()
}

pub fn sample_observation() -> Observation {
    Observation::builder()
        .id("hr-1")
        .status("final")
        .code(heart_rate_code())
        .subject(Reference::local("Patient", "p1").unwrap())
        .value(bpm(72))
        .build()
        .unwrap()
}
