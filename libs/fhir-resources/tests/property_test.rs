//! Property-based tests using QuickCheck

use ferrum_element::{tree_hash, HumanName};
use ferrum_resources::Patient;
use quickcheck::{quickcheck, TestResult};

fn build_name(family: &Option<String>, given: &[String]) -> Result<HumanName, ferrum_element::Error> {
    let mut builder = HumanName::builder();
    if let Some(f) = family {
        builder = builder.family(f.as_str());
    }
    for g in given {
        builder = builder.add_given(g.as_str())?;
    }
    builder.build()
}

/// Property: any buildable name survives builder round-trips with
/// equality and hash intact.
#[test]
fn prop_human_name_round_trip() {
    fn prop(family: Option<String>, given: Vec<String>) -> TestResult {
        let name = match build_name(&family, &given) {
            Ok(name) => name,
            // Nothing staged at all is rejected as meaningless; that
            // case is covered by the validation tests.
            Err(_) => return TestResult::discard(),
        };
        let rebuilt = name.to_builder().build().unwrap();
        TestResult::from_bool(name == rebuilt && tree_hash(&name) == tree_hash(&rebuilt))
    }
    quickcheck(prop as fn(Option<String>, Vec<String>) -> TestResult);
}

/// Property: the same staging inputs always produce equal resources with
/// equal hashes, run after run.
#[test]
fn prop_identical_inputs_build_identical_patients() {
    fn prop(id: String, active: bool, family: Option<String>, given: Vec<String>) -> TestResult {
        let build = || -> Result<Patient, ferrum_element::Error> {
            let mut builder = Patient::builder().active(active);
            if !id.is_empty() {
                builder = builder.id(id.as_str());
            }
            if let Ok(name) = build_name(&family, &given) {
                builder = builder.add_name(name)?;
            }
            builder.build()
        };
        let (a, b) = match (build(), build()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return TestResult::discard(),
        };
        TestResult::from_bool(a == b && tree_hash(&a) == tree_hash(&b))
    }
    quickcheck(prop as fn(String, bool, Option<String>, Vec<String>) -> TestResult);
}

/// Property: appending one by one and replacing with the whole sequence
/// stage the same list.
#[test]
fn prop_append_equals_replace() {
    fn prop(given: Vec<String>) -> TestResult {
        let mut appended = HumanName::builder().family("X");
        for g in &given {
            appended = match appended.add_given(g.as_str()) {
                Ok(b) => b,
                Err(_) => return TestResult::discard(),
            };
        }
        let appended = appended.build().unwrap();
        let replaced = HumanName::builder()
            .family("X")
            .given(given.iter().map(|g| g.as_str().into()))
            .build()
            .unwrap();
        TestResult::from_bool(appended == replaced)
    }
    quickcheck(prop as fn(Vec<String>) -> TestResult);
}
