use ferrum_element::{CodeableConcept, Quantity, Reference};
use ferrum_resources::{Observation, Patient, Resource};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example 1: build a patient through its staged builder
    let patient = Patient::builder()
        .id("p1")
        .active(true)
        .add_name(
            ferrum_element::HumanName::builder()
                .family("Lovelace")
                .add_given("Ada")?
                .build()?,
        )?
        .build()?;
    println!("built {} {}", patient.resource_type(), patient.logical_id().unwrap());

    // Example 2: an observation pointing at the patient
    let observation = Observation::builder()
        .id("hr-1")
        .status("final")
        .code(CodeableConcept::of("http://loinc.org", "8867-4")?)
        .subject(Reference::local("Patient", "p1")?)
        .value(
            Quantity::builder()
                .value(Decimal::new(72, 0))
                .unit("beats/min")
                .build()?,
        )
        .build()?;
    println!(
        "observation value is a {}",
        observation.value().unwrap().type_name()
    );

    // Example 3: validation failures carry rule ids and field paths
    let invalid = Observation::builder().id("broken").build();
    match invalid {
        Ok(_) => println!("should not happen"),
        Err(e) => {
            println!("caught expected error: {}", e);
            if let Some(outcome) = e.outcome() {
                println!(
                    "as OperationOutcome: {}",
                    serde_json::to_string_pretty(&outcome.to_operation_outcome())?
                );
            }
        }
    }

    // Example 4: rebuilding from an existing resource preserves equality
    let rebuilt = observation.to_builder().build()?;
    assert_eq!(observation, rebuilt);
    println!("round-trip preserved equality");

    Ok(())
}
