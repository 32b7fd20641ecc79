use ferrum_element::{walk, CodeableConcept, Element, Quantity, Visitor};
use ferrum_resources::Observation;
use rust_decimal::Decimal;

/// Prints one line per visited node, indented by depth.
struct Printer {
    depth: usize,
}

impl Visitor for Printer {
    fn start(&mut self, name: &str, index: Option<usize>, node: &dyn Element) {
        let indent = "  ".repeat(self.depth);
        match index {
            Some(i) => print!("{}{}[{}]: {}", indent, name, i, node.type_name()),
            None => print!("{}{}: {}", indent, name, node.type_name()),
        }
        match node.scalar() {
            Some(value) => println!(" = {}", value),
            None => println!(),
        }
        self.depth += 1;
    }

    fn end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Element) {
        self.depth -= 1;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let observation = Observation::builder()
        .id("hr-1")
        .status("final")
        .code(CodeableConcept::of("http://loinc.org", "8867-4")?)
        .value(
            Quantity::builder()
                .value(Decimal::new(72, 0))
                .unit("beats/min")
                .build()?,
        )
        .build()?;

    walk("Observation", &observation, &mut Printer { depth: 0 });
    Ok(())
}
