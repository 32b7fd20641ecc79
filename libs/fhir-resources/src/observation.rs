//! Observation resource

use std::any::Any;

use ferrum_element::{
    check_list_element, finish_build, ChoiceValue, CodeableConcept, Element, ElementCore,
    Extension, Field, FhirCode, Meta, Narrative, Reference, Result, ValidationMode,
};

use crate::resource::{resource_builder_common, AnyResource, Resource, ResourceHeader};

/// A measurement or assertion made about a subject.
#[derive(Debug, Clone, Default)]
pub struct Observation {
    core: ElementCore,
    header: ResourceHeader,
    status: Option<FhirCode>,
    code: Option<CodeableConcept>,
    subject: Option<Reference>,
    effective: Option<ChoiceValue>,
    value: Option<ChoiceValue>,
    component: Vec<ObservationComponent>,
}

impl Observation {
    /// Allowed target kinds for `subject`.
    pub const SUBJECT_TARGETS: &'static [&'static str] =
        &["Patient", "Group", "Device", "Location"];

    /// Allowed variants for `effective[x]`.
    pub const EFFECTIVE_VARIANTS: &'static [&'static str] = &["dateTime", "Period"];

    /// Allowed variants for `value[x]`, shared with components.
    pub const VALUE_VARIANTS: &'static [&'static str] = &[
        "Quantity",
        "CodeableConcept",
        "string",
        "boolean",
        "integer",
        "Range",
        "Ratio",
        "time",
        "dateTime",
        "Period",
    ];

    pub fn builder() -> ObservationBuilder {
        ObservationBuilder::default()
    }

    /// Seed a builder from this resource's current values; list fields
    /// are copied, never aliased.
    pub fn to_builder(&self) -> ObservationBuilder {
        ObservationBuilder {
            id: self.logical_id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            meta: self.header.meta.clone(),
            language: self.header.language.clone(),
            text: self.header.text.clone(),
            contained: self.header.contained.clone(),
            status: self.status.clone(),
            code: self.code.clone(),
            subject: self.subject.clone(),
            effective: self.effective.clone(),
            value: self.value.clone(),
            component: self.component.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn status(&self) -> Option<&FhirCode> {
        self.status.as_ref()
    }

    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn effective(&self) -> Option<&ChoiceValue> {
        self.effective.as_ref()
    }

    pub fn value(&self) -> Option<&ChoiceValue> {
        self.value.as_ref()
    }

    pub fn component(&self) -> &[ObservationComponent] {
        &self.component
    }
}

impl Element for Observation {
    fn type_name(&self) -> &'static str {
        "Observation"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let mut fields = self.header.fields();
        fields.extend([
            Field::required("status", self.status.as_ref()),
            Field::required("code", self.code.as_ref()),
            Field::reference("subject", self.subject.as_ref(), Self::SUBJECT_TARGETS),
            Field::choice("effective", self.effective.as_ref(), Self::EFFECTIVE_VARIANTS),
            Field::choice("value", self.value.as_ref(), Self::VALUE_VARIANTS),
            Field::list("component", &self.component),
        ]);
        fields
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Resource for Observation {
    fn header(&self) -> &ResourceHeader {
        &self.header
    }
}

#[derive(Debug, Default)]
pub struct ObservationBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    meta: Option<Meta>,
    language: Option<FhirCode>,
    text: Option<Narrative>,
    contained: Vec<AnyResource>,
    status: Option<FhirCode>,
    code: Option<CodeableConcept>,
    subject: Option<Reference>,
    effective: Option<ChoiceValue>,
    value: Option<ChoiceValue>,
    component: Vec<ObservationComponent>,
    mode: ValidationMode,
}

impl ObservationBuilder {
    ferrum_element::builder_common!();
    resource_builder_common!();

    pub fn status(mut self, status: impl Into<FhirCode>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    pub fn subject(mut self, subject: Reference) -> Self {
        self.subject = Some(subject);
        self
    }

    /// `effective[x]`: dateTime or Period.
    pub fn effective(mut self, effective: impl Into<ChoiceValue>) -> Self {
        self.effective = Some(effective.into());
        self
    }

    /// `value[x]`.
    pub fn value(mut self, value: impl Into<ChoiceValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Append one component. Empty components are rejected.
    pub fn add_component(mut self, component: ObservationComponent) -> Result<Self> {
        check_list_element("component", &component)?;
        self.component.push(component);
        Ok(self)
    }

    /// Replace the component list.
    pub fn component(
        mut self,
        component: impl IntoIterator<Item = ObservationComponent>,
    ) -> Self {
        self.component = component.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Observation> {
        finish_build(
            Observation {
                core: ElementCore::new(None, self.extension),
                header: ResourceHeader::from_parts(
                    self.id,
                    self.meta,
                    self.language,
                    self.text,
                    self.contained,
                ),
                status: self.status,
                code: self.code,
                subject: self.subject,
                effective: self.effective,
                value: self.value,
                component: self.component,
            },
            self.mode,
        )
    }
}

/// One code/value pair nested inside an observation.
#[derive(Debug, Clone, Default)]
pub struct ObservationComponent {
    core: ElementCore,
    code: Option<CodeableConcept>,
    value: Option<ChoiceValue>,
}

impl ObservationComponent {
    pub fn builder() -> ObservationComponentBuilder {
        ObservationComponentBuilder::default()
    }

    pub fn to_builder(&self) -> ObservationComponentBuilder {
        ObservationComponentBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            code: self.code.clone(),
            value: self.value.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    pub fn value(&self) -> Option<&ChoiceValue> {
        self.value.as_ref()
    }
}

impl Element for ObservationComponent {
    fn type_name(&self) -> &'static str {
        "Observation.component"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::required("code", self.code.as_ref()),
            Field::choice("value", self.value.as_ref(), Observation::VALUE_VARIANTS),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct ObservationComponentBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    code: Option<CodeableConcept>,
    value: Option<ChoiceValue>,
    mode: ValidationMode,
}

impl ObservationComponentBuilder {
    ferrum_element::builder_common!();

    pub fn code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    /// `value[x]`.
    pub fn value(mut self, value: impl Into<ChoiceValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn build(self) -> Result<ObservationComponent> {
        finish_build(
            ObservationComponent {
                core: ElementCore::new(self.id, self.extension),
                code: self.code,
                value: self.value,
            },
            self.mode,
        )
    }
}

ferrum_element::element_eq!(Observation, ObservationComponent);

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_element::{Quantity, Rule};
    use rust_decimal::Decimal;

    fn loinc_heart_rate() -> CodeableConcept {
        CodeableConcept::of("http://loinc.org", "8867-4").unwrap()
    }

    #[test]
    fn minimal_observation_builds_with_required_fields_only() {
        let obs = Observation::builder()
            .status("final")
            .code(loinc_heart_rate())
            .build()
            .unwrap();
        assert_eq!(obs.status().unwrap().value(), Some("final"));
        assert!(!obs.is_empty());
    }

    #[test]
    fn missing_status_names_the_field() {
        let err = Observation::builder()
            .code(loinc_heart_rate())
            .build()
            .unwrap_err();
        let outcome = err.outcome().expect("validation failure");
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.rule == Rule::RequiredField && i.path == "Observation.status"));
    }

    #[test]
    fn quantity_value_is_in_the_declared_set() {
        let quantity = Quantity::builder()
            .value(Decimal::new(72, 0))
            .unit("beats/min")
            .build()
            .unwrap();
        let obs = Observation::builder()
            .status("final")
            .code(loinc_heart_rate())
            .value(quantity)
            .build()
            .unwrap();
        assert_eq!(obs.value().unwrap().type_name(), "Quantity");
    }

    #[test]
    fn component_requires_its_code() {
        let err = ObservationComponent::builder().value(5).build().unwrap_err();
        let outcome = err.outcome().expect("validation failure");
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.path == "Observation.component.code"));
    }

    #[test]
    fn deep_violation_carries_the_full_path() {
        // A Reference is outside value[x]'s variant set; stage the
        // component unvalidated so the parent run is what reports it.
        let component = ObservationComponent::builder()
            .code(loinc_heart_rate())
            .value(ChoiceValue::Reference(
                Reference::local("Patient", "1").unwrap(),
            ))
            .validation(ValidationMode::Disabled)
            .build()
            .unwrap();
        let err = Observation::builder()
            .status("final")
            .code(loinc_heart_rate())
            .component(vec![component])
            .build()
            .unwrap_err();
        let outcome = err.outcome().expect("validation failure");
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.rule == Rule::ChoiceVariant
                && i.path == "Observation.component[0].value"));
    }
}
