//! Complex datatypes
//!
//! The general-purpose FHIR datatypes the runtime itself needs: extensions,
//! codings, quantities, references, narrative and metadata. Every type
//! follows the same pattern: private fields around an [`ElementCore`],
//! read-only accessors, an `Element` impl whose `fields()` lists children
//! in declaration order, and a staged builder that feeds the validation
//! engine on `build`.

use std::any::Any;

use crate::builder::{check_list_element, finish_build, ValidationMode};
use crate::choice::ChoiceValue;
use crate::element::{Element, ElementCore, Field};
use crate::element_eq;
use crate::error::Result;
use crate::primitives::{FhirCode, FhirDateTime, FhirDecimal, FhirString, FhirUri};

/// Key-qualified side-channel data attachable to any element. The `url`
/// names what the extension means; the value may be any catalog type.
#[derive(Debug, Clone, Default)]
pub struct Extension {
    core: ElementCore,
    url: Option<FhirUri>,
    value: Option<ChoiceValue>,
}

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    /// Shorthand for the common url-plus-value case.
    pub fn of(url: impl Into<FhirUri>, value: impl Into<ChoiceValue>) -> Result<Self> {
        Self::builder().url(url).value(value).build()
    }

    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            url: self.url.clone(),
            value: self.value.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn url(&self) -> Option<&FhirUri> {
        self.url.as_ref()
    }

    pub fn value(&self) -> Option<&ChoiceValue> {
        self.value.as_ref()
    }
}

impl Element for Extension {
    fn type_name(&self) -> &'static str {
        "Extension"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::required("url", self.url.as_ref()),
            Field::choice("value", self.value.as_ref(), ChoiceValue::ALL_VARIANTS),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct ExtensionBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    url: Option<FhirUri>,
    value: Option<ChoiceValue>,
    mode: ValidationMode,
}

impl ExtensionBuilder {
    crate::builder_common!();

    pub fn url(mut self, url: impl Into<FhirUri>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl Into<ChoiceValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn build(self) -> Result<Extension> {
        finish_build(
            Extension {
                core: ElementCore::new(self.id, self.extension),
                url: self.url,
                value: self.value,
            },
            self.mode,
        )
    }
}

/// A code taken from a code system.
#[derive(Debug, Clone, Default)]
pub struct Coding {
    core: ElementCore,
    system: Option<FhirUri>,
    code: Option<FhirCode>,
    display: Option<FhirString>,
}

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            system: self.system.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn system(&self) -> Option<&FhirUri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&FhirCode> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }
}

impl Element for Coding {
    fn type_name(&self) -> &'static str {
        "Coding"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("system", self.system.as_ref()),
            Field::optional("code", self.code.as_ref()),
            Field::optional("display", self.display.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct CodingBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    system: Option<FhirUri>,
    code: Option<FhirCode>,
    display: Option<FhirString>,
    mode: ValidationMode,
}

impl CodingBuilder {
    crate::builder_common!();

    pub fn system(mut self, system: impl Into<FhirUri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn code(mut self, code: impl Into<FhirCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn build(self) -> Result<Coding> {
        finish_build(
            Coding {
                core: ElementCore::new(self.id, self.extension),
                system: self.system,
                code: self.code,
                display: self.display,
            },
            self.mode,
        )
    }
}

/// A concept expressed as one or more codings plus optional free text.
#[derive(Debug, Clone, Default)]
pub struct CodeableConcept {
    core: ElementCore,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    /// Shorthand for a concept holding a single system/code pair.
    pub fn of(system: impl Into<FhirUri>, code: impl Into<FhirCode>) -> Result<Self> {
        let coding = Coding::builder().system(system).code(code).build()?;
        Self::builder().add_coding(coding)?.build()
    }

    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            coding: self.coding.clone(),
            text: self.text.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }
}

impl Element for CodeableConcept {
    fn type_name(&self) -> &'static str {
        "CodeableConcept"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::list("coding", &self.coding),
            Field::optional("text", self.text.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct CodeableConceptBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    coding: Vec<Coding>,
    text: Option<FhirString>,
    mode: ValidationMode,
}

impl CodeableConceptBuilder {
    crate::builder_common!();

    /// Append one coding. Empty codings are rejected.
    pub fn add_coding(mut self, coding: Coding) -> Result<Self> {
        check_list_element("coding", &coding)?;
        self.coding.push(coding);
        Ok(self)
    }

    /// Replace the coding list.
    pub fn coding(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding = coding.into_iter().collect();
        self
    }

    pub fn text(mut self, text: impl Into<FhirString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn build(self) -> Result<CodeableConcept> {
        finish_build(
            CodeableConcept {
                core: ElementCore::new(self.id, self.extension),
                coding: self.coding,
                text: self.text,
            },
            self.mode,
        )
    }
}

/// A measured amount.
#[derive(Debug, Clone, Default)]
pub struct Quantity {
    core: ElementCore,
    value: Option<FhirDecimal>,
    comparator: Option<FhirCode>,
    unit: Option<FhirString>,
    system: Option<FhirUri>,
    code: Option<FhirCode>,
}

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn value(&self) -> Option<&FhirDecimal> {
        self.value.as_ref()
    }

    pub fn comparator(&self) -> Option<&FhirCode> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&FhirUri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&FhirCode> {
        self.code.as_ref()
    }
}

impl Element for Quantity {
    fn type_name(&self) -> &'static str {
        "Quantity"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("value", self.value.as_ref()),
            Field::optional("comparator", self.comparator.as_ref()),
            Field::optional("unit", self.unit.as_ref()),
            Field::optional("system", self.system.as_ref()),
            Field::optional("code", self.code.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct QuantityBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    value: Option<FhirDecimal>,
    comparator: Option<FhirCode>,
    unit: Option<FhirString>,
    system: Option<FhirUri>,
    code: Option<FhirCode>,
    mode: ValidationMode,
}

impl QuantityBuilder {
    crate::builder_common!();

    pub fn value(mut self, value: impl Into<FhirDecimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn comparator(mut self, comparator: impl Into<FhirCode>) -> Self {
        self.comparator = Some(comparator.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<FhirString>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn system(mut self, system: impl Into<FhirUri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn code(mut self, code: impl Into<FhirCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn build(self) -> Result<Quantity> {
        finish_build(
            Quantity {
                core: ElementCore::new(self.id, self.extension),
                value: self.value,
                comparator: self.comparator,
                unit: self.unit,
                system: self.system,
                code: self.code,
            },
            self.mode,
        )
    }
}

/// A low/high pair of quantities.
#[derive(Debug, Clone, Default)]
pub struct Range {
    core: ElementCore,
    low: Option<Quantity>,
    high: Option<Quantity>,
}

impl Range {
    pub fn builder() -> RangeBuilder {
        RangeBuilder::default()
    }

    pub fn to_builder(&self) -> RangeBuilder {
        RangeBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            low: self.low.clone(),
            high: self.high.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn low(&self) -> Option<&Quantity> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&Quantity> {
        self.high.as_ref()
    }
}

impl Element for Range {
    fn type_name(&self) -> &'static str {
        "Range"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("low", self.low.as_ref()),
            Field::optional("high", self.high.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct RangeBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    low: Option<Quantity>,
    high: Option<Quantity>,
    mode: ValidationMode,
}

impl RangeBuilder {
    crate::builder_common!();

    pub fn low(mut self, low: Quantity) -> Self {
        self.low = Some(low);
        self
    }

    pub fn high(mut self, high: Quantity) -> Self {
        self.high = Some(high);
        self
    }

    pub fn build(self) -> Result<Range> {
        finish_build(
            Range {
                core: ElementCore::new(self.id, self.extension),
                low: self.low,
                high: self.high,
            },
            self.mode,
        )
    }
}

/// A numerator/denominator pair.
#[derive(Debug, Clone, Default)]
pub struct Ratio {
    core: ElementCore,
    numerator: Option<Quantity>,
    denominator: Option<Quantity>,
}

impl Ratio {
    pub fn builder() -> RatioBuilder {
        RatioBuilder::default()
    }

    pub fn to_builder(&self) -> RatioBuilder {
        RatioBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            numerator: self.numerator.clone(),
            denominator: self.denominator.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn numerator(&self) -> Option<&Quantity> {
        self.numerator.as_ref()
    }

    pub fn denominator(&self) -> Option<&Quantity> {
        self.denominator.as_ref()
    }
}

impl Element for Ratio {
    fn type_name(&self) -> &'static str {
        "Ratio"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("numerator", self.numerator.as_ref()),
            Field::optional("denominator", self.denominator.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct RatioBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    numerator: Option<Quantity>,
    denominator: Option<Quantity>,
    mode: ValidationMode,
}

impl RatioBuilder {
    crate::builder_common!();

    pub fn numerator(mut self, numerator: Quantity) -> Self {
        self.numerator = Some(numerator);
        self
    }

    pub fn denominator(mut self, denominator: Quantity) -> Self {
        self.denominator = Some(denominator);
        self
    }

    pub fn build(self) -> Result<Ratio> {
        finish_build(
            Ratio {
                core: ElementCore::new(self.id, self.extension),
                numerator: self.numerator,
                denominator: self.denominator,
            },
            self.mode,
        )
    }
}

/// A start/end time window.
#[derive(Debug, Clone, Default)]
pub struct Period {
    core: ElementCore,
    start: Option<FhirDateTime>,
    end: Option<FhirDateTime>,
}

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            start: self.start.clone(),
            end: self.end.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn start(&self) -> Option<&FhirDateTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&FhirDateTime> {
        self.end.as_ref()
    }
}

impl Element for Period {
    fn type_name(&self) -> &'static str {
        "Period"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("start", self.start.as_ref()),
            Field::optional("end", self.end.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct PeriodBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    start: Option<FhirDateTime>,
    end: Option<FhirDateTime>,
    mode: ValidationMode,
}

impl PeriodBuilder {
    crate::builder_common!();

    pub fn start(mut self, start: impl Into<FhirDateTime>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<FhirDateTime>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn build(self) -> Result<Period> {
        finish_build(
            Period {
                core: ElementCore::new(self.id, self.extension),
                start: self.start,
                end: self.end,
            },
            self.mode,
        )
    }
}

/// A business identifier scoped by a system.
#[derive(Debug, Clone, Default)]
pub struct Identifier {
    core: ElementCore,
    system: Option<FhirUri>,
    value: Option<FhirString>,
}

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            system: self.system.clone(),
            value: self.value.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn system(&self) -> Option<&FhirUri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }
}

impl Element for Identifier {
    fn type_name(&self) -> &'static str {
        "Identifier"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("system", self.system.as_ref()),
            Field::optional("value", self.value.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct IdentifierBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    system: Option<FhirUri>,
    value: Option<FhirString>,
    mode: ValidationMode,
}

impl IdentifierBuilder {
    crate::builder_common!();

    pub fn system(mut self, system: impl Into<FhirUri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn value(mut self, value: impl Into<FhirString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn build(self) -> Result<Identifier> {
        finish_build(
            Identifier {
                core: ElementCore::new(self.id, self.extension),
                system: self.system,
                value: self.value,
            },
            self.mode,
        )
    }
}

/// A human name, decomposed and/or as free text.
#[derive(Debug, Clone, Default)]
pub struct HumanName {
    core: ElementCore,
    text: Option<FhirString>,
    family: Option<FhirString>,
    given: Vec<FhirString>,
}

impl HumanName {
    pub fn builder() -> HumanNameBuilder {
        HumanNameBuilder::default()
    }

    pub fn to_builder(&self) -> HumanNameBuilder {
        HumanNameBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            text: self.text.clone(),
            family: self.family.clone(),
            given: self.given.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    pub fn family(&self) -> Option<&FhirString> {
        self.family.as_ref()
    }

    pub fn given(&self) -> &[FhirString] {
        &self.given
    }
}

impl Element for HumanName {
    fn type_name(&self) -> &'static str {
        "HumanName"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("text", self.text.as_ref()),
            Field::optional("family", self.family.as_ref()),
            Field::list("given", &self.given),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct HumanNameBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    text: Option<FhirString>,
    family: Option<FhirString>,
    given: Vec<FhirString>,
    mode: ValidationMode,
}

impl HumanNameBuilder {
    crate::builder_common!();

    pub fn text(mut self, text: impl Into<FhirString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn family(mut self, family: impl Into<FhirString>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Append one given name. Empty elements are rejected.
    pub fn add_given(mut self, given: impl Into<FhirString>) -> Result<Self> {
        let given = given.into();
        check_list_element("given", &given)?;
        self.given.push(given);
        Ok(self)
    }

    /// Replace the given-name list.
    pub fn given(mut self, given: impl IntoIterator<Item = FhirString>) -> Self {
        self.given = given.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<HumanName> {
        finish_build(
            HumanName {
                core: ElementCore::new(self.id, self.extension),
                text: self.text,
                family: self.family,
                given: self.given,
            },
            self.mode,
        )
    }
}

/// A pointer at another resource. The target is designated, never
/// dereferenced here; `target_kind` is the runtime tag the reference-target
/// rule checks against a field's whitelist.
#[derive(Debug, Clone, Default)]
pub struct Reference {
    core: ElementCore,
    reference: Option<FhirString>,
    target_type: Option<FhirUri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    /// Shorthand for a local literal reference, `Kind/id`.
    pub fn local(kind: &str, id: &str) -> Result<Self> {
        Self::builder().reference(format!("{}/{}", kind, id)).build()
    }

    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            reference: self.reference.clone(),
            target_type: self.target_type.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    pub fn target_type(&self) -> Option<&FhirUri> {
        self.target_type.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    /// The target kind this reference designates: the explicit `type` tag
    /// when present, otherwise the kind prefix of a local `Kind/id`
    /// literal. Absolute URLs and opaque literals yield nothing.
    pub fn target_kind(&self) -> Option<&str> {
        if let Some(kind) = self.target_type.as_ref().and_then(|t| t.value()) {
            return Some(kind);
        }
        let literal = self.reference.as_ref().and_then(|r| r.value())?;
        let (kind, rest) = literal.split_once('/')?;
        let looks_local = !kind.is_empty()
            && !rest.is_empty()
            && kind.chars().all(|c| c.is_ascii_alphanumeric())
            && !rest.contains('/');
        looks_local.then_some(kind)
    }
}

impl Element for Reference {
    fn type_name(&self) -> &'static str {
        "Reference"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("reference", self.reference.as_ref()),
            Field::optional("type", self.target_type.as_ref()),
            Field::optional("identifier", self.identifier.as_ref()),
            Field::optional("display", self.display.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct ReferenceBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    reference: Option<FhirString>,
    target_type: Option<FhirUri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
    mode: ValidationMode,
}

impl ReferenceBuilder {
    crate::builder_common!();

    pub fn reference(mut self, reference: impl Into<FhirString>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn target_type(mut self, target_type: impl Into<FhirUri>) -> Self {
        self.target_type = Some(target_type.into());
        self
    }

    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn build(self) -> Result<Reference> {
        finish_build(
            Reference {
                core: ElementCore::new(self.id, self.extension),
                reference: self.reference,
                target_type: self.target_type,
                identifier: self.identifier,
                display: self.display,
            },
            self.mode,
        )
    }
}

/// Human-readable summary of a resource. Both the generation status and
/// the markup are required.
#[derive(Debug, Clone, Default)]
pub struct Narrative {
    core: ElementCore,
    status: Option<FhirCode>,
    div: Option<FhirString>,
}

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            status: self.status.clone(),
            div: self.div.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn status(&self) -> Option<&FhirCode> {
        self.status.as_ref()
    }

    pub fn div(&self) -> Option<&FhirString> {
        self.div.as_ref()
    }
}

impl Element for Narrative {
    fn type_name(&self) -> &'static str {
        "Narrative"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::required("status", self.status.as_ref()),
            Field::required("div", self.div.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct NarrativeBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    status: Option<FhirCode>,
    div: Option<FhirString>,
    mode: ValidationMode,
}

impl NarrativeBuilder {
    crate::builder_common!();

    pub fn status(mut self, status: impl Into<FhirCode>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn div(mut self, div: impl Into<FhirString>) -> Self {
        self.div = Some(div.into());
        self
    }

    pub fn build(self) -> Result<Narrative> {
        finish_build(
            Narrative {
                core: ElementCore::new(self.id, self.extension),
                status: self.status,
                div: self.div,
            },
            self.mode,
        )
    }
}

/// Version and provenance metadata carried by a resource.
#[derive(Debug, Clone, Default)]
pub struct Meta {
    core: ElementCore,
    version_id: Option<FhirString>,
    last_updated: Option<FhirDateTime>,
    profile: Vec<FhirUri>,
}

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            id: self.core.id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            profile: self.profile.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn version_id(&self) -> Option<&FhirString> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&FhirDateTime> {
        self.last_updated.as_ref()
    }

    pub fn profile(&self) -> &[FhirUri] {
        &self.profile
    }
}

impl Element for Meta {
    fn type_name(&self) -> &'static str {
        "Meta"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("versionId", self.version_id.as_ref()),
            Field::optional("lastUpdated", self.last_updated.as_ref()),
            Field::list("profile", &self.profile),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct MetaBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    version_id: Option<FhirString>,
    last_updated: Option<FhirDateTime>,
    profile: Vec<FhirUri>,
    mode: ValidationMode,
}

impl MetaBuilder {
    crate::builder_common!();

    pub fn version_id(mut self, version_id: impl Into<FhirString>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<FhirDateTime>) -> Self {
        self.last_updated = Some(last_updated.into());
        self
    }

    /// Append one profile url. Empty elements are rejected.
    pub fn add_profile(mut self, profile: impl Into<FhirUri>) -> Result<Self> {
        let profile = profile.into();
        check_list_element("profile", &profile)?;
        self.profile.push(profile);
        Ok(self)
    }

    /// Replace the profile list.
    pub fn profile(mut self, profile: impl IntoIterator<Item = FhirUri>) -> Self {
        self.profile = profile.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Meta> {
        finish_build(
            Meta {
                core: ElementCore::new(self.id, self.extension),
                version_id: self.version_id,
                last_updated: self.last_updated,
                profile: self.profile,
            },
            self.mode,
        )
    }
}

element_eq!(
    Extension,
    Coding,
    CodeableConcept,
    Quantity,
    Range,
    Ratio,
    Period,
    Identifier,
    HumanName,
    Reference,
    Narrative,
    Meta,
);
