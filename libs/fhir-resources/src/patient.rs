//! Patient resource

use std::any::Any;

use ferrum_element::{
    check_list_element, finish_build, ChoiceValue, Element, ElementCore, Extension, Field,
    FhirBoolean, FhirCode, FhirDate, HumanName, Meta, Narrative, Reference, Result,
    ValidationMode,
};

use crate::resource::{resource_builder_common, AnyResource, Resource, ResourceHeader};

/// Demographics and administrative information about a person receiving
/// care.
#[derive(Debug, Clone, Default)]
pub struct Patient {
    core: ElementCore,
    header: ResourceHeader,
    active: Option<FhirBoolean>,
    name: Vec<HumanName>,
    birth_date: Option<FhirDate>,
    deceased: Option<ChoiceValue>,
    managing_organization: Option<Reference>,
}

impl Patient {
    /// Allowed variants for `deceased[x]`.
    pub const DECEASED_VARIANTS: &'static [&'static str] = &["boolean", "dateTime"];

    /// Allowed target kinds for `managingOrganization`.
    pub const MANAGING_ORGANIZATION_TARGETS: &'static [&'static str] = &["Organization"];

    pub fn builder() -> PatientBuilder {
        PatientBuilder::default()
    }

    /// Seed a builder from this resource's current values; list fields
    /// are copied, never aliased.
    pub fn to_builder(&self) -> PatientBuilder {
        PatientBuilder {
            id: self.logical_id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            meta: self.header.meta.clone(),
            language: self.header.language.clone(),
            text: self.header.text.clone(),
            contained: self.header.contained.clone(),
            active: self.active.clone(),
            name: self.name.clone(),
            birth_date: self.birth_date.clone(),
            deceased: self.deceased.clone(),
            managing_organization: self.managing_organization.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn active(&self) -> Option<&FhirBoolean> {
        self.active.as_ref()
    }

    pub fn name(&self) -> &[HumanName] {
        &self.name
    }

    pub fn birth_date(&self) -> Option<&FhirDate> {
        self.birth_date.as_ref()
    }

    pub fn deceased(&self) -> Option<&ChoiceValue> {
        self.deceased.as_ref()
    }

    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }
}

impl Element for Patient {
    fn type_name(&self) -> &'static str {
        "Patient"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let mut fields = self.header.fields();
        fields.extend([
            Field::optional("active", self.active.as_ref()),
            Field::list("name", &self.name),
            Field::optional("birthDate", self.birth_date.as_ref()),
            Field::choice("deceased", self.deceased.as_ref(), Self::DECEASED_VARIANTS),
            Field::reference(
                "managingOrganization",
                self.managing_organization.as_ref(),
                Self::MANAGING_ORGANIZATION_TARGETS,
            ),
        ]);
        fields
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Resource for Patient {
    fn header(&self) -> &ResourceHeader {
        &self.header
    }
}

ferrum_element::element_eq!(Patient);

#[derive(Debug, Default)]
pub struct PatientBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    meta: Option<Meta>,
    language: Option<FhirCode>,
    text: Option<Narrative>,
    contained: Vec<AnyResource>,
    active: Option<FhirBoolean>,
    name: Vec<HumanName>,
    birth_date: Option<FhirDate>,
    deceased: Option<ChoiceValue>,
    managing_organization: Option<Reference>,
    mode: ValidationMode,
}

impl PatientBuilder {
    ferrum_element::builder_common!();
    resource_builder_common!();

    pub fn active(mut self, active: impl Into<FhirBoolean>) -> Self {
        self.active = Some(active.into());
        self
    }

    /// Append one name. Empty names are rejected.
    pub fn add_name(mut self, name: HumanName) -> Result<Self> {
        check_list_element("name", &name)?;
        self.name.push(name);
        Ok(self)
    }

    /// Replace the name list.
    pub fn name(mut self, name: impl IntoIterator<Item = HumanName>) -> Self {
        self.name = name.into_iter().collect();
        self
    }

    pub fn birth_date(mut self, birth_date: impl Into<FhirDate>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    /// `deceased[x]`: boolean or dateTime.
    pub fn deceased(mut self, deceased: impl Into<ChoiceValue>) -> Self {
        self.deceased = Some(deceased.into());
        self
    }

    pub fn managing_organization(mut self, reference: Reference) -> Self {
        self.managing_organization = Some(reference);
        self
    }

    pub fn build(self) -> Result<Patient> {
        finish_build(
            Patient {
                core: ElementCore::new(None, self.extension),
                header: ResourceHeader::from_parts(
                    self.id,
                    self.meta,
                    self.language,
                    self.text,
                    self.contained,
                ),
                active: self.active,
                name: self.name,
                birth_date: self.birth_date,
                deceased: self.deceased,
                managing_organization: self.managing_organization,
            },
            self.mode,
        )
    }
}
