//! Organization resource

use std::any::Any;

use ferrum_element::{
    finish_build, Element, ElementCore, Extension, Field, FhirBoolean, FhirCode, FhirString,
    Meta, Narrative, Reference, Result, ValidationMode,
};

use crate::resource::{resource_builder_common, AnyResource, Resource, ResourceHeader};

/// A grouping of people or services with a common purpose: a hospital, a
/// department, a payer.
#[derive(Debug, Clone, Default)]
pub struct Organization {
    core: ElementCore,
    header: ResourceHeader,
    active: Option<FhirBoolean>,
    name: Option<FhirString>,
    part_of: Option<Reference>,
}

impl Organization {
    /// Allowed target kinds for `partOf`.
    pub const PART_OF_TARGETS: &'static [&'static str] = &["Organization"];

    pub fn builder() -> OrganizationBuilder {
        OrganizationBuilder::default()
    }

    pub fn to_builder(&self) -> OrganizationBuilder {
        OrganizationBuilder {
            id: self.logical_id().map(str::to_owned),
            extension: self.core.extension().to_vec(),
            meta: self.header.meta.clone(),
            language: self.header.language.clone(),
            text: self.header.text.clone(),
            contained: self.header.contained.clone(),
            active: self.active.clone(),
            name: self.name.clone(),
            part_of: self.part_of.clone(),
            mode: ValidationMode::default(),
        }
    }

    pub fn active(&self) -> Option<&FhirBoolean> {
        self.active.as_ref()
    }

    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn part_of(&self) -> Option<&Reference> {
        self.part_of.as_ref()
    }
}

impl Element for Organization {
    fn type_name(&self) -> &'static str {
        "Organization"
    }

    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let mut fields = self.header.fields();
        fields.extend([
            Field::optional("active", self.active.as_ref()),
            Field::optional("name", self.name.as_ref()),
            Field::reference("partOf", self.part_of.as_ref(), Self::PART_OF_TARGETS),
        ]);
        fields
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Resource for Organization {
    fn header(&self) -> &ResourceHeader {
        &self.header
    }
}

ferrum_element::element_eq!(Organization);

#[derive(Debug, Default)]
pub struct OrganizationBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    meta: Option<Meta>,
    language: Option<FhirCode>,
    text: Option<Narrative>,
    contained: Vec<AnyResource>,
    active: Option<FhirBoolean>,
    name: Option<FhirString>,
    part_of: Option<Reference>,
    mode: ValidationMode,
}

impl OrganizationBuilder {
    ferrum_element::builder_common!();
    resource_builder_common!();

    pub fn active(mut self, active: impl Into<FhirBoolean>) -> Self {
        self.active = Some(active.into());
        self
    }

    pub fn name(mut self, name: impl Into<FhirString>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn part_of(mut self, reference: Reference) -> Self {
        self.part_of = Some(reference);
        self
    }

    pub fn build(self) -> Result<Organization> {
        finish_build(
            Organization {
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
                part_of: self.part_of,
            },
            self.mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_with_name_builds() {
        let org = Organization::builder()
            .id("org1")
            .name("Example Hospital")
            .build()
            .unwrap();
        assert_eq!(org.logical_id(), Some("org1"));
        assert_eq!(org.name().unwrap().value(), Some("Example Hospital"));
    }

    #[test]
    fn part_of_accepts_an_organization_reference() {
        let parent = Reference::local("Organization", "parent").unwrap();
        let org = Organization::builder()
            .name("Cardiology")
            .part_of(parent)
            .build()
            .unwrap();
        assert_eq!(org.part_of().unwrap().target_kind(), Some("Organization"));
    }
}
