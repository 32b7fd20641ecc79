//! Resource plumbing
//!
//! Resources are elements that are independently addressable: they carry a
//! logical id, version metadata, a language tag, a narrative summary and a
//! list of locally contained child resources. The shared slots live in
//! [`ResourceHeader`] by composition; concrete resources embed it next to
//! their own fields. Ownership is strictly downward, so resource trees
//! have no cycles.

use ferrum_element::{
    elements_equal, Element, Field, FhirCode, FhirString, Meta, Narrative,
};

use crate::observation::Observation;
use crate::organization::Organization;
use crate::patient::Patient;

/// Slots shared by every resource, in declaration order ahead of the
/// resource-specific fields.
#[derive(Debug, Clone, Default)]
pub struct ResourceHeader {
    pub(crate) id: Option<FhirString>,
    pub(crate) meta: Option<Meta>,
    pub(crate) language: Option<FhirCode>,
    pub(crate) text: Option<Narrative>,
    pub(crate) contained: Vec<AnyResource>,
}

impl ResourceHeader {
    pub(crate) fn from_parts(
        id: Option<String>,
        meta: Option<Meta>,
        language: Option<FhirCode>,
        text: Option<Narrative>,
        contained: Vec<AnyResource>,
    ) -> Self {
        Self {
            id: id.map(FhirString::new),
            meta,
            language,
            text,
            contained,
        }
    }

    /// Field views for the shared slots; every resource's `fields()`
    /// starts with these.
    pub(crate) fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional("id", self.id.as_ref()),
            Field::optional("meta", self.meta.as_ref()),
            Field::optional("language", self.language.as_ref()),
            Field::optional("text", self.text.as_ref()),
            Field::list_dyn(
                "contained",
                self.contained.iter().map(AnyResource::as_element).collect(),
            ),
        ]
    }
}

/// An independently addressable node: an [`Element`] plus the shared
/// resource slots.
pub trait Resource: Element {
    /// Shared resource slots.
    fn header(&self) -> &ResourceHeader;

    /// The resource kind tag, e.g. `"Patient"`.
    fn resource_type(&self) -> &'static str {
        self.type_name()
    }

    /// Logical id, stable across versions of the same resource.
    fn logical_id(&self) -> Option<&str> {
        self.header().id.as_ref().and_then(|id| id.value())
    }

    fn meta(&self) -> Option<&Meta> {
        self.header().meta.as_ref()
    }

    fn language(&self) -> Option<&str> {
        self.header().language.as_ref().and_then(|l| l.value())
    }

    fn narrative(&self) -> Option<&Narrative> {
        self.header().text.as_ref()
    }

    /// Locally contained resources; not independently addressable.
    fn contained(&self) -> &[AnyResource] {
        &self.header().contained
    }
}

/// Tagged sum over the supported resource kinds, used for contained
/// resources and any other place heterogeneous resources travel together.
#[derive(Debug, Clone)]
pub enum AnyResource {
    Patient(Patient),
    Observation(Observation),
    Organization(Organization),
}

impl AnyResource {
    pub fn resource_type(&self) -> &'static str {
        self.as_element().type_name()
    }

    pub fn as_element(&self) -> &dyn Element {
        match self {
            Self::Patient(r) => r,
            Self::Observation(r) => r,
            Self::Organization(r) => r,
        }
    }

    pub fn as_resource(&self) -> &dyn Resource {
        match self {
            Self::Patient(r) => r,
            Self::Observation(r) => r,
            Self::Organization(r) => r,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_element().is_empty()
    }
}

impl PartialEq for AnyResource {
    fn eq(&self, other: &Self) -> bool {
        elements_equal(self.as_element(), other.as_element())
    }
}

impl Eq for AnyResource {}

impl From<Patient> for AnyResource {
    fn from(resource: Patient) -> Self {
        Self::Patient(resource)
    }
}

impl From<Observation> for AnyResource {
    fn from(resource: Observation) -> Self {
        Self::Observation(resource)
    }
}

impl From<Organization> for AnyResource {
    fn from(resource: Organization) -> Self {
        Self::Organization(resource)
    }
}

/// Setters for the shared resource slots, present on every resource
/// builder next to [`ferrum_element::builder_common!`]'s. Expects `meta`,
/// `language`, `text` and `contained` fields on the builder struct.
macro_rules! resource_builder_common {
    () => {
        pub fn meta(mut self, meta: ferrum_element::Meta) -> Self {
            self.meta = Some(meta);
            self
        }

        pub fn language(mut self, language: impl Into<ferrum_element::FhirCode>) -> Self {
            self.language = Some(language.into());
            self
        }

        /// Narrative summary.
        pub fn text(mut self, text: ferrum_element::Narrative) -> Self {
            self.text = Some(text);
            self
        }

        /// Append one locally contained resource. Empty resources are
        /// rejected.
        pub fn add_contained(
            mut self,
            contained: impl Into<$crate::resource::AnyResource>,
        ) -> ferrum_element::Result<Self> {
            let contained = contained.into();
            if contained.is_empty() {
                return Err(ferrum_element::Error::InvalidArgument(
                    "contained: empty resource appended to list field".into(),
                ));
            }
            self.contained.push(contained);
            Ok(self)
        }

        /// Replace the contained-resource list.
        pub fn contained(
            mut self,
            contained: impl IntoIterator<Item = $crate::resource::AnyResource>,
        ) -> Self {
            self.contained = contained.into_iter().collect();
            self
        }
    };
}

pub(crate) use resource_builder_common;
