//! The shared element contract
//!
//! Every node of the model tree (primitive wrappers, complex datatypes and
//! resources alike) implements [`Element`]. The trait deliberately stays
//! small: a type tag, the shared id/extension slots, and one `fields()`
//! enumeration of child fields in declaration order. Traversal, equality,
//! hashing and validation are all driven off that single enumeration, so a
//! new field on a type touches exactly one place.
//!
//! Shared state lives in [`ElementCore`] by composition; there is no base
//! struct hierarchy to mirror.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::choice::ChoiceValue;
use crate::datatypes::Extension;

/// Contract implemented by every node in the model tree.
pub trait Element: Any + fmt::Debug {
    /// FHIR type tag: `"string"`, `"Quantity"`, `"Patient"`, ...
    fn type_name(&self) -> &'static str;

    /// Shared identity and extension slots.
    fn core(&self) -> &ElementCore;

    /// Child-field views in fixed declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Primitive payload, for primitive wrapper types.
    fn scalar(&self) -> Option<ScalarView<'_>> {
        None
    }

    /// Runtime type discrimination for choice and reference handling.
    fn as_any(&self) -> &dyn Any;

    /// Element id, unique only within the enclosing resource.
    fn element_id(&self) -> Option<&str> {
        self.core().id()
    }

    /// Extension records attached to this element, in order.
    fn extensions(&self) -> &[Extension] {
        self.core().extension()
    }

    /// True when the element carries nothing at all: no id, no primitive
    /// value, no extensions and no present child fields. This is the
    /// null-equivalent placeholder that list fields must never contain.
    fn is_empty(&self) -> bool {
        self.element_id().is_none()
            && self.scalar().is_none()
            && self.extensions().is_empty()
            && !has_present_fields(&self.fields())
    }
}

/// True when any field view carries a present value.
pub fn has_present_fields(fields: &[Field<'_>]) -> bool {
    fields.iter().any(Field::is_present)
}

/// Shared slots composed into every element: the optional element id, the
/// ordered extension list, and the lazily computed tree-hash cell.
///
/// The hash cell is a lock-free compute-once slot. Racing readers may both
/// compute the hash, but it is a pure function of immutable fields, so the
/// duplicate write is benign.
#[derive(Debug, Clone, Default)]
pub struct ElementCore {
    id: Option<String>,
    extension: Vec<Extension>,
    hash: OnceLock<u64>,
}

impl ElementCore {
    pub fn new(id: Option<String>, extension: Vec<Extension>) -> Self {
        Self {
            id,
            extension,
            hash: OnceLock::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub(crate) fn hash_cell(&self) -> &OnceLock<u64> {
        &self.hash
    }
}

/// Declared shape of a field: scalar optional/required, list unconstrained,
/// list required non-empty, or list forbidden in this context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// 0..1
    Optional,
    /// 1..1
    Required,
    /// 0..*
    Multiple,
    /// 1..*
    NonEmpty,
    /// 0..0
    Forbidden,
}

impl Cardinality {
    pub fn is_list(self) -> bool {
        matches!(self, Self::Multiple | Self::NonEmpty | Self::Forbidden)
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::Required | Self::NonEmpty)
    }
}

/// Read-only view of one declared field of an element, produced by
/// [`Element::fields`]. Carries the static per-field metadata the generated
/// model types encode: cardinality, reference target whitelist, and the
/// allowed variant set for choice fields.
#[derive(Debug)]
pub struct Field<'a> {
    pub name: &'static str,
    pub cardinality: Cardinality,
    pub value: FieldValue<'a>,
    /// Allowed target kinds, when this is a reference field.
    pub reference_targets: Option<&'static [&'static str]>,
    /// Allowed variant type names, when this is a choice field.
    pub choice_variants: Option<&'static [&'static str]>,
}

/// The value slot of a [`Field`] view.
#[derive(Debug)]
pub enum FieldValue<'a> {
    Absent,
    Element(&'a dyn Element),
    Choice(&'a ChoiceValue),
    List(Vec<&'a dyn Element>),
}

impl<'a> Field<'a> {
    fn new(name: &'static str, cardinality: Cardinality, value: FieldValue<'a>) -> Self {
        Self {
            name,
            cardinality,
            value,
            reference_targets: None,
            choice_variants: None,
        }
    }

    /// 0..1 scalar or composite field.
    pub fn optional<T: Element>(name: &'static str, value: Option<&'a T>) -> Self {
        let value = match value {
            Some(v) => FieldValue::Element(v),
            None => FieldValue::Absent,
        };
        Self::new(name, Cardinality::Optional, value)
    }

    /// 1..1 scalar or composite field.
    pub fn required<T: Element>(name: &'static str, value: Option<&'a T>) -> Self {
        let value = match value {
            Some(v) => FieldValue::Element(v),
            None => FieldValue::Absent,
        };
        Self::new(name, Cardinality::Required, value)
    }

    /// 0..* list field.
    pub fn list<T: Element>(name: &'static str, items: &'a [T]) -> Self {
        Self::new(name, Cardinality::Multiple, Self::collect(items))
    }

    /// 1..* list field.
    pub fn non_empty_list<T: Element>(name: &'static str, items: &'a [T]) -> Self {
        Self::new(name, Cardinality::NonEmpty, Self::collect(items))
    }

    /// 0..0 list field, forbidden in this context.
    pub fn forbidden_list<T: Element>(name: &'static str, items: &'a [T]) -> Self {
        Self::new(name, Cardinality::Forbidden, Self::collect(items))
    }

    /// List field whose items were already coerced to `&dyn Element`,
    /// e.g. a heterogeneous contained-resource list.
    pub fn list_dyn(name: &'static str, items: Vec<&'a dyn Element>) -> Self {
        Self::new(name, Cardinality::Multiple, FieldValue::List(items))
    }

    /// 0..1 choice field restricted to the given variant set.
    pub fn choice(
        name: &'static str,
        value: Option<&'a ChoiceValue>,
        variants: &'static [&'static str],
    ) -> Self {
        let value = match value {
            Some(v) => FieldValue::Choice(v),
            None => FieldValue::Absent,
        };
        let mut field = Self::new(name, Cardinality::Optional, value);
        field.choice_variants = Some(variants);
        field
    }

    /// 0..1 reference field restricted to the given target kinds.
    pub fn reference(
        name: &'static str,
        value: Option<&'a crate::datatypes::Reference>,
        targets: &'static [&'static str],
    ) -> Self {
        let mut field = Self::optional(name, value);
        field.reference_targets = Some(targets);
        field
    }

    pub fn is_present(&self) -> bool {
        match &self.value {
            FieldValue::Absent => false,
            FieldValue::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    fn collect<T: Element>(items: &'a [T]) -> FieldValue<'a> {
        FieldValue::List(items.iter().map(|i| i as &dyn Element).collect())
    }
}

/// Borrowed view of a primitive payload, used by traversal, equality and
/// hashing without knowing the concrete wrapper type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarView<'a> {
    Bool(bool),
    Int(i32),
    Str(&'a str),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Time(NaiveTime),
}

impl fmt::Display for ScalarView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Str(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Date(v) => write!(f, "{}", v),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Time(v) => write!(f, "{}", v),
        }
    }
}
