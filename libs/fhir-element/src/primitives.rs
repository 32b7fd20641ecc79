//! Primitive wrapper types
//!
//! FHIR primitives are elements, not bare values: a `string` carries an
//! element id and extensions next to its payload. Each wrapper below pairs
//! an [`ElementCore`] with an optional native payload and is stamped out by
//! one local macro. `From` conversions let builder setters accept native
//! Rust values directly; the wrapped result is identical to passing a
//! pre-built wrapper.

use std::any::Any;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::builder::{finish_build, ValidationMode};
use crate::datatypes::Extension;
use crate::element::{Element, ElementCore, Field, ScalarView};
use crate::error::Result;
use crate::visitor::elements_equal;

macro_rules! primitive {
    (copy $(#[$meta:meta])* $name:ident, $builder:ident, $fhir:literal, $native:ty, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            core: ElementCore,
            value: Option<$native>,
        }

        impl $name {
            /// Wrap a native value, with no id or extensions.
            pub fn new(value: impl Into<$native>) -> Self {
                Self {
                    core: ElementCore::default(),
                    value: Some(value.into()),
                }
            }

            pub fn value(&self) -> Option<$native> {
                self.value
            }

            pub fn builder() -> $builder {
                $builder::default()
            }

            /// Seed a builder from this element's current values.
            pub fn to_builder(&self) -> $builder {
                $builder {
                    id: self.core.id().map(str::to_owned),
                    extension: self.core.extension().to_vec(),
                    value: self.value,
                    mode: ValidationMode::default(),
                }
            }
        }

        impl Element for $name {
            fn type_name(&self) -> &'static str {
                $fhir
            }

            fn core(&self) -> &ElementCore {
                &self.core
            }

            fn fields(&self) -> Vec<Field<'_>> {
                Vec::new()
            }

            fn scalar(&self) -> Option<ScalarView<'_>> {
                self.value.map(ScalarView::$variant)
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                elements_equal(self, other)
            }
        }

        impl Eq for $name {}

        impl From<$native> for $name {
            fn from(value: $native) -> Self {
                Self::new(value)
            }
        }

        #[derive(Debug, Default)]
        pub struct $builder {
            id: Option<String>,
            extension: Vec<Extension>,
            value: Option<$native>,
            mode: ValidationMode,
        }

        impl $builder {
            crate::builder_common!();

            pub fn value(mut self, value: impl Into<$native>) -> Self {
                self.value = Some(value.into());
                self
            }

            pub fn build(self) -> Result<$name> {
                finish_build(
                    $name {
                        core: ElementCore::new(self.id, self.extension),
                        value: self.value,
                    },
                    self.mode,
                )
            }
        }
    };

    (text $(#[$meta:meta])* $name:ident, $builder:ident, $fhir:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            core: ElementCore,
            value: Option<String>,
        }

        impl $name {
            /// Wrap a native value, with no id or extensions.
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    core: ElementCore::default(),
                    value: Some(value.into()),
                }
            }

            pub fn value(&self) -> Option<&str> {
                self.value.as_deref()
            }

            pub fn builder() -> $builder {
                $builder::default()
            }

            /// Seed a builder from this element's current values.
            pub fn to_builder(&self) -> $builder {
                $builder {
                    id: self.core.id().map(str::to_owned),
                    extension: self.core.extension().to_vec(),
                    value: self.value.clone(),
                    mode: ValidationMode::default(),
                }
            }
        }

        impl Element for $name {
            fn type_name(&self) -> &'static str {
                $fhir
            }

            fn core(&self) -> &ElementCore {
                &self.core
            }

            fn fields(&self) -> Vec<Field<'_>> {
                Vec::new()
            }

            fn scalar(&self) -> Option<ScalarView<'_>> {
                self.value.as_deref().map(ScalarView::Str)
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                elements_equal(self, other)
            }
        }

        impl Eq for $name {}

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        #[derive(Debug, Default)]
        pub struct $builder {
            id: Option<String>,
            extension: Vec<Extension>,
            value: Option<String>,
            mode: ValidationMode,
        }

        impl $builder {
            crate::builder_common!();

            pub fn value(mut self, value: impl Into<String>) -> Self {
                self.value = Some(value.into());
                self
            }

            pub fn build(self) -> Result<$name> {
                finish_build(
                    $name {
                        core: ElementCore::new(self.id, self.extension),
                        value: self.value,
                    },
                    self.mode,
                )
            }
        }
    };
}

primitive!(text
    /// FHIR `string`.
    FhirString, FhirStringBuilder, "string");

primitive!(text
    /// FHIR `code`: a string taken from a controlled set.
    FhirCode, FhirCodeBuilder, "code");

primitive!(text
    /// FHIR `uri`.
    FhirUri, FhirUriBuilder, "uri");

primitive!(copy
    /// FHIR `boolean`.
    FhirBoolean, FhirBooleanBuilder, "boolean", bool, Bool);

primitive!(copy
    /// FHIR `integer`.
    FhirInteger, FhirIntegerBuilder, "integer", i32, Int);

primitive!(copy
    /// FHIR `decimal`. Backed by `rust_decimal` so precision survives.
    FhirDecimal, FhirDecimalBuilder, "decimal", Decimal, Decimal);

primitive!(copy
    /// FHIR `date`: a full calendar date.
    FhirDate, FhirDateBuilder, "date", NaiveDate, Date);

primitive!(copy
    /// FHIR `dateTime` with explicit offset.
    FhirDateTime, FhirDateTimeBuilder, "dateTime", DateTime<FixedOffset>, DateTime);

primitive!(copy
    /// FHIR `time`: a time of day.
    FhirTime, FhirTimeBuilder, "time", NaiveTime, Time);

impl From<i32> for FhirDecimal {
    fn from(value: i32) -> Self {
        Self::new(Decimal::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_sugar_matches_prewrapped() {
        assert_eq!(FhirString::from("active"), FhirString::new("active"));
        assert_eq!(FhirBoolean::from(true), FhirBoolean::new(true));
        assert_eq!(FhirDecimal::from(7), FhirDecimal::new(Decimal::from(7)));
    }

    #[test]
    fn wrapper_with_id_differs_from_plain_wrapper() {
        let plain = FhirString::new("a");
        let with_id = FhirString::builder().id("s1").value("a").build().unwrap();
        assert_ne!(plain, with_id);
        assert_eq!(with_id.element_id(), Some("s1"));
    }

    #[test]
    fn value_accessor_reads_back() {
        let n = FhirInteger::new(42);
        assert_eq!(n.value(), Some(42));
        assert_eq!(FhirString::new("x").value(), Some("x"));
    }

    #[test]
    fn empty_wrapper_is_null_equivalent() {
        assert!(FhirString::default().is_empty());
        assert!(!FhirString::new("").is_empty());
    }
}
