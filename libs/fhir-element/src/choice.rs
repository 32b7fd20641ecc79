//! Choice-type container
//!
//! A choice field (`value[x]`, `deceased[x]`, ...) holds exactly one value
//! out of a closed, per-field set of types. The container is one tagged sum
//! over the whole supported catalog; the per-field restriction is static
//! metadata on the [`Field`](crate::element::Field) view and enforced by
//! the validation engine, so an out-of-set variant is a build-time error,
//! never a silent coercion.
//!
//! There is no discriminant separate from the value: the wrapped element's
//! own type tag is the discriminant, and `as_element` exposes the value
//! through the common supertype.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::datatypes::{
    CodeableConcept, Coding, Identifier, Period, Quantity, Range, Ratio, Reference,
};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::primitives::{
    FhirBoolean, FhirCode, FhirDate, FhirDateTime, FhirDecimal, FhirInteger, FhirString, FhirTime,
    FhirUri,
};

/// One value from the supported datatype catalog.
#[derive(Debug, Clone)]
pub enum ChoiceValue {
    Boolean(FhirBoolean),
    Integer(FhirInteger),
    Decimal(FhirDecimal),
    String(FhirString),
    Code(FhirCode),
    Uri(FhirUri),
    Date(FhirDate),
    DateTime(FhirDateTime),
    Time(FhirTime),
    Quantity(Quantity),
    Range(Range),
    Ratio(Ratio),
    Period(Period),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Identifier(Identifier),
    Reference(Reference),
}

impl ChoiceValue {
    /// Every variant type name, in declaration order. Fields that accept
    /// any value (notably `Extension.value[x]`) declare this full set.
    pub const ALL_VARIANTS: &'static [&'static str] = &[
        "boolean",
        "integer",
        "decimal",
        "string",
        "code",
        "uri",
        "date",
        "dateTime",
        "time",
        "Quantity",
        "Range",
        "Ratio",
        "Period",
        "Coding",
        "CodeableConcept",
        "Identifier",
        "Reference",
    ];

    /// Type tag of the wrapped value; doubles as the variant discriminant.
    pub fn type_name(&self) -> &'static str {
        self.as_element().type_name()
    }

    /// The wrapped value through the common element supertype.
    pub fn as_element(&self) -> &dyn Element {
        match self {
            Self::Boolean(v) => v,
            Self::Integer(v) => v,
            Self::Decimal(v) => v,
            Self::String(v) => v,
            Self::Code(v) => v,
            Self::Uri(v) => v,
            Self::Date(v) => v,
            Self::DateTime(v) => v,
            Self::Time(v) => v,
            Self::Quantity(v) => v,
            Self::Range(v) => v,
            Self::Ratio(v) => v,
            Self::Period(v) => v,
            Self::Coding(v) => v,
            Self::CodeableConcept(v) => v,
            Self::Identifier(v) => v,
            Self::Reference(v) => v,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_element().is_empty()
    }
}

impl PartialEq for ChoiceValue {
    fn eq(&self, other: &Self) -> bool {
        crate::visitor::elements_equal(self.as_element(), other.as_element())
    }
}

impl Eq for ChoiceValue {}

macro_rules! choice_variant {
    ($variant:ident, $ty:ty, $try_into:ident, $as:ident) => {
        impl From<$ty> for ChoiceValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }

        impl ChoiceValue {
            pub fn $as(&self) -> Option<&$ty> {
                match self {
                    Self::$variant(v) => Some(v),
                    _ => None,
                }
            }

            /// Unwraps this variant, or fails with `IllegalState` naming
            /// the variant actually present.
            pub fn $try_into(self) -> Result<$ty> {
                match self {
                    Self::$variant(v) => Ok(v),
                    other => Err(Error::IllegalState(format!(
                        concat!("expected ", stringify!($variant), " value, found {}"),
                        other.type_name()
                    ))),
                }
            }
        }
    };
}

choice_variant!(Boolean, FhirBoolean, try_into_boolean, as_boolean);
choice_variant!(Integer, FhirInteger, try_into_integer, as_integer);
choice_variant!(Decimal, FhirDecimal, try_into_decimal, as_decimal);
choice_variant!(String, FhirString, try_into_string, as_string);
choice_variant!(Code, FhirCode, try_into_code, as_code);
choice_variant!(Uri, FhirUri, try_into_uri, as_uri);
choice_variant!(Date, FhirDate, try_into_date, as_date);
choice_variant!(DateTime, FhirDateTime, try_into_date_time, as_date_time);
choice_variant!(Time, FhirTime, try_into_time, as_time);
choice_variant!(Quantity, Quantity, try_into_quantity, as_quantity);
choice_variant!(Range, Range, try_into_range, as_range);
choice_variant!(Ratio, Ratio, try_into_ratio, as_ratio);
choice_variant!(Period, Period, try_into_period, as_period);
choice_variant!(Coding, Coding, try_into_coding, as_coding);
choice_variant!(
    CodeableConcept,
    CodeableConcept,
    try_into_codeable_concept,
    as_codeable_concept
);
choice_variant!(Identifier, Identifier, try_into_identifier, as_identifier);
choice_variant!(Reference, Reference, try_into_reference, as_reference);

// Native-value sugar, mirroring the primitive wrapper conversions.

impl From<bool> for ChoiceValue {
    fn from(value: bool) -> Self {
        Self::Boolean(FhirBoolean::new(value))
    }
}

impl From<i32> for ChoiceValue {
    fn from(value: i32) -> Self {
        Self::Integer(FhirInteger::new(value))
    }
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::String(FhirString::new(value))
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        Self::String(FhirString::new(value))
    }
}

impl From<Decimal> for ChoiceValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(FhirDecimal::new(value))
    }
}

impl From<NaiveDate> for ChoiceValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(FhirDate::new(value))
    }
}

impl From<DateTime<FixedOffset>> for ChoiceValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(FhirDateTime::new(value))
    }
}

impl From<NaiveTime> for ChoiceValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(FhirTime::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_sugar_picks_the_expected_variant() {
        assert_eq!(ChoiceValue::from(true).type_name(), "boolean");
        assert_eq!(ChoiceValue::from(5).type_name(), "integer");
        assert_eq!(ChoiceValue::from("x").type_name(), "string");
    }

    #[test]
    fn wrong_variant_unwrap_is_illegal_state() {
        let value = ChoiceValue::from("not a quantity");
        let err = value.try_into_quantity().unwrap_err();
        assert!(matches!(err, Error::IllegalState(_)));
    }

    #[test]
    fn equality_distinguishes_variants_with_equal_payload_shape() {
        // Same textual payload, different variant: code vs string.
        let a = ChoiceValue::Code(FhirCode::new("final"));
        let b = ChoiceValue::String(FhirString::new("final"));
        assert_ne!(a, b);
    }
}
