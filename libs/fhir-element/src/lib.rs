//! Typed FHIR element model
//!
//! The shared runtime contract every generated FHIR model type conforms
//! to: an immutable tree of elements with choice-type fields, reference
//! constraints, cardinality rules, staged builders and one generic
//! traversal used for equality, hashing and encoding.
//!
//! # Module Organization
//!
//! - `element`: the [`Element`] contract, field views and cardinality
//! - `primitives`: wrapper types for FHIR primitive values
//! - `datatypes`: general-purpose complex datatypes
//! - `choice`: the tagged [`ChoiceValue`] container for `value[x]` fields
//! - `builder`: staging shared by every builder, and the validation switch
//! - `validation`: the structural rule battery run on `build`
//! - `visitor`: pre/post-order traversal, hashing and equality
//!
//! # Design Philosophy
//!
//! - **Immutable after build**: nodes never change; "mutation" is
//!   `to_builder()` and a fresh `build()`
//! - **One child enumeration**: `fields()` drives traversal, equality,
//!   hashing and validation alike
//! - **Choice types are sums**: a closed enum plus per-field variant
//!   metadata, not supertype-and-downcast
//! - **Violations are reported, never repaired**
//!
//! # Example
//!
//! ```rust
//! use ferrum_element::{HumanName, tree_hash};
//!
//! let name = HumanName::builder()
//!     .family("Lovelace")
//!     .add_given("Ada")?
//!     .build()?;
//!
//! let again = name.to_builder().build()?;
//! assert_eq!(name, again);
//! assert_eq!(tree_hash(&name), tree_hash(&again));
//! # Ok::<(), ferrum_element::Error>(())
//! ```

pub mod builder;
pub mod choice;
pub mod datatypes;
pub mod element;
pub mod error;
pub mod primitives;
pub mod validation;
pub mod visitor;

// Re-export commonly used types
pub use builder::{check_list_element, finish_build, ValidationMode};
pub use choice::ChoiceValue;
pub use datatypes::{
    CodeableConcept, CodeableConceptBuilder, Coding, CodingBuilder, Extension, ExtensionBuilder,
    HumanName, HumanNameBuilder, Identifier, IdentifierBuilder, Meta, MetaBuilder, Narrative,
    NarrativeBuilder, Period, PeriodBuilder, Quantity, QuantityBuilder, Range, RangeBuilder,
    Ratio, RatioBuilder, Reference, ReferenceBuilder,
};
pub use element::{
    has_present_fields, Cardinality, Element, ElementCore, Field, FieldValue, ScalarView,
};
pub use error::{Error, Result};
pub use primitives::{
    FhirBoolean, FhirBooleanBuilder, FhirCode, FhirCodeBuilder, FhirDate, FhirDateBuilder,
    FhirDateTime, FhirDateTimeBuilder, FhirDecimal, FhirDecimalBuilder, FhirInteger,
    FhirIntegerBuilder, FhirString, FhirStringBuilder, FhirTime, FhirTimeBuilder, FhirUri,
    FhirUriBuilder,
};
pub use validation::{
    validate_tree, Rule, ValidationIssue, ValidationOutcome, ValidatorSettings,
};
pub use visitor::{elements_equal, tree_hash, walk, Visitor};
