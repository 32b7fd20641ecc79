//! Exemplar FHIR resource models
//!
//! A small set of hand-maintained resources ([`Patient`],
//! [`Observation`], [`Organization`]) built on the
//! [`ferrum_element`] runtime, standing in for the generated resource
//! catalog. They exercise every part of the shared contract: required
//! fields, list cardinality, choice fields, reference whitelists,
//! contained resources and nested components.
//!
//! # Example
//!
//! ```rust
//! use ferrum_resources::{Observation, Resource};
//! use ferrum_element::{CodeableConcept, Reference};
//!
//! let observation = Observation::builder()
//!     .id("bp-1")
//!     .status("final")
//!     .code(CodeableConcept::of("http://loinc.org", "85354-9")?)
//!     .subject(Reference::local("Patient", "p1")?)
//!     .build()?;
//!
//! assert_eq!(observation.resource_type(), "Observation");
//! assert_eq!(observation.logical_id(), Some("bp-1"));
//! # Ok::<(), ferrum_element::Error>(())
//! ```

pub mod observation;
pub mod organization;
pub mod patient;
pub mod resource;

// Re-export commonly used types
pub use observation::{
    Observation, ObservationBuilder, ObservationComponent, ObservationComponentBuilder,
};
pub use organization::{Organization, OrganizationBuilder};
pub use patient::{Patient, PatientBuilder};
pub use resource::{AnyResource, Resource, ResourceHeader};
