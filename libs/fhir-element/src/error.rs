//! Error types for the element model

use thiserror::Error;

use crate::validation::ValidationOutcome;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Element model errors
#[derive(Error, Debug)]
pub enum Error {
    /// A builder setter was handed an argument the contract forbids,
    /// e.g. an empty element appended to a list field.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more structural rules failed when `build` ran the
    /// validation engine. Carries the full outcome, one issue per
    /// violation, each with rule id, field path and message.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationOutcome),

    /// An operation was invoked outside its allowed lifecycle,
    /// e.g. unwrapping a choice value as the wrong variant.
    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl Error {
    /// The validation outcome, if this is a `ValidationFailed` error.
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        match self {
            Error::ValidationFailed(outcome) => Some(outcome),
            _ => None,
        }
    }
}
