use thiserror::Error;

/// Domain-level errors for registry lookups and offer posting
///
/// Unknown identifiers are a precondition violation: callers get a distinct
/// error instead of a default value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown commodity: {0}")]
    UnknownCommodity(String),

    #[error("Unknown agent class: {0}")]
    UnknownClass(String),

    #[error("Unknown agent: {0}")]
    UnknownAgent(usize),

    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Invalid offer: {0}")]
    InvalidOffer(String),
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;
