use bazaar_core::DomainError;
use thiserror::Error;

/// Errors raised while clearing a commodity's books
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClearingError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Offer routed to the wrong book: {0}")]
    MisroutedOffer(String),
}

pub type ClearingResult<T> = std::result::Result<T, ClearingError>;
