use bazaar_core::DomainError;
use bazaar_ports::ClearingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No {0} in config")]
    Empty(&'static str),
    #[error("Duplicate id in config: {0}")]
    DuplicateId(String),
    #[error("Unknown logic '{logic}' for class {class}")]
    UnknownLogic { class: String, logic: String },
    #[error("Class {class} references unknown commodity {commodity}")]
    UnknownCommodity { class: String, commodity: String },
    #[error("Negative value in config: {0}")]
    NegativeValue(String),
}

#[derive(Error, Debug)]
pub enum MarketError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Clearing(#[from] ClearingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{classes} classes registered but {logics} behavior logics supplied")]
    LogicMismatch { classes: usize, logics: usize },

    #[error("Market needs at least one {0}")]
    Empty(&'static str),

    #[error("Class {class} tracks {actual} commodities, expected {expected}")]
    InventoryShape {
        class: String,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, MarketError>;
