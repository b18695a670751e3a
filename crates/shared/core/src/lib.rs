//! Bazaar Core Domain
//!
//! Pure domain types for the Bazaar market simulation.
//! This crate contains no I/O and no randomness, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod registry;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Agents and their adaptive pricing
    Agent,
    BELIEF_PRECISION,
    BeliefPolicy,
    // Trading entities
    Offer,
    OfferBook,
    PriceBelief,
    Roster,
    RoundStats,
    Side,
    TradeOutcome,
};
pub use error::{DomainError, DomainResult};
pub use registry::{
    AgentClass, AgentId, ClassId, ClassRegistry, Commodity, CommodityId, CommodityRegistry,
};
pub use values::{Money, Price, Quantity};
