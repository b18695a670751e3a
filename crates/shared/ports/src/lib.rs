//! Bazaar Ports
//!
//! Port definitions (traits) for the Bazaar market simulation.
//! These define the boundaries between the market core and its collaborators.

mod behavior;
mod clearing;
mod context;
mod error;
mod random;

pub use behavior::BehaviorLogic;
pub use clearing::ClearingAlgorithm;
pub use context::SimulationContext;
pub use error::{ClearingError, ClearingResult};
pub use random::RandomSource;
