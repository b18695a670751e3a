//! Bazaar Clearing Algorithms
//!
//! Implementations of per-round clearing for the Bazaar market simulation.

mod double_auction;
mod shuffle;

pub use double_auction::{DEFAULT_FAILSAFE_LIMIT, DoubleAuctionEngine};
pub use shuffle::shuffle;

// Re-export the trait from ports for convenience
pub use bazaar_ports::{ClearingAlgorithm, ClearingError, ClearingResult};
