mod agent;
mod belief;
mod offer;
mod roster;
mod round_stats;
mod side;

pub use agent::Agent;
pub use belief::{BELIEF_PRECISION, BeliefPolicy, PriceBelief, TradeOutcome};
pub use offer::{Offer, OfferBook};
pub use roster::Roster;
pub use round_stats::RoundStats;
pub use side::Side;
