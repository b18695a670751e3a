use bazaar_core::{CommodityId, Offer, Price, Roster, RoundStats};

use crate::RandomSource;
use crate::error::ClearingResult;

/// Port for per-round clearing of one commodity
///
/// Implementations own the matching policy. They must notify every offer's
/// owner exactly once through its price belief model and apply every trade
/// as a paired transfer of goods and money on the roster.
pub trait ClearingAlgorithm {
    /// Clear one commodity's books for this round
    ///
    /// `previous_price` is reported as the round's price when nothing trades.
    fn resolve(
        &mut self,
        commodity: CommodityId,
        bids: Vec<Offer>,
        asks: Vec<Offer>,
        roster: &mut Roster,
        rng: &mut dyn RandomSource,
        previous_price: Price,
    ) -> ClearingResult<RoundStats>;

    /// Get the name of the algorithm
    fn name(&self) -> &str;
}
