use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::registry::CommodityId;
use crate::values::{Money, Price, Quantity};

/// Outcome of clearing one commodity for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub commodity: CommodityId,
    /// Units requested by all bids
    pub bid_units: Quantity,
    /// Units offered by all asks
    pub ask_units: Quantity,
    /// Units that changed hands
    pub units_traded: Quantity,
    /// Money that changed hands
    pub money_traded: Money,
    /// Number of matched bid/ask pairs that exchanged units
    pub trades: u32,
    /// Volume-weighted clearing price, or the carried-over price when nothing traded
    pub average_price: Price,
    /// Matching stopped early on the failsafe
    pub aborted: bool,
}

impl RoundStats {
    /// Stats for a round in which nothing was posted or traded
    pub fn idle(commodity: CommodityId, previous_price: Price) -> Self {
        Self {
            commodity,
            bid_units: Decimal::ZERO,
            ask_units: Decimal::ZERO,
            units_traded: Decimal::ZERO,
            money_traded: Decimal::ZERO,
            trades: 0,
            average_price: previous_price,
            aborted: false,
        }
    }

    /// Supply minus demand
    pub fn imbalance(&self) -> Quantity {
        self.ask_units - self.bid_units
    }

    /// Money traded / units traded, falling back to `previous_price` when nothing traded
    pub fn settle_price(&mut self, previous_price: Price) {
        self.average_price = if self.units_traded > Decimal::ZERO {
            self.money_traded / self.units_traded
        } else {
            previous_price
        };
    }
}
