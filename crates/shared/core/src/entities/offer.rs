use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;
use crate::error::{DomainError, DomainResult};
use crate::registry::{AgentId, CommodityId};
use crate::values::{Price, Quantity};

/// A bid or ask for some units of one commodity at a unit price
///
/// Offers live for a single round: they are posted during offer generation,
/// filled (fully, partially or not at all) during clearing and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Agent that posted the offer
    pub agent: AgentId,
    pub commodity: CommodityId,
    pub side: Side,
    pub unit_price: Price,
    /// Units still open
    pub units: Quantity,
}

impl Offer {
    pub fn new(
        agent: AgentId,
        commodity: CommodityId,
        side: Side,
        unit_price: Price,
        units: Quantity,
    ) -> Self {
        Self {
            agent,
            commodity,
            side,
            unit_price,
            units,
        }
    }

    /// Create a buy offer
    pub fn bid(agent: AgentId, commodity: CommodityId, unit_price: Price, units: Quantity) -> Self {
        Self::new(agent, commodity, Side::Buy, unit_price, units)
    }

    /// Create a sell offer
    pub fn ask(agent: AgentId, commodity: CommodityId, unit_price: Price, units: Quantity) -> Self {
        Self::new(agent, commodity, Side::Sell, unit_price, units)
    }

    /// Validate price and size are non-negative
    pub fn validate(&self) -> DomainResult<()> {
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::InvalidOffer(format!(
                "{} posted a negative unit price {}",
                self.agent, self.unit_price
            )));
        }
        if self.units < Decimal::ZERO {
            return Err(DomainError::InvalidOffer(format!(
                "{} posted negative units {}",
                self.agent, self.units
            )));
        }
        Ok(())
    }

    /// Take `quantity` units off the offer
    pub fn fill(&mut self, quantity: Quantity) {
        self.units = (self.units - quantity).max(Decimal::ZERO);
    }

    /// Returns true when no units remain
    pub fn is_filled(&self) -> bool {
        self.units <= Decimal::ZERO
    }
}

/// Bid and ask books for every commodity of one round
#[derive(Debug, Clone, Default)]
pub struct OfferBook {
    bids: Vec<Vec<Offer>>,
    asks: Vec<Vec<Offer>>,
}

impl OfferBook {
    /// Empty books for `commodity_count` commodities
    pub fn new(commodity_count: usize) -> Self {
        Self {
            bids: vec![Vec::new(); commodity_count],
            asks: vec![Vec::new(); commodity_count],
        }
    }

    /// Append an offer to its commodity's book
    pub fn post(&mut self, offer: Offer) -> DomainResult<()> {
        offer.validate()?;

        let index = offer.commodity.index();
        let book = match offer.side {
            Side::Buy => self.bids.get_mut(index),
            Side::Sell => self.asks.get_mut(index),
        }
        .ok_or_else(|| DomainError::UnknownCommodity(offer.commodity.to_string()))?;

        book.push(offer);
        Ok(())
    }

    pub fn bids(&self, commodity: CommodityId) -> &[Offer] {
        self.bids
            .get(commodity.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn asks(&self, commodity: CommodityId) -> &[Offer] {
        self.asks
            .get(commodity.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Move a commodity's bids and asks out, leaving its books empty
    pub fn take(&mut self, commodity: CommodityId) -> (Vec<Offer>, Vec<Offer>) {
        let index = commodity.index();
        let bids = self.bids.get_mut(index).map(std::mem::take).unwrap_or_default();
        let asks = self.asks.get_mut(index).map(std::mem::take).unwrap_or_default();
        (bids, asks)
    }

    /// Total number of offers across all books
    pub fn len(&self) -> usize {
        self.bids.iter().chain(self.asks.iter()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
