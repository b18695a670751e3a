use bazaar_core::{
    CommodityId, Money, Offer, Price, Quantity, Roster, RoundStats, Side, TradeOutcome,
};
use bazaar_ports::{ClearingAlgorithm, ClearingError, ClearingResult, RandomSource};
use rust_decimal::Decimal;

use crate::shuffle::shuffle;

/// Iterations without removing an offer before matching is abandoned
pub const DEFAULT_FAILSAFE_LIMIT: usize = 1000;

/// Randomized-tiebreak price-priority double auction
///
/// Each round, per commodity:
/// 1. Both books are shuffled, so submission order gives no edge
/// 2. Bids sort highest price first, asks lowest price first; equal prices
///    keep their shuffled order
/// 3. The best bid and best ask trade `min(units)` at the midpoint of their
///    prices until one book runs dry
/// 4. Every offer reports back to its owner exactly once
pub struct DoubleAuctionEngine {
    failsafe_limit: usize,
}

impl DoubleAuctionEngine {
    pub fn new() -> Self {
        Self {
            failsafe_limit: DEFAULT_FAILSAFE_LIMIT,
        }
    }

    /// Engine that gives up after `limit` iterations without a removal
    pub fn with_failsafe_limit(limit: usize) -> Self {
        Self {
            failsafe_limit: limit,
        }
    }
}

impl Default for DoubleAuctionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// An offer plus what it has traded this round
struct Entry {
    offer: Offer,
    /// Position after the shuffle, the secondary sort key
    position: usize,
    filled_units: Quantity,
    filled_value: Money,
}

impl Entry {
    fn record(&mut self, units: Quantity, price: Price) {
        self.offer.fill(units);
        self.filled_units += units;
        self.filled_value += units * price;
    }

    fn outcome(&self) -> TradeOutcome {
        if self.filled_units > Decimal::ZERO {
            TradeOutcome::Filled(self.filled_value / self.filled_units)
        } else {
            TradeOutcome::Unfilled
        }
    }
}

fn validate(
    offers: &[Offer],
    commodity: CommodityId,
    side: Side,
    roster: &Roster,
) -> ClearingResult<()> {
    for offer in offers {
        if offer.commodity != commodity || offer.side != side {
            return Err(ClearingError::MisroutedOffer(format!(
                "{} {} {} in the {} {} book",
                offer.agent, offer.side, offer.commodity, commodity, side
            )));
        }
        offer.validate()?;
        roster.get(offer.agent)?;
    }
    Ok(())
}

fn prepare(mut offers: Vec<Offer>, rng: &mut dyn RandomSource) -> Vec<Entry> {
    shuffle(&mut offers, rng);
    offers
        .into_iter()
        .enumerate()
        .map(|(position, offer)| Entry {
            offer,
            position,
            filled_units: Decimal::ZERO,
            filled_value: Decimal::ZERO,
        })
        .collect()
}

fn total_units(offers: &[Offer]) -> Quantity {
    offers.iter().map(|o| o.units).sum()
}

impl ClearingAlgorithm for DoubleAuctionEngine {
    fn name(&self) -> &str {
        "Double Auction"
    }

    fn resolve(
        &mut self,
        commodity: CommodityId,
        bids: Vec<Offer>,
        asks: Vec<Offer>,
        roster: &mut Roster,
        rng: &mut dyn RandomSource,
        previous_price: Price,
    ) -> ClearingResult<RoundStats> {
        // Reject bad input before any draw or transfer happens
        validate(&bids, commodity, Side::Buy, roster)?;
        validate(&asks, commodity, Side::Sell, roster)?;

        let mut stats = RoundStats::idle(commodity, previous_price);
        stats.bid_units = total_units(&bids);
        stats.ask_units = total_units(&asks);

        let mut bids = prepare(bids, rng);
        let mut asks = prepare(asks, rng);

        // Highest willingness-to-pay first
        bids.sort_unstable_by(|a, b| {
            b.offer
                .unit_price
                .cmp(&a.offer.unit_price)
                .then(a.position.cmp(&b.position))
        });
        // Lowest willingness-to-accept first
        asks.sort_unstable_by(|a, b| {
            a.offer
                .unit_price
                .cmp(&b.offer.unit_price)
                .then(a.position.cmp(&b.position))
        });

        let mut bi = 0;
        let mut ai = 0;
        let mut since_removal = 0usize;

        while bi < bids.len() && ai < asks.len() {
            let bid = &mut bids[bi];
            let ask = &mut asks[ai];

            let quantity = bid.offer.units.min(ask.offer.units);
            let clearing_price = (bid.offer.unit_price + ask.offer.unit_price) / Decimal::TWO;

            if quantity > Decimal::ZERO {
                let buyer = bid.offer.agent;
                let seller = ask.offer.agent;

                bid.record(quantity, clearing_price);
                ask.record(quantity, clearing_price);

                roster.transfer_commodity(commodity, quantity, seller, buyer)?;
                roster.transfer_money(quantity * clearing_price, seller, buyer)?;

                stats.units_traded += quantity;
                stats.money_traded += quantity * clearing_price;
                stats.trades += 1;

                log::trace!(
                    "{}: {} sold {} to {} @ {}",
                    commodity,
                    seller,
                    quantity,
                    buyer,
                    clearing_price
                );
            }

            if ask.offer.is_filled() {
                ai += 1;
                since_removal = 0;
            }
            if bid.offer.is_filled() {
                bi += 1;
                since_removal = 0;
            }

            since_removal += 1;
            if since_removal > self.failsafe_limit {
                log::error!(
                    "{}: no offer left the book in {} iterations, abandoning this round's matching",
                    commodity,
                    since_removal
                );
                stats.aborted = true;
                break;
            }
        }

        // One belief update per offer: fills report their average clearing
        // price, everything left untouched reports a failure
        for entry in bids.iter().chain(asks.iter()) {
            roster.get_mut(entry.offer.agent)?.update_price_model(
                commodity,
                entry.offer.side,
                entry.outcome(),
            );
        }

        stats.settle_price(previous_price);

        log::debug!(
            "{}: bids {} asks {} traded {} @ {} ({} trades)",
            commodity,
            stats.bid_units,
            stats.ask_units,
            stats.units_traded,
            stats.average_price,
            stats.trades
        );

        Ok(stats)
    }
}
