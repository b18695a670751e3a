//! Per-commodity and per-class history of a simulation run

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bazaar_core::{ClassId, CommodityId, DomainError, DomainResult, Money, Price, RoundStats};

use crate::Series;

/// Which per-commodity series to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Volume-weighted clearing price
    Price,
    /// Units offered by asks
    Asks,
    /// Units requested by bids
    Bids,
    /// Asks minus bids
    Imbalance,
    /// Units traded
    Trades,
}

/// Parallel series for one commodity; every field has the same length
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityHistory {
    pub price: Series,
    pub asks: Series,
    pub bids: Series,
    pub imbalance: Series,
    pub trades: Series,
}

impl CommodityHistory {
    pub fn series(&self, kind: SeriesKind) -> &Series {
        match kind {
            SeriesKind::Price => &self.price,
            SeriesKind::Asks => &self.asks,
            SeriesKind::Bids => &self.bids,
            SeriesKind::Imbalance => &self.imbalance,
            SeriesKind::Trades => &self.trades,
        }
    }

    fn push(&mut self, stats: &RoundStats) {
        self.price.push(stats.average_price);
        self.asks.push(stats.ask_units);
        self.bids.push(stats.bid_units);
        self.imbalance.push(stats.imbalance());
        self.trades.push(stats.units_traded);
    }

    pub fn len(&self) -> usize {
        self.price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }
}

/// Append-only ledger of market statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryRecorder {
    commodities: Vec<CommodityHistory>,
    profits: Vec<Series>,
}

impl HistoryRecorder {
    pub fn new(commodity_count: usize, class_count: usize) -> Self {
        Self {
            commodities: vec![CommodityHistory::default(); commodity_count],
            profits: vec![Series::new(); class_count],
        }
    }

    /// Append one round of clearing stats for `stats.commodity`
    pub fn record_round(&mut self, stats: &RoundStats) -> DomainResult<()> {
        self.commodity_mut(stats.commodity)?.push(stats);
        Ok(())
    }

    /// Append one round of average profit for a class
    pub fn record_profit(&mut self, class: ClassId, profit: Money) -> DomainResult<()> {
        self.profits
            .get_mut(class.index())
            .ok_or_else(|| DomainError::UnknownClass(class.to_string()))?
            .push(profit);
        Ok(())
    }

    pub fn commodity(&self, commodity: CommodityId) -> DomainResult<&CommodityHistory> {
        self.commodities
            .get(commodity.index())
            .ok_or_else(|| DomainError::UnknownCommodity(commodity.to_string()))
    }

    fn commodity_mut(&mut self, commodity: CommodityId) -> DomainResult<&mut CommodityHistory> {
        self.commodities
            .get_mut(commodity.index())
            .ok_or_else(|| DomainError::UnknownCommodity(commodity.to_string()))
    }

    pub fn series(&self, commodity: CommodityId, kind: SeriesKind) -> DomainResult<&Series> {
        Ok(self.commodity(commodity)?.series(kind))
    }

    /// Trailing-window average of one commodity series
    pub fn average(
        &self,
        commodity: CommodityId,
        kind: SeriesKind,
        range: usize,
    ) -> DomainResult<Decimal> {
        Ok(self.series(commodity, kind)?.average(range))
    }

    /// Last recorded clearing price, zero before the first round
    pub fn last_price(&self, commodity: CommodityId) -> DomainResult<Price> {
        self.average(commodity, SeriesKind::Price, 1)
    }

    pub fn profit(&self, class: ClassId) -> DomainResult<&Series> {
        self.profits
            .get(class.index())
            .ok_or_else(|| DomainError::UnknownClass(class.to_string()))
    }

    pub fn profit_average(&self, class: ClassId, range: usize) -> DomainResult<Money> {
        Ok(self.profit(class)?.average(range))
    }

    /// Rounds recorded so far
    pub fn rounds(&self) -> usize {
        self.commodities.first().map(CommodityHistory::len).unwrap_or(0)
    }
}
