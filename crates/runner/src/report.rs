//! End-of-run summary tables

use std::fmt;

use bazaar_core::{DomainResult, Money, Price, Quantity};
use bazaar_history::SeriesKind;
use bazaar_ports::BehaviorLogic;
use serde::Serialize;

use crate::market::Market;

/// Trailing averages for one commodity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommodityRow {
    pub name: String,
    pub price: Price,
    pub bids: Quantity,
    pub asks: Quantity,
    pub trades: Quantity,
    pub imbalance: Quantity,
    pub produced: Quantity,
}

/// State of one agent class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRow {
    pub name: String,
    pub logic: String,
    pub population: usize,
    pub replacements: u64,
    pub profit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketReport {
    pub rounds: usize,
    /// Window of the trailing averages
    pub range: usize,
    pub commodities: Vec<CommodityRow>,
    pub classes: Vec<ClassRow>,
}

impl MarketReport {
    /// Summarize the last `range` rounds of a market
    pub fn from_market<L: BehaviorLogic>(market: &Market<L>, range: usize) -> DomainResult<Self> {
        let mut commodities = Vec::with_capacity(market.commodities().len());
        for (id, commodity) in market.commodities().iter() {
            commodities.push(CommodityRow {
                name: commodity.name.clone(),
                price: market.average(id, SeriesKind::Price, range)?.round_dp(2),
                bids: market.average(id, SeriesKind::Bids, range)?.round_dp(2),
                asks: market.average(id, SeriesKind::Asks, range)?.round_dp(2),
                trades: market.average(id, SeriesKind::Trades, range)?.round_dp(2),
                imbalance: market.average(id, SeriesKind::Imbalance, range)?.round_dp(2),
                produced: market.production(id),
            });
        }

        let mut classes = Vec::with_capacity(market.classes().len());
        for (id, class) in market.classes().iter() {
            classes.push(ClassRow {
                name: class.name.clone(),
                logic: market.logic_name(id)?.to_string(),
                population: market.population(id),
                replacements: market.replacements(id),
                profit: market.profit_average(id, range)?.round_dp(2),
            });
        }

        Ok(Self {
            rounds: market.history().rounds(),
            range,
            commodities,
            classes,
        })
    }
}

impl fmt::Display for MarketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Market after {} rounds (averages over the last {})",
            self.rounds, self.range
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "commodity", "price", "bids", "asks", "trades", "imbalance", "produced"
        )?;
        for row in &self.commodities {
            writeln!(
                f,
                "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                row.name, row.price, row.bids, row.asks, row.trades, row.imbalance, row.produced
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:<12} {:>10} {:>12} {:>10}",
            "class", "logic", "agents", "replacements", "profit"
        )?;
        for row in &self.classes {
            writeln!(
                f,
                "{:<12} {:<12} {:>10} {:>12} {:>10}",
                row.name, row.logic, row.population, row.replacements, row.profit
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::build_market;
    use crate::config::load_default_config;

    #[test]
    fn test_report_covers_every_commodity_and_class() {
        let mut config = load_default_config().unwrap();
        config.seed = 3;
        let mut market = build_market(&config).unwrap();
        market.simulate(5).unwrap();

        let report = MarketReport::from_market(&market, 10).unwrap();
        assert_eq!(report.rounds, 5);
        assert_eq!(report.commodities.len(), 5);
        assert_eq!(report.classes.len(), 5);
        assert_eq!(report.classes[0].logic, "farmer");

        let population: usize = report.classes.iter().map(|c| c.population).sum();
        assert_eq!(population, 50);

        let text = report.to_string();
        assert!(text.starts_with("Market after 5 rounds"));
        assert!(text.contains("blacksmith"));
    }
}
