use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bazaar_core::{CommodityId, Quantity};

/// Units produced per commodity over a whole simulation run
///
/// Behavior logic adds to it whenever it creates goods; it is cleared only
/// when a new run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionLedger {
    totals: Vec<Quantity>,
}

impl ProductionLedger {
    pub fn new(commodity_count: usize) -> Self {
        Self {
            totals: vec![Decimal::ZERO; commodity_count],
        }
    }

    pub fn record(&mut self, commodity: CommodityId, amount: Quantity) {
        let index = commodity.index();
        if index >= self.totals.len() {
            self.totals.resize(index + 1, Decimal::ZERO);
        }
        self.totals[index] += amount;
    }

    pub fn total(&self, commodity: CommodityId) -> Quantity {
        self.totals
            .get(commodity.index())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn reset(&mut self) {
        self.totals.iter_mut().for_each(|t| *t = Decimal::ZERO);
    }
}
