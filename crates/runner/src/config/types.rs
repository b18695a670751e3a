use std::collections::BTreeMap;

use bazaar_behavior::LogicConfig;
use bazaar_core::BeliefPolicy;
use bazaar_matching::DEFAULT_FAILSAFE_LIMIT;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::population::DEFAULT_PROFIT_WINDOW;

/// Root configuration of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfigFile {
    /// Seed of the run's random source
    #[serde(default)]
    pub seed: u64,
    /// Rounds the binary simulates
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Tradeable goods, in iteration order
    pub commodities: Vec<CommodityConfig>,
    /// Agent classes, in iteration order
    pub classes: Vec<ClassConfig>,
    /// Production tunables shared by every profession
    #[serde(default)]
    pub logic: LogicConfig,
    #[serde(default)]
    pub market: MarketSettings,
}

/// A tradeable good
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommodityConfig {
    /// Unique name (e.g., "food", "tools")
    pub id: String,
    /// Price beliefs start here until the market has traded
    pub initial_price: Decimal,
}

/// An agent class and its starting population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassConfig {
    /// Unique name of the class
    pub id: String,
    /// Behavior logic name (farmer, woodcutter, miner, refiner, blacksmith)
    pub logic: String,
    /// Starting money of every member
    pub money: Decimal,
    /// Members spawned at startup
    #[serde(default)]
    pub population: usize,
    /// Commodity id -> starting units
    #[serde(default)]
    pub start_inventory: BTreeMap<String, Decimal>,
    /// Commodity id -> units the class tries to hold
    #[serde(default)]
    pub ideal_inventory: BTreeMap<String, Decimal>,
    /// Price belief update steps
    #[serde(default)]
    pub belief: BeliefPolicy,
}

/// Market-wide knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSettings {
    /// Rounds of profit history compared when replacing an agent
    #[serde(default = "default_profit_window")]
    pub profit_window: usize,
    /// Matching iterations without progress before a commodity is abandoned
    #[serde(default = "default_failsafe_limit")]
    pub failsafe_limit: usize,
}

impl Default for MarketSettings {
    fn default() -> Self {
        MarketSettings {
            profit_window: default_profit_window(),
            failsafe_limit: default_failsafe_limit(),
        }
    }
}

fn default_rounds() -> usize {
    100
}

fn default_profit_window() -> usize {
    DEFAULT_PROFIT_WINDOW
}

fn default_failsafe_limit() -> usize {
    DEFAULT_FAILSAFE_LIMIT
}
