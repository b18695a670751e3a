//! Bootstrap - turn a configuration file into a ready-to-run market
//!
//! - Interns commodity and class names to dense handles
//! - Binds every class to its profession logic
//! - Spawns the starting population, classes in configuration order
//! - Seeds the run's random source

use bazaar_behavior::{Goods, Logic, Profession};
use bazaar_core::{AgentClass, ClassRegistry, CommodityRegistry, PriceBelief, Roster};
use bazaar_matching::DoubleAuctionEngine;
use bazaar_ports::SimulationContext;

use crate::config::MarketConfigFile;
use crate::error::{ConfigError, Result};
use crate::market::Market;
use crate::population::PopulationManager;

/// Beliefs of an agent joining a market with no history yet
pub fn seed_beliefs(commodities: &CommodityRegistry) -> Vec<PriceBelief> {
    commodities
        .iter()
        .map(|(_, c)| PriceBelief::new(c.initial_price))
        .collect()
}

/// Build a market from a configuration, validating it first
pub fn build_market(config: &MarketConfigFile) -> Result<Market<Logic>> {
    config.validate()?;

    let mut commodities = CommodityRegistry::new();
    for commodity in &config.commodities {
        commodities.register(commodity.id.clone(), commodity.initial_price)?;
    }
    let goods = Goods::resolve(&commodities)?;

    let mut classes = ClassRegistry::new();
    let mut logics = Vec::with_capacity(config.classes.len());
    for class_config in &config.classes {
        let profession =
            Profession::from_name(&class_config.logic).ok_or_else(|| ConfigError::UnknownLogic {
                class: class_config.id.clone(),
                logic: class_config.logic.clone(),
            })?;

        let mut class = AgentClass::new(
            class_config.id.clone(),
            class_config.money,
            commodities.len(),
        )
        .with_belief(class_config.belief);
        for (name, units) in &class_config.start_inventory {
            class = class.with_start(commodities.id(name)?, *units);
        }
        for (name, units) in &class_config.ideal_inventory {
            class = class.with_ideal(commodities.id(name)?, *units);
        }

        classes.register(class)?;
        logics.push(Logic::with_config(profession, goods, config.logic));
    }

    let mut roster = Roster::new();
    for class_config in &config.classes {
        let id = classes.id(&class_config.id)?;
        let class = classes.get(id)?;
        for _ in 0..class_config.population {
            roster.spawn(id, class, seed_beliefs(&commodities));
        }
    }

    log::info!(
        "Bootstrapped {} agents in {} classes trading {} commodities (seed {})",
        roster.len(),
        classes.len(),
        commodities.len(),
        config.seed
    );

    let ctx = SimulationContext::seeded(config.seed, commodities.len());
    let market = Market::new(commodities, classes, logics, roster, ctx)?
        .with_engine(Box::new(DoubleAuctionEngine::with_failsafe_limit(
            config.market.failsafe_limit,
        )))
        .with_population(PopulationManager::with_profit_window(
            config.market.profit_window,
        ));
    Ok(market)
}
