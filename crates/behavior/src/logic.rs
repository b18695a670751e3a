//! Per-profession production rules
//!
//! Every rule is deterministic: behaviors never draw from the run's random
//! source, so the shuffle draw sequence is the only thing a seed controls.

use bazaar_core::{Agent, CommodityId, Money, Quantity};
use bazaar_ports::{BehaviorLogic, SimulationContext};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{Goods, Profession};

/// Tunables shared by all professions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicConfig {
    /// Money charged when an agent lacks the inputs to work
    pub idle_fine: Money,
    /// Tools used up per round of tool-assisted work
    pub tool_wear: Quantity,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            idle_fine: dec!(2),
            tool_wear: dec!(0.1),
        }
    }
}

/// Behavior of one agent class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logic {
    profession: Profession,
    goods: Goods,
    config: LogicConfig,
}

impl Logic {
    pub fn new(profession: Profession, goods: Goods) -> Self {
        Self::with_config(profession, goods, LogicConfig::default())
    }

    pub fn with_config(profession: Profession, goods: Goods, config: LogicConfig) -> Self {
        Self {
            profession,
            goods,
            config,
        }
    }

    pub fn profession(&self) -> Profession {
        self.profession
    }

    fn produce(
        &self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        good: CommodityId,
        units: Quantity,
    ) {
        if units <= Decimal::ZERO {
            return;
        }
        agent.change_inventory(good, units);
        ctx.production_mut().record(good, units);
    }

    fn consume(&self, agent: &mut Agent, good: CommodityId, units: Quantity) {
        let units = units.min(agent.inventory(good)).max(Decimal::ZERO);
        agent.change_inventory(good, -units);
    }

    /// Use tools if any are held; returns whether they were used
    fn use_tools(&self, agent: &mut Agent) -> bool {
        if agent.inventory(self.goods.tools) < Decimal::ONE {
            return false;
        }
        self.consume(agent, self.goods.tools, self.config.tool_wear);
        true
    }

    fn fine(&self, agent: &mut Agent) {
        log::trace!(
            "{} ({}) idle, fined {}",
            agent.id(),
            self.profession,
            self.config.idle_fine
        );
        agent.add_money(-self.config.idle_fine);
    }

    fn farm(&self, agent: &mut Agent, ctx: &mut SimulationContext) {
        let g = self.goods;
        if agent.inventory(g.wood) < Decimal::ONE {
            return self.fine(agent);
        }
        let food = if self.use_tools(agent) { dec!(4) } else { dec!(2) };
        self.consume(agent, g.wood, Decimal::ONE);
        self.produce(agent, ctx, g.food, food);
    }

    /// Shared shape of the woodcutter and miner: eat one food, extract a raw good
    fn extract(
        &self,
        agent: &mut Agent,
        ctx: &mut SimulationContext,
        good: CommodityId,
        with_tools: Quantity,
        without_tools: Quantity,
    ) {
        let g = self.goods;
        if agent.inventory(g.food) < Decimal::ONE {
            return self.fine(agent);
        }
        let units = if self.use_tools(agent) {
            with_tools
        } else {
            without_tools
        };
        self.consume(agent, g.food, Decimal::ONE);
        self.produce(agent, ctx, good, units);
    }

    fn refine(&self, agent: &mut Agent, ctx: &mut SimulationContext) {
        let g = self.goods;
        let ore = agent.inventory(g.ore).floor();
        if agent.inventory(g.food) < Decimal::ONE || ore < Decimal::ONE {
            return self.fine(agent);
        }
        let metal = if self.use_tools(agent) {
            ore
        } else {
            ore.min(dec!(2))
        };
        self.consume(agent, g.food, Decimal::ONE);
        self.consume(agent, g.ore, metal);
        self.produce(agent, ctx, g.metal, metal);
    }

    fn smith(&self, agent: &mut Agent, ctx: &mut SimulationContext) {
        let g = self.goods;
        let metal = agent.inventory(g.metal).floor();
        if agent.inventory(g.food) < Decimal::ONE || metal < Decimal::ONE {
            return self.fine(agent);
        }
        self.consume(agent, g.food, Decimal::ONE);
        self.consume(agent, g.metal, metal);
        self.produce(agent, ctx, g.tools, metal);
    }
}

impl BehaviorLogic for Logic {
    fn perform(&self, agent: &mut Agent, ctx: &mut SimulationContext) {
        match self.profession {
            Profession::Farmer => self.farm(agent, ctx),
            Profession::Woodcutter => {
                self.extract(agent, ctx, self.goods.wood, dec!(2), Decimal::ONE)
            }
            Profession::Miner => self.extract(agent, ctx, self.goods.ore, dec!(4), dec!(2)),
            Profession::Refiner => self.refine(agent, ctx),
            Profession::Blacksmith => self.smith(agent, ctx),
        }
    }

    fn production(&self, commodity: CommodityId) -> Quantity {
        let g = self.goods;
        let (good, units) = match self.profession {
            Profession::Farmer => (g.food, dec!(4)),
            Profession::Woodcutter => (g.wood, dec!(2)),
            Profession::Miner => (g.ore, dec!(4)),
            Profession::Refiner => (g.metal, dec!(2)),
            Profession::Blacksmith => (g.tools, Decimal::ONE),
        };
        if good == commodity { units } else { Decimal::ZERO }
    }

    fn name(&self) -> &str {
        self.profession.as_str()
    }
}
