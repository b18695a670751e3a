use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BeliefPolicy, PriceBelief, Side, TradeOutcome};
use crate::registry::{AgentClass, AgentId, ClassId, CommodityId};
use crate::values::{Money, Price, Quantity};

/// One trader in the economy
///
/// Inventory and beliefs are dense arrays indexed by [`CommodityId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    class: ClassId,
    money: Money,
    /// Money at the start of the current round
    money_last: Money,
    inventory: Vec<Quantity>,
    beliefs: Vec<PriceBelief>,
    policy: BeliefPolicy,
    destroyed: bool,
}

impl Agent {
    /// Fresh member of `class` with its starting endowment
    pub fn spawn(
        id: AgentId,
        class_id: ClassId,
        class: &AgentClass,
        beliefs: Vec<PriceBelief>,
    ) -> Self {
        Self {
            id,
            class: class_id,
            money: class.starting_money,
            money_last: class.starting_money,
            inventory: class.start_inventory.clone(),
            beliefs,
            policy: class.belief,
            destroyed: false,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn money(&self) -> Money {
        self.money
    }

    /// Add (or with a negative amount, remove) money
    pub fn add_money(&mut self, amount: Money) {
        self.money += amount;
    }

    /// Remember current money as the round-start balance
    pub fn snapshot_money(&mut self) {
        self.money_last = self.money;
    }

    /// Money gained since the last snapshot
    pub fn profit(&self) -> Money {
        self.money - self.money_last
    }

    pub fn is_bankrupt(&self) -> bool {
        self.money <= Decimal::ZERO
    }

    pub fn inventory(&self, commodity: CommodityId) -> Quantity {
        self.inventory
            .get(commodity.index())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Adjust holdings of one commodity by `delta`
    pub fn change_inventory(&mut self, commodity: CommodityId, delta: Quantity) {
        if let Some(held) = self.inventory.get_mut(commodity.index()) {
            *held += delta;
        }
    }

    pub fn belief(&self, commodity: CommodityId) -> Option<&PriceBelief> {
        self.beliefs.get(commodity.index())
    }

    /// Price this agent would offer on `side` for `commodity`
    pub fn price_target(&self, commodity: CommodityId, side: Side) -> Price {
        self.belief(commodity)
            .map(|b| b.target(side))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn policy(&self) -> &BeliefPolicy {
        &self.policy
    }

    /// Feed the outcome of one offer back into the belief model
    pub fn update_price_model(
        &mut self,
        commodity: CommodityId,
        side: Side,
        outcome: TradeOutcome,
    ) {
        let policy = self.policy;
        if let Some(belief) = self.beliefs.get_mut(commodity.index()) {
            belief.update(side, outcome, &policy);
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ClassRegistry, CommodityRegistry};
    use rust_decimal_macros::dec;

    fn farmer() -> Agent {
        let mut commodities = CommodityRegistry::new();
        let food = commodities.register("food", dec!(1)).unwrap();
        let mut classes = ClassRegistry::new();
        let class =
            AgentClass::new("farmer", dec!(20), commodities.len()).with_start(food, dec!(3));
        let id = classes.register(class.clone()).unwrap();
        Agent::spawn(AgentId(0), id, &class, vec![PriceBelief::new(dec!(1))])
    }

    #[test]
    fn test_spawn_uses_class_endowment() {
        let agent = farmer();
        let food = CommodityId::new(0);
        assert_eq!(agent.money(), dec!(20));
        assert_eq!(agent.inventory(food), dec!(3));
        assert_eq!(agent.price_target(food, Side::Buy), dec!(1));
        assert!(!agent.is_destroyed());
    }

    #[test]
    fn test_profit_is_relative_to_snapshot() {
        let mut agent = farmer();
        agent.snapshot_money();
        agent.add_money(dec!(-25));
        assert_eq!(agent.profit(), dec!(-25));
        assert!(agent.is_bankrupt());

        agent.snapshot_money();
        assert_eq!(agent.profit(), dec!(0));
    }

    #[test]
    fn test_update_price_model_uses_class_policy() {
        let mut agent = farmer();
        let food = CommodityId::new(0);
        agent.update_price_model(food, Side::Sell, TradeOutcome::Filled(dec!(3)));
        assert_eq!(agent.price_target(food, Side::Sell), dec!(2));
        assert_eq!(agent.price_target(food, Side::Buy), dec!(1));
    }
}
