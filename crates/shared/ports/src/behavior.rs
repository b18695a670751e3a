use bazaar_core::{
    Agent, AgentClass, CommodityId, DomainResult, Offer, OfferBook, Quantity, Side,
};
use rust_decimal::Decimal;

use crate::SimulationContext;

/// Capabilities the market needs from an agent class's behavior
///
/// The set of implementations is closed per run: one logic per registered
/// class, chosen at configuration time.
pub trait BehaviorLogic {
    /// Produce, consume and pay upkeep for one round
    fn perform(&self, agent: &mut Agent, ctx: &mut SimulationContext);

    /// Nominal output of this class for `commodity` per round
    fn production(&self, commodity: CommodityId) -> Quantity;

    /// Post this round's offers for one commodity
    ///
    /// Sells whole units held above the class's ideal inventory at the sell
    /// belief; bids for the shortfall at the buy belief, capped by what the
    /// agent can afford.
    fn generate_offers(
        &self,
        agent: &Agent,
        class: &AgentClass,
        commodity: CommodityId,
        book: &mut OfferBook,
    ) -> DomainResult<()> {
        let held = agent.inventory(commodity);
        let ideal = class.ideal(commodity);

        if held > ideal {
            let surplus = (held - ideal).floor();
            if surplus > Decimal::ZERO {
                let price = agent.price_target(commodity, Side::Sell);
                book.post(Offer::ask(agent.id(), commodity, price, surplus))?;
            }
        } else if held < ideal && agent.money() > Decimal::ZERO {
            let shortage = (ideal - held).ceil();
            let price = agent.price_target(commodity, Side::Buy);
            // A vanishing price makes the quotient unrepresentable: the
            // agent can then afford the whole shortage
            let affordable = if price > Decimal::ZERO {
                agent
                    .money()
                    .checked_div(price)
                    .map_or(shortage, |units| units.floor())
            } else {
                shortage
            };
            let units = shortage.min(affordable);
            if units > Decimal::ZERO {
                book.post(Offer::bid(agent.id(), commodity, price, units))?;
            }
        }

        Ok(())
    }

    /// Display name for logs and reports
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{ClassRegistry, CommodityRegistry, PriceBelief, Roster};
    use rust_decimal_macros::dec;

    struct Idle;

    impl BehaviorLogic for Idle {
        fn perform(&self, _agent: &mut Agent, _ctx: &mut SimulationContext) {}

        fn production(&self, _commodity: CommodityId) -> Quantity {
            Decimal::ZERO
        }

        fn name(&self) -> &str {
            "idle"
        }
    }

    #[test]
    fn test_default_offers_sell_surplus_and_bid_shortage() {
        let mut commodities = CommodityRegistry::new();
        let food = commodities.register("food", dec!(1)).unwrap();
        let wood = commodities.register("wood", dec!(2)).unwrap();

        let class = AgentClass::new("farmer", dec!(5), commodities.len())
            .with_start(food, dec!(6.5))
            .with_ideal(food, dec!(2))
            .with_ideal(wood, dec!(4));
        let mut classes = ClassRegistry::new();
        let farmer = classes.register(class.clone()).unwrap();

        let mut roster = Roster::new();
        let beliefs = vec![PriceBelief::new(dec!(1)), PriceBelief::new(dec!(2))];
        let id = roster.spawn(farmer, &class, beliefs);
        let agent = roster.get(id).unwrap();

        let mut book = OfferBook::new(commodities.len());
        Idle.generate_offers(agent, &class, food, &mut book).unwrap();
        Idle.generate_offers(agent, &class, wood, &mut book).unwrap();

        // 4.5 surplus food -> 4 whole units at the sell belief
        assert_eq!(book.asks(food).len(), 1);
        assert_eq!(book.asks(food)[0].units, dec!(4));
        assert_eq!(book.asks(food)[0].unit_price, dec!(1));

        // Wants 4 wood at 2 but can only afford 2
        assert_eq!(book.bids(wood).len(), 1);
        assert_eq!(book.bids(wood)[0].units, dec!(2));
        assert!(book.bids(food).is_empty());
    }

    #[test]
    fn test_no_bid_without_money() {
        let mut commodities = CommodityRegistry::new();
        let wood = commodities.register("wood", dec!(2)).unwrap();
        let class = AgentClass::new("broke", dec!(0), 1).with_ideal(wood, dec!(3));

        let mut roster = Roster::new();
        let mut classes = ClassRegistry::new();
        let broke = classes.register(class.clone()).unwrap();
        let id = roster.spawn(broke, &class, vec![PriceBelief::new(dec!(2))]);

        let mut book = OfferBook::new(1);
        Idle.generate_offers(roster.get(id).unwrap(), &class, wood, &mut book)
            .unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn test_tiny_bid_price_asks_for_whole_shortage() {
        let mut commodities = CommodityRegistry::new();
        let wood = commodities.register("wood", dec!(2)).unwrap();
        let class = AgentClass::new("builder", dec!(100), 1).with_ideal(wood, dec!(3));

        let mut classes = ClassRegistry::new();
        let builder = classes.register(class.clone()).unwrap();
        // 100 / 1e-28 does not fit in a Decimal
        let tiny = Decimal::new(1, 28);
        let mut roster = Roster::new();
        let id = roster.spawn(builder, &class, vec![PriceBelief::new(tiny)]);

        let mut book = OfferBook::new(1);
        Idle.generate_offers(roster.get(id).unwrap(), &class, wood, &mut book)
            .unwrap();
        assert_eq!(book.bids(wood).len(), 1);
        assert_eq!(book.bids(wood)[0].units, dec!(3));
        assert_eq!(book.bids(wood)[0].unit_price, tiny);
    }
}
