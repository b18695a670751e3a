//! Drives every profession through a few rounds of work and checks the
//! production ledger against the goods that appeared in inventories.

use bazaar_behavior::{Goods, Logic, LogicConfig, Profession};
use bazaar_core::{Agent, AgentClass, ClassRegistry, CommodityRegistry, PriceBelief, Roster};
use bazaar_ports::{BehaviorLogic, SimulationContext};
use rust_decimal_macros::dec;

fn economy() -> (CommodityRegistry, Goods) {
    let mut commodities = CommodityRegistry::new();
    for (name, price) in [
        ("food", dec!(0.5)),
        ("wood", dec!(1)),
        ("ore", dec!(1)),
        ("metal", dec!(1)),
        ("tools", dec!(1)),
    ] {
        commodities.register(name, price).unwrap();
    }
    let goods = Goods::resolve(&commodities).unwrap();
    (commodities, goods)
}

#[test]
fn test_production_ledger_tracks_every_profession() {
    let (commodities, g) = economy();
    let n = commodities.len();

    let mut classes = ClassRegistry::new();
    let mut roster = Roster::new();
    let mut logics = Vec::new();
    for profession in Profession::ALL {
        let class = AgentClass::new(profession.as_str(), dec!(100), n)
            .with_start(g.food, dec!(10))
            .with_start(g.wood, dec!(10))
            .with_start(g.ore, dec!(10))
            .with_start(g.metal, dec!(1))
            .with_start(g.tools, dec!(1));
        let id = classes.register(class.clone()).unwrap();
        roster.spawn(id, &class, vec![PriceBelief::new(dec!(1)); n]);
        logics.push(Logic::new(profession, g));
    }

    let mut ctx = SimulationContext::seeded(7, n);
    for _ in 0..3 {
        for agent in roster.iter_mut() {
            logics[agent.class().index()].perform(agent, &mut ctx);
        }
    }

    let ledger = ctx.production();
    // Farmer: 4 food while tools hold at least one unit, then 2 per round
    assert_eq!(ledger.total(g.food), dec!(8));
    // Woodcutter: 2 with tools, then 1 per round
    assert_eq!(ledger.total(g.wood), dec!(4));
    // Miner: 4 with tools, then 2 per round
    assert_eq!(ledger.total(g.ore), dec!(8));
    // Refiner: all ore with tools on the first round, then nothing to refine
    assert_eq!(ledger.total(g.metal), dec!(10));
    // Blacksmith: one metal once, then idle
    assert_eq!(ledger.total(g.tools), dec!(1));

    let smith: &Agent = roster
        .iter()
        .find(|a| logics[a.class().index()].profession() == Profession::Blacksmith)
        .unwrap();
    assert_eq!(smith.money(), dec!(96));
    assert_eq!(smith.inventory(g.tools), dec!(2));
}

#[test]
fn test_custom_fine_and_wear() {
    let (commodities, g) = economy();
    let n = commodities.len();
    let config = LogicConfig {
        idle_fine: dec!(5),
        tool_wear: dec!(0.5),
    };

    let class = AgentClass::new("farmer", dec!(20), n)
        .with_start(g.wood, dec!(1))
        .with_start(g.tools, dec!(1.5));
    let mut classes = ClassRegistry::new();
    let id = classes.register(class.clone()).unwrap();
    let mut roster = Roster::new();
    let agent = roster.spawn(id, &class, vec![PriceBelief::new(dec!(1)); n]);

    let logic = Logic::with_config(Profession::Farmer, g, config);
    let mut ctx = SimulationContext::seeded(0, n);

    logic.perform(roster.get_mut(agent).unwrap(), &mut ctx);
    logic.perform(roster.get_mut(agent).unwrap(), &mut ctx);

    let farmer = roster.get(agent).unwrap();
    assert_eq!(farmer.inventory(g.food), dec!(4));
    assert_eq!(farmer.inventory(g.tools), dec!(1));
    assert_eq!(farmer.money(), dec!(15));
}
