//! Market Simulation Integration Test
//!
//! Runs whole rounds through the market:
//! - Single-commodity trades between hand-built agents
//! - Price carry-over when nothing trades
//! - Replacement of bankrupt agents and the class-diversity floor
//! - Conservation of money and goods through clearing
//! - Reproducibility of the default economy from its seed
//! - Long runs of the default economy staying in numeric range

use bazaar_core::{
    Agent, AgentClass, AgentId, BELIEF_PRECISION, ClassRegistry, CommodityId, CommodityRegistry,
    PriceBelief, Quantity, Roster, Side,
};
use bazaar_ports::{BehaviorLogic, SimulationContext};
use bazaar_runner::{Market, SeriesKind, build_market, load_default_config, seed_beliefs};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Produces nothing; trades only through the default offer rule
struct Still;

impl BehaviorLogic for Still {
    fn perform(&self, _agent: &mut Agent, _ctx: &mut SimulationContext) {}

    fn production(&self, _commodity: CommodityId) -> Quantity {
        Decimal::ZERO
    }

    fn name(&self) -> &str {
        "still"
    }
}

/// Takes every coin from one agent during its work phase
struct Tax {
    victim: AgentId,
}

impl BehaviorLogic for Tax {
    fn perform(&self, agent: &mut Agent, _ctx: &mut SimulationContext) {
        if agent.id() == self.victim {
            let money = agent.money();
            agent.add_money(-money);
        }
    }

    fn production(&self, _commodity: CommodityId) -> Quantity {
        Decimal::ZERO
    }

    fn name(&self) -> &str {
        "tax"
    }
}

/// One seller holding 10 bread, one buyer wanting 10, both believing 1.0
fn bread_market() -> Market<Still> {
    let mut commodities = CommodityRegistry::new();
    let bread = commodities.register("bread", dec!(1.0)).unwrap();

    let mut classes = ClassRegistry::new();
    let seller = classes
        .register(AgentClass::new("seller", dec!(10), 1).with_start(bread, dec!(10)))
        .unwrap();
    let buyer = classes
        .register(AgentClass::new("buyer", dec!(100), 1).with_ideal(bread, dec!(10)))
        .unwrap();

    let mut roster = Roster::new();
    roster.spawn(seller, classes.get(seller).unwrap(), seed_beliefs(&commodities));
    roster.spawn(buyer, classes.get(buyer).unwrap(), seed_beliefs(&commodities));

    let ctx = SimulationContext::seeded(1, commodities.len());
    Market::new(commodities, classes, vec![Still, Still], roster, ctx).unwrap()
}

#[test]
fn test_single_trade_moves_goods_and_money() {
    let mut market = bread_market();
    let bread = market.commodity("bread").unwrap();

    market.simulate(1).unwrap();

    let seller = market.agent(AgentId(0)).unwrap();
    let buyer = market.agent(AgentId(1)).unwrap();
    assert_eq!(seller.inventory(bread), dec!(0));
    assert_eq!(buyer.inventory(bread), dec!(10));
    assert_eq!(seller.money(), dec!(20));
    assert_eq!(buyer.money(), dec!(90));

    let trades = market.series(bread, SeriesKind::Trades).unwrap();
    let prices = market.series(bread, SeriesKind::Price).unwrap();
    assert_eq!(trades.values(), &[dec!(10)]);
    assert_eq!(prices.values(), &[dec!(1)]);
    assert_eq!(
        market.series(bread, SeriesKind::Imbalance).unwrap().values(),
        &[dec!(0)]
    );

    // Both sides filled at their belief, so beliefs stay put
    assert_eq!(seller.price_target(bread, Side::Sell), dec!(1));

    let seller_class = market.class("seller").unwrap();
    let buyer_class = market.class("buyer").unwrap();
    assert_eq!(market.profit(seller_class).unwrap().values(), &[dec!(10)]);
    assert_eq!(market.profit(buyer_class).unwrap().values(), &[dec!(-10)]);
}

#[test]
fn test_quiet_round_carries_previous_price() {
    let mut market = bread_market();
    let bread = market.commodity("bread").unwrap();

    // The second round has nobody left wanting to trade
    market.simulate(2).unwrap();

    let history = market.history();
    let bread_history = history.commodity(bread).unwrap();
    assert_eq!(bread_history.asks.values(), &[dec!(10), dec!(0)]);
    assert_eq!(bread_history.bids.values(), &[dec!(10), dec!(0)]);
    assert_eq!(bread_history.trades.values(), &[dec!(10), dec!(0)]);
    assert_eq!(bread_history.price.values(), &[dec!(1), dec!(1)]);
}

#[test]
fn test_first_quiet_round_records_zero_price() {
    let mut commodities = CommodityRegistry::new();
    commodities.register("bread", dec!(3)).unwrap();
    let mut classes = ClassRegistry::new();
    classes.register(AgentClass::new("idle", dec!(5), 1)).unwrap();

    let ctx = SimulationContext::seeded(1, 1);
    let mut market = Market::new(commodities, classes, vec![Still], Roster::new(), ctx).unwrap();
    market.simulate(1).unwrap();

    let bread = market.commodity("bread").unwrap();
    assert_eq!(market.average(bread, SeriesKind::Price, 10).unwrap(), dec!(0));
    assert_eq!(market.average(bread, SeriesKind::Trades, 10).unwrap(), dec!(0));
}

#[test]
fn test_bankrupt_agent_revives_missing_class() {
    let mut commodities = CommodityRegistry::new();
    commodities.register("bread", dec!(1)).unwrap();

    let mut classes = ClassRegistry::new();
    let baker = classes.register(AgentClass::new("baker", dec!(5), 1)).unwrap();
    let miller = classes.register(AgentClass::new("miller", dec!(7), 1)).unwrap();
    let farmer = classes.register(AgentClass::new("farmer", dec!(5), 1)).unwrap();

    let mut roster = Roster::new();
    let beliefs = seed_beliefs(&commodities);
    let victim = roster.spawn(baker, classes.get(baker).unwrap(), beliefs.clone());
    roster.spawn(baker, classes.get(baker).unwrap(), beliefs.clone());
    roster.spawn(farmer, classes.get(farmer).unwrap(), beliefs);

    let tax = || Tax { victim };
    let ctx = SimulationContext::seeded(1, 1);
    let mut market = Market::new(
        commodities,
        classes,
        vec![tax(), tax(), tax()],
        roster,
        ctx,
    )
    .unwrap();

    market.simulate(1).unwrap();

    let replaced = market.agent(victim).unwrap();
    assert_eq!(replaced.id(), victim);
    assert_eq!(replaced.class(), miller);
    assert_eq!(replaced.money(), dec!(7));
    assert!(!replaced.is_destroyed());

    assert_eq!(market.population(baker), 1);
    assert_eq!(market.population(miller), 1);
    assert_eq!(market.population(farmer), 1);
    assert_eq!(market.replacements(miller), 1);
    assert_eq!(market.replacements(baker), 0);
}

/// Random endowments and targets; agents only ever trade with each other
fn random_market(seed: u64) -> Market<Still> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut commodities = CommodityRegistry::new();
    for name in ["grain", "salt", "cloth"] {
        let price = Decimal::new(rng.gen_range(50i64..300), 2);
        commodities.register(name, price).unwrap();
    }

    let mut classes = ClassRegistry::new();
    let mut roster = Roster::new();
    for c in 0..4 {
        let money = Decimal::from(rng.gen_range(20i64..80));
        let mut class = AgentClass::new(format!("class{c}"), money, 3);
        for commodity in commodities.ids() {
            class = class
                .with_start(commodity, Decimal::from(rng.gen_range(0i64..12)))
                .with_ideal(commodity, Decimal::from(rng.gen_range(0i64..12)));
        }
        let id = classes.register(class).unwrap();
        for _ in 0..rng.gen_range(2usize..6) {
            let beliefs = commodities
                .iter()
                .map(|(_, c)| {
                    let skew = Decimal::new(rng.gen_range(-40i64..40), 2);
                    PriceBelief::new(c.initial_price + skew)
                })
                .collect();
            roster.spawn(id, classes.get(id).unwrap(), beliefs);
        }
    }

    let ctx = SimulationContext::seeded(seed, commodities.len());
    Market::new(commodities, classes, vec![Still, Still, Still, Still], roster, ctx).unwrap()
}

fn total_replacements<L: BehaviorLogic>(market: &Market<L>) -> u64 {
    market.classes().ids().map(|c| market.replacements(c)).sum()
}

#[test]
fn test_clearing_conserves_money_and_goods() {
    for seed in [3, 17, 99] {
        let mut market = random_market(seed);
        let commodities: Vec<CommodityId> = market.commodities().ids().collect();

        for round in 0..25 {
            let money = market.roster().total_money();
            let goods: Vec<Quantity> = commodities
                .iter()
                .map(|&c| market.roster().total_inventory(c))
                .collect();
            let replaced = total_replacements(&market);

            market.simulate(1).unwrap();

            for &c in &commodities {
                let history = market.history().commodity(c).unwrap();
                let traded = history.trades.last().unwrap();
                let bids = history.bids.last().unwrap();
                let asks = history.asks.last().unwrap();
                assert!(traded <= bids.min(asks), "seed {seed} round {round}");
                assert!(history.price.last().unwrap() >= Decimal::ZERO);
            }

            // Replacement hands out a fresh endowment, so only compare clean rounds
            if total_replacements(&market) == replaced {
                assert_eq!(market.roster().total_money(), money, "seed {seed} round {round}");
                for (&c, &before) in commodities.iter().zip(&goods) {
                    assert_eq!(market.roster().total_inventory(c), before);
                }
            }
        }
    }
}

#[test]
fn test_every_series_has_one_entry_per_round() {
    let mut market = random_market(5);
    market.simulate(7).unwrap();
    market.simulate(3).unwrap();

    assert_eq!(market.history().rounds(), 10);
    for c in market.commodities().ids() {
        for kind in [
            SeriesKind::Price,
            SeriesKind::Asks,
            SeriesKind::Bids,
            SeriesKind::Imbalance,
            SeriesKind::Trades,
        ] {
            assert_eq!(market.series(c, kind).unwrap().len(), 10);
        }
    }
    for class in market.classes().ids() {
        assert_eq!(market.profit(class).unwrap().len(), 10);
    }
}

#[test]
fn test_default_economy_keeps_every_class_alive() {
    let config = load_default_config().unwrap();
    let mut market = build_market(&config).unwrap();

    for _ in 0..60 {
        market.simulate(1).unwrap();
        for class in market.classes().ids() {
            assert!(market.population(class) >= 1);
        }
        assert_eq!(market.roster().iter().filter(|a| !a.is_destroyed()).count(), 50);
    }
}

#[test]
fn test_same_seed_same_history() {
    let config = load_default_config().unwrap();
    let mut first = build_market(&config).unwrap();
    let mut second = build_market(&config).unwrap();

    first.simulate(40).unwrap();
    second.simulate(40).unwrap();

    for c in first.commodities().ids() {
        assert_eq!(
            first.history().commodity(c).unwrap(),
            second.history().commodity(c).unwrap()
        );
        assert_eq!(first.production(c), second.production(c));
    }
    for class in first.classes().ids() {
        assert_eq!(first.profit(class).unwrap(), second.profit(class).unwrap());
        assert_eq!(first.replacements(class), second.replacements(class));
    }
}

#[test]
fn test_default_economy_survives_long_runs() {
    let config = load_default_config().unwrap();
    let mut market = build_market(&config).unwrap();

    market.simulate(500).unwrap();

    assert_eq!(market.history().rounds(), 500);
    for agent in market.roster().iter() {
        for c in market.commodities().ids() {
            for side in [Side::Buy, Side::Sell] {
                let target = agent.price_target(c, side);
                assert!(target >= Decimal::ZERO);
                assert!(target.scale() <= BELIEF_PRECISION, "{} {c} {side}", agent.id());
            }
        }
    }
}
