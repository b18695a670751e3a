//! Market - the round loop
//!
//! Every round runs the same fixed sequence:
//!
//! ```text
//!  snapshot money ──► perform ──► generate offers ──► clear each commodity
//!                                                          │
//!            replace bankrupt agents ◄── record profits ◄──┘
//! ```
//!
//! Commodities and classes are visited in registry order, agents in slot
//! order, so a run is fully determined by its configuration and seed.

use bazaar_core::{
    Agent, AgentId, ClassId, ClassRegistry, CommodityId, CommodityRegistry, DomainError,
    DomainResult, Money, OfferBook, PriceBelief, Quantity, Roster,
};
use bazaar_history::{HistoryRecorder, Series, SeriesKind};
use bazaar_matching::{ClearingAlgorithm, DoubleAuctionEngine};
use bazaar_ports::{BehaviorLogic, SimulationContext};
use rust_decimal::Decimal;

use crate::error::{MarketError, Result};
use crate::population::PopulationManager;

/// Rounds of price history used to seed a newcomer's beliefs
pub const BELIEF_WINDOW: usize = 10;

pub struct Market<L: BehaviorLogic> {
    commodities: CommodityRegistry,
    classes: ClassRegistry,
    /// One logic per class, indexed by `ClassId`
    logics: Vec<L>,
    roster: Roster,
    ctx: SimulationContext,
    history: HistoryRecorder,
    engine: Box<dyn ClearingAlgorithm>,
    population: PopulationManager,
    /// Newcomers spawned per class
    replacements: Vec<u64>,
}

impl<L: BehaviorLogic> Market<L> {
    /// Assemble a market, checking every cross-reference up front
    pub fn new(
        commodities: CommodityRegistry,
        classes: ClassRegistry,
        logics: Vec<L>,
        roster: Roster,
        ctx: SimulationContext,
    ) -> Result<Self> {
        if commodities.is_empty() {
            return Err(MarketError::Empty("commodity"));
        }
        if classes.is_empty() {
            return Err(MarketError::Empty("class"));
        }
        if logics.len() != classes.len() {
            return Err(MarketError::LogicMismatch {
                classes: classes.len(),
                logics: logics.len(),
            });
        }
        for (_, class) in classes.iter() {
            for actual in [class.start_inventory.len(), class.ideal_inventory.len()] {
                if actual != commodities.len() {
                    return Err(MarketError::InventoryShape {
                        class: class.name.clone(),
                        expected: commodities.len(),
                        actual,
                    });
                }
            }
        }
        for agent in roster.iter() {
            classes.get(agent.class())?;
        }

        let history = HistoryRecorder::new(commodities.len(), classes.len());
        let replacements = vec![0; classes.len()];

        Ok(Self {
            commodities,
            classes,
            logics,
            roster,
            ctx,
            history,
            engine: Box::new(DoubleAuctionEngine::new()),
            population: PopulationManager::new(),
            replacements,
        })
    }

    /// Swap the clearing algorithm
    pub fn with_engine(mut self, engine: Box<dyn ClearingAlgorithm>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_population(mut self, population: PopulationManager) -> Self {
        self.population = population;
        self
    }

    /// Run exactly `rounds` rounds
    ///
    /// The production ledger restarts from zero; history keeps accumulating
    /// across calls.
    pub fn simulate(&mut self, rounds: usize) -> Result<()> {
        self.ctx.reset();
        log::info!(
            "Simulating {} rounds: {} agents, {} commodities, {} classes, clearing with {}",
            rounds,
            self.roster.len(),
            self.commodities.len(),
            self.classes.len(),
            self.engine.name()
        );

        for _ in 0..rounds {
            self.run_round()?;
        }

        log::info!(
            "Simulation finished after {} recorded rounds",
            self.history.rounds()
        );
        Ok(())
    }

    fn run_round(&mut self) -> Result<()> {
        for agent in self.roster.iter_mut() {
            agent.snapshot_money();
        }

        for agent in self.roster.iter_mut() {
            if agent.is_destroyed() {
                continue;
            }
            let logic = self
                .logics
                .get(agent.class().index())
                .ok_or_else(|| DomainError::UnknownClass(agent.class().to_string()))?;
            logic.perform(agent, &mut self.ctx);
        }

        let book = self.collect_offers()?;
        self.clear(book)?;

        for class in self.classes.ids() {
            let profit = self.average_profit(class);
            self.history.record_profit(class, profit)?;
        }

        self.replace_bankrupt()
    }

    fn collect_offers(&self) -> Result<OfferBook> {
        let mut book = OfferBook::new(self.commodities.len());
        let mut scratch = OfferBook::new(self.commodities.len());
        for agent in self.roster.iter() {
            if agent.is_destroyed() {
                continue;
            }
            let class = self.classes.get(agent.class())?;
            let logic = self.logic(agent.class())?;
            for commodity in self.commodities.ids() {
                if let Err(err) = logic.generate_offers(agent, class, commodity, &mut scratch) {
                    log::warn!(
                        "Dropped {} offer from {}: {}",
                        self.commodities.name(commodity),
                        agent.id(),
                        err
                    );
                }
            }

            // Agents only trade on their own behalf
            for commodity in self.commodities.ids() {
                let (bids, asks) = scratch.take(commodity);
                for offer in bids.into_iter().chain(asks) {
                    if offer.agent != agent.id() {
                        log::warn!(
                            "Dropped {} offer {} posted for {}",
                            self.commodities.name(commodity),
                            agent.id(),
                            offer.agent
                        );
                        continue;
                    }
                    book.post(offer)?;
                }
            }
        }
        Ok(book)
    }

    /// Clear every commodity, then record the round in one go so the
    /// series never disagree on length
    fn clear(&mut self, mut book: OfferBook) -> Result<()> {
        let mut rounds = Vec::with_capacity(self.commodities.len());
        for commodity in self.commodities.ids() {
            let (bids, asks) = book.take(commodity);
            let previous_price = self.history.last_price(commodity)?;
            let stats = self.engine.resolve(
                commodity,
                bids,
                asks,
                &mut self.roster,
                self.ctx.rng(),
                previous_price,
            )?;
            rounds.push(stats);
        }

        for stats in &rounds {
            self.history.record_round(stats)?;
        }
        Ok(())
    }

    fn replace_bankrupt(&mut self) -> Result<()> {
        for id in self.roster.ids() {
            let former = self.roster.get(id)?.class();
            let Some(class_id) =
                self.population
                    .maybe_replace(id, &mut self.roster, &self.classes, &self.history)?
            else {
                continue;
            };

            let beliefs = self.fresh_beliefs()?;
            let class = self.classes.get(class_id)?;
            self.roster.reinitialize(id, class_id, class, beliefs)?;
            self.replacements[class_id.index()] += 1;

            log::info!(
                "{} ({}) went bankrupt, replaced by a new {}",
                id,
                self.classes.name(former),
                class.name
            );
        }
        Ok(())
    }

    /// Beliefs for a newcomer: recent average price, or the configured
    /// initial price while the market has no positive history
    pub fn fresh_beliefs(&self) -> DomainResult<Vec<PriceBelief>> {
        self.commodities
            .iter()
            .map(|(id, commodity)| {
                let recent = self.history.average(id, SeriesKind::Price, BELIEF_WINDOW)?;
                let price = if recent > Decimal::ZERO {
                    recent
                } else {
                    commodity.initial_price
                };
                Ok(PriceBelief::new(price))
            })
            .collect()
    }

    /// Mean profit of a class's living members this round
    pub fn average_profit(&self, class: ClassId) -> Money {
        let (total, count) = self
            .roster
            .living(class)
            .fold((Decimal::ZERO, 0u32), |(sum, n), a| (sum + a.profit(), n + 1));
        if count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(count)
        }
    }

    fn logic(&self, class: ClassId) -> DomainResult<&L> {
        self.logics
            .get(class.index())
            .ok_or_else(|| DomainError::UnknownClass(class.to_string()))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Resolve a commodity name
    pub fn commodity(&self, name: &str) -> DomainResult<CommodityId> {
        self.commodities.id(name)
    }

    /// Resolve a class name
    pub fn class(&self, name: &str) -> DomainResult<ClassId> {
        self.classes.id(name)
    }

    /// Name of the behavior logic bound to a class
    pub fn logic_name(&self, class: ClassId) -> DomainResult<&str> {
        Ok(self.logic(class)?.name())
    }

    pub fn commodities(&self) -> &CommodityRegistry {
        &self.commodities
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    pub fn series(&self, commodity: CommodityId, kind: SeriesKind) -> DomainResult<&Series> {
        self.history.series(commodity, kind)
    }

    pub fn average(
        &self,
        commodity: CommodityId,
        kind: SeriesKind,
        range: usize,
    ) -> DomainResult<Decimal> {
        self.history.average(commodity, kind, range)
    }

    pub fn profit(&self, class: ClassId) -> DomainResult<&Series> {
        self.history.profit(class)
    }

    pub fn profit_average(&self, class: ClassId, range: usize) -> DomainResult<Money> {
        self.history.profit_average(class, range)
    }

    /// Units produced since the last `simulate` call started
    pub fn production(&self, commodity: CommodityId) -> Quantity {
        self.ctx.production().total(commodity)
    }

    /// Class with the highest nominal output of `commodity`
    pub fn class_that_makes_most(&self, commodity: CommodityId) -> Option<ClassId> {
        let mut best: Option<(ClassId, Quantity)> = None;
        for class in self.classes.ids() {
            let Ok(logic) = self.logic(class) else {
                continue;
            };
            let amount = logic.production(commodity);
            if amount <= Decimal::ZERO {
                continue;
            }
            match best {
                Some((_, top)) if amount <= top => {}
                _ => best = Some((class, amount)),
            }
        }
        best.map(|(class, _)| class)
    }

    /// Commodity with the most demand relative to supply
    ///
    /// Ratio of trailing-average bids to asks over `range` rounds; only
    /// ratios above `minimum` qualify. Demand with no supply at all beats
    /// any finite ratio.
    pub fn best_market_opportunity(
        &self,
        minimum: Decimal,
        range: usize,
    ) -> DomainResult<Option<CommodityId>> {
        let mut best: Option<(CommodityId, Decimal)> = None;
        for commodity in self.commodities.ids() {
            let bids = self.history.average(commodity, SeriesKind::Bids, range)?;
            let asks = self.history.average(commodity, SeriesKind::Asks, range)?;
            let ratio = if asks > Decimal::ZERO {
                bids.checked_div(asks).unwrap_or(Decimal::MAX)
            } else if bids > Decimal::ZERO {
                Decimal::MAX
            } else {
                continue;
            };
            if ratio <= minimum {
                continue;
            }
            match best {
                Some((_, top)) if ratio <= top => {}
                _ => best = Some((commodity, ratio)),
            }
        }
        Ok(best.map(|(commodity, _)| commodity))
    }

    /// Mean holding of `commodity` across a class's living members
    pub fn average_inventory(&self, class: ClassId, commodity: CommodityId) -> Quantity {
        let (total, count) = self
            .roster
            .living(class)
            .fold((Decimal::ZERO, 0u32), |(sum, n), a| {
                (sum + a.inventory(commodity), n + 1)
            });
        if count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(count)
        }
    }

    /// Class whose members hold the most of `commodity` on average
    ///
    /// Ties go to the class registered first; `None` when nobody holds any.
    pub fn class_with_most(&self, commodity: CommodityId) -> Option<ClassId> {
        let mut best: Option<(ClassId, Quantity)> = None;
        for class in self.classes.ids() {
            let amount = self.average_inventory(class, commodity);
            if amount <= Decimal::ZERO {
                continue;
            }
            match best {
                Some((_, top)) if amount <= top => {}
                _ => best = Some((class, amount)),
            }
        }
        best.map(|(class, _)| class)
    }

    /// Living members of a class
    pub fn population(&self, class: ClassId) -> usize {
        self.roster.living_count(class)
    }

    /// Newcomers spawned into a class so far
    pub fn replacements(&self, class: ClassId) -> u64 {
        self.replacements.get(class.index()).copied().unwrap_or(0)
    }

    pub fn agent(&self, id: AgentId) -> DomainResult<&Agent> {
        self.roster.get(id)
    }
}
