use bazaar_history::ProductionLedger;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::RandomSource;

/// Run-scoped shared state
///
/// One instance per simulation run, passed explicitly to every component
/// that needs the randomness source or the production ledger.
pub struct SimulationContext {
    rng: Box<dyn RandomSource>,
    production: ProductionLedger,
}

impl SimulationContext {
    pub fn new(rng: Box<dyn RandomSource>, commodity_count: usize) -> Self {
        Self {
            rng,
            production: ProductionLedger::new(commodity_count),
        }
    }

    /// Context backed by a seeded `StdRng`
    pub fn seeded(seed: u64, commodity_count: usize) -> Self {
        Self::new(Box::new(StdRng::seed_from_u64(seed)), commodity_count)
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    pub fn production(&self) -> &ProductionLedger {
        &self.production
    }

    pub fn production_mut(&mut self) -> &mut ProductionLedger {
        &mut self.production
    }

    /// Start of a new run: production totals go back to zero
    pub fn reset(&mut self) {
        self.production.reset();
    }
}

impl std::fmt::Debug for SimulationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationContext")
            .field("production", &self.production)
            .finish_non_exhaustive()
    }
}
