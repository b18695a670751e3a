//! Bankrupt-agent replacement
//!
//! An agent whose money reaches zero leaves the market at round end and its
//! slot is handed to a new agent. Which class the newcomer belongs to is
//! decided here:
//!
//! 1. A class with no living members is revived first (registry order)
//! 2. Otherwise the class with the best trailing average profit wins, ties
//!    going to the class registered first

use bazaar_core::{AgentId, ClassId, ClassRegistry, DomainResult, Roster};
use bazaar_history::HistoryRecorder;

/// Rounds of profit history compared when picking a class
pub const DEFAULT_PROFIT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationManager {
    profit_window: usize,
}

impl PopulationManager {
    pub fn new() -> Self {
        Self {
            profit_window: DEFAULT_PROFIT_WINDOW,
        }
    }

    pub fn with_profit_window(profit_window: usize) -> Self {
        Self { profit_window }
    }

    /// Retire `id` if it is bankrupt and pick the class of its replacement
    ///
    /// Returns `None` when the agent is solvent (or already retired). The
    /// agent is marked destroyed before the class is chosen, so it no longer
    /// counts toward its own class's population.
    pub fn maybe_replace(
        &self,
        id: AgentId,
        roster: &mut Roster,
        classes: &ClassRegistry,
        history: &HistoryRecorder,
    ) -> DomainResult<Option<ClassId>> {
        let agent = roster.get_mut(id)?;
        if agent.is_destroyed() || !agent.is_bankrupt() {
            return Ok(None);
        }
        agent.destroy();

        self.choose_class(roster, classes, history)
    }

    /// Class the next newcomer should join
    pub fn choose_class(
        &self,
        roster: &Roster,
        classes: &ClassRegistry,
        history: &HistoryRecorder,
    ) -> DomainResult<Option<ClassId>> {
        if let Some(missing) = classes.ids().find(|&c| roster.living_count(c) == 0) {
            return Ok(Some(missing));
        }

        let mut best = None;
        for class in classes.ids() {
            let profit = history.profit_average(class, self.profit_window)?;
            match best {
                Some((_, top)) if profit <= top => {}
                _ => best = Some((class, profit)),
            }
        }
        Ok(best.map(|(class, _)| class))
    }
}

impl Default for PopulationManager {
    fn default() -> Self {
        Self::new()
    }
}
