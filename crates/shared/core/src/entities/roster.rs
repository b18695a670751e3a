use rust_decimal::Decimal;

use super::{Agent, PriceBelief};
use crate::error::{DomainError, DomainResult};
use crate::registry::{AgentClass, AgentId, ClassId, CommodityId};
use crate::values::{Money, Quantity};

/// Arena of agent slots
///
/// Slots are never removed or reordered: a bankrupt agent's slot is
/// reinitialized in place, so an [`AgentId`] stays valid for the whole run.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    slots: Vec<Agent>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new agent in the next free slot
    pub fn spawn(
        &mut self,
        class_id: ClassId,
        class: &AgentClass,
        beliefs: Vec<PriceBelief>,
    ) -> AgentId {
        let id = AgentId(self.slots.len());
        self.slots.push(Agent::spawn(id, class_id, class, beliefs));
        id
    }

    /// Overwrite a slot with a fresh member of `class_id`, keeping its id
    pub fn reinitialize(
        &mut self,
        id: AgentId,
        class_id: ClassId,
        class: &AgentClass,
        beliefs: Vec<PriceBelief>,
    ) -> DomainResult<()> {
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or(DomainError::UnknownAgent(id.index()))?;
        *slot = Agent::spawn(id, class_id, class, beliefs);
        Ok(())
    }

    pub fn get(&self, id: AgentId) -> DomainResult<&Agent> {
        self.slots
            .get(id.index())
            .ok_or(DomainError::UnknownAgent(id.index()))
    }

    pub fn get_mut(&mut self, id: AgentId) -> DomainResult<&mut Agent> {
        self.slots
            .get_mut(id.index())
            .ok_or(DomainError::UnknownAgent(id.index()))
    }

    /// Move goods from seller to buyer
    pub fn transfer_commodity(
        &mut self,
        commodity: CommodityId,
        units: Quantity,
        seller: AgentId,
        buyer: AgentId,
    ) -> DomainResult<()> {
        // Validate both ends before touching either
        self.get(seller)?;
        self.get(buyer)?;
        self.get_mut(seller)?.change_inventory(commodity, -units);
        self.get_mut(buyer)?.change_inventory(commodity, units);
        Ok(())
    }

    /// Move money from buyer to seller
    pub fn transfer_money(
        &mut self,
        amount: Money,
        seller: AgentId,
        buyer: AgentId,
    ) -> DomainResult<()> {
        self.get(seller)?;
        self.get(buyer)?;
        self.get_mut(seller)?.add_money(amount);
        self.get_mut(buyer)?.add_money(-amount);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.slots.iter_mut()
    }

    /// Ids of every slot, in slot order
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.slots.len()).map(AgentId)
    }

    /// Non-destroyed members of a class
    pub fn living(&self, class: ClassId) -> impl Iterator<Item = &Agent> {
        self.slots
            .iter()
            .filter(move |a| a.class() == class && !a.is_destroyed())
    }

    pub fn living_count(&self, class: ClassId) -> usize {
        self.living(class).count()
    }

    pub fn total_money(&self) -> Money {
        self.slots.iter().map(Agent::money).sum()
    }

    pub fn total_inventory(&self, commodity: CommodityId) -> Quantity {
        self.slots
            .iter()
            .map(|a| a.inventory(commodity))
            .fold(Decimal::ZERO, |acc, q| acc + q)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
