use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClassId, CommodityId};
use crate::entities::BeliefPolicy;
use crate::error::{DomainError, DomainResult};
use crate::values::{Money, Quantity};

/// Archetype shared by a cohort of agents
///
/// Holds the endowment every new member starts with and the inventory level
/// the class tries to hold for each commodity. Behavior logic is registered
/// separately, indexed by the same [`ClassId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentClass {
    pub name: String,
    pub starting_money: Money,
    /// Dense per-commodity starting inventory
    pub start_inventory: Vec<Quantity>,
    /// Dense per-commodity inventory target
    pub ideal_inventory: Vec<Quantity>,
    pub belief: BeliefPolicy,
}

impl AgentClass {
    /// Class with empty inventories sized for `commodity_count` commodities
    pub fn new(name: impl Into<String>, starting_money: Money, commodity_count: usize) -> Self {
        Self {
            name: name.into(),
            starting_money,
            start_inventory: vec![Decimal::ZERO; commodity_count],
            ideal_inventory: vec![Decimal::ZERO; commodity_count],
            belief: BeliefPolicy::default(),
        }
    }

    pub fn with_start(mut self, commodity: CommodityId, units: Quantity) -> Self {
        if let Some(slot) = self.start_inventory.get_mut(commodity.index()) {
            *slot = units;
        }
        self
    }

    pub fn with_ideal(mut self, commodity: CommodityId, units: Quantity) -> Self {
        if let Some(slot) = self.ideal_inventory.get_mut(commodity.index()) {
            *slot = units;
        }
        self
    }

    pub fn with_belief(mut self, belief: BeliefPolicy) -> Self {
        self.belief = belief;
        self
    }

    /// Inventory target for one commodity (zero if not tracked)
    pub fn ideal(&self, commodity: CommodityId) -> Quantity {
        self.ideal_inventory
            .get(commodity.index())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Interns class names to dense [`ClassId`] handles
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: Vec<AgentClass>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, rejecting duplicate names
    pub fn register(&mut self, class: AgentClass) -> DomainResult<ClassId> {
        if self.classes.iter().any(|c| c.name == class.name) {
            return Err(DomainError::DuplicateIdentifier(class.name));
        }
        self.classes.push(class);
        Ok(ClassId::new(self.classes.len() - 1))
    }

    pub fn id(&self, name: &str) -> DomainResult<ClassId> {
        self.classes
            .iter()
            .position(|c| c.name == name)
            .map(ClassId::new)
            .ok_or_else(|| DomainError::UnknownClass(name.to_string()))
    }

    pub fn get(&self, id: ClassId) -> DomainResult<&AgentClass> {
        self.classes
            .get(id.index())
            .ok_or_else(|| DomainError::UnknownClass(id.to_string()))
    }

    pub fn name(&self, id: ClassId) -> String {
        self.get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Handles in registration order
    pub fn ids(&self) -> impl Iterator<Item = ClassId> + use<> {
        (0..self.classes.len()).map(ClassId::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &AgentClass)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassId::new(i), c))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
