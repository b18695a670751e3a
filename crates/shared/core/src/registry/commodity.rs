use serde::{Deserialize, Serialize};

use super::CommodityId;
use crate::error::{DomainError, DomainResult};
use crate::values::Price;

/// A tradeable good
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commodity {
    pub name: String,
    /// Seed for price beliefs before the market has any history
    pub initial_price: Price,
}

/// Interns commodity names to dense [`CommodityId`] handles
///
/// Insertion order is the iteration order used by the market every round.
#[derive(Debug, Clone, Default)]
pub struct CommodityRegistry {
    commodities: Vec<Commodity>,
}

impl CommodityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a commodity, rejecting duplicate names
    pub fn register(
        &mut self,
        name: impl Into<String>,
        initial_price: Price,
    ) -> DomainResult<CommodityId> {
        let name = name.into();
        if self.commodities.iter().any(|c| c.name == name) {
            return Err(DomainError::DuplicateIdentifier(name));
        }
        self.commodities.push(Commodity {
            name,
            initial_price,
        });
        Ok(CommodityId::new(self.commodities.len() - 1))
    }

    /// Resolve a name to its handle
    pub fn id(&self, name: &str) -> DomainResult<CommodityId> {
        self.commodities
            .iter()
            .position(|c| c.name == name)
            .map(CommodityId::new)
            .ok_or_else(|| DomainError::UnknownCommodity(name.to_string()))
    }

    pub fn get(&self, id: CommodityId) -> DomainResult<&Commodity> {
        self.commodities
            .get(id.index())
            .ok_or_else(|| DomainError::UnknownCommodity(id.to_string()))
    }

    /// Name of a commodity, or the handle's display form if it is not registered
    pub fn name(&self, id: CommodityId) -> String {
        self.get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Handles in registration order
    pub fn ids(&self) -> impl Iterator<Item = CommodityId> + use<> {
        (0..self.commodities.len()).map(CommodityId::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommodityId, &Commodity)> {
        self.commodities
            .iter()
            .enumerate()
            .map(|(i, c)| (CommodityId::new(i), c))
    }

    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }
}
