use bazaar_core::{CommodityId, CommodityRegistry, DomainResult};

/// Handles of the five commodities the professions work with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goods {
    pub food: CommodityId,
    pub wood: CommodityId,
    pub ore: CommodityId,
    pub metal: CommodityId,
    pub tools: CommodityId,
}

impl Goods {
    /// Look up every good by name, failing on the first one not registered
    pub fn resolve(registry: &CommodityRegistry) -> DomainResult<Self> {
        Ok(Self {
            food: registry.id("food")?,
            wood: registry.id("wood")?,
            ore: registry.id("ore")?,
            metal: registry.id("metal")?,
            tools: registry.id("tools")?,
        })
    }
}
