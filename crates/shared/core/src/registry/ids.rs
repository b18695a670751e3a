use serde::{Deserialize, Serialize};

/// Dense handle for a registered commodity
///
/// Handles are issued by [`CommodityRegistry`](super::CommodityRegistry) in
/// insertion order and double as indices into per-commodity arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommodityId(usize);

impl CommodityId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the commodity in the registry
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CommodityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "commodity#{}", self.0)
    }
}

/// Dense handle for a registered agent class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(usize);

impl ClassId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the class in the registry
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Stable roster slot of an agent
///
/// The id survives replacement: a bankrupt agent's slot is reinitialized in
/// place and keeps its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}
