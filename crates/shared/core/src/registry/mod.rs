//! Interned identifiers
//!
//! Commodity and class names are resolved to dense handles once at
//! configuration load; everything downstream indexes arrays with them.

mod class;
mod commodity;
mod ids;

pub use class::{AgentClass, ClassRegistry};
pub use commodity::{Commodity, CommodityRegistry};
pub use ids::{AgentId, ClassId, CommodityId};
