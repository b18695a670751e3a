//! Bazaar Behavior - production logic for agent classes
//!
//! The classic five-profession economy:
//!
//! ```text
//!   wood ──► Farmer ──► food ──┬─► Woodcutter ──► wood
//!                              ├─► Miner ───────► ore
//!                              ├─► Refiner (ore) ──► metal
//!                              └─► Blacksmith (metal) ──► tools
//! ```
//!
//! Tools unlock the better recipe for every profession except the
//! blacksmith and wear out a little with each use. An agent that cannot work
//! pays an idle fine, which is what eventually bankrupts unprofitable
//! professions.

mod goods;
mod logic;
mod profession;

pub use goods::Goods;
pub use logic::{Logic, LogicConfig};
pub use profession::Profession;
