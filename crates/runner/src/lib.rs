//! Bazaar Runner - market orchestration
//!
//! Wires the shared kernel and the behavior logic into a runnable economy:
//!
//! - **Config**: JSON settings, validated before anything is built
//! - **Bootstrap**: registries, profession logics and the starting population
//! - **Market**: the round loop and its queries
//! - **Population**: replacement of bankrupt agents
//! - **Report**: end-of-run summary
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────┐
//!        │ config.json  │
//!        └──────┬───────┘
//!               │ bootstrap
//!               ▼
//! ┌───────────────────────────────────────────────┐
//! │                    MARKET                     │
//! │                                               │
//! │  agents ──perform──► goods                    │
//! │     │                                         │
//! │     └──offers──► DoubleAuctionEngine ──stats──┼──► HistoryRecorder
//! │                        │                      │
//! │                 belief updates                │
//! │                                               │
//! │  bankrupt agents ──► PopulationManager        │
//! └───────────────────────────────────────────────┘
//!               │
//!               ▼
//!        ┌──────────────┐
//!        │ MarketReport │
//!        └──────────────┘
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod market;
pub mod population;
pub mod report;

// Re-export main types
pub use bootstrap::{build_market, seed_beliefs};
pub use config::{MarketConfigFile, load_config, load_config_from_str, load_default_config};
pub use error::{ConfigError, MarketError, Result};
pub use market::{BELIEF_WINDOW, Market};
pub use population::{DEFAULT_PROFIT_WINDOW, PopulationManager};
pub use report::{ClassRow, CommodityRow, MarketReport};

// Re-export the history view for callers reading series
pub use bazaar_history::{Series, SeriesKind};
