//! Bazaar History
//!
//! Append-only time series recorded once per round by the market, plus the
//! run-scoped production ledger fed by behavior logic.

mod ledger;
mod recorder;
mod series;

pub use ledger::ProductionLedger;
pub use recorder::{CommodityHistory, HistoryRecorder, SeriesKind};
pub use series::Series;
