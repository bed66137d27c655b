//! Derived aggregates and trend comparison.
//!
//! Statistics and the emergency fund estimate are computed from budget
//! and transaction rows on demand. The emergency fund view compares the
//! fresh figures against the previous computation held in an injected
//! TTL cache; the cache is a display convenience, never a ledger.

mod cache;
mod service;
mod types;

pub use cache::TrendCache;
pub use service::SummaryService;
pub use types::{EmergencyFundFigures, FigureDelta, Trend};

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
