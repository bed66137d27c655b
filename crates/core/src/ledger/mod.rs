//! Budget availability computation.
//!
//! Answers "how much is left to spend" for a category, optionally
//! narrowed to a department. Availability is always derived from the
//! underlying rows; there is no stored running balance.

mod error;
mod service;
mod types;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{Availability, BudgetSnapshot};

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
