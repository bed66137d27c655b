//! Summary view types.

use rust_decimal::Decimal;
use serde::Serialize;

/// Direction of a tracked figure relative to its previous value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// No previous value was cached.
    New,
    /// Higher than the previous value.
    Increased,
    /// Lower than the previous value.
    Decreased,
    /// Equal to the previous value.
    Unchanged,
}

impl Trend {
    /// Returns the string representation of the trend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Increased => "increased",
            Self::Decreased => "decreased",
            Self::Unchanged => "unchanged",
        }
    }
}

/// A tracked figure with its delta against the previous computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FigureDelta {
    /// Current value.
    pub current: Decimal,
    /// Previous value, when one was cached.
    pub previous: Option<Decimal>,
    /// Direction relative to the previous value.
    pub trend: Trend,
    /// Percentage change (2dp). None when there is no previous value or
    /// the previous value was zero.
    pub change_percent: Option<Decimal>,
}

/// The three figures tracked by the emergency fund view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyFundFigures {
    /// Total `max_amount` over active budgets.
    pub total_budget: Decimal,
    /// Suggested reserve: 10% of the total budget.
    pub reserve: Decimal,
    /// Total completed expense transactions.
    pub total_expenses: Decimal,
}
