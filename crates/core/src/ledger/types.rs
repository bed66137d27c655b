//! Availability types.

use rust_decimal::Decimal;
use serde::Serialize;

/// Budget availability for a scope (category or department).
///
/// `allocated` is the sum of `max_amount` over active budgets in the
/// scope; `approved` is the sum of `requested_amount` over approved
/// budget requests in the same scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Total allocated ceiling (active budgets).
    pub allocated: Decimal,
    /// Total already approved draws.
    pub approved: Decimal,
}

impl Availability {
    /// Creates an availability from the two scope totals.
    #[must_use]
    pub const fn new(allocated: Decimal, approved: Decimal) -> Self {
        Self {
            allocated,
            approved,
        }
    }

    /// Remaining budget. Negative when the scope is over-committed.
    #[must_use]
    pub fn raw(&self) -> Decimal {
        self.allocated - self.approved
    }

    /// Consumer-facing remaining budget, floored at zero.
    #[must_use]
    pub fn display(&self) -> Decimal {
        self.raw().max(Decimal::ZERO)
    }

    /// Whether the scope can absorb a draw of `amount`.
    #[must_use]
    pub fn covers(&self, amount: Decimal) -> bool {
        self.raw() >= amount
    }

    /// Remaining budget after a draw of `amount`.
    #[must_use]
    pub fn after(&self, amount: Decimal) -> Decimal {
        self.raw() - amount
    }
}

/// Before/after view of a scope's remaining budget around one approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetSnapshot {
    /// Remaining budget before the draw.
    pub before: Decimal,
    /// Remaining budget after the draw.
    pub after: Decimal,
}
