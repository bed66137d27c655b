//! Availability calculation and draw checks.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{Availability, BudgetSnapshot};

/// Stateless service for budget availability math.
pub struct LedgerService;

impl LedgerService {
    /// Folds scope totals into an [`Availability`].
    ///
    /// `allocated` are the `max_amount` values of active budgets in the
    /// scope, `approved` the `requested_amount` values of approved
    /// requests. Callers recompute these on every call; no running total
    /// is kept anywhere.
    #[must_use]
    pub fn availability<A, B>(allocated: A, approved: B) -> Availability
    where
        A: IntoIterator<Item = Decimal>,
        B: IntoIterator<Item = Decimal>,
    {
        Availability::new(allocated.into_iter().sum(), approved.into_iter().sum())
    }

    /// Checks a draw against a category's availability.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientBudget` when the remaining
    /// budget cannot absorb `requested`. The reported `available` is
    /// floored at zero.
    pub fn check_category_draw(
        availability: &Availability,
        requested: Decimal,
    ) -> Result<BudgetSnapshot, LedgerError> {
        if !availability.covers(requested) {
            return Err(LedgerError::InsufficientBudget {
                requested,
                available: availability.display(),
            });
        }

        Ok(BudgetSnapshot {
            before: availability.raw(),
            after: availability.after(requested),
        })
    }

    /// Checks a draw against a department's availability.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientDepartmentBudget` carrying the
    /// department name when the remaining budget cannot absorb
    /// `requested`.
    pub fn check_department_draw(
        availability: &Availability,
        requested: Decimal,
        department: &str,
    ) -> Result<BudgetSnapshot, LedgerError> {
        if !availability.covers(requested) {
            return Err(LedgerError::InsufficientDepartmentBudget {
                department: department.to_string(),
                requested,
                available: availability.display(),
            });
        }

        Ok(BudgetSnapshot {
            before: availability.raw(),
            after: availability.after(requested),
        })
    }
}
