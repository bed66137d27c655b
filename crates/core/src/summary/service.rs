//! Summary computations.

use rust_decimal::Decimal;

use super::types::{EmergencyFundFigures, FigureDelta, Trend};

/// Stateless service for summary math.
pub struct SummaryService;

impl SummaryService {
    /// Suggested emergency reserve: 10% of the active budget total.
    #[must_use]
    pub fn reserve_for(total_active_budget: Decimal) -> Decimal {
        (total_active_budget * Decimal::new(10, 2)).round_dp(2)
    }

    /// Builds the emergency fund figures from the two scope totals.
    #[must_use]
    pub fn emergency_fund(total_active_budget: Decimal, total_expenses: Decimal) -> EmergencyFundFigures {
        EmergencyFundFigures {
            total_budget: total_active_budget,
            reserve: Self::reserve_for(total_active_budget),
            total_expenses,
        }
    }

    /// Compares a figure against its previous computation.
    ///
    /// `change_percent` is rounded to two decimal places and omitted
    /// when no previous value exists or the previous value was zero.
    #[must_use]
    pub fn compare(current: Decimal, previous: Option<Decimal>) -> FigureDelta {
        let Some(previous) = previous else {
            return FigureDelta {
                current,
                previous: None,
                trend: Trend::New,
                change_percent: None,
            };
        };

        let trend = match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Trend::Increased,
            std::cmp::Ordering::Less => Trend::Decreased,
            std::cmp::Ordering::Equal => Trend::Unchanged,
        };

        let change_percent = if previous.is_zero() {
            None
        } else {
            Some(((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2))
        };

        FigureDelta {
            current,
            previous: Some(previous),
            trend,
            change_percent,
        }
    }

    /// Formats an amount as a currency string, e.g. `$1,234.56`.
    #[must_use]
    pub fn format_currency(amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        let negative = rounded.is_sign_negative();
        let abs = rounded.abs();

        let fixed = format!("{abs:.2}");
        let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if negative {
            format!("-${grouped}.{frac}")
        } else {
            format!("${grouped}.{frac}")
        }
    }
}
