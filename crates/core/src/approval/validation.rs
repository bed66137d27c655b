//! Request input validation.

use gasto_shared::sanitize::strip_markup;
use rust_decimal::Decimal;

use super::error::ApprovalError;

/// Hard ceiling for requested amounts, in whole currency units.
pub const MAX_REQUEST_AMOUNT_UNITS: i64 = 1_000_000_000;

/// Minimum sanitized description length.
const DESCRIPTION_MIN: usize = 10;

/// Maximum sanitized description length.
const DESCRIPTION_MAX: usize = 1000;

/// Validates a requested amount.
///
/// Amounts must be strictly positive, within the hard ceiling, and
/// carry at most two decimal places.
///
/// # Errors
///
/// Returns the matching `ApprovalError` variant for each violated rule.
pub fn validate_amount(amount: Decimal) -> Result<(), ApprovalError> {
    if amount <= Decimal::ZERO {
        return Err(ApprovalError::NonPositiveAmount);
    }

    let limit = Decimal::from(MAX_REQUEST_AMOUNT_UNITS);
    if amount > limit {
        return Err(ApprovalError::AmountTooLarge { amount, limit });
    }

    if amount.round_dp(2) != amount {
        return Err(ApprovalError::TooManyDecimalPlaces);
    }

    Ok(())
}

/// Validates and sanitizes a free-text description.
///
/// Markup is stripped before the length check so tag padding cannot
/// satisfy the minimum. Returns the sanitized text that should be
/// persisted.
///
/// # Errors
///
/// Returns `DescriptionTooShort` / `DescriptionTooLong` when the
/// sanitized text falls outside `10..=1000` characters.
pub fn validate_description(raw: &str) -> Result<String, ApprovalError> {
    let sanitized = strip_markup(raw);
    let len = sanitized.chars().count();

    if len < DESCRIPTION_MIN {
        return Err(ApprovalError::DescriptionTooShort {
            len,
            min: DESCRIPTION_MIN,
        });
    }
    if len > DESCRIPTION_MAX {
        return Err(ApprovalError::DescriptionTooLong {
            len,
            max: DESCRIPTION_MAX,
        });
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_positive_amount_ok() {
        assert!(validate_amount(dec!(0.01)).is_ok());
        assert!(validate_amount(dec!(1500.50)).is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert_eq!(
            validate_amount(dec!(0)),
            Err(ApprovalError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            validate_amount(dec!(-5)),
            Err(ApprovalError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_amount_above_ceiling_rejected() {
        let result = validate_amount(dec!(1000000000.01));
        assert!(matches!(result, Err(ApprovalError::AmountTooLarge { .. })));
    }

    #[test]
    fn test_amount_at_ceiling_ok() {
        assert!(validate_amount(dec!(1000000000)).is_ok());
    }

    #[test]
    fn test_three_decimal_places_rejected() {
        assert_eq!(
            validate_amount(dec!(10.999)),
            Err(ApprovalError::TooManyDecimalPlaces)
        );
    }

    #[test]
    fn test_trailing_zero_scale_ok() {
        // 10.10 has scale 2 even though the last digit is zero.
        assert!(validate_amount(dec!(10.10)).is_ok());
    }

    #[test]
    fn test_description_minimum_length() {
        assert!(validate_description("too short").is_err());
        assert!(validate_description("just long enough").is_ok());
    }

    #[test]
    fn test_description_markup_does_not_count() {
        // Tags are stripped before the length check.
        let result = validate_description("<b><i><u>hi</u></i></b>");
        assert!(matches!(
            result,
            Err(ApprovalError::DescriptionTooShort { len: 2, .. })
        ));
    }

    #[test]
    fn test_description_sanitized_output() {
        let sanitized = validate_description("<b>new office chairs</b> for Q3").unwrap();
        assert_eq!(sanitized, "new office chairs for Q3");
    }

    #[test]
    fn test_description_maximum_length() {
        let long = "x".repeat(1001);
        assert!(matches!(
            validate_description(&long),
            Err(ApprovalError::DescriptionTooLong { len: 1001, .. })
        ));

        let max = "x".repeat(1000);
        assert!(validate_description(&max).is_ok());
    }
}
