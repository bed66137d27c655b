use rust_decimal_macros::dec;

use super::*;

#[test]
fn test_reserve_is_ten_percent() {
    assert_eq!(SummaryService::reserve_for(dec!(10000)), dec!(1000.00));
    assert_eq!(SummaryService::reserve_for(dec!(0)), dec!(0.00));
    assert_eq!(SummaryService::reserve_for(dec!(333.33)), dec!(33.33));
}

#[test]
fn test_emergency_fund_figures() {
    let figures = SummaryService::emergency_fund(dec!(50000), dec!(12000));

    assert_eq!(figures.total_budget, dec!(50000));
    assert_eq!(figures.reserve, dec!(5000.00));
    assert_eq!(figures.total_expenses, dec!(12000));
}

#[test]
fn test_compare_without_previous_is_new() {
    let delta = SummaryService::compare(dec!(100), None);

    assert_eq!(delta.trend, Trend::New);
    assert_eq!(delta.previous, None);
    assert_eq!(delta.change_percent, None);
}

#[test]
fn test_compare_increase_percentage() {
    let delta = SummaryService::compare(dec!(1200), Some(dec!(1000)));

    assert_eq!(delta.trend, Trend::Increased);
    assert_eq!(delta.change_percent, Some(dec!(20.00)));
}

#[test]
fn test_compare_decrease_percentage() {
    let delta = SummaryService::compare(dec!(800), Some(dec!(1000)));

    assert_eq!(delta.trend, Trend::Decreased);
    assert_eq!(delta.change_percent, Some(dec!(-20.00)));
}

#[test]
fn test_compare_unchanged() {
    let delta = SummaryService::compare(dec!(1000), Some(dec!(1000)));

    assert_eq!(delta.trend, Trend::Unchanged);
    assert_eq!(delta.change_percent, Some(dec!(0.00)));
}

#[test]
fn test_compare_zero_previous_has_no_percentage() {
    let delta = SummaryService::compare(dec!(500), Some(dec!(0)));

    assert_eq!(delta.trend, Trend::Increased);
    assert_eq!(delta.change_percent, None);
}

#[test]
fn test_format_currency() {
    assert_eq!(SummaryService::format_currency(dec!(0)), "$0.00");
    assert_eq!(SummaryService::format_currency(dec!(1234.5)), "$1,234.50");
    assert_eq!(
        SummaryService::format_currency(dec!(1234567.891)),
        "$1,234,567.89"
    );
    assert_eq!(SummaryService::format_currency(dec!(-42)), "-$42.00");
    assert_eq!(SummaryService::format_currency(dec!(999)), "$999.00");
}

#[test]
fn test_trend_cache_roundtrip() {
    let cache = TrendCache::new();
    let figures = SummaryService::emergency_fund(dec!(1000), dec!(200));

    assert!(cache.previous_figures("company:1").is_none());

    cache.store_figures("company:1", figures.clone());
    assert_eq!(cache.previous_figures("company:1"), Some(figures));

    // Other keys stay independent.
    assert!(cache.previous_figures("company:2").is_none());
}

#[test]
fn test_trend_cache_direction_flag() {
    let cache = TrendCache::new();

    assert!(cache.last_direction("company:1").is_none());
    cache.store_direction("company:1", Trend::Increased);
    assert_eq!(cache.last_direction("company:1"), Some(Trend::Increased));
}

#[test]
fn test_trend_cache_invalidate_all() {
    let cache = TrendCache::new();
    cache.store_direction("company:1", Trend::Decreased);
    cache.invalidate_all();
    assert!(cache.last_direction("company:1").is_none());
}

#[test]
fn test_first_then_increased_sequence() {
    // First computation: everything reports "new". Second with a higher
    // budget total reports "increased" with the correct percentage.
    let cache = TrendCache::new();
    let key = "company:ef";

    let first = SummaryService::emergency_fund(dec!(1000), dec!(100));
    let delta = SummaryService::compare(first.total_budget, cache.previous_figures(key).map(|f| f.total_budget));
    assert_eq!(delta.trend, Trend::New);
    cache.store_figures(key, first);

    let second = SummaryService::emergency_fund(dec!(1500), dec!(100));
    let delta = SummaryService::compare(second.total_budget, cache.previous_figures(key).map(|f| f.total_budget));
    assert_eq!(delta.trend, Trend::Increased);
    assert_eq!(delta.change_percent, Some(dec!(50.00)));
}
