//! The built-in financial tests as plain functions.
//!
//! Every function takes the snapshot and its threshold explicitly; defaults live in
//! [`configuration::Thresholds`]. A test whose inputs are absent or not numeric
//! returns `false`.

use core_types::{Metric, MetricSnapshot};
use rust_decimal::Decimal;

/// Return on equity ≥ `min_roe` (default 0.15).
pub fn return_on_equity(snapshot: &MetricSnapshot, min_roe: Decimal) -> bool {
    at_least(snapshot, Metric::ReturnOnEquity, min_roe)
}

/// Debt-to-equity strictly below `max_debt_to_equity` (default 50, reported as a percentage).
pub fn debt_to_equity(snapshot: &MetricSnapshot, max_debt_to_equity: Decimal) -> bool {
    snapshot
        .number(Metric::DebtToEquity)
        .is_some_and(|value| value < max_debt_to_equity)
}

/// Profit margin ≥ `min_profit_margin` (default 0.10).
pub fn profit_margin(snapshot: &MetricSnapshot, min_profit_margin: Decimal) -> bool {
    at_least(snapshot, Metric::ProfitMargins, min_profit_margin)
}

/// Quarterly earnings growth ≥ `min_eps_growth` (default 0.10).
pub fn eps_growth(snapshot: &MetricSnapshot, min_eps_growth: Decimal) -> bool {
    at_least(snapshot, Metric::EarningsQuarterlyGrowth, min_eps_growth)
}

/// Forward P/E ≤ `max_forward_pe` (default 15).
pub fn forward_pe(snapshot: &MetricSnapshot, max_forward_pe: Decimal) -> bool {
    at_most(snapshot, Metric::ForwardPe, max_forward_pe)
}

/// `ROE * (1 - payout ratio)` ≥ `min_sgr` (default 0.10). Needs both inputs.
pub fn sustainable_growth_rate(snapshot: &MetricSnapshot, min_sgr: Decimal) -> bool {
    let (Some(roe), Some(payout_ratio)) = (
        snapshot.number(Metric::ReturnOnEquity),
        snapshot.number(Metric::PayoutRatio),
    ) else {
        return false;
    };

    Decimal::ONE
        .checked_sub(payout_ratio)
        .and_then(|retention| roe.checked_mul(retention))
        .is_some_and(|sgr| sgr >= min_sgr)
}

/// Operating margin ≥ `min_operating_margin` (default 0.20).
pub fn operating_margin(snapshot: &MetricSnapshot, min_operating_margin: Decimal) -> bool {
    at_least(snapshot, Metric::OperatingMargins, min_operating_margin)
}

/// Price-to-book ≤ `max_price_to_book` (default 3).
pub fn price_to_book(snapshot: &MetricSnapshot, max_price_to_book: Decimal) -> bool {
    at_most(snapshot, Metric::PriceToBook, max_price_to_book)
}

/// Free cash flow strictly above `min_free_cash_flow` (default 0, i.e. positive).
pub fn free_cash_flow(snapshot: &MetricSnapshot, min_free_cash_flow: Decimal) -> bool {
    snapshot
        .number(Metric::FreeCashflow)
        .is_some_and(|value| value > min_free_cash_flow)
}

fn at_least(snapshot: &MetricSnapshot, metric: Metric, min: Decimal) -> bool {
    snapshot.number(metric).is_some_and(|value| value >= min)
}

fn at_most(snapshot: &MetricSnapshot, metric: Metric, max: Decimal) -> bool {
    snapshot.number(metric).is_some_and(|value| value <= max)
}
