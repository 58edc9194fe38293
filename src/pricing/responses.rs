//! Structured fare results.

use rust_decimal::Decimal;
use serde::Serialize;

/// Season pass vs. single ticket comparison for one distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassComparisonRow {
    pub distance_km: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub pass_per_year: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pass_per_month: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pass_per_day: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ticket_price: Decimal,
    /// Whole single tickets per week that still cost less than the pass
    pub tickets_per_week_break_even: u32,
}

/// Flat-rate pass price broken down by period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRatePassPrices {
    #[serde(with = "rust_decimal::serde::str")]
    pub per_year: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub per_month: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub per_work_day: Decimal,
}

/// Flat-rate pass prices with and without the yearly deposit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRatePassCosts {
    pub with_deposit: FlatRatePassPrices,
    pub without_deposit: FlatRatePassPrices,
}

/// Full report: flat-rate pass costs followed by the distance sweep
#[derive(Debug, Clone, Serialize)]
pub struct FareReport {
    pub currency: String,
    pub flat_rate_pass: FlatRatePassCosts,
    pub comparison: Vec<PassComparisonRow>,
}
