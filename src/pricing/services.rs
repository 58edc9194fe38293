//! Fare functions built on the tiered calculator.
//!
//! Single tickets and season passes are priced from the tariff tables;
//! the flat-rate pass (GA) is a fixed annual price adjusted for deposits.

use rust_decimal::prelude::*;
use tracing::debug;

use crate::config::{FareConfig, DAYS_PER_YEAR, MONTHS_PER_YEAR, WORKDAYS_PER_WEEK};
use crate::error::Result;

use super::calculators::calculate_tiered_price;
use super::responses::{FlatRatePassCosts, FlatRatePassPrices};
use super::tables::{season_pass_rate_table, ticket_rate_table};

/// Single ticket price for `distance` km, never below the configured minimum.
pub fn regular_ticket_price(config: &FareConfig, distance: u32) -> Result<Decimal> {
    let rates = ticket_rate_table()?;
    let price = calculate_tiered_price(distance, &rates)?;

    if price < config.minimum_ticket_price {
        debug!(distance, %price, minimum = %config.minimum_ticket_price, "ticket price raised to minimum");
        return Ok(config.minimum_ticket_price);
    }
    Ok(price)
}

/// Monthly season pass price for `distance` km.
///
/// The pass must be bought for a whole year; the tariff value is the
/// undiscounted monthly price, of which only `season_pass_paid_months`
/// out of twelve are paid.
pub fn season_pass_price_per_month(config: &FareConfig, distance: u32) -> Result<Decimal> {
    let rates = season_pass_rate_table()?;
    let unreduced = calculate_tiered_price(distance, &rates)?;
    let price = unreduced * config.season_pass_paid_months / MONTHS_PER_YEAR;

    debug!(distance, %unreduced, %price, "season pass monthly price");
    Ok(price)
}

pub fn season_pass_price_per_year(config: &FareConfig, distance: u32) -> Result<Decimal> {
    Ok(season_pass_price_per_month(config, distance)? * MONTHS_PER_YEAR)
}

/// Monthly price spread over the workdays left after holidays and lockdown.
pub fn season_pass_price_per_day(config: &FareConfig, distance: u32) -> Result<Decimal> {
    Ok(season_pass_price_per_month(config, distance)? / config.effective_workdays_per_month())
}

/// Whole single tickets per week (5 workdays) that stay cheaper than the pass.
///
/// Rounds down; a zero ticket price yields 0 and ratios beyond `u32` saturate.
pub fn break_even_tickets_per_week(pass_per_day: Decimal, ticket_price: Decimal) -> u32 {
    if ticket_price.is_zero() {
        return 0;
    }
    let ratio = (pass_per_day * WORKDAYS_PER_WEEK / ticket_price).floor();
    ratio.to_u32().unwrap_or_else(|| {
        debug!(%ratio, %pass_per_day, %ticket_price, "break-even ratio saturated");
        u32::MAX
    })
}

/// Flat-rate pass (GA) costs with and without the yearly deposit.
///
/// The annual price already credits the lockdown deposit. The deposit
/// variant applies the regular deposit and, once more, the lockdown
/// credit on top of that.
pub fn flat_rate_pass_costs(config: &FareConfig) -> FlatRatePassCosts {
    let deposit_factor = (DAYS_PER_YEAR - config.ga_deposit_days) / DAYS_PER_YEAR;
    let lockdown_factor = (DAYS_PER_YEAR - config.ga_lockdown_deposit_days) / DAYS_PER_YEAR;

    let per_year = config.ga_annual_price * lockdown_factor;
    let per_year_with_deposit = per_year * deposit_factor * lockdown_factor;

    let costs = FlatRatePassCosts {
        with_deposit: flat_rate_breakdown(config, per_year_with_deposit),
        without_deposit: flat_rate_breakdown(config, per_year),
    };
    debug!(?costs, "flat-rate pass costs");
    costs
}

fn flat_rate_breakdown(config: &FareConfig, per_year: Decimal) -> FlatRatePassPrices {
    let per_month = per_year / MONTHS_PER_YEAR;
    FlatRatePassPrices {
        per_year,
        per_month,
        per_work_day: per_month / config.workdays_per_month,
    }
}
