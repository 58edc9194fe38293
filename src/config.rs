//! Fare calculation configuration
//!
//! Defaults reproduce the April 2020 price update. Every value can be
//! overridden through `FARE_*` environment variables or a `.env` file.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::error::{FareError, Result};

pub const DAYS_PER_YEAR: Decimal = dec!(365);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);
pub const WORKDAYS_PER_WEEK: Decimal = dec!(5);
const DAYS_PER_WEEK: Decimal = dec!(7);

const ENV_MINIMUM_TICKET_PRICE: &str = "FARE_MINIMUM_TICKET_PRICE";
const ENV_WORKDAYS_PER_MONTH: &str = "FARE_WORKDAYS_PER_MONTH";
const ENV_HOLIDAYS_PER_YEAR: &str = "FARE_HOLIDAYS_PER_YEAR";
const ENV_LOCKDOWN_DAYS: &str = "FARE_LOCKDOWN_DAYS";
const ENV_GA_ANNUAL_PRICE: &str = "FARE_GA_ANNUAL_PRICE";
const ENV_GA_DEPOSIT_DAYS: &str = "FARE_GA_DEPOSIT_DAYS";
const ENV_GA_LOCKDOWN_DEPOSIT_DAYS: &str = "FARE_GA_LOCKDOWN_DEPOSIT_DAYS";
const ENV_REPORT_MAX_KM: &str = "FARE_REPORT_MAX_KM";
const ENV_OUTPUT: &str = "FARE_OUTPUT";

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

/// Immutable fare parameters, built once at startup and passed by reference
#[derive(Debug, Clone, Serialize)]
pub struct FareConfig {
    /// Floor for single ticket prices
    pub minimum_ticket_price: Decimal,
    pub workdays_per_month: Decimal,
    pub holidays_per_year: Decimal,
    /// Calendar days of lockdown without commuting
    pub lockdown_days: Decimal,
    /// Nationwide flat-rate pass (GA) price per year
    pub ga_annual_price: Decimal,
    /// Days per year the GA can be deposited against a refund
    pub ga_deposit_days: Decimal,
    /// One-off deposit credit granted for the 2020 lockdown
    pub ga_lockdown_deposit_days: Decimal,
    /// Months paid for a season pass bought for a whole year
    pub season_pass_paid_months: Decimal,
    pub currency: String,
    /// Exclusive upper bound of the distance sweep
    pub report_max_km: u32,
    pub output: OutputFormat,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            minimum_ticket_price: dec!(4.4),
            workdays_per_month: dec!(22),
            holidays_per_year: dec!(30),
            lockdown_days: dec!(60),
            ga_annual_price: dec!(3860),
            ga_deposit_days: dec!(30),
            ga_lockdown_deposit_days: dec!(15),
            season_pass_paid_months: dec!(9),
            currency: "CHF".to_string(),
            report_max_km: 130,
            output: OutputFormat::Text,
        }
    }
}

impl FareConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(FareError::config(".env", e.to_string()));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            minimum_ticket_price: parse_var(
                &lookup,
                ENV_MINIMUM_TICKET_PRICE,
                defaults.minimum_ticket_price,
            )?,
            workdays_per_month: parse_var(&lookup, ENV_WORKDAYS_PER_MONTH, defaults.workdays_per_month)?,
            holidays_per_year: parse_var(&lookup, ENV_HOLIDAYS_PER_YEAR, defaults.holidays_per_year)?,
            lockdown_days: parse_var(&lookup, ENV_LOCKDOWN_DAYS, defaults.lockdown_days)?,
            ga_annual_price: parse_var(&lookup, ENV_GA_ANNUAL_PRICE, defaults.ga_annual_price)?,
            ga_deposit_days: parse_var(&lookup, ENV_GA_DEPOSIT_DAYS, defaults.ga_deposit_days)?,
            ga_lockdown_deposit_days: parse_var(
                &lookup,
                ENV_GA_LOCKDOWN_DEPOSIT_DAYS,
                defaults.ga_lockdown_deposit_days,
            )?,
            season_pass_paid_months: defaults.season_pass_paid_months,
            currency: defaults.currency,
            report_max_km: parse_var(&lookup, ENV_REPORT_MAX_KM, defaults.report_max_km)?,
            output: parse_var(&lookup, ENV_OUTPUT, defaults.output)?,
        };

        config.validate()?;
        debug!(?config, "fare configuration loaded");
        Ok(config)
    }

    /// Reject values that would divide by zero or produce negative prices.
    pub fn validate(&self) -> Result<()> {
        if self.minimum_ticket_price < Decimal::ZERO {
            return Err(FareError::config(ENV_MINIMUM_TICKET_PRICE, "must not be negative"));
        }
        if self.workdays_per_month <= Decimal::ZERO {
            return Err(FareError::config(ENV_WORKDAYS_PER_MONTH, "must be positive"));
        }
        if self.holidays_per_year < Decimal::ZERO {
            return Err(FareError::config(ENV_HOLIDAYS_PER_YEAR, "must not be negative"));
        }
        if self.lockdown_days < Decimal::ZERO {
            return Err(FareError::config(ENV_LOCKDOWN_DAYS, "must not be negative"));
        }
        if self.effective_workdays_per_month() <= Decimal::ZERO {
            return Err(FareError::config(
                ENV_HOLIDAYS_PER_YEAR,
                format!(
                    "holidays leave no workdays in a {}-workday month",
                    self.workdays_per_month
                ),
            ));
        }
        if self.ga_annual_price < Decimal::ZERO {
            return Err(FareError::config(ENV_GA_ANNUAL_PRICE, "must not be negative"));
        }
        for (key, days) in [
            (ENV_GA_DEPOSIT_DAYS, self.ga_deposit_days),
            (ENV_GA_LOCKDOWN_DEPOSIT_DAYS, self.ga_lockdown_deposit_days),
        ] {
            if days < Decimal::ZERO || days >= DAYS_PER_YEAR {
                return Err(FareError::config(key, "must be between 0 and 364 days"));
            }
        }
        if self.season_pass_paid_months <= Decimal::ZERO
            || self.season_pass_paid_months > MONTHS_PER_YEAR
        {
            return Err(FareError::config(
                "season_pass_paid_months",
                "must be between 1 and 12 months",
            ));
        }
        if self.report_max_km < 2 {
            return Err(FareError::config(ENV_REPORT_MAX_KM, "must be at least 2"));
        }
        Ok(())
    }

    /// Lockdown days expressed in workdays (5 of every 7 days).
    pub fn lockdown_workdays(&self) -> Decimal {
        self.lockdown_days * WORKDAYS_PER_WEEK / DAYS_PER_WEEK
    }

    /// Holidays plus lockdown workdays, spread over twelve months.
    pub fn holidays_per_month(&self) -> Decimal {
        (self.holidays_per_year + self.lockdown_workdays()) / MONTHS_PER_YEAR
    }

    /// Workdays per month on which the season pass is actually used.
    pub fn effective_workdays_per_month(&self) -> Decimal {
        self.workdays_per_month - self.holidays_per_month()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| FareError::config(key, format!("invalid value '{}': {}", raw, e))),
        _ => Ok(default),
    }
}
