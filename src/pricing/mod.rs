//! Fare pricing for distance-tiered tariffs.
//!
//! Single tickets and season passes are priced by walking the route in
//! tariff steps; the flat-rate pass is priced from fixed parameters.

pub mod calculators;
pub mod responses;
pub mod services;
pub mod tables;

// Re-export commonly used items
pub use calculators::{calculate_tiered_price, round_money};
pub use responses::{FareReport, FlatRatePassCosts, FlatRatePassPrices, PassComparisonRow};
pub use services::{
    break_even_tickets_per_week, flat_rate_pass_costs, regular_ticket_price,
    season_pass_price_per_day, season_pass_price_per_month, season_pass_price_per_year,
};
pub use tables::{Band, RangeTable, TableError};
