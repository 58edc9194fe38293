//! Public transport fare comparison.
//!
//! Prices single tickets, season passes (Abo) and the nationwide flat-rate
//! pass (GA) from the distance-tiered tariff tables, and reports how many
//! single tickets per week a season pass is worth.

pub mod config;
pub mod error;
pub mod pricing;
pub mod report;

pub use config::{FareConfig, OutputFormat};
pub use error::{FareError, Result};
