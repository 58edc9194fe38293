//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::trace;

use crate::error::{FareError, Result};

use super::tables::{step_table, RangeTable};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use fare_compare::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Calculate a distance-tiered price from a per-km rate table.
///
/// Walks the route from km 1 in steps whose width comes from the step table,
/// charging `step * rate` for each step. A started step is billed in full, so
/// the first step is always charged even when `distance` is shorter than it.
///
/// # Arguments
/// * `distance` - Route length in km (must be at least 1)
/// * `rates` - Rate per km in cents, keyed by position along the route
///
/// # Returns
/// Total price in currency units (cents / 100), or
/// `FareError::DistanceOutOfRange` once the walk leaves either table.
pub fn calculate_tiered_price(distance: u32, rates: &RangeTable<Decimal>) -> Result<Decimal> {
    if distance == 0 {
        return Err(FareError::InvalidDistance { distance });
    }

    let steps = step_table()?;
    let mut price = Decimal::ZERO;
    let mut km: u32 = 1;

    loop {
        let step = *steps.get(km).ok_or(FareError::DistanceOutOfRange {
            distance,
            km,
            table: steps.name(),
        })?;
        let rate = *rates.get(km).ok_or(FareError::DistanceOutOfRange {
            distance,
            km,
            table: rates.name(),
        })?;

        price += Decimal::from(step) * rate;
        trace!(km, step, %rate, %price, "tier step");

        if km + step > distance {
            break;
        }
        km += step;
    }

    Ok(price / dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::tables::{season_pass_rate_table, ticket_rate_table};

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(3701.5), 0), dec!(3702));
    }

    #[test]
    fn test_round_money_decimal_places() {
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
        assert_eq!(round_money(dec!(1.7804), 2), dec!(1.78));
        assert_eq!(round_money(dec!(13.086), 2), dec!(13.09));
    }

    // ==================== calculate_tiered_price tests ====================

    #[test]
    fn test_first_step_billed_in_full() {
        let rates = ticket_rate_table().unwrap();
        // one full 4 km step at 44.51 cents, regardless of the 1 km distance
        assert_eq!(calculate_tiered_price(1, &rates).unwrap(), dec!(1.7804));
        assert_eq!(calculate_tiered_price(4, &rates).unwrap(), dec!(1.7804));
    }

    #[test]
    fn test_second_step_uses_rate_at_its_position() {
        let rates = ticket_rate_table().unwrap();
        // km 1: 4 * 44.51, km 5: 4 * 42.30
        assert_eq!(calculate_tiered_price(5, &rates).unwrap(), dec!(3.4724));
        assert_eq!(calculate_tiered_price(8, &rates).unwrap(), dec!(3.4724));
    }

    #[test]
    fn test_step_boundary_at_9_km() {
        let rates = ticket_rate_table().unwrap();
        // km 9 falls in the 2 km step band
        assert_eq!(calculate_tiered_price(9, &rates).unwrap(), dec!(4.3184));
        assert_eq!(calculate_tiered_price(10, &rates).unwrap(), dec!(4.3184));
        assert_eq!(calculate_tiered_price(11, &rates).unwrap(), dec!(5.1644));
    }

    #[test]
    fn test_step_boundary_at_31_km() {
        let rates = ticket_rate_table().unwrap();
        assert_eq!(calculate_tiered_price(30, &rates).unwrap(), dec!(11.9688));
        // km 31 opens a 3 km step at 37.24
        assert_eq!(calculate_tiered_price(31, &rates).unwrap(), dec!(13.0860));
        assert_eq!(calculate_tiered_price(33, &rates).unwrap(), dec!(13.0860));
        assert_eq!(calculate_tiered_price(34, &rates).unwrap(), dec!(14.2032));
    }

    #[test]
    fn test_season_pass_first_step() {
        let rates = season_pass_rate_table().unwrap();
        assert_eq!(calculate_tiered_price(1, &rates).unwrap(), dec!(66.88));
    }

    #[test]
    fn test_zero_distance_rejected() {
        let rates = ticket_rate_table().unwrap();
        let err = calculate_tiered_price(0, &rates).unwrap_err();
        assert!(matches!(err, FareError::InvalidDistance { distance: 0 }));
    }

    #[test]
    fn test_last_covered_distance() {
        assert!(calculate_tiered_price(1500, &ticket_rate_table().unwrap()).is_ok());
        assert!(calculate_tiered_price(250, &season_pass_rate_table().unwrap()).is_ok());
    }

    #[test]
    fn test_beyond_step_table_fails() {
        let rates = ticket_rate_table().unwrap();
        let err = calculate_tiered_price(1501, &rates).unwrap_err();
        match err {
            FareError::DistanceOutOfRange { distance, km, table } => {
                assert_eq!(distance, 1501);
                assert_eq!(km, 1501);
                assert_eq!(table, "step size");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_beyond_rate_table_fails() {
        let rates = season_pass_rate_table().unwrap();
        let err = calculate_tiered_price(251, &rates).unwrap_err();
        match err {
            FareError::DistanceOutOfRange { distance, km, table } => {
                assert_eq!(distance, 251);
                assert_eq!(km, 251);
                assert_eq!(table, "season pass rate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
