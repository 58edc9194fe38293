//! Report drivers
//!
//! Rows are computed as structured records first and rendered afterwards,
//! so the numbers can be checked without parsing text.

use std::io::{self, Write};

use rust_decimal::Decimal;
use tracing::info;

use crate::config::{FareConfig, OutputFormat};
use crate::error::Result;
use crate::pricing::responses::{FareReport, FlatRatePassCosts, FlatRatePassPrices, PassComparisonRow};
use crate::pricing::services::{
    break_even_tickets_per_week, flat_rate_pass_costs, regular_ticket_price,
    season_pass_price_per_day, season_pass_price_per_month, season_pass_price_per_year,
};
use crate::pricing::round_money;

/// Compare season pass and single ticket prices for one distance.
pub fn comparison_row(config: &FareConfig, distance: u32) -> Result<PassComparisonRow> {
    let pass_per_year = season_pass_price_per_year(config, distance)?;
    let pass_per_month = season_pass_price_per_month(config, distance)?;
    let pass_per_day = season_pass_price_per_day(config, distance)?;
    let ticket_price = regular_ticket_price(config, distance)?;

    Ok(PassComparisonRow {
        distance_km: distance,
        pass_per_year,
        pass_per_month,
        pass_per_day,
        ticket_price,
        tickets_per_week_break_even: break_even_tickets_per_week(pass_per_day, ticket_price),
    })
}

/// Comparison rows for every distance from 1 km up to `report_max_km` (exclusive).
pub fn comparison_rows(config: &FareConfig) -> Result<Vec<PassComparisonRow>> {
    (1..config.report_max_km)
        .map(|distance| comparison_row(config, distance))
        .collect()
}

pub fn build_report(config: &FareConfig) -> Result<FareReport> {
    Ok(FareReport {
        currency: config.currency.clone(),
        flat_rate_pass: flat_rate_pass_costs(config),
        comparison: comparison_rows(config)?,
    })
}

/// The two flat-rate pass lines: with deposit, then without.
pub fn format_flat_rate_pass(costs: &FlatRatePassCosts) -> [String; 2] {
    [
        format_flat_rate_line("with Hinterlegung", &costs.with_deposit),
        format_flat_rate_line("without Hinterlegung", &costs.without_deposit),
    ]
}

fn format_flat_rate_line(label: &str, prices: &FlatRatePassPrices) -> String {
    format!(
        "GA {}: price per year = {},  GA price per month = {},  GA price per work day = {}",
        label,
        whole(prices.per_year),
        whole(prices.per_month),
        cents(prices.per_work_day),
    )
}

pub fn format_comparison_row(row: &PassComparisonRow, currency: &str) -> String {
    format!(
        "{} km: ABO per year = {} {cur}, ABO per month = {} {cur}, ABO per work day = {} {cur}, \
         ticket per day = {}, regular tickets per week cheaper than ABO = {}",
        row.distance_km,
        cents(row.pass_per_year),
        cents(row.pass_per_month),
        cents(row.pass_per_day),
        cents(row.ticket_price),
        row.tickets_per_week_break_even,
        cur = currency,
    )
}

// Rounds the exact decimal value, so a true midpoint such as 212.295 goes
// half-to-even (212.30) rather than wherever a binary float would land.
fn whole(amount: Decimal) -> String {
    format!("{:.0}", round_money(amount, 0))
}

fn cents(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount, 2))
}

/// Write the flat-rate pass report.
pub fn write_flat_rate_pass_report<W: Write>(config: &FareConfig, out: &mut W) -> Result<()> {
    for line in format_flat_rate_pass(&flat_rate_pass_costs(config)) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write one comparison line per distance.
pub fn write_comparison_report<W: Write>(config: &FareConfig, out: &mut W) -> Result<()> {
    for row in comparison_rows(config)? {
        writeln!(out, "{}", format_comparison_row(&row, &config.currency))?;
    }
    Ok(())
}

/// Write the complete report in the configured output format.
pub fn write_report<W: Write>(config: &FareConfig, out: &mut W) -> Result<()> {
    match config.output {
        OutputFormat::Text => {
            write_flat_rate_pass_report(config, out)?;
            write_comparison_report(config, out)?;
        }
        OutputFormat::Json => {
            let report = build_report(config)?;
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print the complete report to stdout.
pub fn print_report(config: &FareConfig) -> Result<()> {
    info!(
        format = ?config.output,
        max_km = config.report_max_km,
        "writing fare report"
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(config, &mut out)?;
    out.flush()?;
    info!("fare report complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FareError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_comparison_row_one_km() {
        let row = comparison_row(&FareConfig::default(), 1).unwrap();
        assert_eq!(row.distance_km, 1);
        assert_eq!(row.pass_per_year, dec!(601.92));
        assert_eq!(row.pass_per_month, dec!(50.16));
        assert_eq!(round_money(row.pass_per_day, 2), dec!(3.15));
        assert_eq!(row.ticket_price, dec!(4.4));
        assert_eq!(row.tickets_per_week_break_even, 3);
    }

    #[test]
    fn test_comparison_rows_cover_sweep() {
        let rows = comparison_rows(&FareConfig::default()).unwrap();
        assert_eq!(rows.len(), 129);
        assert_eq!(rows.first().map(|r| r.distance_km), Some(1));
        assert_eq!(rows.last().map(|r| r.distance_km), Some(129));
    }

    #[test]
    fn test_comparison_rows_fail_past_season_pass_table() {
        let config = FareConfig {
            report_max_km: 300,
            ..FareConfig::default()
        };
        assert!(matches!(
            comparison_rows(&config),
            Err(FareError::DistanceOutOfRange { .. })
        ));
    }

    #[test]
    fn test_format_comparison_row() {
        let config = FareConfig::default();
        let row = comparison_row(&config, 31).unwrap();
        assert_eq!(
            format_comparison_row(&row, "CHF"),
            "31 km: ABO per year = 1996.20 CHF, ABO per month = 166.35 CHF, \
             ABO per work day = 10.44 CHF, ticket per day = 13.09, \
             regular tickets per week cheaper than ABO = 3"
        );
    }

    #[test]
    fn test_monthly_midpoints_round_half_to_even() {
        let config = FareConfig::default();

        let row = comparison_row(&config, 55).unwrap();
        assert_eq!(row.pass_per_month, dec!(212.295));
        assert_eq!(cents(row.pass_per_month), "212.30");
        assert_eq!(
            format_comparison_row(&row, "CHF"),
            "55 km: ABO per year = 2547.54 CHF, ABO per month = 212.30 CHF, \
             ABO per work day = 13.33 CHF, ticket per day = 21.05, \
             regular tickets per week cheaper than ABO = 3"
        );

        let row = comparison_row(&config, 121).unwrap();
        assert_eq!(row.pass_per_month, dec!(307.665));
        assert_eq!(cents(row.pass_per_month), "307.66");
        assert_eq!(
            format_comparison_row(&row, "CHF"),
            "121 km: ABO per year = 3691.98 CHF, ABO per month = 307.66 CHF, \
             ABO per work day = 19.32 CHF, ticket per day = 39.05, \
             regular tickets per week cheaper than ABO = 2"
        );
    }

    #[test]
    fn test_format_comparison_row_pads_minimum_ticket() {
        let row = comparison_row(&FareConfig::default(), 2).unwrap();
        let line = format_comparison_row(&row, "CHF");
        assert!(line.contains("ticket per day = 4.40,"));
    }

    #[test]
    fn test_format_flat_rate_pass() {
        let costs = flat_rate_pass_costs(&FareConfig::default());
        let [with_deposit, without_deposit] = format_flat_rate_pass(&costs);
        assert_eq!(
            with_deposit,
            "GA with Hinterlegung: price per year = 3258,  GA price per month = 271,  GA price per work day = 12.34"
        );
        assert_eq!(
            without_deposit,
            "GA without Hinterlegung: price per year = 3701,  GA price per month = 308,  GA price per work day = 14.02"
        );
    }

    #[test]
    fn test_write_report_text() {
        let config = FareConfig {
            report_max_km: 4,
            ..FareConfig::default()
        };
        let mut out = Vec::new();
        write_report(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("GA with Hinterlegung"));
        assert!(lines[1].starts_with("GA without Hinterlegung"));
        assert!(lines[2].starts_with("1 km: "));
        assert!(lines[4].starts_with("3 km: "));
    }

    #[test]
    fn test_write_report_json() {
        let config = FareConfig {
            report_max_km: 3,
            output: OutputFormat::Json,
            ..FareConfig::default()
        };
        let mut out = Vec::new();
        write_report(&config, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["currency"], "CHF");
        assert_eq!(value["comparison"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(value["comparison"][0]["distance_km"], 1);
        let month: Decimal = value["comparison"][0]["pass_per_month"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(month, dec!(50.16));
        assert_eq!(value["comparison"][0]["tickets_per_week_break_even"], 3);
        assert!(value["flat_rate_pass"]["with_deposit"]["per_year"].is_string());
    }
}
