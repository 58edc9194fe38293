//! Distance-keyed tariff tables.
//!
//! A [`RangeTable`] maps half-open kilometre bands `[start, end)` to a value.
//! Lookup is by containment, not by key. Tables are validated on construction
//! so that bands are non-empty, sorted, and contiguous.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Step widths in km per distance band (Tarif 601, chapter 10.1.4).
const STEP_BANDS: [(u32, u32, u32); 7] = [
    (1, 9, 4),
    (9, 31, 2),
    (31, 61, 3),
    (61, 101, 4),
    (101, 151, 5),
    (151, 301, 10),
    (301, 1501, 20),
];

/// Single ticket rate per km, in cents (Tarif 601, chapter 10.1.3).
const TICKET_RATE_BANDS: [(u32, u32, Decimal); 9] = [
    (1, 5, dec!(44.51)),
    (5, 15, dec!(42.30)),
    (15, 49, dec!(37.24)),
    (49, 151, dec!(26.46)),
    (151, 201, dec!(25.71)),
    (201, 251, dec!(22.85)),
    (251, 301, dec!(20.63)),
    (301, 481, dec!(20.09)),
    (481, 1501, dec!(19.85)),
];

/// Season pass rate per km, in cents (Tarif 650, chapter 5.1.4).
const SEASON_PASS_RATE_BANDS: [(u32, u32, Decimal); 7] = [
    (1, 5, dec!(1672)),
    (5, 15, dec!(679)),
    (15, 17, dec!(627)),
    (17, 21, dec!(627)),
    (21, 40, dec!(380)),
    (40, 55, dec!(219)),
    (55, 251, dec!(187)),
];

/// Malformed tariff table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("table '{table}' has no bands")]
    EmptyTable { table: &'static str },

    #[error("table '{table}' has an empty band [{start}, {end})")]
    EmptyBand {
        table: &'static str,
        start: u32,
        end: u32,
    },

    #[error("table '{table}' band starting at {start} overlaps previous band ending at {previous_end}")]
    Overlap {
        table: &'static str,
        start: u32,
        previous_end: u32,
    },

    #[error("table '{table}' has a gap between {previous_end} and {start}")]
    Gap {
        table: &'static str,
        previous_end: u32,
        start: u32,
    },
}

/// One half-open band `[start, end)` of a range table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<V> {
    pub start: u32,
    pub end: u32,
    pub value: V,
}

impl<V> Band<V> {
    pub fn new(start: u32, end: u32, value: V) -> Self {
        Self { start, end, value }
    }

    pub fn contains(&self, km: u32) -> bool {
        self.start <= km && km < self.end
    }
}

/// Ordered, contiguous collection of distance bands
#[derive(Debug, Clone)]
pub struct RangeTable<V> {
    name: &'static str,
    bands: Vec<Band<V>>,
}

impl<V> RangeTable<V> {
    /// Build a table, rejecting empty, unsorted, overlapping, or gapped bands.
    pub fn new(name: &'static str, bands: Vec<Band<V>>) -> Result<Self, TableError> {
        if bands.is_empty() {
            return Err(TableError::EmptyTable { table: name });
        }

        let mut previous_end: Option<u32> = None;
        for band in &bands {
            if band.start >= band.end {
                return Err(TableError::EmptyBand {
                    table: name,
                    start: band.start,
                    end: band.end,
                });
            }
            if let Some(previous_end) = previous_end {
                if band.start < previous_end {
                    return Err(TableError::Overlap {
                        table: name,
                        start: band.start,
                        previous_end,
                    });
                }
                if band.start > previous_end {
                    return Err(TableError::Gap {
                        table: name,
                        previous_end,
                        start: band.start,
                    });
                }
            }
            previous_end = Some(band.end);
        }

        Ok(Self { name, bands })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Value of the first band containing `km`, if any.
    pub fn get(&self, km: u32) -> Option<&V> {
        self.bands
            .iter()
            .find(|band| band.contains(km))
            .map(|band| &band.value)
    }

    /// Covered interval as `(first_km, end_exclusive)`.
    pub fn covers(&self) -> (u32, u32) {
        // new() guarantees at least one band
        let first = self.bands.first().map_or(0, |b| b.start);
        let last = self.bands.last().map_or(0, |b| b.end);
        (first, last)
    }
}

impl<V: Copy> RangeTable<V> {
    fn from_bands(name: &'static str, bands: &[(u32, u32, V)]) -> Result<Self, TableError> {
        Self::new(
            name,
            bands
                .iter()
                .map(|&(start, end, value)| Band::new(start, end, value))
                .collect(),
        )
    }
}

/// Step size in km for each position along the route.
pub fn step_table() -> Result<RangeTable<u32>, TableError> {
    RangeTable::from_bands("step size", &STEP_BANDS)
}

/// Per-km rate (cents) for single tickets, 1 to 1500 km.
pub fn ticket_rate_table() -> Result<RangeTable<Decimal>, TableError> {
    RangeTable::from_bands("ticket rate", &TICKET_RATE_BANDS)
}

/// Per-km rate (cents) for monthly season passes, 1 to 250 km.
pub fn season_pass_rate_table() -> Result<RangeTable<Decimal>, TableError> {
    RangeTable::from_bands("season pass rate", &SEASON_PASS_RATE_BANDS)
}
