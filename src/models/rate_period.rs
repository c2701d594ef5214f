//! SIFL rate period model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which per-mile rate of a period applies to a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    /// First mileage band (under 500 statute miles).
    Short,
    /// Second mileage band (500 to 1499 statute miles).
    Medium,
    /// Third mileage band (1500 statute miles and over).
    Long,
}

/// The three SIFL cents-per-mile rates of a period, in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageRates {
    /// Rate for the short tier.
    pub short: Decimal,
    /// Rate for the medium tier.
    pub medium: Decimal,
    /// Rate for the long tier.
    pub long: Decimal,
}

impl MileageRates {
    /// Returns the rate for a tier.
    pub fn rate_for(&self, tier: RateTier) -> Decimal {
        match tier {
            RateTier::Short => self.short,
            RateTier::Medium => self.medium,
            RateTier::Long => self.long,
        }
    }
}

/// A date range over which one set of SIFL rates and terminal charge apply.
///
/// # Example
///
/// ```
/// use sifl_engine::models::{MileageRates, RatePeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = RatePeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     terminal_charge: Decimal::new(5510, 2),
///     rates: MileageRates {
///         short: Decimal::new(3015, 4),
///         medium: Decimal::new(2300, 4),
///         long: Decimal::new(2210, 4),
///     },
/// };
/// assert!(period.contains(NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePeriod {
    /// First day the rates apply (inclusive).
    pub start_date: NaiveDate,
    /// Last day the rates apply (inclusive).
    pub end_date: NaiveDate,
    /// Fixed charge added to each personal flight.
    pub terminal_charge: Decimal,
    /// Tiered per-mile rates.
    pub rates: MileageRates,
}

impl RatePeriod {
    /// Returns true if `date` falls within the inclusive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns true if the two periods share at least one day.
    pub fn overlaps(&self, other: &RatePeriod) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
