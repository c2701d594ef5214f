//! Trip model: a named group of flight legs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FlightLeg;

/// Lifecycle status of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    /// Legs may still be added or edited.
    #[default]
    Open,
    /// All legs are classified.
    Closed,
    /// Retained for records only.
    Archived,
}

/// A trip and the legs it consists of.
///
/// # Example
///
/// ```
/// use sifl_engine::models::{Trip, TripStatus};
/// use chrono::NaiveDate;
///
/// let trip = Trip {
///     id: "trip2".to_string(),
///     name: "Bahamas Weekend".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2024, 10, 20).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 10, 22).unwrap(),
///     status: TripStatus::Open,
///     legs: vec![],
/// };
/// assert!(trip.trip_total().is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier for the trip.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    #[serde(default)]
    pub status: TripStatus,
    /// Legs in flight order.
    #[serde(default)]
    pub legs: Vec<FlightLeg>,
}

impl Trip {
    /// Sum of every leg total.
    pub fn trip_total(&self) -> Decimal {
        self.legs.iter().map(FlightLeg::leg_total).sum()
    }

    /// Sum of every leg's SEC cost shares.
    pub fn sec_cost_total(&self) -> Decimal {
        self.legs
            .iter()
            .map(FlightLeg::sec_cost_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
