//! Flight leg and passenger assignment models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Classification, PassengerRef, VariableCostBundle};

/// Review status of a leg's tax classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegStatus {
    /// Classifications have been reviewed.
    Verified,
    /// Awaiting classification review.
    #[default]
    PendingReview,
    /// Something on the leg needs attention before it can be verified.
    ActionRequired,
}

/// The taxable route endpoint being overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteField {
    /// Taxable origin.
    TaxOrigin,
    /// Taxable destination.
    TaxDestination,
}

/// One passenger's seat on a leg, with the cached result of the last valuation.
///
/// `sifl_total`, `sec_cost` and `applied_rules` are written only by
/// recomputation after a classification, cost or roster change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerAssignment {
    /// Who is sitting in the seat.
    pub passenger: PassengerRef,
    /// Purpose of the passenger's travel on this leg.
    pub classification: Classification,
    /// Cached SIFL value from the last recomputation.
    #[serde(default)]
    pub sifl_total: Decimal,
    /// Cached SEC incremental cost share from the last recomputation.
    #[serde(default)]
    pub sec_cost: Option<Decimal>,
    /// Cached rule annotations from the last recomputation.
    #[serde(default)]
    pub applied_rules: Vec<String>,
}

impl PassengerAssignment {
    /// A new, not yet valued assignment.
    pub fn new(passenger: PassengerRef, classification: Classification) -> Self {
        Self {
            passenger,
            classification,
            sifl_total: Decimal::ZERO,
            sec_cost: None,
            applied_rules: Vec::new(),
        }
    }
}

/// A single flight leg with its passenger manifest.
///
/// # Example
///
/// ```
/// use sifl_engine::models::{FlightLeg, LegStatus};
/// use chrono::NaiveDate;
///
/// let mut leg = FlightLeg::new(
///     "5",
///     NaiveDate::from_ymd_opt(2024, 10, 25).unwrap(),
///     "N2PG",
///     "TEB",
///     "VNY",
///     2454,
/// );
/// leg.tax_destination_override = Some("BUR".to_string());
/// assert_eq!(leg.taxable_origin(), "TEB");
/// assert_eq!(leg.taxable_destination(), "BUR");
/// assert_eq!(leg.status, LegStatus::PendingReview);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    /// Unique identifier for the leg.
    pub id: String,
    /// Date of departure.
    pub date: NaiveDate,
    /// Aircraft registration.
    pub aircraft: String,
    /// Operational departure airport.
    pub origin: String,
    /// Operational arrival airport.
    pub destination: String,
    /// Taxable origin, e.g. when a fuel stop is folded into one taxable leg.
    #[serde(default)]
    pub tax_origin_override: Option<String>,
    /// Taxable destination override.
    #[serde(default)]
    pub tax_destination_override: Option<String>,
    /// Block time as entered by operations (e.g. "6.5h").
    #[serde(default)]
    pub flight_time: Option<String>,
    /// Free-text description of the leg.
    #[serde(default)]
    pub description: Option<String>,
    /// Statute miles flown. Drives every rate calculation.
    pub miles: u32,
    /// Variable operating costs, when entered.
    #[serde(default)]
    pub variable_costs: Option<VariableCostBundle>,
    /// Passenger manifest.
    #[serde(default)]
    pub passengers: Vec<PassengerAssignment>,
    /// Review status.
    #[serde(default)]
    pub status: LegStatus,
    /// Owner charged with the full variable cost of an empty repositioning leg.
    #[serde(default)]
    pub deadhead_owner: Option<String>,
}

impl FlightLeg {
    /// Creates a leg with an empty manifest and no costs.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        aircraft: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        miles: u32,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            aircraft: aircraft.into(),
            origin: origin.into(),
            destination: destination.into(),
            tax_origin_override: None,
            tax_destination_override: None,
            flight_time: None,
            description: None,
            miles,
            variable_costs: None,
            passengers: Vec::new(),
            status: LegStatus::default(),
            deadhead_owner: None,
        }
    }

    /// Origin used for reporting: the override if set, else the operational origin.
    pub fn taxable_origin(&self) -> &str {
        self.tax_origin_override.as_deref().unwrap_or(&self.origin)
    }

    /// Destination used for reporting: the override if set, else the operational destination.
    pub fn taxable_destination(&self) -> &str {
        self.tax_destination_override
            .as_deref()
            .unwrap_or(&self.destination)
    }

    /// Number of passengers on the manifest.
    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// A leg flown with nobody on board.
    pub fn is_deadhead(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Sum of the cached SIFL totals of every passenger.
    pub fn leg_total(&self) -> Decimal {
        self.passengers.iter().map(|p| p.sifl_total).sum()
    }

    /// Sum of the cached SEC cost shares of every passenger.
    pub fn sec_cost_total(&self) -> Decimal {
        self.passengers
            .iter()
            .filter_map(|p| p.sec_cost)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Finds an assignment by passenger id.
    pub fn passenger(&self, passenger_id: &str) -> Option<&PassengerAssignment> {
        self.passengers.iter().find(|p| p.passenger.id == passenger_id)
    }

    pub(crate) fn passenger_index(&self, passenger_id: &str) -> Option<usize> {
        self.passengers
            .iter()
            .position(|p| p.passenger.id == passenger_id)
    }
}
