//! Recomputed leg state returned by every mutation.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Classification, FlightLeg};

/// One passenger's cached valuation on a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassengerSummary {
    /// Passenger id.
    pub passenger_id: String,
    /// Passenger display name.
    pub passenger_name: String,
    /// Classification on this leg.
    pub classification: Classification,
    /// SIFL value.
    pub sifl_total: Decimal,
    /// SEC incremental cost share, if any.
    pub sec_cost: Option<Decimal>,
    /// Rule annotations.
    pub applied_rules: Vec<String>,
}

/// A leg's valuations and roll-ups after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegSummary {
    /// Trip the leg belongs to.
    pub trip_id: String,
    /// Leg id.
    pub leg_id: String,
    /// Statute miles.
    pub miles: u32,
    /// Number of passengers on board.
    pub passenger_count: usize,
    /// Sum of the passengers' SIFL totals.
    pub leg_total: Decimal,
    /// Sum of the passengers' SEC cost shares.
    pub sec_cost_total: Decimal,
    /// Total variable cost, when entered.
    pub variable_cost_total: Option<Decimal>,
    /// Per-passenger values in manifest order.
    pub passengers: Vec<PassengerSummary>,
}

impl LegSummary {
    /// Summarizes the cached values on `leg`.
    pub fn from_leg(trip_id: &str, leg: &FlightLeg) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            leg_id: leg.id.clone(),
            miles: leg.miles,
            passenger_count: leg.passenger_count(),
            leg_total: leg.leg_total(),
            sec_cost_total: leg.sec_cost_total(),
            variable_cost_total: leg.variable_costs.map(|c| c.total()),
            passengers: leg
                .passengers
                .iter()
                .map(|p| PassengerSummary {
                    passenger_id: p.passenger.id.clone(),
                    passenger_name: p.passenger.name.clone(),
                    classification: p.classification,
                    sifl_total: p.sifl_total,
                    sec_cost: p.sec_cost,
                    applied_rules: p.applied_rules.clone(),
                })
                .collect(),
        }
    }

    /// Finds a passenger's summary by id.
    pub fn passenger(&self, passenger_id: &str) -> Option<&PassengerSummary> {
        self.passengers.iter().find(|p| p.passenger_id == passenger_id)
    }
}
