//! Refreshing cached passenger valuations after a leg changes.

use crate::calculation::{BreakdownInput, compute_breakdown};
use crate::models::{FlightLeg, PassengerAssignment, ValuationBreakdown};
use crate::reference::ReferenceData;

/// Computes the breakdown for one assignment using the leg's current miles,
/// date, costs and roster size.
pub(crate) fn breakdown_for(
    leg: &FlightLeg,
    assignment: &PassengerAssignment,
    reference: &ReferenceData,
) -> ValuationBreakdown {
    let input = BreakdownInput::new(
        assignment.classification,
        leg.miles,
        leg.date,
        &assignment.passenger,
    )
    .with_costs(leg.variable_costs)
    .with_passenger_count(leg.passenger_count());

    compute_breakdown(&input, reference)
}

/// Recomputes the passenger at `index`, leaving siblings untouched.
pub(crate) fn recompute_passenger(leg: &mut FlightLeg, index: usize, reference: &ReferenceData) {
    let Some(assignment) = leg.passengers.get(index) else {
        return;
    };
    let breakdown = breakdown_for(leg, assignment, reference);

    if let Some(assignment) = leg.passengers.get_mut(index) {
        assignment.sifl_total = breakdown.total;
        assignment.sec_cost = breakdown.sec_cost;
        assignment.applied_rules = breakdown.applied_rules;
    }
}

/// Recomputes every passenger on the leg.
pub(crate) fn recompute_leg(leg: &mut FlightLeg, reference: &ReferenceData) {
    for index in 0..leg.passengers.len() {
        recompute_passenger(leg, index, reference);
    }
}
