//! Editable working copy of a flight leg.
//!
//! A [`LegDraft`] is a deep copy of a committed leg together with the
//! reference data snapshot it was opened against. Every edit recomputes the
//! affected passengers before returning, so the draft is always internally
//! consistent. Nothing is visible in committed totals until the draft is
//! handed back to [`TripLegAggregator::commit`](super::TripLegAggregator::commit).

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Classification, CostField, FlightLeg, LegStatus, PassengerAssignment, PassengerRef,
    RouteField, ValuationBreakdown, VariableCostBundle,
};
use crate::reference::ReferenceData;

use super::cost_allocator::{parse_amount, update_field};
use super::recompute::{breakdown_for, recompute_leg, recompute_passenger};
use super::summary::LegSummary;

/// A working copy of one leg.
///
/// The draft holds a lease on its leg; while it is alive no other draft can
/// be opened for the same leg. Dropping the draft releases the lease.
#[derive(Debug)]
pub struct LegDraft {
    draft_id: Uuid,
    trip_id: String,
    leg: FlightLeg,
    reference: ReferenceData,
    // Upgraded through a `Weak` by the aggregator to tell live drafts from dropped ones.
    lease: Arc<()>,
}

impl LegDraft {
    pub(crate) fn open(trip_id: &str, leg: FlightLeg, reference: ReferenceData) -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            trip_id: trip_id.to_string(),
            leg,
            reference,
            lease: Arc::new(()),
        }
    }

    pub(crate) fn lease(&self) -> &Arc<()> {
        &self.lease
    }

    pub(crate) fn into_parts(self) -> (Uuid, String, FlightLeg, ReferenceData) {
        (self.draft_id, self.trip_id, self.leg, self.reference)
    }

    /// Unique id of this draft.
    pub fn id(&self) -> Uuid {
        self.draft_id
    }

    /// Id of the trip the leg belongs to.
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    /// Id of the leg being edited.
    pub fn leg_id(&self) -> &str {
        &self.leg.id
    }

    /// The working copy.
    pub fn leg(&self) -> &FlightLeg {
        &self.leg
    }

    /// The reference data snapshot the draft values against.
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Current values of the working copy.
    pub fn summary(&self) -> LegSummary {
        LegSummary::from_leg(&self.trip_id, &self.leg)
    }

    /// Full breakdown for one passenger on the working copy.
    pub fn breakdown_for(&self, passenger_id: &str) -> EngineResult<ValuationBreakdown> {
        let assignment = self
            .leg
            .passenger(passenger_id)
            .ok_or_else(|| self.passenger_not_found(passenger_id))?;
        Ok(breakdown_for(&self.leg, assignment, &self.reference))
    }

    /// Changes one passenger's classification and recomputes only that passenger.
    pub fn set_classification(
        &mut self,
        passenger_id: &str,
        classification: Classification,
    ) -> EngineResult<LegSummary> {
        let index = self
            .leg
            .passenger_index(passenger_id)
            .ok_or_else(|| self.passenger_not_found(passenger_id))?;

        self.leg.passengers[index].classification = classification;
        recompute_passenger(&mut self.leg, index, &self.reference);

        debug!(
            leg_id = %self.leg.id,
            passenger_id,
            classification = classification.code(),
            "Set passenger classification"
        );
        Ok(self.summary())
    }

    /// Gives every passenger on the leg the same classification.
    ///
    /// Each passenger is recomputed independently, with the same result as
    /// setting them one at a time.
    pub fn bulk_set_classification(
        &mut self,
        classification: Classification,
    ) -> EngineResult<LegSummary> {
        for index in 0..self.leg.passengers.len() {
            self.leg.passengers[index].classification = classification;
            recompute_passenger(&mut self.leg, index, &self.reference);
        }

        debug!(
            leg_id = %self.leg.id,
            passengers = self.leg.passenger_count(),
            classification = classification.code(),
            "Set classification for all passengers"
        );
        Ok(self.summary())
    }

    /// Replaces the leg's variable costs and recomputes every passenger.
    pub fn update_costs(&mut self, costs: VariableCostBundle) -> EngineResult<LegSummary> {
        self.leg.variable_costs = Some(costs);
        recompute_leg(&mut self.leg, &self.reference);

        debug!(leg_id = %self.leg.id, total = %costs.total(), "Updated variable costs");
        Ok(self.summary())
    }

    /// Changes one cost field and recomputes every passenger.
    pub fn update_cost_field(
        &mut self,
        field: CostField,
        value: Decimal,
    ) -> EngineResult<LegSummary> {
        let costs = update_field(self.leg.variable_costs, field, value);
        self.leg.variable_costs = Some(costs);
        recompute_leg(&mut self.leg, &self.reference);

        debug!(
            leg_id = %self.leg.id,
            %field,
            %value,
            total = %costs.total(),
            "Updated variable cost field"
        );
        Ok(self.summary())
    }

    /// Changes one cost field from raw editor text. Unparseable text counts as zero.
    pub fn update_cost_input(&mut self, field: CostField, raw: &str) -> EngineResult<LegSummary> {
        self.update_cost_field(field, parse_amount(raw))
    }

    /// Sets or clears a taxable route override.
    ///
    /// Blank `value` clears the override. Miles are not changed and nothing is
    /// recomputed.
    pub fn override_route(&mut self, field: RouteField, value: &str) -> EngineResult<LegSummary> {
        let value = value.trim();
        let slot = match field {
            RouteField::TaxOrigin => &mut self.leg.tax_origin_override,
            RouteField::TaxDestination => &mut self.leg.tax_destination_override,
        };
        *slot = (!value.is_empty()).then(|| value.to_string());

        debug!(leg_id = %self.leg.id, ?field, value, "Set taxable route override");
        Ok(self.summary())
    }

    /// Adds a passenger to the manifest and recomputes everyone, since the
    /// SEC cost divisor changed.
    pub fn add_passenger(
        &mut self,
        passenger: PassengerRef,
        classification: Classification,
    ) -> EngineResult<LegSummary> {
        if self.leg.passenger(&passenger.id).is_some() {
            return Err(EngineError::DuplicatePassenger {
                leg_id: self.leg.id.clone(),
                passenger_id: passenger.id,
            });
        }

        debug!(leg_id = %self.leg.id, passenger_id = %passenger.id, "Added passenger");
        self.leg
            .passengers
            .push(PassengerAssignment::new(passenger, classification));
        recompute_leg(&mut self.leg, &self.reference);
        Ok(self.summary())
    }

    /// Removes a passenger from the manifest and recomputes everyone left.
    pub fn remove_passenger(&mut self, passenger_id: &str) -> EngineResult<LegSummary> {
        let index = self
            .leg
            .passenger_index(passenger_id)
            .ok_or_else(|| self.passenger_not_found(passenger_id))?;

        self.leg.passengers.remove(index);
        recompute_leg(&mut self.leg, &self.reference);

        debug!(leg_id = %self.leg.id, passenger_id, "Removed passenger");
        Ok(self.summary())
    }

    /// Names (or clears) the owner charged for the leg when it flies empty.
    pub fn assign_deadhead_owner(&mut self, owner: Option<String>) -> EngineResult<LegSummary> {
        debug!(leg_id = %self.leg.id, owner = ?owner, "Set deadhead owner");
        self.leg.deadhead_owner = owner;
        Ok(self.summary())
    }

    /// Sets the review status.
    pub fn set_status(&mut self, status: LegStatus) -> EngineResult<LegSummary> {
        self.leg.status = status;
        Ok(self.summary())
    }

    fn passenger_not_found(&self, passenger_id: &str) -> EngineError {
        EngineError::PassengerNotFound {
            leg_id: self.leg.id.clone(),
            passenger_id: passenger_id.to_string(),
        }
    }
}
