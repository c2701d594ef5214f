//! Committed trips and the edit workflow around them.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Classification, CostField, FlightLeg, PassengerRef, RouteField, Trip, ValuationBreakdown,
    VariableCostBundle,
};
use crate::reference::ReferenceData;

use super::cost_allocator::{DeadheadAllocation, deadhead_allocation};
use super::draft::LegDraft;
use super::recompute::{breakdown_for, recompute_leg};
use super::summary::LegSummary;

/// Owns the committed trips and keeps their cached valuations consistent.
///
/// Edits go through a [`LegDraft`]: open one with [`open_draft`](Self::open_draft),
/// edit it, then [`commit`](Self::commit) or [`discard`](Self::discard) it.
/// The one-shot methods (`set_classification`, `update_costs`, ...) do the
/// same open/edit/commit in a single call.
///
/// # Example
///
/// ```
/// use sifl_engine::config::ValuationPolicy;
/// use sifl_engine::models::{
///     Classification, FlightLeg, MileageRates, PassengerAssignment, PassengerRef, RatePeriod,
///     Trip, TripStatus,
/// };
/// use sifl_engine::reference::{PassengerProfileRegistry, RatePeriodTable, ReferenceData};
/// use sifl_engine::trip::TripLegAggregator;
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
/// let reference = ReferenceData::new(
///     RatePeriodTable::new(vec![period])?,
///     PassengerProfileRegistry::default(),
///     ValuationPolicy::default(),
/// );
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();
/// let mut leg = FlightLeg::new("6", date, "N1PG", "PBI", "MYNN", 188);
/// leg.passengers.push(PassengerAssignment::new(
///     PassengerRef::named("p3", "Guest 1"),
///     Classification::Business,
/// ));
///
/// let mut aggregator = TripLegAggregator::new(reference);
/// aggregator.add_trip(Trip {
///     id: "trip2".to_string(),
///     name: "Bahamas Weekend".to_string(),
///     start_date: date,
///     end_date: date,
///     status: TripStatus::Open,
///     legs: vec![leg],
/// });
///
/// let summary = aggregator.set_classification("6", "p3", Classification::PersonalEntertainment)?;
/// assert_eq!(summary.leg_total, Decimal::new(111782, 3));
/// assert_eq!(aggregator.trip_total("trip2")?, Decimal::new(111782, 3));
/// # Ok::<(), sifl_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct TripLegAggregator {
    reference: ReferenceData,
    trips: Vec<Trip>,
    open_drafts: HashMap<String, (Uuid, Weak<()>)>,
}

impl TripLegAggregator {
    /// Creates an aggregator with no trips.
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            reference,
            trips: Vec::new(),
            open_drafts: HashMap::new(),
        }
    }

    /// The reference data snapshot committed legs are valued against.
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// All trips in insertion order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Adds a trip, valuing every leg. A trip with the same id is replaced and
    /// any drafts open on its legs become stale.
    pub fn add_trip(&mut self, mut trip: Trip) {
        for leg in &mut trip.legs {
            recompute_leg(leg, &self.reference);
        }

        if let Some(existing) = self.trips.iter_mut().find(|t| t.id == trip.id) {
            for leg in &existing.legs {
                self.open_drafts.remove(&leg.id);
            }
            info!(trip_id = %trip.id, legs = trip.legs.len(), "Replaced trip");
            *existing = trip;
        } else {
            info!(trip_id = %trip.id, legs = trip.legs.len(), "Added trip");
            self.trips.push(trip);
        }
    }

    /// Finds a trip by id.
    pub fn trip(&self, trip_id: &str) -> EngineResult<&Trip> {
        self.trips
            .iter()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| EngineError::TripNotFound {
                trip_id: trip_id.to_string(),
            })
    }

    /// Finds a committed leg by id.
    pub fn leg(&self, leg_id: &str) -> EngineResult<&FlightLeg> {
        self.locate(leg_id).map(|(_, leg)| leg)
    }

    fn locate(&self, leg_id: &str) -> EngineResult<(&Trip, &FlightLeg)> {
        self.trips
            .iter()
            .find_map(|trip| trip.legs.iter().find(|l| l.id == leg_id).map(|leg| (trip, leg)))
            .ok_or_else(|| EngineError::LegNotFound {
                leg_id: leg_id.to_string(),
            })
    }

    fn locate_mut(&mut self, leg_id: &str) -> EngineResult<&mut FlightLeg> {
        self.trips
            .iter_mut()
            .flat_map(|trip| trip.legs.iter_mut())
            .find(|l| l.id == leg_id)
            .ok_or_else(|| EngineError::LegNotFound {
                leg_id: leg_id.to_string(),
            })
    }

    /// Committed values of one leg.
    pub fn leg_summary(&self, leg_id: &str) -> EngineResult<LegSummary> {
        let (trip, leg) = self.locate(leg_id)?;
        Ok(LegSummary::from_leg(&trip.id, leg))
    }

    /// Sum of the committed SIFL totals on a leg.
    pub fn leg_total(&self, leg_id: &str) -> EngineResult<Decimal> {
        Ok(self.leg(leg_id)?.leg_total())
    }

    /// Sum of the committed leg totals of a trip.
    pub fn trip_total(&self, trip_id: &str) -> EngineResult<Decimal> {
        Ok(self.trip(trip_id)?.trip_total())
    }

    /// Full breakdown for one passenger on a committed leg.
    pub fn breakdown_for(&self, leg_id: &str, passenger_id: &str) -> EngineResult<ValuationBreakdown> {
        let leg = self.leg(leg_id)?;
        let assignment = leg
            .passenger(passenger_id)
            .ok_or_else(|| EngineError::PassengerNotFound {
                leg_id: leg_id.to_string(),
                passenger_id: passenger_id.to_string(),
            })?;
        Ok(breakdown_for(leg, assignment, &self.reference))
    }

    /// True while a live draft holds the leg.
    pub fn has_open_draft(&self, leg_id: &str) -> bool {
        self.open_drafts
            .get(leg_id)
            .is_some_and(|(_, lease)| lease.strong_count() > 0)
    }

    /// Opens a working copy of a committed leg.
    ///
    /// Fails with `DraftAlreadyOpen` while another draft for the leg is alive.
    pub fn open_draft(&mut self, leg_id: &str) -> EngineResult<LegDraft> {
        if self.has_open_draft(leg_id) {
            return Err(EngineError::DraftAlreadyOpen {
                leg_id: leg_id.to_string(),
            });
        }

        let (trip, leg) = self.locate(leg_id)?;
        let draft = LegDraft::open(&trip.id, leg.clone(), self.reference.clone());
        self.open_drafts.insert(
            leg_id.to_string(),
            (draft.id(), Arc::downgrade(draft.lease())),
        );

        debug!(leg_id, draft_id = %draft.id(), "Opened leg draft");
        Ok(draft)
    }

    /// Replaces the committed leg with the draft's working copy.
    ///
    /// If the reference data changed since the draft was opened, the leg is
    /// revalued against the current snapshot first. Fails with `DraftNotOpen`
    /// when the draft is not the one currently registered for its leg.
    pub fn commit(&mut self, draft: LegDraft) -> EngineResult<LegSummary> {
        let leg_id = draft.leg_id().to_string();
        if !self.is_registered(&leg_id, draft.id()) {
            return Err(EngineError::DraftNotOpen { leg_id });
        }

        let (draft_id, trip_id, mut leg, snapshot) = draft.into_parts();
        if !snapshot.ptr_eq(&self.reference) {
            info!(%leg_id, %draft_id, "Reference data changed while draft was open; revaluing");
            recompute_leg(&mut leg, &self.reference);
        }

        let summary = LegSummary::from_leg(&trip_id, &leg);
        *self.locate_mut(&leg_id)? = leg;
        self.open_drafts.remove(&leg_id);

        info!(
            %leg_id,
            %draft_id,
            leg_total = %summary.leg_total,
            "Committed leg draft"
        );
        Ok(summary)
    }

    /// Throws away a draft, releasing its leg.
    pub fn discard(&mut self, draft: LegDraft) {
        let leg_id = draft.leg_id().to_string();
        if self.is_registered(&leg_id, draft.id()) {
            self.open_drafts.remove(&leg_id);
            debug!(%leg_id, draft_id = %draft.id(), "Discarded leg draft");
        } else {
            warn!(%leg_id, draft_id = %draft.id(), "Discarded a draft that was not open");
        }
    }

    fn is_registered(&self, leg_id: &str, draft_id: Uuid) -> bool {
        self.open_drafts
            .get(leg_id)
            .is_some_and(|(id, _)| *id == draft_id)
    }

    fn edit<F>(&mut self, leg_id: &str, apply: F) -> EngineResult<LegSummary>
    where
        F: FnOnce(&mut LegDraft) -> EngineResult<LegSummary>,
    {
        let mut draft = self.open_draft(leg_id)?;
        match apply(&mut draft) {
            Ok(_) => self.commit(draft),
            Err(e) => {
                self.discard(draft);
                Err(e)
            }
        }
    }

    /// Changes one passenger's classification and commits it.
    pub fn set_classification(
        &mut self,
        leg_id: &str,
        passenger_id: &str,
        classification: Classification,
    ) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.set_classification(passenger_id, classification))
    }

    /// Gives every passenger on a leg the same classification and commits it.
    pub fn bulk_set_classification(
        &mut self,
        leg_id: &str,
        classification: Classification,
    ) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.bulk_set_classification(classification))
    }

    /// Replaces a leg's variable costs and commits it.
    pub fn update_costs(
        &mut self,
        leg_id: &str,
        costs: VariableCostBundle,
    ) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.update_costs(costs))
    }

    /// Changes one cost field on a leg and commits it.
    pub fn update_cost_field(
        &mut self,
        leg_id: &str,
        field: CostField,
        value: Decimal,
    ) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.update_cost_field(field, value))
    }

    /// Sets or clears a taxable route override and commits it.
    pub fn override_route(
        &mut self,
        leg_id: &str,
        field: RouteField,
        value: &str,
    ) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.override_route(field, value))
    }

    /// Adds a passenger to a leg and commits it.
    pub fn add_passenger(
        &mut self,
        leg_id: &str,
        passenger: PassengerRef,
        classification: Classification,
    ) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.add_passenger(passenger, classification))
    }

    /// Removes a passenger from a leg and commits it.
    pub fn remove_passenger(&mut self, leg_id: &str, passenger_id: &str) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.remove_passenger(passenger_id))
    }

    /// Names the owner charged for an empty leg and commits it.
    pub fn assign_deadhead_owner(
        &mut self,
        leg_id: &str,
        owner: Option<String>,
    ) -> EngineResult<LegSummary> {
        self.edit(leg_id, |draft| draft.assign_deadhead_owner(owner))
    }

    /// Swaps the reference data and revalues every committed leg.
    ///
    /// Open drafts keep their own snapshot and are revalued on commit.
    pub fn replace_reference_data(&mut self, reference: ReferenceData) {
        self.reference = reference;
        let mut legs = 0usize;
        for trip in &mut self.trips {
            for leg in &mut trip.legs {
                recompute_leg(leg, &self.reference);
                legs += 1;
            }
        }
        info!(legs, "Reference data replaced; committed legs revalued");
    }

    /// Deadhead allocation of a committed leg, or `None` if it carries passengers.
    pub fn deadhead_allocation(&self, leg_id: &str) -> EngineResult<Option<DeadheadAllocation>> {
        Ok(deadhead_allocation(self.leg(leg_id)?))
    }

    /// Empty legs whose variable cost has not been assigned to an owner.
    pub fn unassigned_deadheads(&self) -> Vec<&FlightLeg> {
        self.trips
            .iter()
            .flat_map(|t| t.legs.iter())
            .filter(|leg| {
                matches!(
                    deadhead_allocation(leg),
                    Some(DeadheadAllocation::Unassigned { .. })
                )
            })
            .collect()
    }
}
