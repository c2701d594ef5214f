//! Core data models for the SIFL valuation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod classification;
mod costs;
mod flight_leg;
mod profile;
mod rate_period;
mod trip;

pub use breakdown::{AuditStep, ValuationBreakdown};
pub use classification::Classification;
pub use costs::{CostField, VariableCostBundle};
pub use flight_leg::{FlightLeg, LegStatus, PassengerAssignment, RouteField};
pub use profile::{PassengerRef, PassengerTaxProfile, ProfileUpdate, TaxDesignation};
pub use rate_period::{MileageRates, RatePeriod, RateTier};
pub use trip::{Trip, TripStatus};
