//! Trip and leg state management.
//!
//! The [`TripLegAggregator`] owns committed trips. Edits are made on a
//! [`LegDraft`] and committed back; every edit recomputes the affected
//! passengers before it returns a [`LegSummary`]. Variable cost editing and
//! deadhead allocation live in the cost allocator functions re-exported here.

mod aggregator;
mod cost_allocator;
mod draft;
mod recompute;
mod summary;

pub use aggregator::TripLegAggregator;
pub use cost_allocator::{
    DeadheadAllocation, MAX_COST_AMOUNT, deadhead_allocation, parse_amount, sec_share,
    update_field,
};
pub use draft::LegDraft;
pub use summary::{LegSummary, PassengerSummary};
