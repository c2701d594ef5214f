//! Valuation logic for the SIFL engine.
//!
//! This module contains one function per valuation rule: rate and method
//! selection, the control employee multiplier, the terminal charge, the
//! seating capacity annotation and the SEC incremental cost share. Each rule
//! returns its result together with an [`AuditStep`](crate::models::AuditStep).
//! [`compute_breakdown`] applies them in order for one passenger on one leg.

mod control_multiplier;
mod rate_selection;
mod seating_capacity;
mod sec_cost;
mod terminal_charge;
mod valuation;

pub use control_multiplier::{
    ControlMultiplierResult, apply_control_multiplier, control_employee_rule,
};
pub use rate_selection::{
    METHOD_BUSINESS_EXCLUSION, METHOD_COMMUTE, RateSelectionResult, select_rate, sifl_method,
};
pub use seating_capacity::{SEATING_CAPACITY_RULE, SeatingCapacityResult, check_seating_capacity};
pub use sec_cost::{SecCostResult, allocate_sec_cost, equal_share};
pub use terminal_charge::{TerminalChargeResult, apply_terminal_charge};
pub use valuation::{BreakdownInput, compute_breakdown};
