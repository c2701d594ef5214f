//! Reports built from committed trips.
//!
//! - [`TripReport`]: one row per passenger per leg, as CSV or JSON
//! - [`imputed_income_summary`]: per-passenger totals over a date range
//! - [`explain`]: display lines for a single valuation breakdown

mod explain;
mod income;
mod trip_report;

use rust_decimal::{Decimal, RoundingStrategy};

pub use explain::{Explanation, ExplanationStep, SEC_COST_FORMULA, explain};
pub use income::{ImputedIncomeSummary, imputed_income_summary};
pub use trip_report::{CSV_HEADERS, ReportRow, TripReport};

/// Rounds a money amount to cents, halves away from zero.
///
/// # Example
///
/// ```
/// use sifl_engine::reporting::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(111782, 3)), Decimal::new(11178, 2));
/// assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
