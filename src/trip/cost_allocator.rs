//! Variable cost editing and allocation.
//!
//! Cost edits come from a free-text editor, so amounts are parsed leniently:
//! anything that does not parse becomes zero rather than an error. Empty
//! repositioning legs are charged in full to their owner.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::calculation::equal_share;
use crate::models::{CostField, FlightLeg, VariableCostBundle};

/// Returns `bundle` with one field replaced. A leg without costs starts from zero.
///
/// # Example
///
/// ```
/// use sifl_engine::models::CostField;
/// use sifl_engine::trip::update_field;
/// use rust_decimal::Decimal;
///
/// let costs = update_field(None, CostField::Fuel, Decimal::from(12500));
/// let costs = update_field(Some(costs), CostField::Catering, Decimal::from(450));
/// assert_eq!(costs.total(), Decimal::from(12950));
/// ```
pub fn update_field(
    bundle: Option<VariableCostBundle>,
    field: CostField,
    value: Decimal,
) -> VariableCostBundle {
    bundle.unwrap_or_default().with_field(field, value)
}

/// Largest amount a cost editor may enter for one field (one trillion).
pub const MAX_COST_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Parses an amount typed into a cost editor.
///
/// Surrounding whitespace, a leading `$` and thousands separators are
/// accepted. Blank input is zero; malformed input, and any amount whose
/// magnitude exceeds [`MAX_COST_AMOUNT`], is zero and logged.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(&cleaned) {
        Ok(amount) if amount.abs() > MAX_COST_AMOUNT => {
            warn!(input = %raw, "Cost amount out of range; using 0");
            Decimal::ZERO
        }
        Ok(amount) => amount,
        Err(e) => {
            warn!(input = %raw, error = %e, "Malformed cost amount; using 0");
            Decimal::ZERO
        }
    }
}

/// Per-passenger share of a leg's variable cost, before classification is considered.
pub fn sec_share(bundle: &VariableCostBundle, passenger_count: usize) -> Option<Decimal> {
    equal_share(bundle, passenger_count)
}

/// Who carries the variable cost of a leg flown with no passengers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeadheadAllocation {
    /// The whole cost is charged to the named owner.
    Allocated {
        /// The owner charged.
        owner: String,
        /// The full variable cost of the leg.
        amount: Decimal,
    },
    /// Nobody has been named; the cost is still unassigned.
    Unassigned {
        /// The full variable cost of the leg.
        total: Decimal,
    },
}

/// Allocates the variable cost of a deadhead leg.
///
/// Returns `None` for legs with passengers on board. A deadhead leg without
/// costs allocates zero.
pub fn deadhead_allocation(leg: &FlightLeg) -> Option<DeadheadAllocation> {
    if !leg.is_deadhead() {
        return None;
    }

    let total = leg
        .variable_costs
        .map(|c| c.total())
        .unwrap_or(Decimal::ZERO);

    Some(match &leg.deadhead_owner {
        Some(owner) => DeadheadAllocation::Allocated {
            owner: owner.clone(),
            amount: total,
        },
        None => DeadheadAllocation::Unassigned { total },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, PassengerAssignment, PassengerRef};
    use chrono::NaiveDate;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn costs() -> VariableCostBundle {
        VariableCostBundle::new(
            dec("12500"),
            dec("450"),
            dec("1200"),
            dec("800"),
            dec("100"),
        )
    }

    fn empty_leg() -> FlightLeg {
        FlightLeg::new(
            "4",
            NaiveDate::from_ymd_opt(2024, 10, 23).unwrap(),
            "N2PG",
            "TEB",
            "PBI",
            1035,
        )
    }

    #[test]
    fn test_update_field_recomputes_total() {
        let updated = update_field(Some(costs()), CostField::Fuel, dec("13000"));
        assert_eq!(updated.fuel, dec("13000"));
        assert_eq!(updated.total(), dec("15550"));
    }

    #[test]
    fn test_update_field_on_missing_bundle() {
        let updated = update_field(None, CostField::Supplies, dec("75"));
        assert_eq!(updated.total(), dec("75"));
    }

    #[test]
    fn test_parse_amount_accepts_editor_formats() {
        assert_eq!(parse_amount("1200"), dec("1200"));
        assert_eq!(parse_amount(" 12,500.50 "), dec("12500.50"));
        assert_eq!(parse_amount("$450"), dec("450"));
    }

    #[test]
    fn test_parse_amount_coerces_garbage_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12..5"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_rejects_out_of_range() {
        assert_eq!(MAX_COST_AMOUNT, dec("1000000000000"));
        assert_eq!(parse_amount("1,000,000,000,000"), MAX_COST_AMOUNT);
        assert_eq!(parse_amount("1000000000000.01"), Decimal::ZERO);
        assert_eq!(parse_amount("79228162514264337593543950335"), Decimal::ZERO);
        assert_eq!(parse_amount("-79228162514264337593543950335"), Decimal::ZERO);
    }

    #[test]
    fn test_sec_share() {
        assert_eq!(sec_share(&costs(), 2), Some(dec("7525")));
        assert_eq!(sec_share(&costs(), 0), None);
    }

    #[test]
    fn test_deadhead_with_owner_takes_full_cost() {
        let mut leg = empty_leg();
        leg.variable_costs = Some(costs());
        leg.deadhead_owner = Some("Executive A".to_string());

        assert_eq!(
            deadhead_allocation(&leg),
            Some(DeadheadAllocation::Allocated {
                owner: "Executive A".to_string(),
                amount: dec("15050"),
            })
        );
    }

    #[test]
    fn test_deadhead_without_owner_is_unassigned() {
        let mut leg = empty_leg();
        leg.variable_costs = Some(costs());

        assert_eq!(
            deadhead_allocation(&leg),
            Some(DeadheadAllocation::Unassigned { total: dec("15050") })
        );
    }

    #[test]
    fn test_occupied_leg_is_not_a_deadhead() {
        let mut leg = empty_leg();
        leg.passengers.push(PassengerAssignment::new(
            PassengerRef::named("p1", "Executive A"),
            Classification::Business,
        ));
        assert_eq!(deadhead_allocation(&leg), None);
    }
}
