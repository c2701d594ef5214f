//! SEC incremental cost allocation.
//!
//! The variable operating cost of a leg is shared equally across every
//! passenger on board, but only personal passengers carry their share.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Classification, VariableCostBundle};

/// Equal per-passenger share of a leg's variable cost.
///
/// Returns `None` when `passenger_count` is zero.
///
/// # Examples
///
/// ```
/// use sifl_engine::calculation::equal_share;
/// use sifl_engine::models::VariableCostBundle;
/// use rust_decimal::Decimal;
///
/// let costs = VariableCostBundle::new(
///     Decimal::new(12500, 0),
///     Decimal::new(450, 0),
///     Decimal::new(1200, 0),
///     Decimal::new(800, 0),
///     Decimal::new(100, 0),
/// );
/// assert_eq!(equal_share(&costs, 2), Some(Decimal::new(7525, 0)));
/// assert_eq!(equal_share(&costs, 0), None);
/// ```
pub fn equal_share(costs: &VariableCostBundle, passenger_count: usize) -> Option<Decimal> {
    if passenger_count == 0 {
        return None;
    }
    Some(costs.total() / Decimal::from(passenger_count))
}

/// The result of SEC cost allocation for one passenger.
#[derive(Debug, Clone)]
pub struct SecCostResult {
    /// The passenger's share, or `None` when no SEC cost applies.
    pub sec_cost: Option<Decimal>,
    /// The audit step recording this allocation.
    pub audit_step: AuditStep,
}

/// Allocates the SEC incremental cost for one passenger.
///
/// A share applies only when costs were entered, the roster is not empty and
/// the passenger's classification is personal.
pub fn allocate_sec_cost(
    classification: Classification,
    costs: Option<&VariableCostBundle>,
    total_passenger_count: usize,
    step_number: u32,
) -> SecCostResult {
    let (sec_cost, reasoning) = match costs {
        None => (None, "No variable costs entered for this leg".to_string()),
        Some(_) if !classification.is_personal() => (
            None,
            format!("No SEC cost for {} travel", classification),
        ),
        Some(bundle) => match equal_share(bundle, total_passenger_count) {
            Some(share) => (
                Some(share),
                format!(
                    "${} ÷ {} passengers = ${}",
                    bundle.total().normalize(),
                    total_passenger_count,
                    share.round_dp(2)
                ),
            ),
            None => (None, "No passengers to share the cost".to_string()),
        },
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "sec_cost".to_string(),
        rule_name: "SEC Incremental Cost".to_string(),
        input: serde_json::json!({
            "classification": classification.code(),
            "variable_cost_total": costs.map(|c| c.total().normalize().to_string()),
            "passenger_count": total_passenger_count
        }),
        output: serde_json::json!({
            "sec_cost": sec_cost.map(|s| s.to_string())
        }),
        reasoning,
    };

    SecCostResult {
        sec_cost,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

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

    #[test]
    fn test_personal_passenger_gets_equal_share() {
        let result = allocate_sec_cost(Classification::PersonalEntertainment, Some(&costs()), 3, 6);
        assert_eq!(result.sec_cost, Some(dec("15050") / dec("3")));
        assert!(result.audit_step.reasoning.contains("5016.67"));
    }

    #[test]
    fn test_business_passenger_has_no_share() {
        let result = allocate_sec_cost(Classification::Business, Some(&costs()), 3, 6);
        assert!(result.sec_cost.is_none());
        assert!(result.audit_step.output["sec_cost"].is_null());
    }

    #[test]
    fn test_commuting_passenger_has_no_share() {
        let result = allocate_sec_cost(Classification::Commuting, Some(&costs()), 1, 6);
        assert!(result.sec_cost.is_none());
    }

    #[test]
    fn test_missing_costs_omit_share() {
        let result = allocate_sec_cost(Classification::PersonalEntertainment, None, 3, 6);
        assert!(result.sec_cost.is_none());
    }

    #[test]
    fn test_zero_passengers_omit_share() {
        let result = allocate_sec_cost(Classification::PersonalEntertainment, Some(&costs()), 0, 6);
        assert!(result.sec_cost.is_none());
    }

    #[test]
    fn test_divisor_is_full_roster_not_personal_count() {
        // One personal passenger among four shares a quarter of the cost.
        let result = allocate_sec_cost(Classification::PersonalNonEntertainment, Some(&costs()), 4, 6);
        assert_eq!(result.sec_cost, Some(dec("3762.5")));
    }
}
