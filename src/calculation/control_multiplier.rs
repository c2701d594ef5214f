//! Control employee multiplier.
//!
//! Personal flights by control employees are valued at a multiple of the
//! standard SIFL amount. The multiple depends only on the passenger's tax
//! designation, never on their job title.

use rust_decimal::Decimal;

use crate::config::ValuationPolicy;
use crate::models::{AuditStep, Classification, TaxDesignation};

/// Formats the applied-rule annotation for a multiplier, e.g. `Control Employee (400%)`.
pub fn control_employee_rule(multiplier: Decimal) -> String {
    format!(
        "Control Employee ({}%)",
        (multiplier * Decimal::ONE_HUNDRED).normalize()
    )
}

/// The result of the multiplier lookup, including the annotation and audit step.
#[derive(Debug, Clone)]
pub struct ControlMultiplierResult {
    /// The multiplier to apply to the mileage charge.
    pub multiplier: Decimal,
    /// `Control Employee (N%)` when the multiplier exceeds 1.0.
    pub applied_rule: Option<String>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Determines the valuation multiplier for a passenger.
///
/// Only personal classifications carry a multiplier; commuting and business
/// legs always use 1.0.
///
/// # Examples
///
/// ```
/// use sifl_engine::calculation::apply_control_multiplier;
/// use sifl_engine::config::ValuationPolicy;
/// use sifl_engine::models::{Classification, TaxDesignation};
/// use rust_decimal::Decimal;
///
/// let result = apply_control_multiplier(
///     Classification::PersonalEntertainment,
///     TaxDesignation::Band7,
///     &ValuationPolicy::default(),
///     3,
/// );
/// assert_eq!(result.multiplier, Decimal::new(4, 0));
/// assert_eq!(result.applied_rule.as_deref(), Some("Control Employee (400%)"));
/// ```
pub fn apply_control_multiplier(
    classification: Classification,
    designation: TaxDesignation,
    policy: &ValuationPolicy,
    step_number: u32,
) -> ControlMultiplierResult {
    let multiplier = if classification.is_personal() {
        policy.multipliers.for_designation(designation)
    } else {
        Decimal::ONE
    };

    let applied_rule = (multiplier > Decimal::ONE).then(|| control_employee_rule(multiplier));

    let reasoning = match (&applied_rule, classification.is_personal()) {
        (Some(rule), _) => format!(
            "{} designation on a personal flight: {} (x{})",
            designation,
            rule,
            multiplier.normalize()
        ),
        (None, true) => format!("{} designation carries no multiplier", designation),
        (None, false) => format!("No multiplier applies to {} travel", classification),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "control_multiplier".to_string(),
        rule_name: "Control Employee Multiplier".to_string(),
        input: serde_json::json!({
            "classification": classification.code(),
            "designation": designation.label()
        }),
        output: serde_json::json!({
            "multiplier": multiplier.normalize().to_string(),
            "control_employee": applied_rule.is_some()
        }),
        reasoning,
    };

    ControlMultiplierResult {
        multiplier,
        applied_rule,
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

    fn apply(classification: Classification, designation: TaxDesignation) -> ControlMultiplierResult {
        apply_control_multiplier(classification, designation, &ValuationPolicy::default(), 3)
    }

    #[test]
    fn test_designation_multipliers_on_personal_flights() {
        let cases = [
            (TaxDesignation::Band7, "4.0"),
            (TaxDesignation::BoardMember, "4.0"),
            (TaxDesignation::Ceo, "2.0"),
            (TaxDesignation::Standard, "1.0"),
        ];
        for (designation, expected) in cases {
            let result = apply(Classification::PersonalNonEntertainment, designation);
            assert_eq!(result.multiplier, dec(expected), "{:?}", designation);
        }
    }

    #[test]
    fn test_ceo_rule_annotation() {
        let result = apply(Classification::PersonalEntertainment, TaxDesignation::Ceo);
        assert_eq!(result.applied_rule.as_deref(), Some("Control Employee (200%)"));
        assert_eq!(result.audit_step.output["control_employee"], true);
    }

    #[test]
    fn test_standard_has_no_annotation() {
        let result = apply(Classification::PersonalEntertainment, TaxDesignation::Standard);
        assert!(result.applied_rule.is_none());
    }

    #[test]
    fn test_commuting_and_business_ignore_designation() {
        for classification in [
            Classification::Commuting,
            Classification::Business,
            Classification::BusinessEntertainment,
        ] {
            let result = apply(classification, TaxDesignation::Band7);
            assert_eq!(result.multiplier, Decimal::ONE);
            assert!(result.applied_rule.is_none());
        }
    }

    #[test]
    fn test_rule_formatting_drops_trailing_zeros() {
        assert_eq!(control_employee_rule(dec("4.0")), "Control Employee (400%)");
        assert_eq!(control_employee_rule(dec("2.50")), "Control Employee (250%)");
    }
}
