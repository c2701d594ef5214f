//! Terminal charge.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Classification, RatePeriod};

/// The result of the terminal charge rule.
#[derive(Debug, Clone)]
pub struct TerminalChargeResult {
    /// The fixed per-flight charge to add (zero unless personal).
    pub terminal_charge: Decimal,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Applies the period's terminal charge to personal flights.
///
/// Commuting and business legs carry no terminal charge.
pub fn apply_terminal_charge(
    classification: Classification,
    period: &RatePeriod,
    step_number: u32,
) -> TerminalChargeResult {
    let terminal_charge = if classification.is_personal() {
        period.terminal_charge
    } else {
        Decimal::ZERO
    };

    let reasoning = if classification.is_personal() {
        format!(
            "Personal flight: terminal charge ${} from the period starting {}",
            terminal_charge.normalize(),
            period.start_date
        )
    } else {
        format!("No terminal charge for {} travel", classification)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "terminal_charge".to_string(),
        rule_name: "Terminal Charge".to_string(),
        input: serde_json::json!({
            "classification": classification.code(),
            "period_terminal_charge": period.terminal_charge.normalize().to_string()
        }),
        output: serde_json::json!({
            "terminal_charge": terminal_charge.normalize().to_string()
        }),
        reasoning,
    };

    TerminalChargeResult {
        terminal_charge,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MileageRates;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period() -> RatePeriod {
        RatePeriod {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            terminal_charge: dec("54.30"),
            rates: MileageRates {
                short: dec("0.2971"),
                medium: dec("0.2266"),
                long: dec("0.2178"),
            },
        }
    }

    #[test]
    fn test_personal_flights_carry_terminal_charge() {
        for classification in [
            Classification::PersonalEntertainment,
            Classification::PersonalNonEntertainment,
        ] {
            let result = apply_terminal_charge(classification, &period(), 4);
            assert_eq!(result.terminal_charge, dec("54.30"));
        }
    }

    #[test]
    fn test_commuting_has_no_terminal_charge() {
        let result = apply_terminal_charge(Classification::Commuting, &period(), 4);
        assert_eq!(result.terminal_charge, Decimal::ZERO);
        assert_eq!(result.audit_step.output["terminal_charge"], "0");
    }

    #[test]
    fn test_business_has_no_terminal_charge() {
        let result = apply_terminal_charge(Classification::BusinessEntertainment, &period(), 4);
        assert_eq!(result.terminal_charge, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("Business Entertainment"));
    }
}
