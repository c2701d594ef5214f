//! Valuation breakdown models.
//!
//! This module contains the [`ValuationBreakdown`] produced by the engine for
//! one passenger on one leg, and the [`AuditStep`] records that explain how
//! each component of it was derived.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RateTier;

/// A single step in the audit trace recording a valuation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The engine's output for one passenger on one leg.
///
/// A breakdown has no lifecycle of its own. It is recomputed on demand and
/// only its `total`, `sec_cost` and `applied_rules` are cached on the
/// passenger assignment.
///
/// # Example
///
/// ```
/// use sifl_engine::models::ValuationBreakdown;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let breakdown = ValuationBreakdown {
///     rate: Decimal::ZERO,
///     rate_tier: None,
///     method: "Business Exclusion".to_string(),
///     multiplier: Decimal::ONE,
///     total: Decimal::ZERO,
///     miles: 3451,
///     terminal_charge: Decimal::ZERO,
///     applied_rules: vec![],
///     sec_cost: None,
///     period_start: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     period_fallback: false,
///     audit_steps: vec![],
/// };
/// assert_eq!(breakdown.mileage_charge(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationBreakdown {
    /// Per-mile rate applied (zero under the business exclusion).
    pub rate: Decimal,
    /// Tier the rate was taken from, if any.
    pub rate_tier: Option<RateTier>,
    /// Name of the valuation method that was applied.
    pub method: String,
    /// Control employee multiplier (1.0 when none applies).
    pub multiplier: Decimal,
    /// `miles * rate * multiplier + terminal_charge`.
    pub total: Decimal,
    /// Statute miles valued.
    pub miles: u32,
    /// Terminal charge added (zero unless personal).
    pub terminal_charge: Decimal,
    /// Informational rule annotations. They never change `total`.
    pub applied_rules: Vec<String>,
    /// SEC incremental cost share, when one applies.
    pub sec_cost: Option<Decimal>,
    /// Start date of the rate period used.
    pub period_start: NaiveDate,
    /// True when no period contained the flight date and the last period was used.
    pub period_fallback: bool,
    /// Step-by-step audit trace of the valuation.
    pub audit_steps: Vec<AuditStep>,
}

impl ValuationBreakdown {
    /// `miles * rate`, before the multiplier.
    pub fn mileage_charge(&self) -> Decimal {
        Decimal::from(self.miles) * self.rate
    }

    /// `miles * rate * multiplier`, before the terminal charge.
    pub fn multiplied_charge(&self) -> Decimal {
        self.mileage_charge() * self.multiplier
    }

    /// True when a control employee multiplier above 1.0 was applied.
    pub fn has_multiplier(&self) -> bool {
        self.multiplier != Decimal::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample(multiplier: &str) -> ValuationBreakdown {
        ValuationBreakdown {
            rate: dec("0.2266"),
            rate_tier: Some(RateTier::Medium),
            method: "SIFL Rate (2024-01-01 Period)".to_string(),
            multiplier: dec(multiplier),
            total: dec("664.3072"),
            miles: 673,
            terminal_charge: dec("54.30"),
            applied_rules: vec!["Control Employee (400%)".to_string()],
            sec_cost: None,
            period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            period_fallback: false,
            audit_steps: vec![],
        }
    }

    #[test]
    fn test_intermediate_charges() {
        let breakdown = sample("4.0");
        assert_eq!(breakdown.mileage_charge(), dec("152.5018"));
        assert_eq!(breakdown.multiplied_charge(), dec("610.0072"));
        assert_eq!(
            breakdown.multiplied_charge() + breakdown.terminal_charge,
            breakdown.total
        );
    }

    #[test]
    fn test_has_multiplier_ignores_scale() {
        assert!(sample("4.0").has_multiplier());
        assert!(!sample("1.0").has_multiplier());
    }

    #[test]
    fn test_serializes_sec_cost_as_null_when_absent() {
        let json = serde_json::to_value(sample("1.0")).unwrap();
        assert!(json["sec_cost"].is_null());
        assert_eq!(json["rate_tier"], "medium");
    }
}
