//! Per-mile rate and valuation method selection.
//!
//! The classification decides which branch of the valuation applies:
//! commuting legs always use the short-tier rate, personal legs use the tier
//! matching their distance, and everything else is excluded as business travel.

use rust_decimal::Decimal;

use crate::config::ValuationPolicy;
use crate::models::{AuditStep, Classification, RatePeriod, RateTier};

/// Method name for commuting legs.
pub const METHOD_COMMUTE: &str = "Commute Valuation";

/// Method name for business legs.
pub const METHOD_BUSINESS_EXCLUSION: &str = "Business Exclusion";

/// Returns the method name for personal legs valued from a rate period.
pub fn sifl_method(period: &RatePeriod) -> String {
    format!("SIFL Rate ({} Period)", period.start_date)
}

/// The result of rate selection, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct RateSelectionResult {
    /// The per-mile rate to apply.
    pub rate: Decimal,
    /// The tier the rate came from, or `None` under the business exclusion.
    pub tier: Option<RateTier>,
    /// The valuation method name.
    pub method: String,
    /// The audit step recording this selection.
    pub audit_step: AuditStep,
}

/// Selects the per-mile rate and method for a passenger's classification.
///
/// # Arguments
///
/// * `classification` - The passenger's classification on the leg
/// * `miles` - Statute miles flown
/// * `period` - The rate period resolved for the flight date
/// * `policy` - Tier thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use sifl_engine::calculation::{select_rate, METHOD_COMMUTE};
/// use sifl_engine::config::ValuationPolicy;
/// use sifl_engine::models::{Classification, MileageRates, RatePeriod, RateTier};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = RatePeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
///     terminal_charge: Decimal::new(5430, 2),
///     rates: MileageRates {
///         short: Decimal::new(2971, 4),
///         medium: Decimal::new(2266, 4),
///         long: Decimal::new(2178, 4),
///     },
/// };
///
/// let result = select_rate(Classification::Commuting, 2454, &period, &ValuationPolicy::default(), 1);
/// assert_eq!(result.rate, Decimal::new(2971, 4));
/// assert_eq!(result.tier, Some(RateTier::Short));
/// assert_eq!(result.method, METHOD_COMMUTE);
/// ```
pub fn select_rate(
    classification: Classification,
    miles: u32,
    period: &RatePeriod,
    policy: &ValuationPolicy,
    step_number: u32,
) -> RateSelectionResult {
    let (rate, tier, method, reasoning) = if classification == Classification::Commuting {
        let rate = period.rates.short;
        (
            rate,
            Some(RateTier::Short),
            METHOD_COMMUTE.to_string(),
            format!(
                "Commuting is always valued at the short-tier rate ${}/mi regardless of the {} mi distance",
                rate.normalize(),
                miles
            ),
        )
    } else if classification.is_personal() {
        let tier = policy.mileage_tiers.tier_for(miles);
        let rate = period.rates.rate_for(tier);
        (
            rate,
            Some(tier),
            sifl_method(period),
            format!(
                "{} mi falls in the {} tier of the period starting {}: ${}/mi",
                miles,
                tier_name(tier),
                period.start_date,
                rate.normalize()
            ),
        )
    } else {
        (
            Decimal::ZERO,
            None,
            METHOD_BUSINESS_EXCLUSION.to_string(),
            format!("{} travel is excluded from imputed income", classification),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "rate_selection".to_string(),
        rule_name: "Rate Selection".to_string(),
        input: serde_json::json!({
            "classification": classification.code(),
            "miles": miles,
            "period_start": period.start_date.to_string()
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "tier": tier.map(tier_name),
            "method": method
        }),
        reasoning,
    };

    RateSelectionResult {
        rate,
        tier,
        method,
        audit_step,
    }
}

fn tier_name(tier: RateTier) -> &'static str {
    match tier {
        RateTier::Short => "short",
        RateTier::Medium => "medium",
        RateTier::Long => "long",
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

    fn period_b() -> RatePeriod {
        RatePeriod {
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            terminal_charge: dec("55.10"),
            rates: MileageRates {
                short: dec("0.3015"),
                medium: dec("0.2300"),
                long: dec("0.2210"),
            },
        }
    }

    fn select(classification: Classification, miles: u32) -> RateSelectionResult {
        select_rate(classification, miles, &period_b(), &ValuationPolicy::default(), 2)
    }

    #[test]
    fn test_personal_short_tier() {
        let result = select(Classification::PersonalEntertainment, 188);
        assert_eq!(result.rate, dec("0.3015"));
        assert_eq!(result.tier, Some(RateTier::Short));
        assert_eq!(result.method, "SIFL Rate (2024-07-01 Period)");
    }

    #[test]
    fn test_personal_medium_tier_starts_at_500() {
        let result = select(Classification::PersonalNonEntertainment, 500);
        assert_eq!(result.rate, dec("0.2300"));
        assert_eq!(result.tier, Some(RateTier::Medium));
    }

    #[test]
    fn test_personal_long_tier_starts_at_1500() {
        assert_eq!(select(Classification::PersonalEntertainment, 1499).tier, Some(RateTier::Medium));
        let result = select(Classification::PersonalEntertainment, 1500);
        assert_eq!(result.rate, dec("0.2210"));
        assert_eq!(result.tier, Some(RateTier::Long));
    }

    #[test]
    fn test_commuting_always_short_tier() {
        let result = select(Classification::Commuting, 2454);
        assert_eq!(result.rate, dec("0.3015"));
        assert_eq!(result.tier, Some(RateTier::Short));
        assert_eq!(result.method, METHOD_COMMUTE);
        assert!(result.audit_step.reasoning.contains("2454"));
    }

    #[test]
    fn test_business_classifications_are_excluded() {
        for classification in [Classification::Business, Classification::BusinessEntertainment] {
            let result = select(classification, 3451);
            assert_eq!(result.rate, Decimal::ZERO);
            assert_eq!(result.tier, None);
            assert_eq!(result.method, METHOD_BUSINESS_EXCLUSION);
        }
    }

    #[test]
    fn test_audit_step_records_inputs() {
        let result = select(Classification::PersonalEntertainment, 673);
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "rate_selection");
        assert_eq!(result.audit_step.input["miles"], 673);
        assert_eq!(result.audit_step.output["tier"], "medium");
        assert_eq!(result.audit_step.output["rate"], "0.23");
    }
}
