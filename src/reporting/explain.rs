//! Step-by-step explanation of a valuation breakdown.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::ValuationBreakdown;

use super::round_money;

/// How the SEC cost share is derived, shown alongside it.
pub const SEC_COST_FORMULA: &str = "Total Flight Variable Costs ÷ Total Passengers";

/// One display line of an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ExplanationStep {
    /// `miles × rate`.
    MileageCharge {
        /// Statute miles.
        miles: u32,
        /// Per-mile rate.
        rate: Decimal,
        /// `miles × rate`, in cents.
        amount: Decimal,
    },
    /// The control employee multiplier, shown only when it is not 1.
    Multiplier {
        /// Multiplier as a percentage, e.g. 400.
        percent: Decimal,
        /// Mileage charge after the multiplier, in cents.
        amount: Decimal,
    },
    /// The fixed terminal charge.
    TerminalCharge {
        /// Amount added, in cents.
        amount: Decimal,
    },
    /// The SIFL total.
    Total {
        /// Total in cents.
        amount: Decimal,
    },
    /// The passenger's SEC incremental cost share.
    SecCost {
        /// Share in cents.
        amount: Decimal,
    },
}

impl fmt::Display for ExplanationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplanationStep::MileageCharge {
                miles,
                rate,
                amount,
            } => write!(
                f,
                "Mileage Charge: {} mi × ${:.4}/mi = ${:.2}",
                miles, rate, amount
            ),
            ExplanationStep::Multiplier { percent, amount } => {
                write!(f, "Multiplier Applied: × {}% = ${:.2}", percent, amount)
            }
            ExplanationStep::TerminalCharge { amount } => {
                write!(f, "Terminal Charge: + ${:.2}", amount)
            }
            ExplanationStep::Total { amount } => write!(f, "Total SIFL: ${:.2}", amount),
            ExplanationStep::SecCost { amount } => write!(
                f,
                "SEC Incremental Cost: ${:.2} ({})",
                amount, SEC_COST_FORMULA
            ),
        }
    }
}

/// A breakdown laid out for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// Who the breakdown is for.
    pub passenger_name: String,
    /// The valuation method applied.
    pub method: String,
    /// Display lines in order.
    pub steps: Vec<ExplanationStep>,
}

impl Explanation {
    /// Rendered display lines, method first.
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(format!("Method: {}", self.method))
            .chain(self.steps.iter().map(ToString::to_string))
            .collect()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SIFL calculation for {}", self.passenger_name)?;
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Lays out a breakdown in display order: mileage charge, multiplier (when
/// not 1), terminal charge, total and, when positive, the SEC cost share.
///
/// # Example
///
/// ```
/// use sifl_engine::models::{RateTier, ValuationBreakdown};
/// use sifl_engine::reporting::explain;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let breakdown = ValuationBreakdown {
///     rate: Decimal::new(3015, 4),
///     rate_tier: Some(RateTier::Short),
///     method: "SIFL Rate (2024-07-01 Period)".to_string(),
///     multiplier: Decimal::ONE,
///     total: Decimal::new(111782, 3),
///     miles: 188,
///     terminal_charge: Decimal::new(5510, 2),
///     applied_rules: vec![],
///     sec_cost: None,
///     period_start: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     period_fallback: false,
///     audit_steps: vec![],
/// };
///
/// let lines = explain(&breakdown, "Guest 1").lines();
/// assert_eq!(lines[1], "Mileage Charge: 188 mi × $0.3015/mi = $56.68");
/// assert_eq!(lines[3], "Total SIFL: $111.78");
/// ```
pub fn explain(breakdown: &ValuationBreakdown, passenger_name: &str) -> Explanation {
    let mut steps = vec![ExplanationStep::MileageCharge {
        miles: breakdown.miles,
        rate: breakdown
            .rate
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero),
        amount: round_money(breakdown.mileage_charge()),
    }];

    if breakdown.has_multiplier() {
        steps.push(ExplanationStep::Multiplier {
            percent: (breakdown.multiplier * Decimal::ONE_HUNDRED).normalize(),
            amount: round_money(breakdown.multiplied_charge()),
        });
    }

    steps.push(ExplanationStep::TerminalCharge {
        amount: round_money(breakdown.terminal_charge),
    });
    steps.push(ExplanationStep::Total {
        amount: round_money(breakdown.total),
    });

    if let Some(sec_cost) = breakdown.sec_cost.filter(|s| *s > Decimal::ZERO) {
        steps.push(ExplanationStep::SecCost {
            amount: round_money(sec_cost),
        });
    }

    Explanation {
        passenger_name: passenger_name.to_string(),
        method: breakdown.method.clone(),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateTier;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn band7_breakdown() -> ValuationBreakdown {
        ValuationBreakdown {
            rate: dec("0.2266"),
            rate_tier: Some(RateTier::Medium),
            method: "SIFL Rate (2024-01-01 Period)".to_string(),
            multiplier: dec("4.0"),
            total: dec("664.3072"),
            miles: 673,
            terminal_charge: dec("54.30"),
            applied_rules: vec!["Control Employee (400%)".to_string()],
            sec_cost: Some(dec("15050") / dec("3")),
            period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            period_fallback: false,
            audit_steps: vec![],
        }
    }

    #[test]
    fn test_lines_in_display_order() {
        let lines = explain(&band7_breakdown(), "Executive B").lines();
        assert_eq!(
            lines,
            vec![
                "Method: SIFL Rate (2024-01-01 Period)",
                "Mileage Charge: 673 mi × $0.2266/mi = $152.50",
                "Multiplier Applied: × 400% = $610.01",
                "Terminal Charge: + $54.30",
                "Total SIFL: $664.31",
                "SEC Incremental Cost: $5016.67 (Total Flight Variable Costs ÷ Total Passengers)",
            ]
        );
    }

    #[test]
    fn test_multiplier_line_omitted_at_one() {
        let mut breakdown = band7_breakdown();
        breakdown.multiplier = dec("1.0");
        let explanation = explain(&breakdown, "Guest 1");
        assert!(
            !explanation
                .steps
                .iter()
                .any(|s| matches!(s, ExplanationStep::Multiplier { .. }))
        );
    }

    #[test]
    fn test_sec_line_omitted_when_absent_or_zero() {
        let mut breakdown = band7_breakdown();
        breakdown.sec_cost = None;
        assert_eq!(explain(&breakdown, "x").steps.len(), 4);

        breakdown.sec_cost = Some(Decimal::ZERO);
        assert_eq!(explain(&breakdown, "x").steps.len(), 4);
    }

    #[test]
    fn test_business_breakdown_renders_zeros() {
        let breakdown = ValuationBreakdown {
            rate: Decimal::ZERO,
            rate_tier: None,
            method: "Business Exclusion".to_string(),
            multiplier: Decimal::ONE,
            total: Decimal::ZERO,
            miles: 3451,
            terminal_charge: Decimal::ZERO,
            applied_rules: vec![],
            sec_cost: None,
            period_start: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            period_fallback: false,
            audit_steps: vec![],
        };
        let lines = explain(&breakdown, "Executive A").lines();
        assert_eq!(lines[1], "Mileage Charge: 3451 mi × $0.0000/mi = $0.00");
        assert_eq!(lines[3], "Total SIFL: $0.00");
    }

    #[test]
    fn test_display_includes_passenger() {
        let rendered = explain(&band7_breakdown(), "Executive B").to_string();
        assert!(rendered.starts_with("SIFL calculation for Executive B\nMethod:"));
    }
}
