//! 50% seating capacity annotation.
//!
//! Short personal legs are tagged as meeting the seating capacity rule. The
//! tag is a distance proxy, not a seat-occupancy test, and never changes the
//! computed total.

use crate::config::ValuationPolicy;
use crate::models::{AuditStep, Classification};

/// Annotation attached when the seating capacity proxy is met.
pub const SEATING_CAPACITY_RULE: &str = "50% Seating Capacity Rule Met";

/// The result of the seating capacity check.
#[derive(Debug, Clone)]
pub struct SeatingCapacityResult {
    /// The annotation to attach, if the proxy is met.
    pub applied_rule: Option<String>,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Checks the seating capacity proxy for a passenger's leg.
///
/// The proxy is met when the classification is personal and the leg is
/// shorter than `policy.seating_proxy_max_miles`.
pub fn check_seating_capacity(
    classification: Classification,
    miles: u32,
    policy: &ValuationPolicy,
    step_number: u32,
) -> SeatingCapacityResult {
    let threshold = policy.seating_proxy_max_miles;
    let met = classification.is_personal() && miles < threshold;

    let reasoning = match (classification.is_personal(), met) {
        (true, true) => format!("{} mi is under the {} mi proxy threshold", miles, threshold),
        (true, false) => format!("{} mi is not under the {} mi proxy threshold", miles, threshold),
        (false, _) => format!("Not evaluated for {} travel", classification),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "seating_capacity".to_string(),
        rule_name: "Seating Capacity Proxy".to_string(),
        input: serde_json::json!({
            "classification": classification.code(),
            "miles": miles,
            "threshold_miles": threshold
        }),
        output: serde_json::json!({
            "met": met
        }),
        reasoning,
    };

    SeatingCapacityResult {
        applied_rule: met.then(|| SEATING_CAPACITY_RULE.to_string()),
        audit_step,
    }
}
