//! SIFL valuation for one passenger on one leg.
//!
//! [`compute_breakdown`] chains the individual rules in a fixed order and
//! collects their audit steps. It is a total function: every input yields a
//! breakdown, with fallbacks for unknown dates, unknown passengers and
//! missing costs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    AuditStep, Classification, PassengerRef, ValuationBreakdown, VariableCostBundle,
};
use crate::reference::ReferenceData;

use super::control_multiplier::apply_control_multiplier;
use super::rate_selection::select_rate;
use super::seating_capacity::check_seating_capacity;
use super::sec_cost::allocate_sec_cost;
use super::terminal_charge::apply_terminal_charge;

/// Everything about a passenger's seat that the valuation depends on.
#[derive(Debug, Clone, Copy)]
pub struct BreakdownInput<'a> {
    /// Purpose of the passenger's travel.
    pub classification: Classification,
    /// Statute miles flown.
    pub miles: u32,
    /// Flight date, used to pick the rate period.
    pub date: NaiveDate,
    /// The passenger, used to look up their tax designation.
    pub passenger: &'a PassengerRef,
    /// The leg's variable costs, if entered.
    pub costs: Option<VariableCostBundle>,
    /// Number of passengers on the leg, the divisor for the SEC cost.
    pub total_passenger_count: usize,
}

impl<'a> BreakdownInput<'a> {
    /// Creates an input with no costs and a passenger count of one.
    pub fn new(
        classification: Classification,
        miles: u32,
        date: NaiveDate,
        passenger: &'a PassengerRef,
    ) -> Self {
        Self {
            classification,
            miles,
            date,
            passenger,
            costs: None,
            total_passenger_count: 1,
        }
    }

    /// Sets the leg's variable costs.
    pub fn with_costs(mut self, costs: Option<VariableCostBundle>) -> Self {
        self.costs = costs;
        self
    }

    /// Sets the number of passengers on the leg.
    pub fn with_passenger_count(mut self, count: usize) -> Self {
        self.total_passenger_count = count;
        self
    }
}

/// Computes the SIFL valuation and SEC cost share for one passenger.
///
/// `total = miles * rate * multiplier + terminal_charge`, where the rate,
/// multiplier and terminal charge depend on the classification, the rate
/// period covering the date and the passenger's tax designation.
///
/// # Example
///
/// ```
/// use sifl_engine::calculation::{compute_breakdown, BreakdownInput};
/// use sifl_engine::config::ValuationPolicy;
/// use sifl_engine::models::{Classification, MileageRates, PassengerRef, RatePeriod};
/// use sifl_engine::reference::{PassengerProfileRegistry, RatePeriodTable, ReferenceData};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = RatePeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     terminal_charge: Decimal::new(5510, 2),
///     rates: MileageRates {
///         short: Decimal::new(3015, 4),
///         medium: Decimal::new(2300, 4),
///         long: Decimal::new(2210, 4),
///     },
/// };
/// let reference = ReferenceData::new(
///     RatePeriodTable::new(vec![period])?,
///     PassengerProfileRegistry::default(),
///     ValuationPolicy::default(),
/// );
///
/// let guest = PassengerRef::named("p3", "Guest 1");
/// let input = BreakdownInput::new(
///     Classification::PersonalEntertainment,
///     188,
///     NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
///     &guest,
/// );
///
/// let breakdown = compute_breakdown(&input, &reference);
/// assert_eq!(breakdown.total, Decimal::new(111782, 3));
/// # Ok::<(), sifl_engine::error::EngineError>(())
/// ```
pub fn compute_breakdown(input: &BreakdownInput<'_>, reference: &ReferenceData) -> ValuationBreakdown {
    let policy = reference.policy();
    let mut audit_steps = Vec::with_capacity(8);

    // Step 1: rate period
    let resolution = reference.rates().resolve_detailed(input.date);
    let period = resolution.period;
    audit_steps.push(AuditStep {
        step_number: 1,
        rule_id: "rate_period".to_string(),
        rule_name: "Rate Period Resolution".to_string(),
        input: serde_json::json!({
            "date": input.date.to_string()
        }),
        output: serde_json::json!({
            "period_start": period.start_date.to_string(),
            "period_end": period.end_date.to_string(),
            "fallback": resolution.is_fallback()
        }),
        reasoning: if resolution.is_fallback() {
            format!(
                "No period covers {}; using the last configured period {}..{}",
                input.date, period.start_date, period.end_date
            )
        } else {
            format!(
                "{} falls within {}..{}",
                input.date, period.start_date, period.end_date
            )
        },
    });

    // Step 2: tax designation
    let profile = reference.profiles().find(input.passenger);
    let designation = profile.map(|p| p.designation).unwrap_or_default();
    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "designation".to_string(),
        rule_name: "Tax Designation Lookup".to_string(),
        input: serde_json::json!({
            "passenger_id": input.passenger.id,
            "passenger_name": input.passenger.name,
            "profile_id": input.passenger.profile_id
        }),
        output: serde_json::json!({
            "profile_id": profile.map(|p| p.id.clone()),
            "designation": designation.label()
        }),
        reasoning: match profile {
            Some(p) => format!("{} is registered as {}", p.name, designation),
            None => format!("{} has no tax profile; treated as {}", input.passenger.name, designation),
        },
    });

    // Step 3: rate and method
    let rate = select_rate(input.classification, input.miles, period, policy, 3);
    audit_steps.push(rate.audit_step);

    // Step 4: control employee multiplier
    let multiplier = apply_control_multiplier(input.classification, designation, policy, 4);
    audit_steps.push(multiplier.audit_step);

    // Step 5: terminal charge
    let terminal = apply_terminal_charge(input.classification, period, 5);
    audit_steps.push(terminal.audit_step);

    // Step 6: seating capacity annotation
    let seating = check_seating_capacity(input.classification, input.miles, policy, 6);
    audit_steps.push(seating.audit_step);

    // Step 7: total
    let miles = Decimal::from(input.miles);
    let total = miles * rate.rate * multiplier.multiplier + terminal.terminal_charge;
    audit_steps.push(AuditStep {
        step_number: 7,
        rule_id: "sifl_total".to_string(),
        rule_name: "SIFL Total".to_string(),
        input: serde_json::json!({
            "miles": input.miles,
            "rate": rate.rate.normalize().to_string(),
            "multiplier": multiplier.multiplier.normalize().to_string(),
            "terminal_charge": terminal.terminal_charge.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} mi × ${} × {} + ${} = ${}",
            input.miles,
            rate.rate.normalize(),
            multiplier.multiplier.normalize(),
            terminal.terminal_charge.normalize(),
            total.normalize()
        ),
    });

    // Step 8: SEC incremental cost
    let sec = allocate_sec_cost(
        input.classification,
        input.costs.as_ref(),
        input.total_passenger_count,
        8,
    );
    audit_steps.push(sec.audit_step);

    let applied_rules: Vec<String> = multiplier
        .applied_rule
        .into_iter()
        .chain(seating.applied_rule)
        .collect();

    debug!(
        passenger_id = %input.passenger.id,
        classification = input.classification.code(),
        miles = input.miles,
        %total,
        period_fallback = resolution.is_fallback(),
        "Computed SIFL breakdown"
    );

    ValuationBreakdown {
        rate: rate.rate,
        rate_tier: rate.tier,
        method: rate.method,
        multiplier: multiplier.multiplier,
        total,
        miles: input.miles,
        terminal_charge: terminal.terminal_charge,
        applied_rules,
        sec_cost: sec.sec_cost,
        period_start: period.start_date,
        period_fallback: resolution.is_fallback(),
        audit_steps,
    }
}
