//! Read-mostly reference data for valuation.
//!
//! The rate table, the profile registry and the valuation policy are shared
//! behind `Arc` in a [`ReferenceData`] snapshot. Editing any of them builds a
//! new snapshot; holders of the old one keep seeing a consistent view.

mod profile_registry;
mod rate_table;

use std::sync::Arc;

use tracing::info;

pub use profile_registry::PassengerProfileRegistry;
pub use rate_table::{PeriodMatch, RatePeriodTable, RateResolution};

use crate::config::ValuationPolicy;
use crate::error::EngineResult;
use crate::models::{PassengerTaxProfile, ProfileUpdate, RatePeriod};

/// An immutable snapshot of everything the engine reads besides the flight itself.
///
/// Cloning is cheap: the parts are reference counted.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    rates: Arc<RatePeriodTable>,
    profiles: Arc<PassengerProfileRegistry>,
    policy: Arc<ValuationPolicy>,
}

impl ReferenceData {
    /// Creates a snapshot from its parts.
    pub fn new(
        rates: RatePeriodTable,
        profiles: PassengerProfileRegistry,
        policy: ValuationPolicy,
    ) -> Self {
        Self {
            rates: Arc::new(rates),
            profiles: Arc::new(profiles),
            policy: Arc::new(policy),
        }
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RatePeriodTable {
        &self.rates
    }

    /// Returns the profile registry.
    pub fn profiles(&self) -> &PassengerProfileRegistry {
        &self.profiles
    }

    /// Returns the valuation policy.
    pub fn policy(&self) -> &ValuationPolicy {
        &self.policy
    }

    /// A snapshot with the rate table replaced.
    pub fn with_rates(&self, rates: RatePeriodTable) -> Self {
        info!(periods = rates.periods().len(), "Replacing SIFL rate table");
        Self {
            rates: Arc::new(rates),
            ..self.clone()
        }
    }

    /// A snapshot with one rate period added or replaced.
    pub fn with_rate_period(&self, period: RatePeriod) -> EngineResult<Self> {
        Ok(self.with_rates(self.rates.with_period(period)?))
    }

    /// A snapshot with the profile registry replaced.
    pub fn with_profiles(&self, profiles: PassengerProfileRegistry) -> Self {
        info!(profiles = profiles.profiles().len(), "Replacing passenger profile registry");
        Self {
            profiles: Arc::new(profiles),
            ..self.clone()
        }
    }

    /// A snapshot with a profile added (or replaced by id).
    pub fn with_profile_added(&self, profile: PassengerTaxProfile) -> Self {
        self.with_profiles(self.profiles.with_profile(profile))
    }

    /// A snapshot with a profile removed.
    pub fn with_profile_removed(&self, id: &str) -> Self {
        self.with_profiles(self.profiles.without_profile(id))
    }

    /// A snapshot with a partial profile update applied.
    pub fn with_profile_updated(&self, id: &str, update: &ProfileUpdate) -> Self {
        self.with_profiles(self.profiles.with_updated(id, update))
    }

    /// A snapshot with the valuation policy replaced.
    pub fn with_policy(&self, policy: ValuationPolicy) -> EngineResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy: Arc::new(policy),
            ..self.clone()
        })
    }

    /// True if both snapshots share the same underlying data.
    pub fn ptr_eq(&self, other: &ReferenceData) -> bool {
        Arc::ptr_eq(&self.rates, &other.rates)
            && Arc::ptr_eq(&self.profiles, &other.profiles)
            && Arc::ptr_eq(&self.policy, &other.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MileageRates, TaxDesignation};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn reference() -> ReferenceData {
        let period = RatePeriod {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            terminal_charge: Decimal::new(5430, 2),
            rates: MileageRates {
                short: Decimal::new(2971, 4),
                medium: Decimal::new(2266, 4),
                long: Decimal::new(2178, 4),
            },
        };
        ReferenceData::new(
            RatePeriodTable::new(vec![period]).unwrap(),
            PassengerProfileRegistry::default(),
            ValuationPolicy::default(),
        )
    }

    #[test]
    fn test_reference_data_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReferenceData>();
    }

    #[test]
    fn test_clone_shares_snapshot() {
        let original = reference();
        let copy = original.clone();
        assert!(original.ptr_eq(&copy));
    }

    #[test]
    fn test_profile_edit_leaves_old_snapshot_untouched() {
        let original = reference();
        let edited = original.with_profile_added(PassengerTaxProfile {
            id: "tp1".to_string(),
            name: "Executive A".to_string(),
            employee_number: None,
            title: None,
            designation: TaxDesignation::Ceo,
        });

        assert_eq!(edited.profiles().lookup_by_name("Executive A"), TaxDesignation::Ceo);
        assert_eq!(
            original.profiles().lookup_by_name("Executive A"),
            TaxDesignation::Standard
        );
        assert!(!original.ptr_eq(&edited));
    }

    #[test]
    fn test_with_policy_validates() {
        let mut policy = ValuationPolicy::default();
        policy.mileage_tiers.long_from = 100;
        assert!(reference().with_policy(policy).is_err());
    }
}
