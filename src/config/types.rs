//! Configuration types for SIFL valuation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PassengerTaxProfile, RateTier, TaxDesignation};

/// Valuation multipliers by tax designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignationMultipliers {
    /// Multiplier for non-control passengers.
    pub standard: Decimal,
    /// Multiplier for Band 7 control employees.
    pub band7: Decimal,
    /// Multiplier for the CEO.
    pub ceo: Decimal,
    /// Multiplier for board members.
    pub board_member: Decimal,
}

impl DesignationMultipliers {
    /// Returns the multiplier for a designation.
    pub fn for_designation(&self, designation: TaxDesignation) -> Decimal {
        match designation {
            TaxDesignation::Standard => self.standard,
            TaxDesignation::Band7 => self.band7,
            TaxDesignation::Ceo => self.ceo,
            TaxDesignation::BoardMember => self.board_member,
        }
    }
}

impl Default for DesignationMultipliers {
    fn default() -> Self {
        Self {
            standard: Decimal::new(10, 1),
            band7: Decimal::new(40, 1),
            ceo: Decimal::new(20, 1),
            board_member: Decimal::new(40, 1),
        }
    }
}

/// Mileage thresholds separating the three SIFL rate tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageTiers {
    /// First mileage valued at the medium rate.
    pub medium_from: u32,
    /// First mileage valued at the long rate.
    pub long_from: u32,
}

impl MileageTiers {
    /// Selects the tier for a flight distance.
    pub fn tier_for(&self, miles: u32) -> RateTier {
        if miles < self.medium_from {
            RateTier::Short
        } else if miles < self.long_from {
            RateTier::Medium
        } else {
            RateTier::Long
        }
    }
}

impl Default for MileageTiers {
    fn default() -> Self {
        Self {
            medium_from: 500,
            long_from: 1500,
        }
    }
}

/// Tunable parameters of the valuation formula, from valuation.yaml.
///
/// # Example
///
/// ```
/// use sifl_engine::config::ValuationPolicy;
/// use sifl_engine::models::{RateTier, TaxDesignation};
/// use rust_decimal::Decimal;
///
/// let policy = ValuationPolicy::default();
/// assert_eq!(policy.mileage_tiers.tier_for(673), RateTier::Medium);
/// assert_eq!(
///     policy.multipliers.for_designation(TaxDesignation::Ceo),
///     Decimal::new(2, 0)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationPolicy {
    /// Multipliers by designation.
    #[serde(default)]
    pub multipliers: DesignationMultipliers,
    /// Tier thresholds.
    #[serde(default)]
    pub mileage_tiers: MileageTiers,
    /// Personal legs shorter than this are annotated as meeting the 50%
    /// seating capacity rule. This is a distance proxy, not a seat count.
    #[serde(default = "default_seating_proxy_max_miles")]
    pub seating_proxy_max_miles: u32,
}

fn default_seating_proxy_max_miles() -> u32 {
    200
}

impl Default for ValuationPolicy {
    fn default() -> Self {
        Self {
            multipliers: DesignationMultipliers::default(),
            mileage_tiers: MileageTiers::default(),
            seating_proxy_max_miles: default_seating_proxy_max_miles(),
        }
    }
}

impl ValuationPolicy {
    /// Checks that tiers are ordered and multipliers are at least 1.0.
    pub fn validate(&self) -> EngineResult<()> {
        if self.mileage_tiers.medium_from >= self.mileage_tiers.long_from {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "medium tier ({} mi) must start below long tier ({} mi)",
                    self.mileage_tiers.medium_from, self.mileage_tiers.long_from
                ),
            });
        }

        let m = &self.multipliers;
        for (name, value) in [
            ("standard", m.standard),
            ("band7", m.band7),
            ("ceo", m.ceo),
            ("board_member", m.board_member),
        ] {
            if value < Decimal::ONE {
                return Err(EngineError::InvalidPolicy {
                    message: format!("{} multiplier {} is below 1.0", name, value),
                });
            }
        }

        Ok(())
    }
}

/// Profiles configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesConfig {
    /// Registered passenger profiles.
    #[serde(default)]
    pub profiles: Vec<PassengerTaxProfile>,
}
