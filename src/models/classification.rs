//! Flight purpose classification.
//!
//! Every passenger on a leg carries one [`Classification`]. Whether a
//! classification is personal decides if a terminal charge, a control
//! employee multiplier and an SEC incremental cost apply.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;

/// The IRS purpose category assigned to a passenger's presence on a leg.
///
/// # Example
///
/// ```
/// use sifl_engine::models::Classification;
///
/// assert!(Classification::PersonalEntertainment.is_personal());
/// assert!(!Classification::Commuting.is_personal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Travel for a business purpose.
    Business,
    /// Business travel that includes entertainment.
    BusinessEntertainment,
    /// Personal travel for entertainment, amusement or recreation.
    PersonalEntertainment,
    /// Personal travel with no entertainment purpose.
    PersonalNonEntertainment,
    /// Travel between residence and principal place of work.
    Commuting,
}

impl Classification {
    /// All classifications in display order.
    pub const ALL: [Classification; 5] = [
        Classification::Business,
        Classification::BusinessEntertainment,
        Classification::PersonalEntertainment,
        Classification::PersonalNonEntertainment,
        Classification::Commuting,
    ];

    /// Returns true for the two personal classifications.
    ///
    /// Commuting is not personal here: it is valued on its own branch and
    /// carries neither a terminal charge nor an SEC cost.
    pub fn is_personal(self) -> bool {
        matches!(
            self,
            Classification::PersonalEntertainment | Classification::PersonalNonEntertainment
        )
    }

    /// The human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Classification::Business => "Business",
            Classification::BusinessEntertainment => "Business Entertainment",
            Classification::PersonalEntertainment => "Personal Entertainment",
            Classification::PersonalNonEntertainment => "Personal Non-Entertainment",
            Classification::Commuting => "Commuting",
        }
    }

    /// The snake_case code used in configuration and JSON.
    pub fn code(self) -> &'static str {
        match self {
            Classification::Business => "business",
            Classification::BusinessEntertainment => "business_entertainment",
            Classification::PersonalEntertainment => "personal_entertainment",
            Classification::PersonalNonEntertainment => "personal_non_entertainment",
            Classification::Commuting => "commuting",
        }
    }

    /// Parses an editor-supplied label, treating anything unrecognised as
    /// [`Classification::Business`].
    ///
    /// Business valuation is zero, so an unparseable label never inflates
    /// imputed income.
    pub fn parse_or_business(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            warn!(label, "Unrecognised classification, valuing as Business Exclusion");
            Classification::Business
        })
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Classification {
    type Err = EngineError;

    /// Accepts either the snake_case code or the report label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Classification::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| EngineError::UnknownClassification {
                label: s.to_string(),
            })
    }
}
