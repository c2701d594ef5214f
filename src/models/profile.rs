//! Passenger identity and tax profile models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The tax designation that decides a passenger's valuation multiplier.
///
/// Designation is independent of the free-text job title on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxDesignation {
    /// Non-control employee or guest.
    #[default]
    Standard,
    /// Band 7 control employee.
    Band7,
    /// Chief executive officer.
    Ceo,
    /// Member of the board of directors.
    BoardMember,
}

impl TaxDesignation {
    /// The human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            TaxDesignation::Standard => "Standard",
            TaxDesignation::Band7 => "Band 7",
            TaxDesignation::Ceo => "CEO",
            TaxDesignation::BoardMember => "Board Member",
        }
    }
}

impl fmt::Display for TaxDesignation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A registered passenger and their tax designation.
///
/// # Example
///
/// ```
/// use sifl_engine::models::{PassengerTaxProfile, TaxDesignation};
///
/// let profile = PassengerTaxProfile {
///     id: "tp1".to_string(),
///     name: "Executive A".to_string(),
///     employee_number: Some("T-8842".to_string()),
///     title: Some("CEO".to_string()),
///     designation: TaxDesignation::Ceo,
/// };
/// assert_eq!(profile.designation.label(), "CEO");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerTaxProfile {
    /// Stable identifier for the profile.
    pub id: String,
    /// Display name, also the legacy join key for passengers without a profile id.
    pub name: String,
    /// Employee ("T") number, if the passenger is an employee.
    #[serde(default)]
    pub employee_number: Option<String>,
    /// Job title. Informational only.
    #[serde(default)]
    pub title: Option<String>,
    /// Tax designation used for multiplier lookup.
    #[serde(default)]
    pub designation: TaxDesignation,
}

/// A partial update to a [`PassengerTaxProfile`]. `None` fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New employee number.
    pub employee_number: Option<String>,
    /// New job title.
    pub title: Option<String>,
    /// New designation.
    pub designation: Option<TaxDesignation>,
}

impl PassengerTaxProfile {
    /// Returns a copy of this profile with the update applied.
    pub fn updated(&self, update: &ProfileUpdate) -> Self {
        Self {
            id: self.id.clone(),
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            employee_number: update
                .employee_number
                .clone()
                .or_else(|| self.employee_number.clone()),
            title: update.title.clone().or_else(|| self.title.clone()),
            designation: update.designation.unwrap_or(self.designation),
        }
    }
}

/// Identifies the passenger behind a seat assignment.
///
/// `profile_id` links the passenger to the profile registry. When it is
/// absent the registry falls back to matching on `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassengerRef {
    /// Identifier of the passenger on the manifest.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Registry profile id, if the passenger has been linked to one.
    #[serde(default)]
    pub profile_id: Option<String>,
}

impl PassengerRef {
    /// A passenger known only by manifest id and name.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            profile_id: None,
        }
    }

    /// Links the passenger to a registry profile.
    pub fn with_profile(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }
}
