//! Passenger tax profile registry.

use tracing::{debug, warn};

use crate::models::{PassengerRef, PassengerTaxProfile, ProfileUpdate, TaxDesignation};

/// The set of registered passenger tax profiles.
///
/// The registry is an immutable value. Adding, removing or updating a profile
/// returns a new registry, so a registry being read is never changed
/// underneath its reader.
///
/// # Example
///
/// ```
/// use sifl_engine::models::{PassengerRef, PassengerTaxProfile, TaxDesignation};
/// use sifl_engine::reference::PassengerProfileRegistry;
///
/// let registry = PassengerProfileRegistry::default().with_profile(PassengerTaxProfile {
///     id: "tp1".to_string(),
///     name: "Executive A".to_string(),
///     employee_number: Some("T-8842".to_string()),
///     title: Some("CEO".to_string()),
///     designation: TaxDesignation::Ceo,
/// });
///
/// assert_eq!(registry.lookup_by_name("Executive A"), TaxDesignation::Ceo);
/// assert_eq!(registry.lookup_by_name("Guest 1"), TaxDesignation::Standard);
///
/// let linked = PassengerRef::named("p1", "A. Executive").with_profile("tp1");
/// assert_eq!(registry.lookup(&linked), TaxDesignation::Ceo);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerProfileRegistry {
    profiles: Vec<PassengerTaxProfile>,
}

impl PassengerProfileRegistry {
    /// Builds a registry from a list of profiles. Later duplicates of an id
    /// replace earlier ones.
    pub fn new(profiles: Vec<PassengerTaxProfile>) -> Self {
        profiles
            .into_iter()
            .fold(Self::default(), |registry, profile| registry.with_profile(profile))
    }

    /// All registered profiles.
    pub fn profiles(&self) -> &[PassengerTaxProfile] {
        &self.profiles
    }

    /// Finds a profile by id.
    pub fn get(&self, id: &str) -> Option<&PassengerTaxProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Finds the profile a passenger is linked to, by profile id first and
    /// then by display name.
    pub fn find(&self, passenger: &PassengerRef) -> Option<&PassengerTaxProfile> {
        if let Some(profile_id) = &passenger.profile_id {
            match self.get(profile_id) {
                Some(profile) => return Some(profile),
                None => {
                    warn!(
                        passenger_id = %passenger.id,
                        profile_id = %profile_id,
                        "Passenger linked to unknown profile; trying name match"
                    );
                }
            }
        }

        let mut matches = self.profiles.iter().filter(|p| p.name == passenger.name);
        let found = matches.next();
        if found.is_some() {
            debug!(
                passenger_id = %passenger.id,
                name = %passenger.name,
                "Resolved tax profile by display name"
            );
            if matches.next().is_some() {
                warn!(
                    name = %passenger.name,
                    "Several tax profiles share this name; using the first"
                );
            }
        }
        found
    }

    /// Returns the designation for a passenger, or `Standard` if no profile matches.
    pub fn lookup(&self, passenger: &PassengerRef) -> TaxDesignation {
        self.find(passenger)
            .map(|p| p.designation)
            .unwrap_or_default()
    }

    /// Returns the designation for a display name, or `Standard` if no profile matches.
    pub fn lookup_by_name(&self, name: &str) -> TaxDesignation {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.designation)
            .unwrap_or_default()
    }

    /// Returns a registry with `profile` added, replacing any profile with the same id.
    pub fn with_profile(&self, profile: PassengerTaxProfile) -> Self {
        let mut profiles: Vec<PassengerTaxProfile> = self
            .profiles
            .iter()
            .filter(|p| p.id != profile.id)
            .cloned()
            .collect();
        profiles.push(profile);
        Self { profiles }
    }

    /// Returns a registry without the profile `id`.
    pub fn without_profile(&self, id: &str) -> Self {
        Self {
            profiles: self.profiles.iter().filter(|p| p.id != id).cloned().collect(),
        }
    }

    /// Returns a registry with a partial update applied to profile `id`.
    /// Unknown ids leave the registry unchanged.
    pub fn with_updated(&self, id: &str, update: &ProfileUpdate) -> Self {
        Self {
            profiles: self
                .profiles
                .iter()
                .map(|p| if p.id == id { p.updated(update) } else { p.clone() })
                .collect(),
        }
    }
}
