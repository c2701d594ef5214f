//! Imputed income totals per passenger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Classification, TaxDesignation, Trip};
use crate::reference::PassengerProfileRegistry;

/// Imputed income of one passenger over a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImputedIncomeSummary {
    /// Display name (the profile name when the passenger is registered).
    pub passenger_name: String,
    /// Tax designation the flights were valued under.
    pub designation: TaxDesignation,
    /// Employee number from the profile, if any.
    pub employee_number: Option<String>,
    /// Legs with a personal or commuting classification.
    pub taxable_flights: usize,
    /// Miles flown on those legs.
    pub total_miles: u64,
    /// Sum of the SIFL values of those legs.
    pub total_sifl: Decimal,
}

impl ImputedIncomeSummary {
    fn empty(passenger_name: &str, designation: TaxDesignation, employee_number: Option<String>) -> Self {
        Self {
            passenger_name: passenger_name.to_string(),
            designation,
            employee_number,
            taxable_flights: 0,
            total_miles: 0,
            total_sifl: Decimal::ZERO,
        }
    }
}

/// Totals taxable flights per passenger for legs dated within `from..=to`.
///
/// Every registered profile gets a line, in registry order, even with no
/// flights. Unregistered passengers with taxable flights follow in the order
/// they were first seen.
pub fn imputed_income_summary(
    trips: &[Trip],
    profiles: &PassengerProfileRegistry,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<ImputedIncomeSummary> {
    // Keyed by profile id for registered passengers, display name otherwise.
    let mut keys: Vec<String> = Vec::new();
    let mut lines: Vec<ImputedIncomeSummary> = Vec::new();

    for profile in profiles.profiles() {
        keys.push(profile.id.clone());
        lines.push(ImputedIncomeSummary::empty(
            &profile.name,
            profile.designation,
            profile.employee_number.clone(),
        ));
    }

    let legs = trips
        .iter()
        .flat_map(|t| t.legs.iter())
        .filter(|leg| leg.date >= from && leg.date <= to);

    for leg in legs {
        for assignment in &leg.passengers {
            let classification = assignment.classification;
            if !(classification.is_personal() || classification == Classification::Commuting) {
                continue;
            }

            let profile = profiles.find(&assignment.passenger);
            let key = profile
                .map(|p| p.id.clone())
                .unwrap_or_else(|| assignment.passenger.name.clone());

            let index = match keys.iter().position(|k| *k == key) {
                Some(index) => index,
                None => {
                    keys.push(key);
                    lines.push(ImputedIncomeSummary::empty(
                        &assignment.passenger.name,
                        TaxDesignation::default(),
                        None,
                    ));
                    lines.len() - 1
                }
            };

            let line = &mut lines[index];
            line.taxable_flights += 1;
            line.total_miles += u64::from(leg.miles);
            line.total_sifl += assignment.sifl_total;
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightLeg, PassengerAssignment, PassengerRef, PassengerTaxProfile, TripStatus};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry() -> PassengerProfileRegistry {
        PassengerProfileRegistry::new(vec![
            PassengerTaxProfile {
                id: "tp1".to_string(),
                name: "Executive A".to_string(),
                employee_number: Some("T-8842".to_string()),
                title: Some("CEO".to_string()),
                designation: TaxDesignation::Ceo,
            },
            PassengerTaxProfile {
                id: "tp2".to_string(),
                name: "Executive B".to_string(),
                employee_number: Some("T-1193".to_string()),
                title: None,
                designation: TaxDesignation::Band7,
            },
        ])
    }

    fn assignment(id: &str, name: &str, classification: Classification, total: &str) -> PassengerAssignment {
        let mut a = PassengerAssignment::new(PassengerRef::named(id, name), classification);
        a.sifl_total = dec(total);
        a
    }

    fn trips() -> Vec<Trip> {
        let mut leg1 = FlightLeg::new("1", date(2024, 10, 20), "N1PG", "TEB", "PBI", 1035);
        leg1.passengers = vec![
            assignment("p2", "Executive B", Classification::PersonalEntertainment, "1007.30"),
            assignment("p3", "Guest 1", Classification::PersonalEntertainment, "293.15"),
            assignment("p1", "Executive A", Classification::Business, "0"),
        ];
        let mut leg2 = FlightLeg::new("2", date(2024, 10, 25), "N2PG", "TEB", "VNY", 2454);
        leg2.passengers = vec![assignment("p1", "Executive A", Classification::Commuting, "739.88")];
        let mut leg3 = FlightLeg::new("3", date(2024, 12, 5), "N1PG", "PBI", "TEB", 1035);
        leg3.passengers = vec![assignment("p2", "Executive B", Classification::PersonalEntertainment, "1007.30")];

        vec![Trip {
            id: "trip2".to_string(),
            name: "Bahamas Weekend".to_string(),
            start_date: date(2024, 10, 20),
            end_date: date(2024, 12, 5),
            status: TripStatus::Open,
            legs: vec![leg1, leg2, leg3],
        }]
    }

    #[test]
    fn test_summary_counts_only_taxable_flights_in_range() {
        let lines = imputed_income_summary(&trips(), &registry(), date(2024, 10, 1), date(2024, 10, 31));

        assert_eq!(lines.len(), 3);

        let exec_a = &lines[0];
        assert_eq!(exec_a.passenger_name, "Executive A");
        assert_eq!(exec_a.designation, TaxDesignation::Ceo);
        assert_eq!(exec_a.taxable_flights, 1);
        assert_eq!(exec_a.total_miles, 2454);
        assert_eq!(exec_a.total_sifl, dec("739.88"));

        let exec_b = &lines[1];
        assert_eq!(exec_b.taxable_flights, 1);
        assert_eq!(exec_b.total_sifl, dec("1007.30"));

        let guest = &lines[2];
        assert_eq!(guest.passenger_name, "Guest 1");
        assert_eq!(guest.designation, TaxDesignation::Standard);
        assert_eq!(guest.employee_number, None);
    }

    #[test]
    fn test_range_is_inclusive() {
        let lines = imputed_income_summary(&trips(), &registry(), date(2024, 10, 20), date(2024, 12, 5));
        assert_eq!(lines[1].taxable_flights, 2);
        assert_eq!(lines[1].total_miles, 2070);
        assert_eq!(lines[1].total_sifl, dec("2014.60"));
    }

    #[test]
    fn test_registered_profiles_listed_without_flights() {
        let lines = imputed_income_summary(&trips(), &registry(), date(2025, 1, 1), date(2025, 12, 31));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.taxable_flights == 0 && l.total_sifl.is_zero()));
    }
}
