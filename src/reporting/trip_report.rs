//! Flat per-passenger trip report.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Classification, Trip};

use super::round_money;

/// Column headers of the CSV export.
pub const CSV_HEADERS: [&str; 10] = [
    "Trip Name",
    "Date",
    "Aircraft",
    "Origin",
    "Destination",
    "Flight Time",
    "Miles",
    "Passenger",
    "Classification",
    "SIFL Amount",
];

/// One passenger on one leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Name of the trip.
    pub trip_name: String,
    /// Flight date.
    pub date: NaiveDate,
    /// Aircraft registration.
    pub aircraft: String,
    /// Taxable origin.
    pub origin: String,
    /// Taxable destination.
    pub destination: String,
    /// Block time, blank if not entered.
    pub flight_time: String,
    /// Statute miles.
    pub miles: u32,
    /// Passenger display name.
    pub passenger_name: String,
    /// Classification on this leg.
    pub classification: Classification,
    /// SIFL value rounded to cents.
    pub sifl_amount: Decimal,
}

impl ReportRow {
    /// Flattens trips into rows, in trip, leg and manifest order.
    pub fn from_trips(trips: &[Trip]) -> Vec<ReportRow> {
        trips
            .iter()
            .flat_map(|trip| {
                trip.legs.iter().flat_map(move |leg| {
                    leg.passengers.iter().map(move |assignment| ReportRow {
                        trip_name: trip.name.clone(),
                        date: leg.date,
                        aircraft: leg.aircraft.clone(),
                        origin: leg.taxable_origin().to_string(),
                        destination: leg.taxable_destination().to_string(),
                        flight_time: leg.flight_time.clone().unwrap_or_default(),
                        miles: leg.miles,
                        passenger_name: assignment.passenger.name.clone(),
                        classification: assignment.classification,
                        sifl_amount: round_money(assignment.sifl_total),
                    })
                })
            })
            .collect()
    }

    fn to_csv_line(&self) -> String {
        [
            quote(&self.trip_name),
            self.date.to_string(),
            csv_escape(&self.aircraft),
            csv_escape(&self.origin),
            csv_escape(&self.destination),
            csv_escape(&self.flight_time),
            self.miles.to_string(),
            quote(&self.passenger_name),
            quote(self.classification.label()),
            format!("{:.2}", self.sifl_amount),
        ]
        .join(",")
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Quotes a field only when it holds a separator, quote or line break.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        quote(field)
    } else {
        field.to_string()
    }
}

/// A generated trip report.
///
/// # Example
///
/// ```
/// use sifl_engine::reporting::TripReport;
///
/// let report = TripReport::generate(&[]);
/// assert!(report.rows.is_empty());
/// assert_eq!(
///     report.to_csv(),
///     "Trip Name,Date,Aircraft,Origin,Destination,Flight Time,Miles,Passenger,Classification,SIFL Amount"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripReport {
    /// Unique id of this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the values.
    pub engine_version: String,
    /// One row per passenger per leg.
    pub rows: Vec<ReportRow>,
    /// Sum of the rounded row amounts.
    pub total_sifl: Decimal,
}

impl TripReport {
    /// Builds a report from committed trips.
    pub fn generate(trips: &[Trip]) -> Self {
        let rows = ReportRow::from_trips(trips);
        let total_sifl = rows.iter().map(|r| r.sifl_amount).sum();
        let report = Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            rows,
            total_sifl,
        };

        info!(
            report_id = %report.report_id,
            trips = trips.len(),
            rows = report.rows.len(),
            total_sifl = %report.total_sifl,
            "Generated SIFL trip report"
        );
        report
    }

    /// Renders the rows as CSV with a header line.
    pub fn to_csv(&self) -> String {
        std::iter::once(CSV_HEADERS.join(","))
            .chain(self.rows.iter().map(ReportRow::to_csv_line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the whole report as pretty-printed JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::ReportRender {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightLeg, PassengerAssignment, PassengerRef, TripStatus};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn trip() -> Trip {
        let date = NaiveDate::from_ymd_opt(2024, 10, 25).unwrap();
        let mut leg = FlightLeg::new("5", date, "N2PG", "TEB", "VNY", 2454);
        leg.tax_destination_override = Some("BUR".to_string());
        leg.flight_time = Some("5.5h".to_string());

        let mut commute = PassengerAssignment::new(
            PassengerRef::named("p1", "Executive A"),
            Classification::Commuting,
        );
        commute.sifl_total = dec("729.0234");
        let mut guest = PassengerAssignment::new(
            PassengerRef::named("p3", "Guest \"One\""),
            Classification::Business,
        );
        guest.sifl_total = Decimal::ZERO;
        leg.passengers = vec![commute, guest];

        Trip {
            id: "trip3".to_string(),
            name: "West Coast, Roadshow".to_string(),
            start_date: date,
            end_date: date,
            status: TripStatus::Open,
            legs: vec![leg],
        }
    }

    #[test]
    fn test_rows_use_taxable_route_and_round_amounts() {
        let rows = ReportRow::from_trips(&[trip()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].origin, "TEB");
        assert_eq!(rows[0].destination, "BUR");
        assert_eq!(rows[0].sifl_amount, dec("729.02"));
        assert_eq!(rows[1].sifl_amount, Decimal::ZERO);
    }

    #[test]
    fn test_csv_quotes_text_fields() {
        let report = TripReport::generate(&[trip()]);
        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "\"West Coast, Roadshow\",2024-10-25,N2PG,TEB,BUR,5.5h,2454,\"Executive A\",\"Commuting\",729.02"
        );
        assert_eq!(
            lines[2],
            "\"West Coast, Roadshow\",2024-10-25,N2PG,TEB,BUR,5.5h,2454,\"Guest \"\"One\"\"\",\"Business\",0.00"
        );
    }

    #[test]
    fn test_csv_escapes_edited_route_fields() {
        let mut trip = trip();
        trip.legs[0].tax_origin_override = Some("Teterboro, NJ".to_string());
        trip.legs[0].flight_time = Some("5h \"block\"".to_string());

        let csv = TripReport::generate(&[trip]).to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[1],
            "\"West Coast, Roadshow\",2024-10-25,N2PG,\"Teterboro, NJ\",BUR,\"5h \"\"block\"\"\",2454,\"Executive A\",\"Commuting\",729.02"
        );
    }

    #[test]
    fn test_csv_escape_leaves_plain_fields_bare() {
        assert_eq!(csv_escape("TEB"), "TEB");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_report_total_and_metadata() {
        let report = TripReport::generate(&[trip()]);
        assert_eq!(report.total_sifl, dec("729.02"));
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
        assert_ne!(report.report_id, TripReport::generate(&[]).report_id);
    }

    #[test]
    fn test_json_output() {
        let report = TripReport::generate(&[trip()]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["rows"][0]["classification"], "commuting");
        assert_eq!(json["rows"][0]["sifl_amount"], "729.02");
        assert_eq!(json["total_sifl"], "729.02");
    }
}
