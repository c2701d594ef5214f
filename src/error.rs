//! Error types for the SIFL valuation engine.
//!
//! The valuation formula itself never fails: every branch has a defined
//! fallback. The errors here cover the structural layer around it, such as
//! loading reference data, addressing trips and legs, and the draft lifecycle.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the SIFL valuation engine.
///
/// # Example
///
/// ```
/// use sifl_engine::error::EngineError;
///
/// let error = EngineError::LegNotFound {
///     leg_id: "leg_042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Flight leg not found: leg_042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table was built without any periods.
    #[error("Rate table must contain at least one rate period")]
    EmptyRateTable,

    /// A rate period had an inconsistent date range or negative amounts.
    #[error("Invalid rate period {start_date}..{end_date}: {message}")]
    InvalidRatePeriod {
        /// The first day of the offending period.
        start_date: NaiveDate,
        /// The last day of the offending period.
        end_date: NaiveDate,
        /// What made the period invalid.
        message: String,
    },

    /// The valuation policy thresholds or multipliers were inconsistent.
    #[error("Invalid valuation policy: {message}")]
    InvalidPolicy {
        /// What made the policy invalid.
        message: String,
    },

    /// A classification label did not name any known classification.
    #[error("Unknown classification: {label}")]
    UnknownClassification {
        /// The label that could not be parsed.
        label: String,
    },

    /// No trip exists with the given id.
    #[error("Trip not found: {trip_id}")]
    TripNotFound {
        /// The trip id that was requested.
        trip_id: String,
    },

    /// No flight leg exists with the given id.
    #[error("Flight leg not found: {leg_id}")]
    LegNotFound {
        /// The leg id that was requested.
        leg_id: String,
    },

    /// The passenger is not on the leg's roster.
    #[error("Passenger '{passenger_id}' not found on leg '{leg_id}'")]
    PassengerNotFound {
        /// The leg that was searched.
        leg_id: String,
        /// The passenger id that was requested.
        passenger_id: String,
    },

    /// The passenger is already on the leg's roster.
    #[error("Passenger '{passenger_id}' is already on leg '{leg_id}'")]
    DuplicatePassenger {
        /// The leg the passenger was being added to.
        leg_id: String,
        /// The duplicated passenger id.
        passenger_id: String,
    },

    /// Another editor already holds a draft for the leg.
    #[error("A draft is already open for leg '{leg_id}'")]
    DraftAlreadyOpen {
        /// The leg that is already being edited.
        leg_id: String,
    },

    /// The draft being committed is no longer the open draft for its leg.
    #[error("No open draft matches leg '{leg_id}'")]
    DraftNotOpen {
        /// The leg the stale draft belongs to.
        leg_id: String,
    },

    /// A report could not be rendered.
    #[error("Failed to render report: {message}")]
    ReportRender {
        /// Description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/valuation.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/valuation.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/rates/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/rates/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rate_period_displays_range() {
        let error = EngineError::InvalidRatePeriod {
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            message: "end date precedes start date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate period 2024-07-01..2024-06-30: end date precedes start date"
        );
    }

    #[test]
    fn test_passenger_not_found_displays_leg_and_passenger() {
        let error = EngineError::PassengerNotFound {
            leg_id: "leg_1".to_string(),
            passenger_id: "p9".to_string(),
        };
        assert_eq!(error.to_string(), "Passenger 'p9' not found on leg 'leg_1'");
    }

    #[test]
    fn test_draft_already_open_displays_leg() {
        let error = EngineError::DraftAlreadyOpen {
            leg_id: "leg_1".to_string(),
        };
        assert_eq!(error.to_string(), "A draft is already open for leg 'leg_1'");
    }

    #[test]
    fn test_report_render_displays_message() {
        let error = EngineError::ReportRender {
            message: "key must be a string".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to render report: key must be a string");
    }

    #[test]
    fn test_empty_rate_table_message() {
        assert_eq!(
            EngineError::EmptyRateTable.to_string(),
            "Rate table must contain at least one rate period"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_leg_not_found() -> EngineResult<()> {
            Err(EngineError::LegNotFound {
                leg_id: "leg_x".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_leg_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
