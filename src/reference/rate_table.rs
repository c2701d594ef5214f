//! Rate period resolution.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::RatePeriod;

/// How a period was chosen for a flight date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMatch {
    /// The period's range contains the date.
    Exact,
    /// No period contains the date; the last period was used instead.
    Fallback,
}

/// The period chosen for a date, and how it was chosen.
#[derive(Debug, Clone, Copy)]
pub struct RateResolution<'a> {
    /// The period to value the flight with.
    pub period: &'a RatePeriod,
    /// Whether the period actually covers the date.
    pub matched: PeriodMatch,
}

impl RateResolution<'_> {
    /// True when the date fell outside every configured period.
    pub fn is_fallback(&self) -> bool {
        self.matched == PeriodMatch::Fallback
    }
}

/// The configured list of SIFL rate periods.
///
/// Periods are held in start-date order. The table is never empty, so every
/// date resolves to some period.
///
/// # Example
///
/// ```
/// use sifl_engine::models::{MileageRates, RatePeriod};
/// use sifl_engine::reference::RatePeriodTable;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = RatePeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     terminal_charge: Decimal::new(5362, 2),
///     rates: MileageRates {
///         short: Decimal::new(2933, 4),
///         medium: Decimal::new(2237, 4),
///         long: Decimal::new(2150, 4),
///     },
/// };
/// let table = RatePeriodTable::new(vec![period])?;
/// let resolved = table.resolve(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
/// assert_eq!(resolved.terminal_charge, Decimal::new(5362, 2));
/// # Ok::<(), sifl_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatePeriodTable {
    periods: Vec<RatePeriod>,
}

impl RatePeriodTable {
    /// Builds a table, ordering periods by start date.
    ///
    /// Returns an error if the list is empty, a period ends before it starts,
    /// or a period carries a negative charge or rate. Overlapping periods are
    /// accepted; the earlier one wins on resolution.
    pub fn new(periods: Vec<RatePeriod>) -> EngineResult<Self> {
        if periods.is_empty() {
            return Err(EngineError::EmptyRateTable);
        }

        for period in &periods {
            Self::validate_period(period)?;
        }

        let mut sorted = periods;
        sorted.sort_by(|a, b| a.start_date.cmp(&b.start_date));

        for pair in sorted.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                warn!(
                    first_start = %pair[0].start_date,
                    first_end = %pair[0].end_date,
                    second_start = %pair[1].start_date,
                    "Overlapping SIFL rate periods; the earlier period takes precedence"
                );
            }
        }

        Ok(Self { periods: sorted })
    }

    fn validate_period(period: &RatePeriod) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidRatePeriod {
            start_date: period.start_date,
            end_date: period.end_date,
            message: message.to_string(),
        };

        if period.end_date < period.start_date {
            return Err(invalid("end date precedes start date"));
        }
        if period.terminal_charge.is_sign_negative() {
            return Err(invalid("terminal charge is negative"));
        }
        let rates = &period.rates;
        if rates.short.is_sign_negative()
            || rates.medium.is_sign_negative()
            || rates.long.is_sign_negative()
        {
            return Err(invalid("mileage rate is negative"));
        }
        Ok(())
    }

    /// Returns the period applicable to `date`.
    ///
    /// This is the first period whose inclusive range contains the date, or
    /// the last period when none does.
    pub fn resolve(&self, date: NaiveDate) -> &RatePeriod {
        self.resolve_detailed(date).period
    }

    /// Like [`resolve`](Self::resolve), but also reports whether the date was
    /// actually covered. Fallbacks are logged.
    pub fn resolve_detailed(&self, date: NaiveDate) -> RateResolution<'_> {
        if let Some(period) = self.periods.iter().find(|p| p.contains(date)) {
            return RateResolution {
                period,
                matched: PeriodMatch::Exact,
            };
        }

        let period = self.last();
        warn!(
            %date,
            fallback_start = %period.start_date,
            fallback_end = %period.end_date,
            "No SIFL rate period covers flight date; using last configured period"
        );
        RateResolution {
            period,
            matched: PeriodMatch::Fallback,
        }
    }

    /// All periods in start-date order.
    pub fn periods(&self) -> &[RatePeriod] {
        &self.periods
    }

    /// The latest configured period.
    pub fn last(&self) -> &RatePeriod {
        // The constructor rejects empty tables.
        &self.periods[self.periods.len() - 1]
    }

    /// Returns a new table with `period` added, replacing any period with the
    /// same start date.
    pub fn with_period(&self, period: RatePeriod) -> EngineResult<Self> {
        let mut periods: Vec<RatePeriod> = self
            .periods
            .iter()
            .filter(|p| p.start_date != period.start_date)
            .cloned()
            .collect();
        periods.push(period);
        Self::new(periods)
    }
}
