//! Calendar period selection for reports.
//!
//! A [`ReportPeriod`] is an explicit tagged selector, yearly or monthly,
//! validated at construction. Range resolution always yields a half-open
//! `[start, end)` interval so a post stamped exactly at the end bound falls
//! into the next period.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::report::ReportError;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Yearly { year: i32 },
    Monthly { year: i32, month: u32 },
}

impl ReportPeriod {
    /// Selector for a whole calendar year.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateSelector`] if `year` is outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn yearly(year: i32) -> Result<Self, ReportError> {
        check_year(year)?;
        Ok(ReportPeriod::Yearly { year })
    }

    /// Selector for one calendar month. `month` is 1-indexed.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateSelector`] if `year` is out of range
    /// or `month` is not in `1..=12`.
    pub fn monthly(year: i32, month: u32) -> Result<Self, ReportError> {
        check_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidDateSelector {
                reason: format!("month must be between 1 and 12, got {month}"),
            });
        }
        Ok(ReportPeriod::Monthly { year, month })
    }

    /// Resolve the half-open `[start, end)` instant interval for the period.
    ///
    /// The end bound is exclusive: the first instant of the following year or
    /// month, with December rolling into January of the next year. Bounds are
    /// built from calendar dates at midnight UTC on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateSelector`] only if a bound does not
    /// name a constructible calendar date; validated selectors never hit this.
    pub fn date_range(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), ReportError> {
        match *self {
            ReportPeriod::Yearly { year } => {
                Ok((month_floor(year, 1)?, month_floor(year + 1, 1)?))
            }
            ReportPeriod::Monthly { year, month } => {
                let start = month_floor(year, month)?;
                let end = if month == 12 {
                    month_floor(year + 1, 1)?
                } else {
                    month_floor(year, month + 1)?
                };
                Ok((start, end))
            }
        }
    }
}

fn check_year(year: i32) -> Result<(), ReportError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ReportError::InvalidDateSelector {
            reason: format!("year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"),
        })
    }
}

/// Midnight UTC on the first day of the given month.
fn month_floor(year: i32, month: u32) -> Result<DateTime<Utc>, ReportError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| ReportError::InvalidDateSelector {
            reason: format!("no such calendar date: {year:04}-{month:02}-01"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn yearly_range_spans_the_calendar_year() {
        let period = ReportPeriod::yearly(2025).expect("valid year");
        let (start, end) = period.date_range().expect("range");
        assert_eq!(start, utc(2025, 1, 1));
        assert_eq!(end, utc(2026, 1, 1));
    }

    #[test]
    fn monthly_range_spans_one_month() {
        let period = ReportPeriod::monthly(2025, 7).expect("valid month");
        let (start, end) = period.date_range().expect("range");
        assert_eq!(start, utc(2025, 7, 1));
        assert_eq!(end, utc(2025, 8, 1));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let period = ReportPeriod::monthly(2025, 12).expect("valid month");
        let (start, end) = period.date_range().expect("range");
        assert_eq!(start, utc(2025, 12, 1));
        assert_eq!(end, utc(2026, 1, 1));
    }

    #[test]
    fn month_zero_and_thirteen_are_rejected() {
        assert!(ReportPeriod::monthly(2025, 0).is_err());
        assert!(ReportPeriod::monthly(2025, 13).is_err());
    }

    #[test]
    fn out_of_range_years_are_rejected() {
        assert!(ReportPeriod::yearly(0).is_err());
        assert!(ReportPeriod::yearly(10_000).is_err());
        assert!(ReportPeriod::yearly(MAX_YEAR).is_ok());
    }
}
