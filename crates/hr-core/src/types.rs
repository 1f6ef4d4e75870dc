//! Shared value types.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// Inclusive calendar date range used by listings and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The calendar month containing `today`, first to last day.
    pub fn current_month(today: NaiveDate) -> Self {
        Self {
            from: month_start(today),
            to: month_end(today),
        }
    }

    /// Resolve optional ISO date strings, defaulting to the month of `today`.
    /// Both bounds must be given together; a half-open range falls back to
    /// the default.
    pub fn resolve(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> HrResult<Self> {
        match (from, to) {
            (Some(f), Some(t)) => Ok(Self {
                from: parse_date(f)?,
                to: parse_date(t)?,
            }),
            _ => Ok(Self::current_month(today)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Parse an ISO `YYYY-MM-DD` date, mapping failures to a validation error.
pub fn parse_date(s: &str) -> HrResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| HrError::validation("invalid date format, use YYYY-MM-DD"))
}

/// First day of the month containing `date`. Used as the DisciplineFlag
/// month key.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    match next_month {
        Some(d) => d - Duration::days(1),
        None => date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(d("2026-03-17")), d("2026-03-01"));
        assert_eq!(month_end(d("2026-03-17")), d("2026-03-31"));
        assert_eq!(month_end(d("2026-02-10")), d("2026-02-28"));
        assert_eq!(month_end(d("2026-12-05")), d("2026-12-31"));
    }

    #[test]
    fn test_resolve_defaults_to_current_month() {
        let range = DateRange::resolve(None, None, d("2026-08-29")).unwrap();
        assert_eq!(range.from, d("2026-08-01"));
        assert_eq!(range.to, d("2026-08-31"));

        // one bound alone falls back to the default
        let range = DateRange::resolve(Some("2026-01-01"), None, d("2026-08-29")).unwrap();
        assert_eq!(range.from, d("2026-08-01"));
    }

    #[test]
    fn test_resolve_explicit_bounds() {
        let range =
            DateRange::resolve(Some("2026-03-01"), Some("2026-03-05"), d("2026-08-29")).unwrap();
        assert!(range.contains(d("2026-03-03")));
        assert!(!range.contains(d("2026-03-06")));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("03/01/2026").is_err());
        assert!(parse_date("not-a-date").is_err());
    }
}
