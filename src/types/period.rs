//! Calendar helpers: year and month wrappers plus traits resolving loose date input
//! into inclusive date spans.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

impl Year {
    pub fn get(self) -> i32 {
        self.0
    }

    pub fn is_leap(self) -> bool {
        NaiveDate::from_ymd_opt(self.0, 2, 29).is_some()
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A calendar month of a specific year, stored as `(year, month)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);

impl Month {
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }

    pub fn year(self) -> i32 {
        self.0
    }

    pub fn month(self) -> u32 {
        self.1
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

/// Inclusive span of calendar dates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolves a value into the span of dates it denotes.
///
/// A single date resolves to itself, a [`Year`] or [`Month`] to all of its days.
pub trait AnyDate {
    fn date_span(self) -> Option<DateSpan>;
}

impl AnyDate for NaiveDate {
    fn date_span(self) -> Option<DateSpan> {
        Some(DateSpan {
            start: self,
            end: self,
        })
    }
}

impl AnyDate for &str {
    fn date_span(self) -> Option<DateSpan> {
        NaiveDate::parse_from_str(self, "%Y-%m-%d")
            .ok()
            .and_then(AnyDate::date_span)
    }
}

impl AnyDate for Year {
    fn date_span(self) -> Option<DateSpan> {
        Some(DateSpan {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl AnyDate for Month {
    fn date_span(self) -> Option<DateSpan> {
        let year = self.year();
        let month = self.month();
        Some(DateSpan {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}

/// A period that can serve as a generation window or a frame filter.
pub trait DatePeriod {
    fn date_period(self) -> Option<DateSpan>;
}

impl DatePeriod for Year {
    fn date_period(self) -> Option<DateSpan> {
        self.date_span()
    }
}

impl DatePeriod for Month {
    fn date_period(self) -> Option<DateSpan> {
        self.date_span()
    }
}

/// Whole years, inclusive at both ends.
impl DatePeriod for (Year, Year) {
    fn date_period(self) -> Option<DateSpan> {
        Some(DateSpan {
            start: self.0.date_span()?.start,
            end: self.1.date_span()?.end,
        })
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some((first_of_next - Duration::days(1)).day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_handles_leap_february() {
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2021, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2021, 12), Some(31));
        assert_eq!(days_in_month(2021, 13), None);
    }

    #[test]
    fn test_month_span() {
        let span = Month::new(2, 2020).date_span().unwrap();
        assert_eq!(span.start, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
        assert_eq!(span.end, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }

    #[test]
    fn test_str_span() {
        let span = "2000-01-03".date_span().unwrap();
        assert_eq!(span.start, span.end);
        assert!("03/01/2000".date_span().is_none());
    }

    #[test]
    fn test_year_pair_period() {
        let span = (Year(2000), Year(2004)).date_period().unwrap();
        assert_eq!(span.start, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(span.end, NaiveDate::from_ymd_opt(2004, 12, 31).unwrap());
        assert!(span.contains(NaiveDate::from_ymd_opt(2002, 6, 15).unwrap()));
        assert!(Year(2020).is_leap());
        assert!(!Year(2021).is_leap());
    }
}
