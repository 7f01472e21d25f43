//! The generation window and the day-by-day iterator over it.

use crate::calendar::error::WindowError;
use crate::types::period::{DatePeriod, DateSpan};
use chrono::{Datelike, NaiveDate};
use std::iter::FusedIterator;

/// Inclusive, validated date range a dataset is generated for.
///
/// A window always holds at least one day and never runs backwards; both are
/// checked before any sampling starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl GenerationWindow {
    /// `[Jan 1 start_year, Dec 31 end_year]`.
    ///
    /// # Errors
    ///
    /// [`WindowError::ReversedYears`] when `end_year < start_year`,
    /// [`WindowError::UnrepresentableYear`] when a year is outside chrono's range.
    pub fn from_years(start_year: i32, end_year: i32) -> Result<Self, WindowError> {
        if end_year < start_year {
            return Err(WindowError::ReversedYears {
                start_year,
                end_year,
            });
        }
        let start = NaiveDate::from_ymd_opt(start_year, 1, 1)
            .ok_or(WindowError::UnrepresentableYear(start_year))?;
        let end = NaiveDate::from_ymd_opt(end_year, 12, 31)
            .ok_or(WindowError::UnrepresentableYear(end_year))?;
        Self::from_dates(start, end)
    }

    /// An explicit inclusive date range.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if end < start {
            return Err(WindowError::ReversedDates { start, end });
        }
        let window = Self { start, end };
        if window.day_count() == 0 {
            return Err(WindowError::Empty);
        }
        Ok(window)
    }

    /// Any period resolvable to a date span, e.g. a [`crate::Year`] or `(Year, Year)`.
    pub fn from_period(period: impl DatePeriod) -> Result<Self, WindowError> {
        let DateSpan { start, end } = period
            .date_period()
            .ok_or(WindowError::UnresolvedPeriod)?;
        Self::from_dates(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// `(end - start).days + 1`
    pub fn day_count(&self) -> u64 {
        ((self.end - self.start).num_days() + 1).max(0) as u64
    }

    /// Number of calendar years touched by the window.
    pub fn years_spanned(&self) -> u32 {
        (self.end_year() - self.start_year() + 1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> CalendarIterator {
        CalendarIterator::new(self.start, self.end)
    }
}

/// Yields every date from `start` to `end` inclusive, leap days included.
#[derive(Debug, Clone)]
pub struct CalendarIterator {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl CalendarIterator {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for CalendarIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map(|d| ((self.end - d).num_days() + 1) as usize)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CalendarIterator {}
impl FusedIterator for CalendarIterator {}
