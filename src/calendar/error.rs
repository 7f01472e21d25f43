use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("End year {end_year} is before start year {start_year}")]
    ReversedYears { start_year: i32, end_year: i32 },

    #[error("End date {end} is before start date {start}")]
    ReversedDates { start: NaiveDate, end: NaiveDate },

    #[error("Generation window contains no days")]
    Empty,

    #[error("Year {0} cannot be represented as a calendar date")]
    UnrepresentableYear(i32),

    #[error("Period could not be resolved to a date range")]
    UnresolvedPeriod,
}
