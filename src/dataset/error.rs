use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Observation for {found} appended where {expected} was expected")]
    OutOfOrder { expected: NaiveDate, found: NaiveDate },

    #[error("Observation for {0} appended after the window was complete")]
    PastWindowEnd(NaiveDate),

    #[error("Dataset holds {found} days, window requires {expected}")]
    Incomplete { expected: u64, found: usize },

    #[error("Failed building the observation table")]
    FrameBuild(#[from] PolarsError),
}
