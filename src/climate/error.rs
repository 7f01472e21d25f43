use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Month {0} is outside the calendar range 1..=12")]
    InvalidMonth(u32),

    #[error("No base probability configured for month {0}")]
    MissingBaseProbability(u32),

    #[error("Base probability {value} for month {month} is outside [0, 1]")]
    BaseProbabilityOutOfRange { month: u32, value: f64 },

    #[error("Monthly table '{table}' has {found} entries, expected 12")]
    MonthlyTableLength { table: &'static str, found: usize },

    #[error("Month {month} is not covered by any season")]
    UncoveredMonth { month: u32 },

    #[error("Month {month} appears in both {first} and {second}")]
    OverlappingSeasons {
        month: u32,
        first: String,
        second: String,
    },

    #[error("Cycle length '{name}' must be positive, got {value}")]
    NonPositiveCycle { name: &'static str, value: f64 },

    #[error("Seasonal factor '{name}' for {season} must be finite and non-negative, got {value}")]
    InvalidSeasonalFactor {
        season: String,
        name: &'static str,
        value: f64,
    },
}
