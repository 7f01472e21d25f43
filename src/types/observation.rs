use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column names of the observation table, in export order.
pub const OBSERVATION_COLUMNS: [&str; 16] = [
    "date",
    "year",
    "month",
    "day_of_year",
    "occurred",
    "intensity",
    "duration_minutes",
    "coverage_percent",
    "color_richness",
    "temperature_c",
    "humidity_percent",
    "pressure_hpa",
    "visibility_km",
    "wind_speed_kmh",
    "season_factor",
    "cycle_phase",
];

/// One generated day.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,           // 1-12
    pub day_of_year: u32,     // 1-366
    pub occurred: bool,       // sunset clouds seen
    pub intensity: f64,       // 0-10
    pub duration_minutes: f64, // 0-120
    pub coverage_percent: f64, // 0-100
    pub color_richness: f64,  // 0-10
    pub temperature_c: f64,
    pub humidity_percent: f64, // 0-100
    pub pressure_hpa: f64,
    pub visibility_km: f64,   // 1-50
    pub wind_speed_kmh: f64,  // >= 0
    pub season_factor: f64,   // cloud factor of the season
    pub cycle_phase: f64,     // interannual modulation
}
