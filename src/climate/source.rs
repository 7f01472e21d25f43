//! Providers of the climate profile.
//!
//! The observatory endpoints are listed for callers that expect a live data path,
//! but no request is ever sent: every provider answers with a static profile.

use crate::climate::error::ProfileError;
use crate::climate::profile::ClimateProfile;
use log::{debug, warn};
use std::fmt;

/// Named open-data endpoints of the Hong Kong Observatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservatoryEndpoint {
    CurrentWeather,
    Forecast,
    WarningSummary,
}

impl ObservatoryEndpoint {
    pub const ALL: [ObservatoryEndpoint; 3] = [
        ObservatoryEndpoint::CurrentWeather,
        ObservatoryEndpoint::Forecast,
        ObservatoryEndpoint::WarningSummary,
    ];

    fn data_type(&self) -> &'static str {
        match self {
            ObservatoryEndpoint::CurrentWeather => "rhrread",
            ObservatoryEndpoint::Forecast => "fnd",
            ObservatoryEndpoint::WarningSummary => "warnsum",
        }
    }

    pub fn url(&self) -> String {
        format!(
            "https://data.weather.gov.hk/weatherAPI/opendata/weather.php?dataType={}&lang=tc",
            self.data_type()
        )
    }
}

impl fmt::Display for ObservatoryEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data_type())
    }
}

/// Something that can hand out a [`ClimateProfile`].
pub trait ClimateSource {
    /// Human readable provenance, used in reports.
    fn description(&self) -> String;

    /// Whether the source can reach live observational data.
    fn is_live(&self) -> bool;

    fn climate_profile(&self) -> Result<ClimateProfile, ProfileError>;
}

/// Static tables, no live capability.
#[derive(Debug, Clone, Default)]
pub struct StaticClimate;

impl ClimateSource for StaticClimate {
    fn description(&self) -> String {
        "static Hong Kong climate tables".to_string()
    }

    fn is_live(&self) -> bool {
        false
    }

    fn climate_profile(&self) -> Result<ClimateProfile, ProfileError> {
        ClimateProfile::hong_kong()
    }
}

/// The observatory feed. It knows its endpoints but always falls back to the
/// static profile.
#[derive(Debug, Clone, Default)]
pub struct ObservatoryFeed {
    fallback: StaticClimate,
}

impl ObservatoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoints(&self) -> Vec<(ObservatoryEndpoint, String)> {
        ObservatoryEndpoint::ALL
            .iter()
            .map(|e| (*e, e.url()))
            .collect()
    }
}

impl ClimateSource for ObservatoryFeed {
    fn description(&self) -> String {
        "synthetic model based on Hong Kong Observatory climate patterns".to_string()
    }

    fn is_live(&self) -> bool {
        false
    }

    fn climate_profile(&self) -> Result<ClimateProfile, ProfileError> {
        for (endpoint, url) in self.endpoints() {
            debug!("Skipping observatory endpoint {} ({})", endpoint, url);
        }
        warn!("Live observatory feed unavailable, using {}", self.fallback.description());
        self.fallback.climate_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_is_never_live() {
        assert!(!ObservatoryFeed::new().is_live());
        assert!(!StaticClimate.is_live());
    }

    #[test]
    fn test_feed_falls_back_to_static_profile() -> Result<(), ProfileError> {
        let from_feed = ObservatoryFeed::new().climate_profile()?;
        let from_tables = StaticClimate.climate_profile()?;
        assert_eq!(from_feed, from_tables);
        assert_eq!(from_feed.name(), "Hong Kong");
        Ok(())
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoints = ObservatoryFeed::new().endpoints();
        assert_eq!(endpoints.len(), 3);
        assert!(endpoints[0].1.ends_with("dataType=rhrread&lang=tc"));
        assert_eq!(ObservatoryEndpoint::Forecast.to_string(), "fnd");
        assert_eq!(ObservatoryEndpoint::WarningSummary.to_string(), "warnsum");
    }
}
