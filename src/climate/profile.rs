//! Static climate tables driving the sunset cloud model.
//!
//! A [`ClimateProfile`] holds the monthly base occurrence probabilities, the monthly
//! average temperature, humidity and pressure, a season table partitioning the twelve
//! months, the lengths of the multi-year modulation cycles and the month groups the
//! attribute sampler switches on. Profiles are validated once on construction and are
//! read-only afterwards.

use crate::climate::error::ProfileError;
use crate::types::season::Season;
use bon::bon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cloud and visibility modifiers for one season group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactor {
    pub season: Season,
    pub months: Vec<u32>,
    pub cloud_factor: f64,
    pub visibility_factor: f64,
}

impl SeasonalFactor {
    pub fn new(season: Season, months: &[u32], cloud_factor: f64, visibility_factor: f64) -> Self {
        Self {
            season,
            months: months.to_vec(),
            cloud_factor,
            visibility_factor,
        }
    }

    pub fn contains(&self, month: u32) -> bool {
        self.months.contains(&month)
    }
}

/// Periods of the sinusoidal modulation terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateCycles {
    /// ENSO-like interannual oscillation, in years.
    pub interannual_years: f64,
    /// Solar-cycle-like long period oscillation, in years.
    pub long_period_years: f64,
    /// Monsoon pattern, in months.
    pub monsoon_months: f64,
}

impl Default for ClimateCycles {
    fn default() -> Self {
        Self {
            interannual_years: 3.5,
            long_period_years: 11.0,
            monsoon_months: 6.0,
        }
    }
}

/// Month sets the attribute sampler branches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGroups {
    /// Autumn/winter months where colours run stronger.
    pub high_intensity: Vec<u32>,
    /// Summer months where colours run weaker.
    pub summer: Vec<u32>,
    /// Spring/early summer haze months with reduced visibility.
    pub haze: Vec<u32>,
    /// Months dominated by the northeast monsoon.
    pub northeast_monsoon: Vec<u32>,
}

impl Default for MonthGroups {
    fn default() -> Self {
        Self {
            high_intensity: vec![10, 11, 12, 1],
            summer: vec![6, 7, 8],
            haze: vec![3, 4, 5, 6],
            northeast_monsoon: vec![10, 11, 12, 1, 2],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateProfile {
    name: String,
    base_probability: BTreeMap<u32, f64>,
    avg_temperature: Vec<f64>,
    avg_humidity: Vec<f64>,
    avg_pressure: Vec<f64>,
    seasons: Vec<SeasonalFactor>,
    cycles: ClimateCycles,
    month_groups: MonthGroups,
}

#[bon]
impl ClimateProfile {
    /// Builds and validates a profile.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] when a month is missing from the base probability
    /// table, a monthly table does not have exactly twelve entries, a probability lies
    /// outside `[0, 1]`, the seasons do not partition the twelve months, or a cycle
    /// length is not positive.
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        base_probability: BTreeMap<u32, f64>,
        avg_temperature: Vec<f64>,
        avg_humidity: Vec<f64>,
        avg_pressure: Vec<f64>,
        seasons: Vec<SeasonalFactor>,
        cycles: Option<ClimateCycles>,
        month_groups: Option<MonthGroups>,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            name,
            base_probability,
            avg_temperature,
            avg_humidity,
            avg_pressure,
            seasons,
            cycles: cycles.unwrap_or_default(),
            month_groups: month_groups.unwrap_or_default(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// The Hong Kong profile: subtropical monsoon climate with a dry, clear autumn
    /// and winter and a humid, hazy spring and summer.
    pub fn hong_kong() -> Result<Self, ProfileError> {
        let base_probability = BTreeMap::from([
            (1, 0.25),
            (2, 0.28),
            (3, 0.20),
            (4, 0.15),
            (5, 0.12),
            (6, 0.08),
            (7, 0.10),
            (8, 0.12),
            (9, 0.18),
            (10, 0.35),
            (11, 0.40),
            (12, 0.30),
        ]);

        Self::builder()
            .name("Hong Kong")
            .base_probability(base_probability)
            .avg_temperature(vec![
                17.1, 18.3, 21.8, 25.8, 29.1, 31.2, 32.1, 31.9, 30.1, 26.8, 22.5, 18.7,
            ])
            .avg_humidity(vec![
                72.0, 78.0, 82.0, 84.0, 85.0, 83.0, 82.0, 81.0, 77.0, 73.0, 68.0, 69.0,
            ])
            .avg_pressure(vec![
                1018.0, 1016.0, 1013.0, 1009.0, 1006.0, 1004.0, 1004.0, 1006.0, 1011.0, 1016.0,
                1019.0, 1020.0,
            ])
            .seasons(vec![
                SeasonalFactor::new(Season::Spring, &[3, 4, 5], 0.6, 0.7),
                SeasonalFactor::new(Season::Summer, &[6, 7, 8], 0.4, 0.6),
                SeasonalFactor::new(Season::Autumn, &[9, 10, 11], 1.2, 1.3),
                SeasonalFactor::new(Season::Winter, &[12, 1, 2], 1.0, 1.2),
            ])
            .build()
    }
}

impl ClimateProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cycles(&self) -> &ClimateCycles {
        &self.cycles
    }

    pub fn month_groups(&self) -> &MonthGroups {
        &self.month_groups
    }

    pub fn seasons(&self) -> &[SeasonalFactor] {
        &self.seasons
    }

    /// Unmodified occurrence probability for a calendar month.
    ///
    /// A month absent from the table is a configuration error, never a silent zero.
    pub fn base_probability(&self, month: u32) -> Result<f64, ProfileError> {
        check_month(month)?;
        self.base_probability
            .get(&month)
            .copied()
            .ok_or(ProfileError::MissingBaseProbability(month))
    }

    pub fn avg_temperature(&self, month: u32) -> Result<f64, ProfileError> {
        monthly_value(&self.avg_temperature, month)
    }

    pub fn avg_humidity(&self, month: u32) -> Result<f64, ProfileError> {
        monthly_value(&self.avg_humidity, month)
    }

    pub fn avg_pressure(&self, month: u32) -> Result<f64, ProfileError> {
        monthly_value(&self.avg_pressure, month)
    }

    /// The season group containing `month`; the first matching group wins.
    pub fn season_for(&self, month: u32) -> Result<&SeasonalFactor, ProfileError> {
        check_month(month)?;
        self.seasons
            .iter()
            .find(|s| s.contains(month))
            .ok_or(ProfileError::UncoveredMonth { month })
    }

    fn validate(&self) -> Result<(), ProfileError> {
        for month in 1..=12 {
            let p = self.base_probability(month)?;
            if !(0.0..=1.0).contains(&p) {
                return Err(ProfileError::BaseProbabilityOutOfRange { month, value: p });
            }
        }
        if let Some(&month) = self.base_probability.keys().find(|m| !(1..=12).contains(*m)) {
            return Err(ProfileError::InvalidMonth(month));
        }

        for (table, values) in [
            ("avg_temperature", &self.avg_temperature),
            ("avg_humidity", &self.avg_humidity),
            ("avg_pressure", &self.avg_pressure),
        ] {
            if values.len() != 12 {
                return Err(ProfileError::MonthlyTableLength {
                    table,
                    found: values.len(),
                });
            }
        }

        self.validate_seasons()?;

        for (name, value) in [
            ("interannual_years", self.cycles.interannual_years),
            ("long_period_years", self.cycles.long_period_years),
            ("monsoon_months", self.cycles.monsoon_months),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ProfileError::NonPositiveCycle { name, value });
            }
        }
        Ok(())
    }

    fn validate_seasons(&self) -> Result<(), ProfileError> {
        let mut owner: BTreeMap<u32, Season> = BTreeMap::new();
        for factor in &self.seasons {
            for (name, value) in [
                ("cloud_factor", factor.cloud_factor),
                ("visibility_factor", factor.visibility_factor),
            ] {
                if !(value.is_finite() && value >= 0.0) {
                    return Err(ProfileError::InvalidSeasonalFactor {
                        season: factor.season.to_string(),
                        name,
                        value,
                    });
                }
            }
            for &month in &factor.months {
                check_month(month)?;
                if let Some(first) = owner.insert(month, factor.season) {
                    return Err(ProfileError::OverlappingSeasons {
                        month,
                        first: first.to_string(),
                        second: factor.season.to_string(),
                    });
                }
            }
        }
        match (1..=12).find(|m| !owner.contains_key(m)) {
            Some(month) => Err(ProfileError::UncoveredMonth { month }),
            None => Ok(()),
        }
    }
}

fn check_month(month: u32) -> Result<(), ProfileError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ProfileError::InvalidMonth(month))
    }
}

fn monthly_value(table: &[f64], month: u32) -> Result<f64, ProfileError> {
    check_month(month)?;
    table
        .get(month as usize - 1)
        .copied()
        .ok_or(ProfileError::MonthlyTableLength {
            table: "monthly",
            found: table.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hk_seasons() -> Vec<SeasonalFactor> {
        vec![
            SeasonalFactor::new(Season::Spring, &[3, 4, 5], 0.6, 0.7),
            SeasonalFactor::new(Season::Summer, &[6, 7, 8], 0.4, 0.6),
            SeasonalFactor::new(Season::Autumn, &[9, 10, 11], 1.2, 1.3),
            SeasonalFactor::new(Season::Winter, &[12, 1, 2], 1.0, 1.2),
        ]
    }

    fn full_table() -> BTreeMap<u32, f64> {
        (1..=12).map(|m| (m, 0.2)).collect()
    }

    #[test]
    fn test_hong_kong_base_probability_ordering() -> Result<(), ProfileError> {
        let profile = ClimateProfile::hong_kong()?;
        let p = |m| profile.base_probability(m);

        assert_eq!(p(11)?, 0.40);
        assert!(p(11)? > p(10)?);
        assert!(p(10)? > p(12)?);
        assert!(p(12)? > p(2)?);
        assert!(p(2)? > p(1)?);
        assert!(p(1)? > p(6)?);
        assert_eq!(p(6)?, 0.08);
        Ok(())
    }

    #[test]
    fn test_hong_kong_monthly_tables() -> Result<(), ProfileError> {
        let profile = ClimateProfile::hong_kong()?;
        assert_eq!(profile.avg_temperature(1)?, 17.1);
        assert_eq!(profile.avg_temperature(7)?, 32.1);
        assert_eq!(profile.avg_humidity(5)?, 85.0);
        assert_eq!(profile.avg_pressure(12)?, 1020.0);
        assert_eq!(profile.cycles().interannual_years, 3.5);
        assert_eq!(profile.cycles().long_period_years, 11.0);
        Ok(())
    }

    #[test]
    fn test_season_lookup_covers_every_month() -> Result<(), ProfileError> {
        let profile = ClimateProfile::hong_kong()?;
        assert_eq!(profile.season_for(1)?.season, Season::Winter);
        assert_eq!(profile.season_for(4)?.season, Season::Spring);
        assert_eq!(profile.season_for(7)?.cloud_factor, 0.4);
        assert_eq!(profile.season_for(10)?.cloud_factor, 1.2);
        assert_eq!(profile.season_for(13), Err(ProfileError::InvalidMonth(13)));
        Ok(())
    }

    #[test]
    fn test_missing_month_fails_fast() {
        let mut table = full_table();
        table.remove(&7);

        let result = ClimateProfile::builder()
            .name("incomplete")
            .base_probability(table)
            .avg_temperature(vec![20.0; 12])
            .avg_humidity(vec![70.0; 12])
            .avg_pressure(vec![1010.0; 12])
            .seasons(hk_seasons())
            .build();

        assert_eq!(result, Err(ProfileError::MissingBaseProbability(7)));
    }

    #[test]
    fn test_short_monthly_table_rejected() {
        let result = ClimateProfile::builder()
            .name("short")
            .base_probability(full_table())
            .avg_temperature(vec![20.0; 11])
            .avg_humidity(vec![70.0; 12])
            .avg_pressure(vec![1010.0; 12])
            .seasons(hk_seasons())
            .build();

        assert_eq!(
            result,
            Err(ProfileError::MonthlyTableLength {
                table: "avg_temperature",
                found: 11
            })
        );
    }

    #[test]
    fn test_overlapping_seasons_rejected() {
        let mut seasons = hk_seasons();
        seasons[0].months.push(6);

        let result = ClimateProfile::builder()
            .name("overlap")
            .base_probability(full_table())
            .avg_temperature(vec![20.0; 12])
            .avg_humidity(vec![70.0; 12])
            .avg_pressure(vec![1010.0; 12])
            .seasons(seasons)
            .build();

        assert!(matches!(
            result,
            Err(ProfileError::OverlappingSeasons { month: 6, .. })
        ));
    }

    #[test]
    fn test_uncovered_month_rejected() {
        let mut seasons = hk_seasons();
        seasons[3].months.retain(|&m| m != 2);

        let result = ClimateProfile::builder()
            .name("gap")
            .base_probability(full_table())
            .avg_temperature(vec![20.0; 12])
            .avg_humidity(vec![70.0; 12])
            .avg_pressure(vec![1010.0; 12])
            .seasons(seasons)
            .build();

        assert_eq!(result, Err(ProfileError::UncoveredMonth { month: 2 }));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut table = full_table();
        table.insert(3, 1.5);

        let result = ClimateProfile::builder()
            .name("bad")
            .base_probability(table)
            .avg_temperature(vec![20.0; 12])
            .avg_humidity(vec![70.0; 12])
            .avg_pressure(vec![1010.0; 12])
            .seasons(hk_seasons())
            .build();

        assert_eq!(
            result,
            Err(ProfileError::BaseProbabilityOutOfRange {
                month: 3,
                value: 1.5
            })
        );
    }

    #[test]
    fn test_non_positive_cycle_rejected() {
        let result = ClimateProfile::builder()
            .name("flat")
            .base_probability(full_table())
            .avg_temperature(vec![20.0; 12])
            .avg_humidity(vec![70.0; 12])
            .avg_pressure(vec![1010.0; 12])
            .seasons(hk_seasons())
            .cycles(ClimateCycles {
                interannual_years: 0.0,
                ..ClimateCycles::default()
            })
            .build();

        assert!(matches!(
            result,
            Err(ProfileError::NonPositiveCycle {
                name: "interannual_years",
                ..
            })
        ));
    }
}
