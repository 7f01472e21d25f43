//! Per-day occurrence probability.
//!
//! ```text
//! p = clamp(base * season * trend * (1 + 0.1 * interannual + 0.05 * long_period + noise), 0, 0.8)
//! ```
//!
//! `trend` is a slow secular drift of one percent per twenty years, the two phases are
//! sinusoids over the profile's cycle lengths counted from the window's start year,
//! and `noise ~ Normal(0, 0.2)` is drawn once per date.

use crate::climate::profile::ClimateProfile;
use crate::model::clamp::PROBABILITY;
use crate::model::error::ModelError;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::TAU;

const DAILY_NOISE_STD: f64 = 0.2;
const TREND_PER_TWENTY_YEARS: f64 = 0.01;
const INTERANNUAL_WEIGHT: f64 = 0.1;
const LONG_PERIOD_WEIGHT: f64 = 0.05;

/// Deterministic modifiers for one date, before noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    pub base: f64,
    pub season_factor: f64,
    pub trend: f64,
    pub interannual_phase: f64,
    pub long_period_phase: f64,
}

impl Modifiers {
    /// Combines the modifiers with a noise draw and saturates into `[0, 0.8]`.
    pub fn probability(&self, noise: f64) -> f64 {
        let raw = self.base
            * self.season_factor
            * self.trend
            * (1.0
                + INTERANNUAL_WEIGHT * self.interannual_phase
                + LONG_PERIOD_WEIGHT * self.long_period_phase
                + noise);
        PROBABILITY.clamp(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyProbability {
    pub probability: f64,
    pub season_factor: f64,
    pub cycle_phase: f64,
}

pub struct ProbabilityModel<'a> {
    profile: &'a ClimateProfile,
    start_year: i32,
    noise: Normal<f64>,
}

impl<'a> ProbabilityModel<'a> {
    pub fn new(profile: &'a ClimateProfile, start_year: i32) -> Result<Self, ModelError> {
        let noise = Normal::new(0.0, DAILY_NOISE_STD)
            .map_err(|e| ModelError::distribution("daily noise", e))?;
        Ok(Self {
            profile,
            start_year,
            noise,
        })
    }

    pub fn modifiers(&self, date: NaiveDate) -> Result<Modifiers, ModelError> {
        let month = date.month();
        let cycles = self.profile.cycles();
        let elapsed_years = f64::from(date.year() - self.start_year);

        Ok(Modifiers {
            base: self.profile.base_probability(month)?,
            season_factor: self.profile.season_for(month)?.cloud_factor,
            trend: 1.0 + TREND_PER_TWENTY_YEARS * elapsed_years / 20.0,
            interannual_phase: (TAU * elapsed_years / cycles.interannual_years).sin(),
            long_period_phase: (TAU * elapsed_years / cycles.long_period_years).sin(),
        })
    }

    /// Draws the daily noise and returns the bounded probability for `date`.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        rng: &mut R,
    ) -> Result<DailyProbability, ModelError> {
        let modifiers = self.modifiers(date)?;
        let noise = self.noise.sample(rng);
        Ok(DailyProbability {
            probability: modifiers.probability(noise),
            season_factor: modifiers.season_factor,
            cycle_phase: modifiers.interannual_phase,
        })
    }
}
