//! Sampling of the per-day attributes.
//!
//! Phenomenon attributes only exist on occurrence days; the ordinary weather fields are
//! drawn every day. Draws are issued in a fixed order so that a seeded stream always
//! reproduces the same dataset:
//!
//! 1. occurrence only: base intensity, seasonal multiplier, duration, coverage, colour
//! 2. always: temperature, humidity, pressure, visibility, wind

use crate::climate::profile::{ClimateProfile, MonthGroups};
use crate::model::clamp::{
    COLOR_RICHNESS, COVERAGE_PERCENT, DURATION_MINUTES, HUMIDITY_PERCENT, INTENSITY,
    VISIBILITY_KM, WIND_SPEED_KMH,
};
use crate::model::error::ModelError;
use rand::Rng;
use rand_distr::{Beta, Distribution, Exp, Gamma, Normal, Uniform};

const BASE_DURATION_MINUTES: f64 = 15.0;
const MEAN_EXTRA_DURATION_MINUTES: f64 = 25.0;
const BASE_VISIBILITY_KM: f64 = 15.0;
const HAZE_VISIBILITY_FACTOR: f64 = 0.7;
const CLEAR_VISIBILITY_FACTOR: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhenomenonAttributes {
    pub intensity: f64,
    pub duration_minutes: f64,
    pub coverage_percent: f64,
    pub color_richness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherAttributes {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub pressure_hpa: f64,
    pub visibility_km: f64,
    pub wind_speed_kmh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAttributes {
    pub phenomenon: PhenomenonAttributes,
    pub weather: WeatherAttributes,
}

/// Holds every distribution used for attribute draws; built once per run.
pub struct AttributeGenerator<'a> {
    profile: &'a ClimateProfile,
    base_intensity: Beta<f64>,
    high_season_boost: Uniform<f64>,
    summer_damping: Uniform<f64>,
    shoulder_factor: Uniform<f64>,
    extra_duration: Exp<f64>,
    coverage: Beta<f64>,
    richness_factor: Uniform<f64>,
    temperature_noise: Normal<f64>,
    humidity_noise: Normal<f64>,
    pressure_noise: Normal<f64>,
    haze_visibility_noise: Normal<f64>,
    clear_visibility_noise: Normal<f64>,
    monsoon_wind: Gamma<f64>,
    other_wind: Gamma<f64>,
}

impl<'a> AttributeGenerator<'a> {
    pub fn new(profile: &'a ClimateProfile) -> Result<Self, ModelError> {
        let beta = |name: &'static str, a: f64, b: f64| {
            Beta::new(a, b).map_err(|e| ModelError::distribution(name, e))
        };
        let uniform = |name: &'static str, lo: f64, hi: f64| {
            Uniform::new(lo, hi).map_err(|e| ModelError::distribution(name, e))
        };
        let normal = |name: &'static str, std: f64| {
            Normal::new(0.0, std).map_err(|e| ModelError::distribution(name, e))
        };
        let gamma = |name: &'static str, shape: f64, scale: f64| {
            Gamma::new(shape, scale).map_err(|e| ModelError::distribution(name, e))
        };

        Ok(Self {
            profile,
            base_intensity: beta("base intensity", 2.0, 2.0)?,
            high_season_boost: uniform("high season multiplier", 1.2, 1.5)?,
            summer_damping: uniform("summer multiplier", 0.6, 0.9)?,
            shoulder_factor: uniform("shoulder season multiplier", 0.8, 1.1)?,
            extra_duration: Exp::new(1.0 / MEAN_EXTRA_DURATION_MINUTES)
                .map_err(|e| ModelError::distribution("duration", e))?,
            coverage: beta("coverage", 2.0, 3.0)?,
            richness_factor: uniform("colour richness", 0.8, 1.2)?,
            temperature_noise: normal("temperature", 3.0)?,
            humidity_noise: normal("humidity", 8.0)?,
            pressure_noise: normal("pressure", 10.0)?,
            haze_visibility_noise: normal("haze visibility", 3.0)?,
            clear_visibility_noise: normal("clear visibility", 4.0)?,
            monsoon_wind: gamma("northeast monsoon wind", 3.0, 4.0)?,
            other_wind: gamma("southwest monsoon wind", 2.0, 3.0)?,
        })
    }

    fn groups(&self) -> &MonthGroups {
        self.profile.month_groups()
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        month: u32,
        occurred: bool,
        rng: &mut R,
    ) -> Result<DailyAttributes, ModelError> {
        let phenomenon = if occurred {
            self.phenomenon(month, rng)
        } else {
            PhenomenonAttributes::default()
        };
        let weather = self.weather(month, rng)?;
        Ok(DailyAttributes {
            phenomenon,
            weather,
        })
    }

    fn phenomenon<R: Rng + ?Sized>(&self, month: u32, rng: &mut R) -> PhenomenonAttributes {
        let base_intensity = self.base_intensity.sample(rng) * 10.0;

        let groups = self.groups();
        let multiplier = if groups.high_intensity.contains(&month) {
            self.high_season_boost.sample(rng)
        } else if groups.summer.contains(&month) {
            self.summer_damping.sample(rng)
        } else {
            self.shoulder_factor.sample(rng)
        };
        let intensity = INTENSITY.clamp(base_intensity * multiplier);

        let duration_minutes =
            DURATION_MINUTES.clamp(BASE_DURATION_MINUTES + self.extra_duration.sample(rng));
        let coverage_percent = COVERAGE_PERCENT.clamp(self.coverage.sample(rng) * 100.0);
        let color_richness = COLOR_RICHNESS.clamp(intensity * self.richness_factor.sample(rng));

        PhenomenonAttributes {
            intensity,
            duration_minutes,
            coverage_percent,
            color_richness,
        }
    }

    fn weather<R: Rng + ?Sized>(
        &self,
        month: u32,
        rng: &mut R,
    ) -> Result<WeatherAttributes, ModelError> {
        let temperature_c =
            self.profile.avg_temperature(month)? + self.temperature_noise.sample(rng);
        let humidity_percent = HUMIDITY_PERCENT
            .clamp(self.profile.avg_humidity(month)? + self.humidity_noise.sample(rng));
        let pressure_hpa = self.profile.avg_pressure(month)? + self.pressure_noise.sample(rng);

        let groups = self.groups();
        let visibility = if groups.haze.contains(&month) {
            BASE_VISIBILITY_KM * HAZE_VISIBILITY_FACTOR + self.haze_visibility_noise.sample(rng)
        } else {
            BASE_VISIBILITY_KM * CLEAR_VISIBILITY_FACTOR + self.clear_visibility_noise.sample(rng)
        };
        let visibility_km = VISIBILITY_KM.clamp(visibility);

        let wind = if groups.northeast_monsoon.contains(&month) {
            self.monsoon_wind.sample(rng)
        } else {
            self.other_wind.sample(rng)
        };
        let wind_speed_kmh = WIND_SPEED_KMH.clamp(wind);

        Ok(WeatherAttributes {
            temperature_c,
            humidity_percent,
            pressure_hpa,
            visibility_km,
            wind_speed_kmh,
        })
    }
}
