//! Valid ranges per field and the saturating clamp that enforces them.

use crate::types::observation::Observation;

/// `max(lo, min(hi, x))`. Idempotent; a NaN input saturates to `hi`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.min(hi).max(lo)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub lo: f64,
    pub hi: f64,
}

impl FieldRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub const fn at_least(lo: f64) -> Self {
        Self {
            lo,
            hi: f64::INFINITY,
        }
    }

    pub fn clamp(self, x: f64) -> f64 {
        clamp(x, self.lo, self.hi)
    }

    pub fn contains(self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }
}

pub const PROBABILITY: FieldRange = FieldRange::new(0.0, 0.8);
pub const INTENSITY: FieldRange = FieldRange::new(0.0, 10.0);
pub const DURATION_MINUTES: FieldRange = FieldRange::new(0.0, 120.0);
pub const COVERAGE_PERCENT: FieldRange = FieldRange::new(0.0, 100.0);
pub const COLOR_RICHNESS: FieldRange = FieldRange::new(0.0, 10.0);
pub const HUMIDITY_PERCENT: FieldRange = FieldRange::new(0.0, 100.0);
pub const VISIBILITY_KM: FieldRange = FieldRange::new(1.0, 50.0);
pub const WIND_SPEED_KMH: FieldRange = FieldRange::at_least(0.0);

/// Applies every field range to an observation.
pub struct Clamper;

impl Clamper {
    pub fn apply(mut observation: Observation) -> Observation {
        observation.intensity = INTENSITY.clamp(observation.intensity);
        observation.duration_minutes = DURATION_MINUTES.clamp(observation.duration_minutes);
        observation.coverage_percent = COVERAGE_PERCENT.clamp(observation.coverage_percent);
        observation.color_richness = COLOR_RICHNESS.clamp(observation.color_richness);
        observation.humidity_percent = HUMIDITY_PERCENT.clamp(observation.humidity_percent);
        observation.visibility_km = VISIBILITY_KM.clamp(observation.visibility_km);
        observation.wind_speed_kmh = WIND_SPEED_KMH.clamp(observation.wind_speed_kmh);
        observation
    }

    /// Whether every ranged field already lies within bounds.
    pub fn is_valid(observation: &Observation) -> bool {
        INTENSITY.contains(observation.intensity)
            && DURATION_MINUTES.contains(observation.duration_minutes)
            && COVERAGE_PERCENT.contains(observation.coverage_percent)
            && COLOR_RICHNESS.contains(observation.color_richness)
            && HUMIDITY_PERCENT.contains(observation.humidity_percent)
            && VISIBILITY_KM.contains(observation.visibility_km)
            && WIND_SPEED_KMH.contains(observation.wind_speed_kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const RANGES: [FieldRange; 8] = [
        PROBABILITY,
        INTENSITY,
        DURATION_MINUTES,
        COVERAGE_PERCENT,
        COLOR_RICHNESS,
        HUMIDITY_PERCENT,
        VISIBILITY_KM,
        WIND_SPEED_KMH,
    ];

    #[test]
    fn test_clamp_is_idempotent() {
        let inputs = [
            f64::NEG_INFINITY,
            -1e9,
            -0.5,
            0.0,
            0.7999,
            0.8,
            1.0,
            9.99,
            10.0,
            49.5,
            50.0001,
            120.5,
            1e12,
            f64::INFINITY,
            f64::NAN,
        ];
        for range in RANGES {
            for x in inputs {
                let once = range.clamp(x);
                let twice = range.clamp(once);
                assert_eq!(once.to_bits(), twice.to_bits(), "{:?} on {}", range, x);
                assert!(range.contains(once), "{:?} produced {} from {}", range, once, x);
            }
        }
    }

    #[test]
    fn test_declared_ranges() {
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(4.2, 0.0, 10.0), 4.2);
        assert_eq!(VISIBILITY_KM.clamp(0.2), 1.0);
        assert_eq!(VISIBILITY_KM.clamp(75.0), 50.0);
        assert_eq!(DURATION_MINUTES.clamp(300.0), 120.0);
        assert_eq!(WIND_SPEED_KMH.clamp(-1.0), 0.0);
        assert_eq!(WIND_SPEED_KMH.clamp(250.0), 250.0);
        assert_eq!(PROBABILITY.clamp(0.95), 0.8);
    }

    #[test]
    fn test_clamper_applies_every_field() {
        let raw = Observation {
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            year: 2000,
            month: 1,
            day_of_year: 1,
            occurred: true,
            intensity: 13.0,
            duration_minutes: 180.0,
            coverage_percent: -4.0,
            color_richness: 11.0,
            temperature_c: -5.0,
            humidity_percent: 104.0,
            pressure_hpa: 990.0,
            visibility_km: 0.3,
            wind_speed_kmh: -2.0,
            season_factor: 1.0,
            cycle_phase: 0.0,
        };
        assert!(!Clamper::is_valid(&raw));

        let clamped = Clamper::apply(raw.clone());
        assert!(Clamper::is_valid(&clamped));
        assert_eq!(clamped.intensity, 10.0);
        assert_eq!(clamped.duration_minutes, 120.0);
        assert_eq!(clamped.coverage_percent, 0.0);
        assert_eq!(clamped.color_richness, 10.0);
        assert_eq!(clamped.humidity_percent, 100.0);
        assert_eq!(clamped.visibility_km, 1.0);
        assert_eq!(clamped.wind_speed_kmh, 0.0);
        // unbounded fields pass through
        assert_eq!(clamped.temperature_c, -5.0);
        assert_eq!(clamped.pressure_hpa, 990.0);
        assert_eq!(Clamper::apply(clamped.clone()), clamped);
    }
}
