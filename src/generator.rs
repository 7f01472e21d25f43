//! The entry point for producing a synthetic sunset cloud series.

use crate::calendar::window::GenerationWindow;
use crate::climate::profile::ClimateProfile;
use crate::climate::source::ClimateSource;
use crate::dataset::table::{Dataset, DatasetAssembler};
use crate::error::SunsetError;
use crate::model::attributes::AttributeGenerator;
use crate::model::clamp::Clamper;
use crate::model::probability::ProbabilityModel;
use crate::model::sampler::OccurrenceSampler;
use crate::types::observation::Observation;
use bon::{bon, Builder};
use chrono::Datelike;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of one generation run.
///
/// # Examples
///
/// ```
/// use sunset_clouds::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .start_year(2000)
///     .end_year(2020)
///     .build();
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GenerationConfig {
    pub start_year: i32,
    pub end_year: i32,
    #[builder(default = DEFAULT_SEED)]
    pub seed: u64,
}

impl GenerationConfig {
    pub fn window(&self) -> Result<GenerationWindow, SunsetError> {
        Ok(GenerationWindow::from_years(self.start_year, self.end_year)?)
    }
}

/// Generates daily series from a [`ClimateProfile`].
///
/// The generator holds no random state; every run takes its own stream, either seeded
/// internally ([`SunsetGenerator::generate`]) or supplied by the caller
/// ([`SunsetGenerator::generate_window`]).
///
/// # Examples
///
/// ```
/// # use sunset_clouds::{SunsetGenerator, SunsetError};
/// # fn main() -> Result<(), SunsetError> {
/// let generator = SunsetGenerator::hong_kong()?;
/// let dataset = generator
///     .generate()
///     .start_year(2020)
///     .end_year(2020)
///     .seed(7)
///     .call()?;
///
/// assert_eq!(dataset.len(), 366);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SunsetGenerator {
    profile: ClimateProfile,
}

#[bon]
impl SunsetGenerator {
    pub fn new(profile: ClimateProfile) -> Self {
        Self { profile }
    }

    /// Generator over the built-in Hong Kong climate tables.
    pub fn hong_kong() -> Result<Self, SunsetError> {
        Ok(Self::new(ClimateProfile::hong_kong()?))
    }

    /// Asks `source` for its profile.
    pub fn from_source(source: &impl ClimateSource) -> Result<Self, SunsetError> {
        debug!("Loading climate profile from {}", source.description());
        Ok(Self::new(source.climate_profile()?))
    }

    pub fn profile(&self) -> &ClimateProfile {
        &self.profile
    }

    /// Generates whole calendar years `[Jan 1 start_year, Dec 31 end_year]` from a
    /// ChaCha stream seeded with `seed` (default 42).
    ///
    /// # Errors
    ///
    /// Fails with [`SunsetError::Window`] before any sampling if the years are reversed
    /// or out of range.
    #[builder]
    pub fn generate(
        &self,
        start_year: i32,
        end_year: i32,
        seed: Option<u64>,
    ) -> Result<Dataset, SunsetError> {
        let window = GenerationWindow::from_years(start_year, end_year)?;
        self.generate_seeded(&window, seed.unwrap_or(DEFAULT_SEED))
    }

    pub fn run(&self, config: &GenerationConfig) -> Result<Dataset, SunsetError> {
        self.generate_seeded(&config.window()?, config.seed)
    }

    pub fn generate_seeded(
        &self,
        window: &GenerationWindow,
        seed: u64,
    ) -> Result<Dataset, SunsetError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        debug!("Seeded generation stream with {}", seed);
        self.generate_window(window, &mut rng)
    }

    /// Generates one observation per day of `window`, drawing from `rng` in calendar
    /// order.
    pub fn generate_window<R: Rng + ?Sized>(
        &self,
        window: &GenerationWindow,
        rng: &mut R,
    ) -> Result<Dataset, SunsetError> {
        info!(
            "Generating {} days from {} to {} using the {} profile",
            window.day_count(),
            window.start(),
            window.end(),
            self.profile.name()
        );

        let probability = ProbabilityModel::new(&self.profile, window.start_year())?;
        let attributes = AttributeGenerator::new(&self.profile)?;
        let mut assembler = DatasetAssembler::new(*window);

        for date in window.days() {
            let daily = probability.evaluate(date, rng)?;
            let occurred = OccurrenceSampler::sample(daily.probability, rng);
            let attrs = attributes.generate(date.month(), occurred, rng)?;

            let observation = Observation {
                date,
                year: date.year(),
                month: date.month(),
                day_of_year: date.ordinal(),
                occurred,
                intensity: attrs.phenomenon.intensity,
                duration_minutes: attrs.phenomenon.duration_minutes,
                coverage_percent: attrs.phenomenon.coverage_percent,
                color_richness: attrs.phenomenon.color_richness,
                temperature_c: attrs.weather.temperature_c,
                humidity_percent: attrs.weather.humidity_percent,
                pressure_hpa: attrs.weather.pressure_hpa,
                visibility_km: attrs.weather.visibility_km,
                wind_speed_kmh: attrs.weather.wind_speed_kmh,
                season_factor: daily.season_factor,
                cycle_phase: daily.cycle_phase,
            };
            assembler.push(Clamper::apply(observation))?;
        }

        let dataset = assembler.finish()?;
        info!(
            "Generated {} days, {} with sunset clouds",
            dataset.len(),
            dataset.occurrence_count()
        );
        Ok(dataset)
    }
}
