mod calendar;
mod climate;
mod dataset;
mod error;
mod export;
mod generator;
mod model;
mod report;
mod types;

pub use error::SunsetError;
pub use generator::*;

pub use calendar::error::WindowError;
pub use calendar::window::{CalendarIterator, GenerationWindow};

pub use climate::error::ProfileError;
pub use climate::profile::{ClimateCycles, ClimateProfile, MonthGroups, SeasonalFactor};
pub use climate::source::{ClimateSource, ObservatoryEndpoint, ObservatoryFeed, StaticClimate};

pub use model::attributes::{
    AttributeGenerator, DailyAttributes, PhenomenonAttributes, WeatherAttributes,
};
pub use model::clamp::{clamp, Clamper, FieldRange};
pub use model::error::ModelError;
pub use model::probability::{DailyProbability, Modifiers, ProbabilityModel};
pub use model::sampler::OccurrenceSampler;

pub use dataset::error::DatasetError;
pub use dataset::frame::ObservationFrame;
pub use dataset::table::{Dataset, DatasetAssembler};

pub use report::summary::{MonthlyAggregate, Summary, YearlyAggregate};
pub use report::text::render_report;

pub use export::error::ExportError;
pub use export::writer::{
    ensure_output_dir, export_dataset, export_paths, load_csv, write_csv, write_report,
    ExportPaths,
};

pub use types::observation::{Observation, OBSERVATION_COLUMNS};
pub use types::period::{AnyDate, DatePeriod, DateSpan, Month, Year};
pub use types::season::Season;
