//! The assembled observation table.
//!
//! Rows are appended strictly in calendar order by [`DatasetAssembler`]; the finished
//! [`Dataset`] is immutable and covers every day of its window exactly once.

use crate::calendar::window::GenerationWindow;
use crate::dataset::error::DatasetError;
use crate::dataset::frame::ObservationFrame;
use crate::report::summary::Summary;
use crate::types::observation::Observation;
use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, IntoLazy};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    window: GenerationWindow,
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn window(&self) -> &GenerationWindow {
        &self.window
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Observation> {
        if !self.window.contains(date) {
            return None;
        }
        let index = (date - self.window.start()).num_days() as usize;
        self.observations.get(index)
    }

    pub fn occurrence_count(&self) -> usize {
        self.observations.iter().filter(|o| o.occurred).count()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_dataset(self)
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Materializes the table as a polars `DataFrame`, one column per observation field.
    pub fn to_dataframe(&self) -> Result<DataFrame, DatasetError> {
        let rows = &self.observations;
        let f64_column = |name: &str, get: fn(&Observation) -> f64| {
            Column::new(name.into(), rows.iter().map(get).collect::<Vec<f64>>())
        };

        let columns = vec![
            Column::new(
                "date".into(),
                rows.iter().map(|o| o.date).collect::<Vec<NaiveDate>>(),
            ),
            Column::new("year".into(), rows.iter().map(|o| o.year).collect::<Vec<i32>>()),
            Column::new("month".into(), rows.iter().map(|o| o.month).collect::<Vec<u32>>()),
            Column::new(
                "day_of_year".into(),
                rows.iter().map(|o| o.day_of_year).collect::<Vec<u32>>(),
            ),
            Column::new(
                "occurred".into(),
                rows.iter().map(|o| o.occurred).collect::<Vec<bool>>(),
            ),
            f64_column("intensity", |o| o.intensity),
            f64_column("duration_minutes", |o| o.duration_minutes),
            f64_column("coverage_percent", |o| o.coverage_percent),
            f64_column("color_richness", |o| o.color_richness),
            f64_column("temperature_c", |o| o.temperature_c),
            f64_column("humidity_percent", |o| o.humidity_percent),
            f64_column("pressure_hpa", |o| o.pressure_hpa),
            f64_column("visibility_km", |o| o.visibility_km),
            f64_column("wind_speed_kmh", |o| o.wind_speed_kmh),
            f64_column("season_factor", |o| o.season_factor),
            f64_column("cycle_phase", |o| o.cycle_phase),
        ];

        Ok(DataFrame::new(columns)?)
    }

    pub fn lazy(&self) -> Result<ObservationFrame, DatasetError> {
        Ok(ObservationFrame::new(self.to_dataframe()?.lazy()))
    }
}

/// Accumulates one observation per day, enforcing strict calendar order.
#[derive(Debug)]
pub struct DatasetAssembler {
    window: GenerationWindow,
    observations: Vec<Observation>,
    next_date: Option<NaiveDate>,
}

impl DatasetAssembler {
    pub fn new(window: GenerationWindow) -> Self {
        Self {
            window,
            observations: Vec::with_capacity(window.day_count() as usize),
            next_date: Some(window.start()),
        }
    }

    pub fn push(&mut self, observation: Observation) -> Result<(), DatasetError> {
        let expected = self
            .next_date
            .ok_or(DatasetError::PastWindowEnd(observation.date))?;
        if observation.date != expected {
            return Err(DatasetError::OutOfOrder {
                expected,
                found: observation.date,
            });
        }
        self.next_date = expected.succ_opt().filter(|d| *d <= self.window.end());
        self.observations.push(observation);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Seals the table; fails if any day of the window is missing.
    pub fn finish(self) -> Result<Dataset, DatasetError> {
        let expected = self.window.day_count();
        if self.observations.len() as u64 != expected {
            return Err(DatasetError::Incomplete {
                expected,
                found: self.observations.len(),
            });
        }
        Ok(Dataset {
            window: self.window,
            observations: self.observations,
        })
    }
}
