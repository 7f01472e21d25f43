//! Aggregate statistics over a generated series.

use crate::dataset::table::Dataset;
use crate::types::observation::Observation;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Day count, occurrence count and rate for one calendar month, pooled across years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: u32,
    pub days: usize,
    pub occurrences: usize,
    /// Fraction of the month's days with an occurrence, `0.0` when the month is absent.
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyAggregate {
    pub year: i32,
    pub days: usize,
    pub occurrences: usize,
    /// Mean over every day of the year, quiet days counting as zero.
    pub mean_intensity: f64,
    pub mean_duration_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub total_days: usize,
    pub occurrences: usize,
    pub occurrence_rate: f64,
    pub years_spanned: u32,
    /// Occurrences divided by the number of calendar years touched.
    pub annual_average: f64,
    /// Mean intensity over occurrence days only.
    pub mean_intensity: Option<f64>,
    pub mean_duration_minutes: Option<f64>,
    /// Always twelve entries, January first.
    pub monthly: Vec<MonthlyAggregate>,
    pub yearly: Vec<YearlyAggregate>,
}

#[derive(Default)]
struct Tally {
    days: usize,
    occurrences: usize,
    intensity: f64,
    duration: f64,
}

impl Tally {
    fn add(&mut self, o: &Observation) {
        self.days += 1;
        if o.occurred {
            self.occurrences += 1;
        }
        self.intensity += o.intensity;
        self.duration += o.duration_minutes;
    }
}

impl Summary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_observations(dataset.observations())
    }

    /// Rows are expected in ascending date order, as a [`Dataset`] holds them.
    pub fn from_observations(rows: &[Observation]) -> Self {
        let mut by_month: BTreeMap<u32, Tally> = BTreeMap::new();
        let mut by_year: BTreeMap<i32, Tally> = BTreeMap::new();
        let mut overall = Tally::default();

        for o in rows {
            overall.add(o);
            by_month.entry(o.month).or_default().add(o);
            by_year.entry(o.year).or_default().add(o);
        }

        let monthly = (1..=12)
            .map(|month| match by_month.get(&month) {
                Some(t) => MonthlyAggregate {
                    month,
                    days: t.days,
                    occurrences: t.occurrences,
                    rate: t.occurrences as f64 / t.days as f64,
                },
                None => MonthlyAggregate {
                    month,
                    days: 0,
                    occurrences: 0,
                    rate: 0.0,
                },
            })
            .collect();

        let yearly = by_year
            .iter()
            .map(|(&year, t)| YearlyAggregate {
                year,
                days: t.days,
                occurrences: t.occurrences,
                mean_intensity: t.intensity / t.days as f64,
                mean_duration_minutes: t.duration / t.days as f64,
            })
            .collect();

        let start = rows.first().map(|o| o.date);
        let end = rows.last().map(|o| o.date);
        let years_spanned = match (start, end) {
            (Some(s), Some(e)) => (e.year() - s.year() + 1) as u32,
            _ => 0,
        };

        let (mean_intensity, mean_duration_minutes) = if overall.occurrences > 0 {
            let n = overall.occurrences as f64;
            (Some(overall.intensity / n), Some(overall.duration / n))
        } else {
            (None, None)
        };

        Summary {
            start,
            end,
            total_days: overall.days,
            occurrences: overall.occurrences,
            occurrence_rate: if overall.days > 0 {
                overall.occurrences as f64 / overall.days as f64
            } else {
                0.0
            },
            years_spanned,
            annual_average: if years_spanned > 0 {
                overall.occurrences as f64 / years_spanned as f64
            } else {
                0.0
            },
            mean_intensity,
            mean_duration_minutes,
            monthly,
            yearly,
        }
    }

    pub fn month(&self, month: u32) -> Option<&MonthlyAggregate> {
        self.monthly.iter().find(|m| m.month == month)
    }

    /// Month with the most occurrences; ties go to the earlier month.
    pub fn best_month(&self) -> Option<&MonthlyAggregate> {
        first_extreme(self.monthly.iter().filter(|m| m.days > 0), |m| m.occurrences, true)
    }

    pub fn worst_month(&self) -> Option<&MonthlyAggregate> {
        first_extreme(self.monthly.iter().filter(|m| m.days > 0), |m| m.occurrences, false)
    }

    /// Year with the most occurrences; ties go to the earlier year.
    pub fn best_year(&self) -> Option<&YearlyAggregate> {
        first_extreme(self.yearly.iter(), |y| y.occurrences, true)
    }

    pub fn worst_year(&self) -> Option<&YearlyAggregate> {
        first_extreme(self.yearly.iter(), |y| y.occurrences, false)
    }
}

fn first_extreme<'a, T, I, F>(items: I, key: F, largest: bool) -> Option<&'a T>
where
    I: Iterator<Item = &'a T>,
    F: Fn(&T) -> usize,
{
    items.fold(None, |best: Option<&'a T>, item| match best {
        None => Some(item),
        Some(current) => {
            let better = if largest {
                key(item) > key(current)
            } else {
                key(item) < key(current)
            };
            if better {
                Some(item)
            } else {
                Some(current)
            }
        }
    })
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => writeln!(f, "Period:           {} to {}", start, end)?,
            _ => writeln!(f, "Period:           (empty)")?,
        }
        writeln!(f, "Total days:       {}", self.total_days)?;
        writeln!(f, "Occurrences:      {}", self.occurrences)?;
        writeln!(f, "Occurrence rate:  {:.2}%", self.occurrence_rate * 100.0)?;
        writeln!(f, "Annual average:   {:.1} days", self.annual_average)?;
        if let (Some(intensity), Some(duration)) = (self.mean_intensity, self.mean_duration_minutes)
        {
            writeln!(f, "Mean intensity:   {:.2} / 10", intensity)?;
            writeln!(f, "Mean duration:    {:.1} min", duration)?;
        }
        if let (Some(best), Some(worst)) = (self.best_month(), self.worst_month()) {
            writeln!(
                f,
                "Best month:       {:02} ({} days), worst {:02} ({} days)",
                best.month, best.occurrences, worst.month, worst.occurrences
            )?;
        }
        if let (Some(best), Some(worst)) = (self.best_year(), self.worst_year()) {
            writeln!(
                f,
                "Best year:        {} ({} days), worst {} ({} days)",
                best.year, best.occurrences, worst.year, worst.occurrences
            )?;
        }
        Ok(())
    }
}
