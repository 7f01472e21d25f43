//! Contains `ObservationFrame`, a lazy view over the observation table.

use crate::error::SunsetError;
use crate::types::period::{AnyDate, DatePeriod};
use polars::prelude::{col, lit, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding observation rows.
///
/// Obtained from [`crate::Dataset::lazy`] or by loading a previous export with
/// [`crate::load_csv`]. All filters are lazy; nothing is computed until `.collect()`
/// is called on [`ObservationFrame::frame`].
#[derive(Clone)]
pub struct ObservationFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl ObservationFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary Polars predicate, returning a new frame.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use sunset_clouds::{SunsetGenerator, SunsetError};
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let dataset = SunsetGenerator::hong_kong()?
    ///     .generate()
    ///     .start_year(2000)
    ///     .end_year(2001)
    ///     .call()?;
    ///
    /// let vivid = dataset.lazy()?.filter(col("intensity").gt(lit(8.0f64)));
    /// println!("{}", vivid.frame.collect()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> ObservationFrame {
        ObservationFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps rows whose date lies within `[start, end]`.
    ///
    /// Both bounds accept anything implementing [`AnyDate`]: a `NaiveDate`, a
    /// `"YYYY-MM-DD"` string, a [`crate::Year`] or a [`crate::Month`]. The start bound
    /// resolves to the first day it denotes and the end bound to the last.
    ///
    /// # Errors
    ///
    /// Returns [`SunsetError::DateParsingError`] if a bound cannot be resolved.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<ObservationFrame, SunsetError> {
        let start_date = start
            .date_span()
            .ok_or(SunsetError::DateParsingError)?
            .start;
        let end_date = end.date_span().ok_or(SunsetError::DateParsingError)?.end;

        Ok(self.filter(
            col("date")
                .gt_eq(lit(start_date))
                .and(col("date").lt_eq(lit(end_date))),
        ))
    }

    /// Keeps the row for a single day. For inputs spanning several days the first
    /// day is used.
    pub fn get_at(&self, date: impl AnyDate) -> Result<ObservationFrame, SunsetError> {
        let day = date
            .date_span()
            .ok_or(SunsetError::DateParsingError)?
            .start;
        Ok(self.filter(col("date").eq(lit(day))))
    }

    pub fn get_for_period(
        &self,
        period: impl DatePeriod,
    ) -> Result<ObservationFrame, SunsetError> {
        let span = period
            .date_period()
            .ok_or(SunsetError::DateParsingError)?;
        self.get_range(span.start, span.end)
    }

    /// Only the days on which sunset clouds occurred.
    pub fn occurrences_only(&self) -> ObservationFrame {
        self.filter(col("occurred").eq(lit(true)))
    }

    /// Rows of a single calendar month across all years.
    pub fn in_calendar_month(&self, month: u32) -> ObservationFrame {
        self.filter(col("month").eq(lit(month)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Month, SunsetGenerator, Year};
    use chrono::{Datelike, NaiveDate};
    use polars::prelude::*;

    fn epoch_day(days: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Duration::days(days as i64)
    }

    fn two_years() -> Result<crate::Dataset, crate::SunsetError> {
        SunsetGenerator::hong_kong()?
            .generate()
            .start_year(2019)
            .end_year(2020)
            .seed(17)
            .call()
    }

    #[test]
    fn test_get_range_naive_dates() -> Result<(), Box<dyn std::error::Error>> {
        let frame = two_years()?.lazy()?;
        let start = NaiveDate::from_ymd_opt(2020, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();

        let df = frame.get_range(start, end)?.frame.collect()?;
        assert_eq!(df.height(), 5);

        let dates: Vec<NaiveDate> = df
            .column("date")?
            .date()?
            .into_iter()
            .flatten()
            .map(epoch_day)
            .collect();
        assert_eq!(dates.first(), Some(&start));
        assert_eq!(dates.last(), Some(&end));
        Ok(())
    }

    #[test]
    fn test_get_at_string_date() -> Result<(), Box<dyn std::error::Error>> {
        let frame = two_years()?.lazy()?;
        let df = frame.get_at("2019-07-15")?.frame.collect()?;
        assert_eq!(df.height(), 1);
        assert!(frame.get_at("15/07/2019").is_err());
        Ok(())
    }

    #[test]
    fn test_get_for_period_year_and_month() -> Result<(), Box<dyn std::error::Error>> {
        let frame = two_years()?.lazy()?;

        let leap_year = frame.get_for_period(Year(2020))?.frame.collect()?;
        assert_eq!(leap_year.height(), 366);
        assert!(leap_year
            .column("date")?
            .date()?
            .into_iter()
            .flatten()
            .all(|d| epoch_day(d).year() == 2020));

        let february = frame.get_for_period(Month::new(2, 2019))?.frame.collect()?;
        assert_eq!(february.height(), 28);
        Ok(())
    }

    #[test]
    fn test_occurrences_only_matches_dataset() -> Result<(), Box<dyn std::error::Error>> {
        let dataset = two_years()?;
        let df = dataset.lazy()?.occurrences_only().frame.collect()?;
        assert_eq!(df.height(), dataset.occurrence_count());
        assert!(df.column("intensity")?.f64()?.into_iter().flatten().all(|v| v >= 0.0));
        Ok(())
    }

    #[test]
    fn test_calendar_month_and_filter_chain() -> Result<(), Box<dyn std::error::Error>> {
        let frame = two_years()?.lazy()?;
        let novembers = frame.in_calendar_month(11).frame.collect()?;
        assert_eq!(novembers.height(), 60);

        let clear = frame
            .in_calendar_month(11)
            .filter(col("visibility_km").gt(lit(10.0f64)))
            .frame
            .collect()?;
        assert!(clear.height() <= 60);
        assert!(clear
            .column("visibility_km")?
            .f64()?
            .into_iter()
            .flatten()
            .all(|v| v > 10.0));
        Ok(())
    }
}
