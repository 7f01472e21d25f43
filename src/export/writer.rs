//! Persisting a generated series: a CSV table and a companion text report.

use crate::dataset::frame::ObservationFrame;
use crate::dataset::table::Dataset;
use crate::export::error::ExportError;
use crate::report::text::render_report;
use crate::types::observation::OBSERVATION_COLUMNS;
use chrono::NaiveDateTime;
use log::{debug, info};
use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

/// Paths written by [`export_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub report: Option<PathBuf>,
}

/// `<dir>/<name>.csv` and `<dir>/<name>_report.txt`.
pub fn export_paths(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{}.csv", name)),
        dir.join(format!("{}_report.txt", name)),
    )
}

/// Writes the dataset as CSV and, when `source` is given, the text report next to it.
///
/// `source` is the provenance line printed in the report.
pub async fn export_dataset(
    dataset: &Dataset,
    dir: &Path,
    name: &str,
    source: Option<&str>,
    generated_at: NaiveDateTime,
) -> Result<ExportPaths, ExportError> {
    ensure_output_dir(dir).await?;
    let (csv_path, report_path) = export_paths(dir, name);

    write_csv(dataset.to_dataframe()?, &csv_path).await?;
    info!("Wrote {} rows to {:?}", dataset.len(), csv_path);

    let report = match source {
        Some(source) => {
            let text = render_report(&dataset.summary(), source, generated_at);
            write_report(&text, &report_path).await?;
            info!("Wrote report to {:?}", report_path);
            Some(report_path)
        }
        None => None,
    };

    Ok(ExportPaths {
        csv: csv_path,
        report,
    })
}

/// Writes a DataFrame to CSV using spawn_blocking.
pub async fn write_csv(mut df: DataFrame, path: &Path) -> Result<(), ExportError> {
    let path_buf = path.to_path_buf();
    task::spawn_blocking(move || {
        let mut file = std::fs::File::create(&path_buf)
            .map_err(|e| ExportError::CsvWriteIo(path_buf.clone(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| ExportError::CsvWritePolars(path_buf, e))?;
        Ok::<(), ExportError>(())
    })
    .await??;
    Ok(())
}

pub async fn write_report(text: &str, path: &Path) -> Result<(), ExportError> {
    fs::write(path, text)
        .await
        .map_err(|e| ExportError::ReportWrite(path.to_path_buf(), e))
}

/// Reads a previous CSV export back into an [`ObservationFrame`].
///
/// Dates are parsed back into a `Date` column. Fails if any observation column is
/// missing.
pub async fn load_csv(path: &Path) -> Result<ObservationFrame, ExportError> {
    let path_buf = path.to_path_buf();
    let df = task::spawn_blocking(move || {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|opts| opts.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path_buf.clone()))
            .map_err(|e| ExportError::CsvRead(path_buf.clone(), e))?
            .finish()
            .map_err(|e| ExportError::CsvRead(path_buf.clone(), e))?;

        for column in OBSERVATION_COLUMNS {
            if df.column(column).is_err() {
                return Err(ExportError::MissingColumn {
                    path: path_buf,
                    column: column.to_string(),
                });
            }
        }
        Ok::<DataFrame, ExportError>(df)
    })
    .await??;

    debug!("Loaded {} rows from {:?}", df.height(), path);
    Ok(ObservationFrame::new(df.lazy()))
}

/// Creates `path` if missing; fails if it exists as something other than a directory.
pub async fn ensure_output_dir(path: &Path) -> Result<(), ExportError> {
    match fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ExportError::OutputPathNotDir(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            fs::create_dir_all(path)
                .await
                .map_err(|e| ExportError::OutputDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ExportError::OutputMetadata(path.to_path_buf(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SunsetGenerator;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn one_year() -> Result<Dataset, crate::SunsetError> {
        SunsetGenerator::hong_kong()?
            .generate()
            .start_year(2020)
            .end_year(2020)
            .call()
    }

    #[tokio::test]
    async fn test_export_writes_csv_and_report() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let out = dir.path().join("nested").join("output");
        let dataset = one_year()?;

        let paths = export_dataset(&dataset, &out, "hk_2020", Some("test source"), generated_at())
            .await?;

        assert_eq!(paths.csv, out.join("hk_2020.csv"));
        assert_eq!(paths.report, Some(out.join("hk_2020_report.txt")));

        let csv = std::fs::read_to_string(&paths.csv)?;
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(OBSERVATION_COLUMNS.join(",").as_str()));
        assert!(lines.next().is_some_and(|l| l.starts_with("2020-01-01,2020,1,1,")));
        assert_eq!(csv.lines().count(), 367);

        let report = std::fs::read_to_string(out.join("hk_2020_report.txt"))?;
        assert!(report.contains("Period: 2020-01-01 to 2020-12-31"));
        assert!(report.contains("Total days: 366"));
        assert!(report.contains("Data source: test source"));
        assert!(report.contains("Generated at: 2024-01-02 03:04:05"));
        Ok(())
    }

    #[tokio::test]
    async fn test_export_without_report() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dataset = one_year()?;

        let paths = export_dataset(&dataset, dir.path(), "csv_only", None, generated_at()).await?;
        assert!(paths.report.is_none());
        assert!(paths.csv.exists());
        assert!(!dir.path().join("csv_only_report.txt").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_csv_round_trips_rows() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dataset = one_year()?;
        let paths = export_dataset(&dataset, dir.path(), "reload", None, generated_at()).await?;

        let frame = load_csv(&paths.csv).await?;
        let df = frame.frame.clone().collect()?;
        assert_eq!(df.height(), 366);
        assert_eq!(df.column("date")?.dtype(), &DataType::Date);

        let occurred = frame.occurrences_only().frame.collect()?;
        assert_eq!(occurred.height(), dataset.occurrence_count());

        let february = frame.get_for_period(crate::Month::new(2, 2020))?.frame.collect()?;
        assert_eq!(february.height(), 29);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_csv_rejects_foreign_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("other.csv");
        std::fs::write(&path, "date,value\n2020-01-01,3\n")?;

        let result = load_csv(&path).await;
        assert!(matches!(result, Err(ExportError::MissingColumn { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_output_path_must_be_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("taken");
        std::fs::write(&file, "not a directory")?;

        assert!(matches!(
            ensure_output_dir(&file).await,
            Err(ExportError::OutputPathNotDir(_))
        ));
        ensure_output_dir(dir.path()).await?;
        Ok(())
    }
}
