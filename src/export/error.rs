use crate::dataset::error::DatasetError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Output path exists but is not a directory: '{0}'")]
    OutputPathNotDir(PathBuf),

    #[error("Failed to read metadata for output path '{0}'")]
    OutputMetadata(PathBuf, #[source] std::io::Error),

    // Errors during CSV writing (inside blocking task)
    #[error("I/O error writing CSV export '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing CSV export '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to read CSV export '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("CSV export '{path}' is missing column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to write report '{0}'")]
    ReportWrite(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
