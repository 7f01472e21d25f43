use crate::calendar::error::WindowError;
use crate::climate::error::ProfileError;
use crate::dataset::error::DatasetError;
use crate::export::error::ExportError;
use crate::model::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SunsetError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Could not resolve the given input to a calendar date")]
    DateParsingError,
}
