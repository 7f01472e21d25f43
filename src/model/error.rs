use crate::climate::error::ProfileError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameters for {name} distribution: {reason}")]
    Distribution { name: &'static str, reason: String },

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl ModelError {
    pub(crate) fn distribution(name: &'static str, reason: impl ToString) -> Self {
        ModelError::Distribution {
            name,
            reason: reason.to_string(),
        }
    }
}
