use color_eyre::eyre::Report;
use thiserror::Error;

use super::MappingStoreError;

#[derive(Debug, Error)]
pub enum MappingAPIError {
    #[error("This user is already assigned to this project")]
    DuplicateMapping,
    #[error("Duplicate entry")]
    DuplicateEntry,
    #[error("Invalid reference")]
    InvalidReference,
    #[error("Missing required field")]
    MissingField,
    #[error("Mapping not found")]
    NotFound,
    #[error("Database table not found")]
    TableNotFound,
    #[error("Database connection timed out")]
    ConnectionTimeout,
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

// Storage-layer errors are translated exactly once, here at the boundary
// between the store and the HTTP surface.
impl From<MappingStoreError> for MappingAPIError {
    fn from(error: MappingStoreError) -> Self {
        match error {
            MappingStoreError::DuplicateEntry => Self::DuplicateEntry,
            MappingStoreError::InvalidReference => Self::InvalidReference,
            MappingStoreError::MissingField => Self::MissingField,
            MappingStoreError::NoValidFields => Self::ValidationError(
                ValidationError::new("No valid fields to update".to_owned()),
            ),
            MappingStoreError::RowNotFound => Self::NotFound,
            MappingStoreError::TableNotFound => Self::TableNotFound,
            MappingStoreError::ConnectionTimeout => Self::ConnectionTimeout,
            MappingStoreError::UnexpectedError(report) => {
                Self::UnexpectedError(report)
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
