use crate::{backend::BackendError, upload::UploadError};

pub type Result<T, E = ConsoleError> = std::result::Result<T, E>;

/// Errors surfaced to the user by console components
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Validation(String),
    #[error("Cover upload failed: {0}")]
    Upload(#[from] UploadError),
    #[error("Saving failed: {0}")]
    Persistence(#[source] BackendError),
    #[error("Publication {0} not found")]
    NotFound(i64),
    #[error("Another action is still in progress")]
    Busy,
}

impl From<BackendError> for ConsoleError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotFound(id) => ConsoleError::NotFound(id),
            other => ConsoleError::Persistence(other),
        }
    }
}
