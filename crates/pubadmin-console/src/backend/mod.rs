use pubadmin_types::{Publication, PublicationData};

pub mod memory;
pub mod rest;

pub use memory::MemoryBackend;
pub use rest::RestBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Record {0} not found")]
    NotFound(i64),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend answered with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Storage holding the canonical publication records
pub trait PublicationBackend {
    async fn list(&self) -> Result<Vec<Publication>, BackendError>;
    /// Stores new record, backend assigns the id
    async fn create(&self, data: &PublicationData) -> Result<Publication, BackendError>;
    async fn update(&self, id: i64, data: &PublicationData) -> Result<Publication, BackendError>;
    async fn delete(&self, id: i64) -> Result<(), BackendError>;
}
