use pubadmin_types::{Publication, PublicationData};
use tokio::sync::Mutex;

use super::{BackendError, PublicationBackend};

/// Backend keeping records in process memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    records: Vec<Publication>,
    last_id: i64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Publication>) -> Self {
        let last_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        MemoryBackend {
            inner: Mutex::new(MemoryInner { records, last_id }),
        }
    }
}

impl PublicationBackend for MemoryBackend {
    async fn list(&self) -> Result<Vec<Publication>, BackendError> {
        Ok(self.inner.lock().await.records.clone())
    }

    async fn create(&self, data: &PublicationData) -> Result<Publication, BackendError> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let record = Publication::from_data(inner.last_id, data.clone());
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, data: &PublicationData) -> Result<Publication, BackendError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(BackendError::NotFound(id))?;
        record.apply(data.clone());
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().await;
        let pos = inner
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(BackendError::NotFound(id))?;
        inner.records.remove(pos);
        Ok(())
    }
}
