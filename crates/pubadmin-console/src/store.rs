use std::sync::Arc;

use pubadmin_types::{Publication, PublicationData};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{
    backend::PublicationBackend,
    error::{ConsoleError, Result},
};

/// Session collection of publications.
///
/// Cheap to clone, clones share the same collection. All writes go first to the
/// backend and the in-memory collection is changed only after the backend
/// succeeded, so a failed operation leaves the collection as it was.
/// The lock is never held across backend calls.
pub struct PublicationStore<B> {
    inner: Arc<StoreInner<B>>,
}

struct StoreInner<B> {
    backend: B,
    records: RwLock<Vec<Publication>>,
}

impl<B> Clone for PublicationStore<B> {
    fn clone(&self) -> Self {
        PublicationStore {
            inner: self.inner.clone(),
        }
    }
}

impl<B: PublicationBackend> PublicationStore<B> {
    /// Store with empty collection, use [`PublicationStore::load`] to fetch records
    pub fn new(backend: B) -> Self {
        PublicationStore {
            inner: Arc::new(StoreInner {
                backend,
                records: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Replaces collection with records from backend, returns number of records
    pub async fn load(&self) -> Result<usize> {
        let records = self
            .inner
            .backend
            .list()
            .await
            .map_err(ConsoleError::Persistence)?;
        let count = records.len();
        *self.inner.records.write().await = records;
        debug!("Loaded {count} publications");
        Ok(count)
    }

    /// Snapshot of current collection
    pub async fn list(&self) -> Vec<Publication> {
        self.inner.records.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<Publication> {
        self.inner
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    async fn contains(&self, id: i64) -> bool {
        self.inner.records.read().await.iter().any(|r| r.id == id)
    }

    pub async fn add(&self, data: PublicationData) -> Result<Publication> {
        let record = self
            .inner
            .backend
            .create(&data)
            .await
            .map_err(ConsoleError::Persistence)?;

        let mut records = self.inner.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                warn!("Backend returned already known id {}", record.id);
                *existing = record.clone();
            }
            None => records.push(record.clone()),
        }
        debug!("Added publication {}", record.id);
        Ok(record)
    }

    pub async fn update(&self, id: i64, data: PublicationData) -> Result<Publication> {
        if !self.contains(id).await {
            return Err(ConsoleError::NotFound(id));
        }
        let mut record = self.inner.backend.update(id, &data).await?;
        // id is immutable, whatever backend says
        record.id = id;

        let mut records = self.inner.records.write().await;
        match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => *existing = record.clone(),
            None => warn!("Publication {id} was removed while being updated"),
        }
        debug!("Updated publication {id}");
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.contains(id).await {
            return Err(ConsoleError::NotFound(id));
        }
        self.inner.backend.delete(id).await?;

        self.inner.records.write().await.retain(|r| r.id != id);
        debug!("Deleted publication {id}");
        Ok(())
    }
}
