use std::sync::Arc;

use async_trait::async_trait;
use models::{SpotCollection, SpotFieldsPatch, SpotRecord};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::spots::{SpotRepository, SpotStore};
use crate::storage::{DocumentStorage, JsonDocumentStore};

/// Load-operate-save service over the spot collection document.
///
/// Nothing is cached: each call loads the document fresh. Mutations hold
/// `write_lock` for the whole load-modify-save cycle so concurrent writers
/// in this process are serialized.
pub struct SpotService {
    store: JsonDocumentStore<SpotCollection>,
    write_lock: Mutex<()>,
}

impl SpotService {
    pub fn new(storage: Arc<dyn DocumentStorage>) -> Self {
        Self { store: JsonDocumentStore::new(storage), write_lock: Mutex::new(()) }
    }

    async fn load(&self) -> Result<SpotRepository, ServiceError> {
        Ok(SpotRepository::new(self.store.load().await?))
    }

    async fn mutate<F>(&self, f: F) -> Result<(), ServiceError>
    where
        F: FnOnce(&mut SpotRepository) -> Result<(), ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut repo = self.load().await?;
        f(&mut repo)?;
        self.store.save(&repo.into_collection()).await
    }

    pub async fn list(&self) -> Result<Vec<SpotRecord>, ServiceError> {
        let records = self.store.load().await?.records;
        debug!(count = records.len(), "list spots");
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<SpotRecord, ServiceError> {
        self.load()
            .await?
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("spot"))
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn create(&self, record: SpotRecord) -> Result<(), ServiceError> {
        record.validate()?;
        self.mutate(|repo| {
            repo.append(record);
            Ok(())
        })
        .await?;
        info!("spot created");
        Ok(())
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: SpotFieldsPatch) -> Result<(), ServiceError> {
        self.mutate(|repo| {
            if repo.update_fields(id, patch) {
                Ok(())
            } else {
                Err(ServiceError::not_found("spot"))
            }
        })
        .await?;
        info!("spot updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.mutate(|repo| {
            if repo.remove_by_id(id) {
                Ok(())
            } else {
                Err(ServiceError::not_found("spot"))
            }
        })
        .await?;
        info!("spot deleted");
        Ok(())
    }
}

#[async_trait]
impl SpotStore for SpotService {
    async fn list(&self) -> Result<Vec<SpotRecord>, ServiceError> { self.list().await }
    async fn get(&self, id: &str) -> Result<SpotRecord, ServiceError> { self.get(id).await }
    async fn create(&self, record: SpotRecord) -> Result<(), ServiceError> { self.create(record).await }
    async fn update(&self, id: &str, patch: SpotFieldsPatch) -> Result<(), ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.delete(id).await }
}
