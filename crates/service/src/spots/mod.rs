use async_trait::async_trait;
use models::{SpotFieldsPatch, SpotRecord};

use crate::errors::ServiceError;

pub mod repository;
pub mod service;

pub use self::repository::SpotRepository;
pub use self::service::SpotService;

/// Trait abstraction for surf spot storage, as seen by the HTTP handlers.
#[async_trait]
pub trait SpotStore: Send + Sync {
    async fn list(&self) -> Result<Vec<SpotRecord>, ServiceError>;
    async fn get(&self, id: &str) -> Result<SpotRecord, ServiceError>;
    async fn create(&self, record: SpotRecord) -> Result<(), ServiceError>;
    async fn update(&self, id: &str, patch: SpotFieldsPatch) -> Result<(), ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
