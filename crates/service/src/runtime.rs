//! Runtime environment helpers
//!
//! Wiring from `configs::StorageConfig` to a ready `SpotService`, so binary
//! crates do not need to know about storage handles.

use std::{path::Path, sync::Arc};

use configs::StorageConfig;
use models::SpotCollection;
use tracing::{info, warn};

use crate::spots::SpotService;
use crate::storage::FileStorage;

/// Build the file-backed spot service described by `cfg`.
///
/// With `create_if_missing`, an empty collection is written first when the
/// file does not exist yet.
pub async fn open_spot_service(cfg: &StorageConfig) -> anyhow::Result<Arc<SpotService>> {
    let path = Path::new(&cfg.path);
    let mut storage = FileStorage::new(path);
    if cfg.create_if_missing {
        common::env::ensure_parent_dir(path).await?;
        let seed = serde_json::to_vec(&SpotCollection::default())?;
        if storage.create_if_absent(&seed).await? {
            warn!(file = %path.display(), "spot file not found; seeded an empty collection");
        }
    }
    if !cfg.atomic_writes {
        storage = storage.in_place();
    }
    info!(file = %storage.path().display(), atomic = cfg.atomic_writes, "spot storage ready");
    Ok(Arc::new(SpotService::new(Arc::new(storage))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_empty_collection_when_requested() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("spot_runtime_{}", uuid::Uuid::new_v4()));
        let cfg = StorageConfig {
            path: dir.join("spot.json").display().to_string(),
            atomic_writes: true,
            create_if_missing: true,
        };
        let service = open_spot_service(&cfg).await?;
        assert!(service.list().await?.is_empty());

        let raw = tokio::fs::read_to_string(&cfg.path).await?;
        assert_eq!(raw, r#"{"records":[],"offset":""}"#);

        // reopening keeps existing content
        service.create(models::SpotRecord { id: "a".into(), ..Default::default() }).await?;
        let reopened = open_spot_service(&cfg).await?;
        assert_eq!(reopened.list().await?.len(), 1);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn without_seeding_missing_file_fails_on_load() -> Result<(), anyhow::Error> {
        let cfg = StorageConfig {
            path: std::env::temp_dir()
                .join(format!("spot_runtime_{}.json", uuid::Uuid::new_v4()))
                .display()
                .to_string(),
            atomic_writes: false,
            create_if_missing: false,
        };
        let service = open_spot_service(&cfg).await?;
        assert!(matches!(service.list().await, Err(crate::errors::ServiceError::Io(_))));
        Ok(())
    }
}
