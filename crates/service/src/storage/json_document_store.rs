use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::backend::DocumentStorage;

/// Generic JSON document store.
///
/// Holds no decoded state: every `load` reads and decodes the full document
/// from the storage handle, every `save` encodes and replaces it.
pub struct JsonDocumentStore<T> {
    storage: Arc<dyn DocumentStorage>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocumentStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: Arc<dyn DocumentStorage>) -> Self {
        Self { storage, _doc: PhantomData }
    }

    /// Read and decode the whole document.
    pub async fn load(&self) -> Result<T, ServiceError> {
        let bytes = self.storage.read().await?;
        let doc = serde_json::from_slice(&bytes).map_err(ServiceError::Decode)?;
        debug!(location = %self.storage.describe(), bytes = bytes.len(), "document loaded");
        Ok(doc)
    }

    /// Encode and replace the whole document.
    pub async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(doc).map_err(ServiceError::Encode)?;
        let len = data.len();
        self.storage.write(data).await?;
        debug!(location = %self.storage.describe(), bytes = len, "document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use models::{SpotCollection, SpotFields, SpotRecord};

    fn record(id: &str, address: &str) -> SpotRecord {
        SpotRecord {
            id: id.into(),
            fields: SpotFields { address: Some(address.into()), ..Default::default() },
            created_time: "2018-05-31T00:16:16.000Z".into(),
        }
    }

    #[tokio::test]
    async fn json_document_store_persists_to_file() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_document_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonDocumentStore::<SpotCollection>::new(Arc::new(FileStorage::new(&tmp)));

        let mut collection = SpotCollection { records: vec![record("a", "Pipeline")], offset: "tok".into() };
        store.save(&collection).await?;

        let appended = record("b", "Teahupoo");
        collection.records.push(appended.clone());
        store.save(&collection).await?;

        // a fresh adapter over the same file sees the appended record last
        let reloaded = JsonDocumentStore::<SpotCollection>::new(Arc::new(FileStorage::new(&tmp)))
            .load()
            .await?;
        assert_eq!(reloaded.records.last(), Some(&appended));
        assert_eq!(reloaded, collection);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_document_is_io_error() {
        let store = JsonDocumentStore::<SpotCollection>::new(Arc::new(MemoryStorage::new()));
        assert!(matches!(store.load().await, Err(ServiceError::Io(_))));
    }

    #[tokio::test]
    async fn malformed_document_is_decode_error() {
        let bad_docs = [&b"{not json"[..], &br#"{"records": 7}"#[..], &b"[]"[..], &br#"[[{"id":"x"}],"tok"]"#[..]];
        for bad in bad_docs {
            let store = JsonDocumentStore::<SpotCollection>::new(Arc::new(MemoryStorage::with_bytes(bad)));
            assert!(matches!(store.load().await, Err(ServiceError::Decode(_))));
        }
    }

    #[tokio::test]
    async fn saved_document_keeps_exact_field_names() -> Result<(), anyhow::Error> {
        let memory = MemoryStorage::new();
        let store = JsonDocumentStore::<SpotCollection>::new(Arc::new(memory.clone()));
        store.save(&SpotCollection { records: vec![record("a", "Pipeline")], offset: String::new() }).await?;

        let raw: serde_json::Value = serde_json::from_slice(&memory.snapshot().await.unwrap_or_default())?;
        assert_eq!(raw["offset"], "");
        assert_eq!(raw["records"][0]["createdTime"], "2018-05-31T00:16:16.000Z");
        assert_eq!(raw["records"][0]["fields"]["Address"], "Pipeline");
        assert!(raw["records"][0]["fields"].get("Difficulty Level").is_some());
        Ok(())
    }
}
