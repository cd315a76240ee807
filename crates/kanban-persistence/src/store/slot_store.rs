use crate::serialization::JsonSerializer;
use crate::traits::{KeyValueMedium, LocalStore, PersistenceMetadata, Serializer, BOARD_SLOT};
use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{BoardCollection, Dashboard};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ENVELOPE_VERSION: u32 = 1;

/// Versioned wrapper stored in the slot
#[derive(Debug, Serialize, Deserialize)]
struct SlotEnvelope {
    version: u32,
    metadata: PersistenceMetadata,
    data: BoardCollection,
}

/// Pre-envelope layout: a bare `{"dashboards": [...]}` object, as the browser
/// client kept it in local storage. `dashboards` must be present.
#[derive(Deserialize)]
struct LegacySlot {
    dashboards: Vec<Dashboard>,
}

/// Stored slot formats, newest first.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSlot {
    Envelope(SlotEnvelope),
    Bare(LegacySlot),
}

/// `LocalStore` keeping the whole collection in a single named slot
#[derive(Debug)]
pub struct SlotStore<M> {
    medium: M,
    key: String,
    instance_id: Uuid,
}

impl<M: KeyValueMedium> SlotStore<M> {
    pub fn new(medium: M) -> Self {
        Self::with_key(medium, BOARD_SLOT)
    }

    pub fn with_key(medium: M, key: impl Into<String>) -> Self {
        Self {
            medium,
            key: key.into(),
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    fn decode(&self, bytes: &[u8]) -> KanbanResult<BoardCollection> {
        let stored: StoredSlot = serde_json::from_slice(bytes)?;
        match stored {
            StoredSlot::Envelope(envelope) if envelope.version == ENVELOPE_VERSION => {
                Ok(envelope.data)
            }
            StoredSlot::Envelope(envelope) => Err(KanbanError::Serialization(format!(
                "Unsupported slot version: {}",
                envelope.version
            ))),
            StoredSlot::Bare(legacy) => Ok(BoardCollection {
                dashboards: legacy.dashboards,
            }),
        }
    }

    async fn try_load(&self) -> KanbanResult<Option<BoardCollection>> {
        match self.medium.get(&self.key).await? {
            Some(bytes) => self.decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn try_save(&self, collection: &BoardCollection) -> KanbanResult<usize> {
        let envelope = SlotEnvelope {
            version: ENVELOPE_VERSION,
            metadata: PersistenceMetadata::new(self.instance_id),
            data: collection.clone(),
        };
        let bytes = JsonSerializer.serialize(&envelope)?;
        self.medium.set(&self.key, &bytes).await?;
        Ok(bytes.len())
    }
}

#[async_trait]
impl<M: KeyValueMedium> LocalStore for SlotStore<M> {
    async fn load(&self) -> BoardCollection {
        match self.try_load().await {
            Ok(Some(collection)) => {
                tracing::debug!(
                    slot = %self.key,
                    dashboards = collection.dashboards.len(),
                    "Loaded board collection"
                );
                collection
            }
            Ok(None) => {
                tracing::debug!(slot = %self.key, "Slot is empty");
                BoardCollection::new()
            }
            Err(e) => {
                tracing::error!(slot = %self.key, "Error reading from storage: {}", e);
                BoardCollection::new()
            }
        }
    }

    async fn save(&self, collection: &BoardCollection) {
        match self.try_save(collection).await {
            Ok(bytes) => {
                tracing::info!(slot = %self.key, "Saved {} bytes", bytes);
            }
            Err(e) => {
                tracing::error!(slot = %self.key, "Error writing to storage: {}", e);
            }
        }
    }

    async fn clear(&self) {
        if let Err(e) = self.medium.remove(&self.key).await {
            tracing::error!(slot = %self.key, "Error clearing storage: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryMedium;
    use std::sync::Arc;

    fn collection() -> BoardCollection {
        BoardCollection {
            dashboards: vec![Dashboard::starter("Board", "u")],
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = SlotStore::new(MemoryMedium::new());
        let original = collection();
        store.save(&original).await;
        assert_eq!(store.load().await, original);
    }

    #[tokio::test]
    async fn test_envelope_layout() {
        let medium = Arc::new(MemoryMedium::new());
        let store = SlotStore::new(medium.clone());
        let original = collection();
        store.save(&original).await;

        let raw: serde_json::Value = serde_json::from_slice(&medium.raw(BOARD_SLOT).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert!(raw["metadata"]["instanceId"].is_string());
        assert_eq!(raw["data"]["dashboards"][0]["title"], "Board");
    }

    #[tokio::test]
    async fn test_missing_slot_is_empty() {
        let store = SlotStore::new(MemoryMedium::new());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_slot_is_empty() {
        let medium = Arc::new(MemoryMedium::new());
        medium.put_raw(BOARD_SLOT, "{\"dashboards\": [tru");
        let store = SlotStore::new(medium);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_version_is_empty() {
        let medium = Arc::new(MemoryMedium::new());
        let store = SlotStore::new(medium.clone());
        store.save(&collection()).await;

        let mut raw: serde_json::Value =
            serde_json::from_slice(&medium.raw(BOARD_SLOT).unwrap()).unwrap();
        raw["version"] = serde_json::json!(99);
        medium.put_raw(BOARD_SLOT, serde_json::to_vec(&raw).unwrap());

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_bare_collection_is_accepted() {
        let medium = Arc::new(MemoryMedium::new());
        medium.put_raw(
            BOARD_SLOT,
            r#"{"dashboards":[{"id":"dashboard-1","title":"Legacy","ownerIds":["user-1"],"members":[],"createdAt":"2024-03-01T10:00:00Z","columns":[{"id":"column-1","title":"To Do","order":0,"cards":[]}]}]}"#,
        );
        let store = SlotStore::new(medium);

        let loaded = store.load().await;
        assert_eq!(loaded.dashboards.len(), 1);
        assert_eq!(loaded.dashboards[0].title, "Legacy");
        assert_eq!(loaded.dashboards[0].columns[0].title, "To Do");
    }

    #[tokio::test]
    async fn test_envelope_with_broken_data_is_not_read_as_legacy() {
        let medium = Arc::new(MemoryMedium::new());
        let store = SlotStore::new(medium.clone());
        store.save(&collection()).await;

        let mut raw: serde_json::Value =
            serde_json::from_slice(&medium.raw(BOARD_SLOT).unwrap()).unwrap();
        raw["data"]["dashboards"][0]
            .as_object_mut()
            .unwrap()
            .remove("createdAt");
        medium.put_raw(BOARD_SLOT, serde_json::to_vec(&raw).unwrap());

        let err = store.try_load().await.unwrap_err();
        assert!(matches!(err, KanbanError::Serialization(_)));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_object_without_dashboards_is_rejected() {
        let medium = Arc::new(MemoryMedium::new());
        medium.put_raw(BOARD_SLOT, "{\"boards\": []}");
        let store = SlotStore::new(medium);
        assert!(store.try_load().await.is_err());
    }

    #[tokio::test]
    async fn test_clear_removes_slot() {
        let medium = Arc::new(MemoryMedium::new());
        let store = SlotStore::new(medium.clone());
        store.save(&collection()).await;
        store.clear().await;

        assert!(medium.raw(BOARD_SLOT).is_none());
        assert!(store.load().await.is_empty());
    }
}
