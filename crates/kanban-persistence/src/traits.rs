use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::KanbanResult;
use kanban_domain::BoardCollection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the slot holding the board collection.
pub const BOARD_SLOT: &str = "task_management_data";

/// Metadata written alongside every saved collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceMetadata {
    /// ID of the client instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Process-external key-value medium holding raw slot values.
///
/// Errors surface to the caller; `LocalStore` implementations decide how to
/// absorb them.
#[async_trait]
pub trait KeyValueMedium: Send + Sync {
    /// Read a slot, `None` when the key was never written or was removed
    async fn get(&self, key: &str) -> KanbanResult<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: &[u8]) -> KanbanResult<()>;

    async fn remove(&self, key: &str) -> KanbanResult<()>;
}

/// Durable persistence of the whole board collection.
///
/// None of these operations fail the caller: reads degrade to an empty
/// collection and failed writes are logged, so callers must not assume a
/// save reached the medium.
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn load(&self) -> BoardCollection;

    async fn save(&self, collection: &BoardCollection);

    async fn clear(&self);
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> KanbanResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> KanbanResult<T>;
}

#[async_trait]
impl<M: KeyValueMedium + ?Sized> KeyValueMedium for std::sync::Arc<M> {
    async fn get(&self, key: &str) -> KanbanResult<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> KanbanResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> KanbanResult<()> {
        (**self).remove(key).await
    }
}

#[async_trait]
impl<S: LocalStore + ?Sized> LocalStore for std::sync::Arc<S> {
    async fn load(&self) -> BoardCollection {
        (**self).load().await
    }

    async fn save(&self, collection: &BoardCollection) {
        (**self).save(collection).await
    }

    async fn clear(&self) {
        (**self).clear().await
    }
}
