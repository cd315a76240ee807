use crate::traits::KeyValueMedium;
use async_trait::async_trait;
use kanban_core::KanbanResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-process medium, for tests and embedders without a writable disk
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes currently stored under `key`
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }

    /// Overwrite a slot with arbitrary bytes, bypassing any encoding
    pub fn put_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.entries.lock().insert(key.to_string(), value.into());
    }
}

#[async_trait]
impl KeyValueMedium for MemoryMedium {
    async fn get(&self, key: &str) -> KanbanResult<Option<Vec<u8>>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &[u8]) -> KanbanResult<()> {
        self.put_raw(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> KanbanResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
