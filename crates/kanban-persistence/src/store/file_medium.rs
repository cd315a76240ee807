use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueMedium;
use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use std::path::{Path, PathBuf};

/// Key-value medium backed by one JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> KanbanResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KanbanError::Validation(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueMedium for FileMedium {
    async fn get(&self, key: &str) -> KanbanResult<Option<Vec<u8>>> {
        AtomicWriter::read_optional(&self.key_path(key)?).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> KanbanResult<()> {
        AtomicWriter::write_atomic(&self.key_path(key)?, value).await
    }

    async fn remove(&self, key: &str) -> KanbanResult<()> {
        AtomicWriter::remove(&self.key_path(key)?).await
    }
}
