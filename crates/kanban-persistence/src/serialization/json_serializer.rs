use crate::traits::Serializer;
use kanban_core::KanbanResult;

/// Textual JSON encoding for slot values
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> KanbanResult<Vec<u8>> {
        Ok(serde_json::to_vec(data)?)
    }

    fn deserialize(&self, bytes: &[u8]) -> KanbanResult<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
