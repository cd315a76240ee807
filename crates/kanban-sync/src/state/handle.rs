use kanban_core::{KanbanError, KanbanResult};
use tokio::task::JoinHandle;

/// Background half of an optimistic operation.
///
/// Dropping the handle detaches the task; the revert still happens.
pub struct SyncHandle {
    task: JoinHandle<KanbanResult<()>>,
}

impl SyncHandle {
    pub(crate) fn new(task: JoinHandle<KanbanResult<()>>) -> Self {
        Self { task }
    }

    pub fn is_settled(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the backend call. `Err` means the optimistic edit was
    /// reverted (or dropped, if the dashboard changed in the meantime).
    pub async fn settled(self) -> KanbanResult<()> {
        match self.task.await {
            Ok(result) => result,
            Err(err) => Err(KanbanError::Internal(format!("Sync task failed: {err}"))),
        }
    }
}

impl std::fmt::Debug for SyncHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncHandle")
            .field("settled", &self.is_settled())
            .finish()
    }
}
