use std::future::Future;

use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{
    Card, CardId, CardUpdate, Column, ColumnId, Dashboard, DashboardId, DashboardUpdate,
};

use crate::backend::BoardBackend;

/// Runs every mutation against the remote backend first and replays it
/// against the local backend when the remote fails for any reason.
///
/// The local result (success or structural error) becomes the outcome. The
/// remote error is logged and otherwise discarded.
pub struct SyncExecutor<R, L> {
    remote: R,
    local: L,
}

impl<R: BoardBackend, L: BoardBackend> SyncExecutor<R, L> {
    pub fn new(remote: R, local: L) -> Self {
        Self { remote, local }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &L {
        &self.local
    }
}

async fn with_fallback<T, F, Fut>(
    operation: &'static str,
    remote: KanbanResult<T>,
    local: F,
) -> KanbanResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = KanbanResult<T>>,
{
    match remote {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(operation, error = %err, "Remote failed, using local store");
            local().await
        }
    }
}

#[async_trait]
impl<R: BoardBackend, L: BoardBackend> BoardBackend for SyncExecutor<R, L> {
    async fn get_dashboards(&self) -> KanbanResult<Vec<Dashboard>> {
        with_fallback(
            "get_dashboards",
            self.remote.get_dashboards().await,
            || self.local.get_dashboards(),
        )
        .await
    }

    async fn create_dashboard(&self, title: &str, owner_id: &str) -> KanbanResult<Dashboard> {
        with_fallback(
            "create_dashboard",
            self.remote.create_dashboard(title, owner_id).await,
            || self.local.create_dashboard(title, owner_id),
        )
        .await
    }

    async fn update_dashboard(
        &self,
        dashboard_id: &DashboardId,
        updates: &DashboardUpdate,
    ) -> KanbanResult<Dashboard> {
        with_fallback(
            "update_dashboard",
            self.remote.update_dashboard(dashboard_id, updates).await,
            || self.local.update_dashboard(dashboard_id, updates),
        )
        .await
    }

    async fn create_column(
        &self,
        dashboard_id: &DashboardId,
        title: &str,
    ) -> KanbanResult<Column> {
        with_fallback(
            "create_column",
            self.remote.create_column(dashboard_id, title).await,
            || self.local.create_column(dashboard_id, title),
        )
        .await
    }

    async fn reorder_columns(
        &self,
        dashboard_id: &DashboardId,
        column_ids: &[ColumnId],
    ) -> KanbanResult<()> {
        with_fallback(
            "reorder_columns",
            self.remote.reorder_columns(dashboard_id, column_ids).await,
            || self.local.reorder_columns(dashboard_id, column_ids),
        )
        .await
    }

    async fn create_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        title: &str,
    ) -> KanbanResult<Card> {
        with_fallback(
            "create_card",
            self.remote.create_card(dashboard_id, column_id, title).await,
            || self.local.create_card(dashboard_id, column_id, title),
        )
        .await
    }

    async fn update_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        card_id: &CardId,
        updates: &CardUpdate,
    ) -> KanbanResult<Card> {
        with_fallback(
            "update_card",
            self.remote
                .update_card(dashboard_id, column_id, card_id, updates)
                .await,
            || {
                self.local
                    .update_card(dashboard_id, column_id, card_id, updates)
            },
        )
        .await
    }

    async fn move_card(
        &self,
        dashboard_id: &DashboardId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        card_id: &CardId,
        new_index: usize,
    ) -> KanbanResult<()> {
        with_fallback(
            "move_card",
            self.remote
                .move_card(dashboard_id, from_column_id, to_column_id, card_id, new_index)
                .await,
            || {
                self.local
                    .move_card(dashboard_id, from_column_id, to_column_id, card_id, new_index)
            },
        )
        .await
    }
}
