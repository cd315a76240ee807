use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{
    Card, CardId, CardUpdate, Column, ColumnId, Dashboard, DashboardId, DashboardUpdate,
};
use std::sync::Arc;

/// One board backend: the remote service, the local fallback, or the
/// executor that chains them.
///
/// Create and update operations return the authoritative post-mutation
/// entity; ordering operations return `()`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardBackend: Send + Sync {
    async fn get_dashboards(&self) -> KanbanResult<Vec<Dashboard>>;

    async fn create_dashboard(&self, title: &str, owner_id: &str) -> KanbanResult<Dashboard>;

    async fn update_dashboard(
        &self,
        dashboard_id: &DashboardId,
        updates: &DashboardUpdate,
    ) -> KanbanResult<Dashboard>;

    async fn create_column(&self, dashboard_id: &DashboardId, title: &str)
        -> KanbanResult<Column>;

    async fn reorder_columns(
        &self,
        dashboard_id: &DashboardId,
        column_ids: &[ColumnId],
    ) -> KanbanResult<()>;

    async fn create_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        title: &str,
    ) -> KanbanResult<Card>;

    async fn update_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        card_id: &CardId,
        updates: &CardUpdate,
    ) -> KanbanResult<Card>;

    async fn move_card(
        &self,
        dashboard_id: &DashboardId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        card_id: &CardId,
        new_index: usize,
    ) -> KanbanResult<()>;
}

#[async_trait]
impl<B: BoardBackend + ?Sized> BoardBackend for Arc<B> {
    async fn get_dashboards(&self) -> KanbanResult<Vec<Dashboard>> {
        (**self).get_dashboards().await
    }

    async fn create_dashboard(&self, title: &str, owner_id: &str) -> KanbanResult<Dashboard> {
        (**self).create_dashboard(title, owner_id).await
    }

    async fn update_dashboard(
        &self,
        dashboard_id: &DashboardId,
        updates: &DashboardUpdate,
    ) -> KanbanResult<Dashboard> {
        (**self).update_dashboard(dashboard_id, updates).await
    }

    async fn create_column(
        &self,
        dashboard_id: &DashboardId,
        title: &str,
    ) -> KanbanResult<Column> {
        (**self).create_column(dashboard_id, title).await
    }

    async fn reorder_columns(
        &self,
        dashboard_id: &DashboardId,
        column_ids: &[ColumnId],
    ) -> KanbanResult<()> {
        (**self).reorder_columns(dashboard_id, column_ids).await
    }

    async fn create_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        title: &str,
    ) -> KanbanResult<Card> {
        (**self).create_card(dashboard_id, column_id, title).await
    }

    async fn update_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        card_id: &CardId,
        updates: &CardUpdate,
    ) -> KanbanResult<Card> {
        (**self)
            .update_card(dashboard_id, column_id, card_id, updates)
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
        (**self)
            .move_card(dashboard_id, from_column_id, to_column_id, card_id, new_index)
            .await
    }
}
