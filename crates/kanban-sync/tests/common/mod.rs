#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    Card, CardId, CardUpdate, Column, ColumnId, Dashboard, DashboardId, DashboardUpdate,
};
use kanban_persistence::{MemoryMedium, SlotStore};
use kanban_sync::{BoardBackend, BoardStore, LocalBackend, SyncExecutor};
use tokio::sync::Notify;

pub const OWNER: &str = "user-1";

fn offline<T>() -> KanbanResult<T> {
    Err(KanbanError::Remote("connection refused".into()))
}

/// Remote that fails every call, as if the service were down.
pub struct UnreachableRemote;

#[async_trait]
impl BoardBackend for UnreachableRemote {
    async fn get_dashboards(&self) -> KanbanResult<Vec<Dashboard>> {
        offline()
    }

    async fn create_dashboard(&self, _: &str, _: &str) -> KanbanResult<Dashboard> {
        offline()
    }

    async fn update_dashboard(&self, _: &DashboardId, _: &DashboardUpdate) -> KanbanResult<Dashboard> {
        offline()
    }

    async fn create_column(&self, _: &DashboardId, _: &str) -> KanbanResult<Column> {
        offline()
    }

    async fn reorder_columns(&self, _: &DashboardId, _: &[ColumnId]) -> KanbanResult<()> {
        offline()
    }

    async fn create_card(&self, _: &DashboardId, _: &ColumnId, _: &str) -> KanbanResult<Card> {
        offline()
    }

    async fn update_card(
        &self,
        _: &DashboardId,
        _: &ColumnId,
        _: &CardId,
        _: &CardUpdate,
    ) -> KanbanResult<Card> {
        offline()
    }

    async fn move_card(
        &self,
        _: &DashboardId,
        _: &ColumnId,
        _: &ColumnId,
        _: &CardId,
        _: usize,
    ) -> KanbanResult<()> {
        offline()
    }
}

/// Serves a fixed dashboard list and holds every `move_card` until released,
/// then fails it.
pub struct GatedRemote {
    pub dashboards: Vec<Dashboard>,
    pub release: Arc<Notify>,
}

#[async_trait]
impl BoardBackend for GatedRemote {
    async fn get_dashboards(&self) -> KanbanResult<Vec<Dashboard>> {
        Ok(self.dashboards.clone())
    }

    async fn create_dashboard(&self, _: &str, _: &str) -> KanbanResult<Dashboard> {
        offline()
    }

    async fn update_dashboard(&self, _: &DashboardId, _: &DashboardUpdate) -> KanbanResult<Dashboard> {
        offline()
    }

    async fn create_column(&self, _: &DashboardId, _: &str) -> KanbanResult<Column> {
        offline()
    }

    async fn reorder_columns(&self, _: &DashboardId, _: &[ColumnId]) -> KanbanResult<()> {
        offline()
    }

    async fn create_card(&self, _: &DashboardId, _: &ColumnId, _: &str) -> KanbanResult<Card> {
        offline()
    }

    async fn update_card(
        &self,
        _: &DashboardId,
        _: &ColumnId,
        _: &CardId,
        _: &CardUpdate,
    ) -> KanbanResult<Card> {
        offline()
    }

    async fn move_card(
        &self,
        _: &DashboardId,
        _: &ColumnId,
        _: &ColumnId,
        _: &CardId,
        _: usize,
    ) -> KanbanResult<()> {
        self.release.notified().await;
        offline()
    }
}

pub type LocalSlot = Arc<SlotStore<MemoryMedium>>;
pub type OfflineStore = BoardStore<SyncExecutor<UnreachableRemote, LocalBackend<LocalSlot>>>;

/// A store whose remote is always down, backed by an in-memory local slot.
pub fn offline_store() -> (OfflineStore, LocalSlot) {
    let slot = Arc::new(SlotStore::new(MemoryMedium::new()));
    let executor = SyncExecutor::new(
        UnreachableRemote,
        LocalBackend::new(Arc::clone(&slot), OWNER),
    );
    (BoardStore::new(Arc::new(executor), OWNER), slot)
}

/// Create a dashboard through the store and open it.
pub async fn open_new_dashboard<B: BoardBackend + 'static>(
    store: &BoardStore<B>,
    title: &str,
) -> Dashboard {
    let dashboard = store
        .create_dashboard(title)
        .await
        .expect("dashboard created");
    store.select_dashboard(&dashboard.id).await;
    assert_eq!(store.snapshot().error, None);
    dashboard
}

pub fn column_id(store_columns: &[Column], title: &str) -> ColumnId {
    store_columns
        .iter()
        .find(|c| c.title == title)
        .map(|c| c.id.clone())
        .expect("column exists")
}
