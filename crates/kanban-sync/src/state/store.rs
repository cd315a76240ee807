use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use kanban_core::KanbanError;
use kanban_domain::placement;
use kanban_domain::{
    Card, CardId, CardUpdate, Column, ColumnId, Dashboard, DashboardId, DashboardUpdate,
};
use tokio::sync::watch;

use super::{BoardState, SyncHandle};
use crate::backend::BoardBackend;

/// Owns the observable [`BoardState`] and turns user intents into backend
/// calls.
///
/// Create and update intents are awaited and merged into state once the
/// backend answers. `move_card` and `reorder_columns` apply to the working
/// copy immediately and reconcile in a background task, restoring the exact
/// pre-intent columns if the backend ultimately fails.
///
/// The optimistic intents spawn onto the current tokio runtime and must be
/// called from within one.
pub struct BoardStore<B> {
    backend: Arc<B>,
    owner_id: String,
    state: Arc<watch::Sender<BoardState>>,
    /// Bumped whenever a dashboard is opened. A background revert only lands
    /// if the selection it started under is still current.
    selection: Arc<AtomicU64>,
}

impl<B: BoardBackend + 'static> BoardStore<B> {
    pub fn new(backend: Arc<B>, owner_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(BoardState::default());
        Self {
            backend,
            owner_id: owner_id.into(),
            state: Arc::new(state),
            selection: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn snapshot(&self) -> BoardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.state.subscribe()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    pub async fn load_dashboards(&self) {
        self.begin();
        let result = self.backend.get_dashboards().await;
        self.settle("load_dashboards", result, |s, dashboards| {
            s.dashboards = dashboards;
        });
    }

    /// Refresh the dashboard list and open `dashboard_id`, replacing the
    /// working columns. Pending reverts for the previous dashboard are
    /// dropped.
    pub async fn select_dashboard(&self, dashboard_id: &DashboardId) {
        self.begin();
        let result = self.backend.get_dashboards().await.and_then(|dashboards| {
            let current = dashboards
                .iter()
                .find(|d| &d.id == dashboard_id)
                .cloned()
                .ok_or_else(|| KanbanError::not_found("Dashboard", dashboard_id))?;
            Ok((dashboards, current))
        });
        let selection = Arc::clone(&self.selection);
        self.settle("select_dashboard", result, |s, (dashboards, current)| {
            selection.fetch_add(1, Ordering::SeqCst);
            s.dashboards = dashboards;
            s.columns = current.columns.clone();
            s.current_dashboard = Some(current);
        });
    }

    pub async fn create_dashboard(&self, title: &str) -> Option<Dashboard> {
        self.begin();
        let result = self.backend.create_dashboard(title, &self.owner_id).await;
        self.settle("create_dashboard", result, |s, dashboard| {
            s.dashboards.push(dashboard.clone());
            dashboard
        })
    }

    pub async fn update_dashboard(
        &self,
        dashboard_id: &DashboardId,
        updates: &DashboardUpdate,
    ) -> Option<Dashboard> {
        self.begin();
        let result = self.backend.update_dashboard(dashboard_id, updates).await;
        self.settle("update_dashboard", result, |s, dashboard| {
            for existing in s.dashboards.iter_mut().filter(|d| d.id == dashboard.id) {
                *existing = dashboard.clone();
            }
            if s.current_dashboard_id() == Some(&dashboard.id) {
                s.current_dashboard = Some(dashboard.clone());
            }
            dashboard
        })
    }

    pub async fn create_column(&self, title: &str) -> Option<Column> {
        let dashboard_id = self.require_dashboard()?;
        self.begin();
        let result = self.backend.create_column(&dashboard_id, title).await;
        self.settle("create_column", result, |s, mut column| {
            if s.current_dashboard_id() == Some(&dashboard_id) {
                // Local-only deletes leave the backend's numbering behind.
                column.order = s.columns.len() as i32;
                s.columns.push(column.clone());
                placement::renumber_columns(&mut s.columns);
            }
            column
        })
    }

    pub async fn create_card(&self, column_id: &ColumnId, title: &str) -> Option<Card> {
        let dashboard_id = self.require_dashboard()?;
        self.begin();
        let result = self
            .backend
            .create_card(&dashboard_id, column_id, title)
            .await;
        self.settle("create_card", result, |s, card| {
            if s.current_dashboard_id() == Some(&dashboard_id) {
                if let Some(column) = s.column_mut(column_id) {
                    column.upsert_card(card.clone());
                }
            }
            card
        })
    }

    pub async fn update_card(
        &self,
        column_id: &ColumnId,
        card_id: &CardId,
        updates: &CardUpdate,
    ) -> Option<Card> {
        let dashboard_id = self.require_dashboard()?;
        self.begin();
        let result = self
            .backend
            .update_card(&dashboard_id, column_id, card_id, updates)
            .await;
        self.settle("update_card", result, |s, card| {
            if s.current_dashboard_id() == Some(&dashboard_id) {
                if let Some(existing) = s.column_mut(column_id).and_then(|c| c.card_mut(card_id)) {
                    *existing = card.clone();
                }
            }
            card
        })
    }

    /// Move the card at `from_index` of `from_column_id` to `to_index` of
    /// `to_column_id`. Returns `None` when nothing was applied.
    pub fn move_card(
        &self,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        from_index: usize,
        to_index: usize,
    ) -> Option<SyncHandle> {
        let dashboard_id = self.require_dashboard()?;
        let mut applied = None;
        self.state.send_modify(|s| {
            let previous = s.columns.clone();
            let card_id = s
                .column(from_column_id)
                .and_then(|c| c.cards.get(from_index))
                .map(|card| card.id.clone());
            match placement::relocate_card(
                &mut s.columns,
                from_column_id,
                to_column_id,
                from_index,
                to_index,
            ) {
                Ok(_) => {
                    s.error = None;
                    applied = card_id.map(|id| (previous, id));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Rejected card move");
                    s.error = Some(err.to_string());
                }
            }
        });
        let (previous, card_id) = applied?;

        let backend = Arc::clone(&self.backend);
        let from = from_column_id.clone();
        let to = to_column_id.clone();
        Some(self.spawn_sync("move_card", previous, async move {
            backend
                .move_card(&dashboard_id, &from, &to, &card_id, to_index)
                .await
        }))
    }

    /// Put the listed columns first in the given order; unlisted columns
    /// follow in their current relative order.
    pub fn reorder_columns(&self, ordered_ids: &[ColumnId]) -> Option<SyncHandle> {
        let dashboard_id = self.require_dashboard()?;
        let mut applied = None;
        self.state.send_modify(|s| {
            let previous = s.columns.clone();
            match placement::reorder_columns(&mut s.columns, ordered_ids) {
                Ok(()) => {
                    s.error = None;
                    let order: Vec<ColumnId> = s.columns.iter().map(|c| c.id.clone()).collect();
                    applied = Some((previous, order));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Rejected column reorder");
                    s.error = Some(err.to_string());
                }
            }
        });
        let (previous, order) = applied?;

        let backend = Arc::clone(&self.backend);
        Some(self.spawn_sync("reorder_columns", previous, async move {
            backend.reorder_columns(&dashboard_id, &order).await
        }))
    }

    pub fn delete_column(&self, column_id: &ColumnId) {
        self.state.send_if_modified(|s| {
            let before = s.columns.len();
            s.columns.retain(|c| &c.id != column_id);
            if s.columns.len() == before {
                return false;
            }
            placement::renumber_columns(&mut s.columns);
            true
        });
    }

    /// Archiving removes the column from the working copy, same as delete.
    pub fn archive_column(&self, column_id: &ColumnId) {
        self.delete_column(column_id);
    }

    pub fn update_column(&self, column: Column) {
        self.state.send_if_modified(|s| match s.column_mut(&column.id) {
            Some(existing) => {
                *existing = column;
                true
            }
            None => false,
        });
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn settle<T, U>(
        &self,
        operation: &'static str,
        result: Result<T, KanbanError>,
        merge: impl FnOnce(&mut BoardState, T) -> U,
    ) -> Option<U> {
        match result {
            Ok(value) => {
                let mut merged = None;
                self.state.send_modify(|s| {
                    s.loading = false;
                    merged = Some(merge(s, value));
                });
                merged
            }
            Err(err) => {
                tracing::warn!(operation, error = %err, "Board operation failed");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(err.to_string());
                });
                None
            }
        }
    }

    fn require_dashboard(&self) -> Option<DashboardId> {
        let dashboard_id = self.state.borrow().current_dashboard_id().cloned();
        if dashboard_id.is_none() {
            let err = KanbanError::Validation("No dashboard selected".into());
            self.state.send_modify(|s| s.error = Some(err.to_string()));
        }
        dashboard_id
    }

    fn spawn_sync<F>(&self, operation: &'static str, previous: Vec<Column>, work: F) -> SyncHandle
    where
        F: Future<Output = Result<(), KanbanError>> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let selection = Arc::clone(&self.selection);
        let started_under = selection.load(Ordering::SeqCst);

        SyncHandle::new(tokio::spawn(async move {
            let result = work.await;
            if let Err(err) = &result {
                let reverted = state.send_if_modified(|s| {
                    if selection.load(Ordering::SeqCst) != started_under {
                        return false;
                    }
                    s.columns = previous;
                    s.error = Some(err.to_string());
                    true
                });
                if reverted {
                    tracing::warn!(operation, error = %err, "Reverted optimistic edit");
                } else {
                    tracing::info!(operation, error = %err, "Dashboard changed, dropping revert");
                }
            }
            result
        }))
    }
}
