mod handle;
mod store;

pub use handle::SyncHandle;
pub use store::BoardStore;

use kanban_domain::{Column, ColumnId, Dashboard, DashboardId};
use serde::Serialize;

/// Snapshot of everything a board view renders.
///
/// `columns` is the working copy of the open dashboard's columns. Optimistic
/// edits land here first and are reverted here when they fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub dashboards: Vec<Dashboard>,
    pub current_dashboard: Option<Dashboard>,
    pub columns: Vec<Column>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BoardState {
    pub fn current_dashboard_id(&self) -> Option<&DashboardId> {
        self.current_dashboard.as_ref().map(|d| &d.id)
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == column_id)
    }
}
