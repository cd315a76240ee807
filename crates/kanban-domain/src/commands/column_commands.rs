use super::{Command, CommandContext};
use crate::placement;
use crate::{Column, ColumnId, DashboardId};
use kanban_core::KanbanResult;

/// Append a new column at the end of a dashboard
pub struct CreateColumn {
    pub dashboard_id: DashboardId,
    pub title: String,
}

impl Command for CreateColumn {
    type Output = Column;

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<Column> {
        let dashboard = context.dashboard_mut(&self.dashboard_id)?;
        let column = Column::new(
            ColumnId::generate(),
            self.title.clone(),
            dashboard.columns.len() as i32,
        );
        dashboard.columns.push(column.clone());
        Ok(column)
    }

    fn description(&self) -> String {
        format!("Create column: '{}'", self.title)
    }
}

/// Rewrite column order to follow the given identity list
pub struct ReorderColumns {
    pub dashboard_id: DashboardId,
    pub column_ids: Vec<ColumnId>,
}

impl Command for ReorderColumns {
    type Output = ();

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let dashboard = context.dashboard_mut(&self.dashboard_id)?;
        placement::reorder_columns(&mut dashboard.columns, &self.column_ids)
    }

    fn description(&self) -> String {
        format!(
            "Reorder {} columns of dashboard {}",
            self.column_ids.len(),
            self.dashboard_id
        )
    }
}
