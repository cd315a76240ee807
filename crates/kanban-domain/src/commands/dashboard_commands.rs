use super::{Command, CommandContext};
use crate::{Dashboard, DashboardId, DashboardUpdate};
use kanban_core::KanbanResult;

/// Create a dashboard with the default column set
pub struct CreateDashboard {
    pub title: String,
    pub owner_id: String,
}

impl Command for CreateDashboard {
    type Output = Dashboard;

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<Dashboard> {
        let dashboard = Dashboard::starter(&self.title, &self.owner_id);
        context.collection.dashboards.push(dashboard.clone());
        Ok(dashboard)
    }

    fn description(&self) -> String {
        format!("Create dashboard: '{}'", self.title)
    }
}

pub struct UpdateDashboard {
    pub dashboard_id: DashboardId,
    pub updates: DashboardUpdate,
}

impl Command for UpdateDashboard {
    type Output = Dashboard;

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<Dashboard> {
        let dashboard = context.dashboard_mut(&self.dashboard_id)?;
        dashboard.update(self.updates.clone());
        Ok(dashboard.clone())
    }

    fn description(&self) -> String {
        format!("Update dashboard {}", self.dashboard_id)
    }
}
