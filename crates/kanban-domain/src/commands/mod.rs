use kanban_core::{KanbanError, KanbanResult};

use crate::{BoardCollection, Dashboard, DashboardId};

pub mod card_commands;
pub mod column_commands;
pub mod dashboard_commands;

pub use card_commands::*;
pub use column_commands::*;
pub use dashboard_commands::*;

/// A board mutation applied in place to a loaded collection.
///
/// Commands locate their targets by identity and fail with
/// `KanbanError::NotFound` before touching anything when a target is absent.
pub trait Command: Send + Sync {
    type Output;

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<Self::Output>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub collection: &'a mut BoardCollection,
}

impl<'a> CommandContext<'a> {
    pub fn new(collection: &'a mut BoardCollection) -> Self {
        Self { collection }
    }

    pub fn dashboard_mut(&mut self, id: &DashboardId) -> KanbanResult<&mut Dashboard> {
        self.collection
            .dashboard_mut(id)
            .ok_or_else(|| KanbanError::not_found("Dashboard", id))
    }
}
