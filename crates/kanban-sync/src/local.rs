use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::commands::{
    Command, CommandContext, CreateCard, CreateColumn, CreateDashboard, MoveCard, ReorderColumns,
    UpdateCard, UpdateDashboard,
};
use kanban_domain::{
    Card, CardId, CardUpdate, Column, ColumnId, Dashboard, DashboardId, DashboardUpdate,
    STARTER_DASHBOARD_TITLE,
};
use kanban_persistence::LocalStore;

use crate::backend::BoardBackend;

/// Board backend that mutates the durable local collection.
///
/// Each operation loads the whole collection, runs one domain command and
/// saves the result. A failed command leaves the stored collection untouched.
pub struct LocalBackend<S> {
    store: S,
    owner_id: String,
}

impl<S: LocalStore> LocalBackend<S> {
    pub fn new(store: S, owner_id: impl Into<String>) -> Self {
        Self {
            store,
            owner_id: owner_id.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn run<C>(&self, command: C) -> KanbanResult<C::Output>
    where
        C: Command,
        C::Output: Send,
    {
        let mut collection = self.store.load().await;
        let output = {
            let mut context = CommandContext::new(&mut collection);
            command.execute(&mut context)?
        };
        self.store.save(&collection).await;
        tracing::debug!("Applied locally: {}", command.description());
        Ok(output)
    }
}

#[async_trait]
impl<S: LocalStore> BoardBackend for LocalBackend<S> {
    /// Lists stored dashboards. An empty store is seeded with a starter
    /// dashboard for the configured owner so a fresh install is usable.
    async fn get_dashboards(&self) -> KanbanResult<Vec<Dashboard>> {
        let mut collection = self.store.load().await;
        if collection.is_empty() {
            tracing::info!("Local store is empty, seeding starter dashboard");
            let starter = Dashboard::starter(STARTER_DASHBOARD_TITLE, &self.owner_id);
            collection.dashboards.push(starter);
            self.store.save(&collection).await;
        }
        Ok(collection.dashboards)
    }

    async fn create_dashboard(&self, title: &str, owner_id: &str) -> KanbanResult<Dashboard> {
        self.run(CreateDashboard {
            title: title.to_string(),
            owner_id: owner_id.to_string(),
        })
        .await
    }

    async fn update_dashboard(
        &self,
        dashboard_id: &DashboardId,
        updates: &DashboardUpdate,
    ) -> KanbanResult<Dashboard> {
        self.run(UpdateDashboard {
            dashboard_id: dashboard_id.clone(),
            updates: updates.clone(),
        })
        .await
    }

    async fn create_column(
        &self,
        dashboard_id: &DashboardId,
        title: &str,
    ) -> KanbanResult<Column> {
        self.run(CreateColumn {
            dashboard_id: dashboard_id.clone(),
            title: title.to_string(),
        })
        .await
    }

    async fn reorder_columns(
        &self,
        dashboard_id: &DashboardId,
        column_ids: &[ColumnId],
    ) -> KanbanResult<()> {
        self.run(ReorderColumns {
            dashboard_id: dashboard_id.clone(),
            column_ids: column_ids.to_vec(),
        })
        .await
    }

    async fn create_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        title: &str,
    ) -> KanbanResult<Card> {
        self.run(CreateCard {
            dashboard_id: dashboard_id.clone(),
            column_id: column_id.clone(),
            title: title.to_string(),
        })
        .await
    }

    async fn update_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        card_id: &CardId,
        updates: &CardUpdate,
    ) -> KanbanResult<Card> {
        self.run(UpdateCard {
            dashboard_id: dashboard_id.clone(),
            column_id: column_id.clone(),
            card_id: card_id.clone(),
            updates: updates.clone(),
        })
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
        self.run(MoveCard {
            dashboard_id: dashboard_id.clone(),
            from_column_id: from_column_id.clone(),
            to_column_id: to_column_id.clone(),
            card_id: card_id.clone(),
            new_index,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_core::KanbanError;
    use kanban_persistence::{MemoryMedium, SlotStore};

    fn backend() -> LocalBackend<SlotStore<MemoryMedium>> {
        LocalBackend::new(SlotStore::new(MemoryMedium::new()), "user-1")
    }

    #[tokio::test]
    async fn test_empty_store_seeds_starter_dashboard() {
        let backend = backend();
        let dashboards = backend.get_dashboards().await.unwrap();

        assert_eq!(dashboards.len(), 1);
        assert_eq!(dashboards[0].title, STARTER_DASHBOARD_TITLE);
        assert_eq!(dashboards[0].owner_ids, vec!["user-1".to_string()]);
        let titles: Vec<_> = dashboards[0].columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);

        let again = backend.get_dashboards().await.unwrap();
        assert_eq!(again, dashboards);
    }

    #[tokio::test]
    async fn test_created_card_is_persisted() {
        let backend = backend();
        let dashboard = backend.create_dashboard("Work", "user-1").await.unwrap();
        let column_id = dashboard.columns[0].id.clone();

        let card = backend
            .create_card(&dashboard.id, &column_id, "Ship it")
            .await
            .unwrap();

        let stored = backend.store().load().await;
        let column = &stored.dashboard(&dashboard.id).unwrap().columns[0];
        assert_eq!(column.cards, vec![card]);
    }

    #[tokio::test]
    async fn test_failed_command_leaves_store_unchanged() {
        let backend = backend();
        let dashboard = backend.create_dashboard("Work", "user-1").await.unwrap();
        let before = backend.store().load().await;

        let result = backend
            .create_card(&dashboard.id, &ColumnId::new("missing"), "Orphan")
            .await;

        assert!(matches!(result, Err(KanbanError::NotFound(_))));
        assert_eq!(backend.store().load().await, before);
    }

    #[tokio::test]
    async fn test_move_card_between_columns() {
        let backend = backend();
        let dashboard = backend.create_dashboard("Work", "user-1").await.unwrap();
        let todo = dashboard.columns[0].id.clone();
        let done = dashboard.columns[2].id.clone();
        let card = backend.create_card(&dashboard.id, &todo, "A").await.unwrap();

        backend
            .move_card(&dashboard.id, &todo, &done, &card.id, 0)
            .await
            .unwrap();

        let stored = backend.store().load().await;
        let stored = stored.dashboard(&dashboard.id).unwrap();
        assert!(stored.columns[0].cards.is_empty());
        assert_eq!(stored.columns[2].cards[0].id, card.id);
        assert_eq!(stored.columns[2].cards[0].column_id, done);
    }
}
