use super::{Command, CommandContext};
use crate::placement;
use crate::{Card, CardId, CardUpdate, ColumnId, DashboardId};
use kanban_core::{KanbanError, KanbanResult};

/// Create a new card at the end of a column
pub struct CreateCard {
    pub dashboard_id: DashboardId,
    pub column_id: ColumnId,
    pub title: String,
}

impl Command for CreateCard {
    type Output = Card;

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<Card> {
        let dashboard = context.dashboard_mut(&self.dashboard_id)?;
        if dashboard.column(&self.column_id).is_none() {
            return Err(KanbanError::not_found("Column", &self.column_id));
        }

        let number = dashboard.allocate_card_number();
        let card = Card::new(
            CardId::generate(),
            number,
            self.column_id.clone(),
            self.title.clone(),
        );
        if let Some(column) = dashboard.column_mut(&self.column_id) {
            column.cards.push(card.clone());
        }
        Ok(card)
    }

    fn description(&self) -> String {
        format!("Create card: '{}'", self.title)
    }
}

/// Update card properties (title, description, labels, etc.)
pub struct UpdateCard {
    pub dashboard_id: DashboardId,
    pub column_id: ColumnId,
    pub card_id: CardId,
    pub updates: CardUpdate,
}

impl Command for UpdateCard {
    type Output = Card;

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<Card> {
        let dashboard = context.dashboard_mut(&self.dashboard_id)?;
        let column = dashboard
            .column_mut(&self.column_id)
            .ok_or_else(|| KanbanError::not_found("Column", &self.column_id))?;
        let card = column
            .card_mut(&self.card_id)
            .ok_or_else(|| KanbanError::not_found("Card", &self.card_id))?;
        card.update(self.updates.clone());
        Ok(card.clone())
    }

    fn description(&self) -> String {
        format!("Update card {}", self.card_id)
    }
}

/// Move card to a position in another (or the same) column
pub struct MoveCard {
    pub dashboard_id: DashboardId,
    pub from_column_id: ColumnId,
    pub to_column_id: ColumnId,
    pub card_id: CardId,
    pub new_index: usize,
}

impl Command for MoveCard {
    type Output = ();

    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let dashboard = context.dashboard_mut(&self.dashboard_id)?;
        if dashboard.column(&self.to_column_id).is_none() {
            return Err(KanbanError::not_found("Column", &self.to_column_id));
        }
        let from_index = dashboard
            .column(&self.from_column_id)
            .ok_or_else(|| KanbanError::not_found("Column", &self.from_column_id))?
            .card_index(&self.card_id)
            .ok_or_else(|| KanbanError::not_found("Card", &self.card_id))?;

        placement::relocate_card(
            &mut dashboard.columns,
            &self.from_column_id,
            &self.to_column_id,
            from_index,
            self.new_index,
        )?;
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Move card {} from column {} to column {}",
            self.card_id, self.from_column_id, self.to_column_id
        )
    }
}
