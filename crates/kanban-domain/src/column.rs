use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::ids::{CardId, ColumnId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Zero-based position within the owning dashboard.
    pub order: i32,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Column {
    pub fn new(id: ColumnId, title: String, order: i32) -> Self {
        Self {
            id,
            title,
            order,
            cards: Vec::new(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn card_index(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| &c.id == card_id)
    }

    /// Replace the card with the same id, or append it when absent.
    pub fn upsert_card(&mut self, card: Card) {
        match self.card_mut(&card.id) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_by_id() {
        let column_id = ColumnId::new("todo");
        let mut column = Column::new(column_id.clone(), "To Do".into(), 0);
        let card = Card::new(CardId::new("a"), 1, column_id.clone(), "A".into());
        column.upsert_card(card.clone());

        let mut renamed = card;
        renamed.title = "A2".into();
        column.upsert_card(renamed);

        assert_eq!(column.cards.len(), 1);
        assert_eq!(column.cards[0].title, "A2");
        assert_eq!(column.card_index(&CardId::new("a")), Some(0));
    }
}
