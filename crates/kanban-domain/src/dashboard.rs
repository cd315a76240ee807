use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::field_update::FieldUpdate;
use crate::ids::{ColumnId, DashboardId};

pub const STARTER_DASHBOARD_TITLE: &str = "My First Board";
const STARTER_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    pub allow_comments: bool,
    pub allow_invites: bool,
    pub allow_card_creation: bool,
    pub allow_column_creation: bool,
    /// Days from card creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_due_date: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: DashboardId,
    pub title: String,
    #[serde(default)]
    pub owner_ids: Vec<String>,
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<DashboardSettings>,
    #[serde(default = "default_next_card_number")]
    pub next_card_number: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_next_card_number() -> u64 {
    1
}

impl Dashboard {
    pub fn new(id: DashboardId, title: String, owner_id: &str) -> Self {
        Self {
            id,
            title,
            owner_ids: vec![owner_id.to_string()],
            members: Vec::new(),
            columns: Vec::new(),
            background: None,
            description: None,
            is_public: None,
            settings: None,
            next_card_number: 1,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// A dashboard pre-populated with the "To Do", "In Progress" and "Done" columns.
    pub fn starter(title: &str, owner_id: &str) -> Self {
        let mut dashboard = Self::new(DashboardId::generate(), title.to_string(), owner_id);
        dashboard.columns = STARTER_COLUMNS
            .iter()
            .enumerate()
            .map(|(order, name)| Column::new(ColumnId::generate(), name.to_string(), order as i32))
            .collect();
        dashboard
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == column_id)
    }

    /// Allocate the next card number.
    ///
    /// Never hands out a number at or below one already present on the board,
    /// so dashboards received from the remote without a counter stay monotonic.
    pub fn allocate_card_number(&mut self) -> u64 {
        let highest = self
            .columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .map(|card| card.number)
            .max()
            .unwrap_or(0);
        let number = self.next_card_number.max(highest + 1);
        self.next_card_number = number + 1;
        number
    }

    pub fn add_owner(&mut self, owner_id: &str) {
        if !self.owner_ids.iter().any(|o| o == owner_id) {
            self.owner_ids.push(owner_id.to_string());
        }
    }

    pub fn update(&mut self, updates: DashboardUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(owner_ids) = updates.owner_ids {
            self.owner_ids.clear();
            for owner in owner_ids {
                self.add_owner(&owner);
            }
        }
        if let Some(members) = updates.members {
            self.members = members;
        }
        updates.background.apply_to(&mut self.background);
        updates.description.apply_to(&mut self.description);
        updates.is_public.apply_to(&mut self.is_public);
        updates.settings.apply_to(&mut self.settings);
        self.updated_at = Some(Utc::now());
    }
}

/// Partial dashboard update. Columns are changed through their own operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<User>>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub background: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub description: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub is_public: FieldUpdate<bool>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub settings: FieldUpdate<DashboardSettings>,
}
