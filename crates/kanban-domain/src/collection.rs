//! The full board collection as held by the durable local store.

use crate::dashboard::Dashboard;
use crate::ids::DashboardId;
use serde::{Deserialize, Serialize};

/// Every dashboard known to this client.
///
/// Fields use `#[serde(default)]` so a partially written slot still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCollection {
    #[serde(default)]
    pub dashboards: Vec<Dashboard>,
}

impl BoardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dashboards.is_empty()
    }

    pub fn dashboard(&self, id: &DashboardId) -> Option<&Dashboard> {
        self.dashboards.iter().find(|d| &d.id == id)
    }

    pub fn dashboard_mut(&mut self, id: &DashboardId) -> Option<&mut Dashboard> {
        self.dashboards.iter_mut().find(|d| &d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection() {
        let collection = BoardCollection::new();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_partial_deserialization() {
        let collection: BoardCollection = serde_json::from_str("{}").unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_lookup_by_id() {
        let dashboard = Dashboard::starter("Board", "u");
        let id = dashboard.id.clone();
        let mut collection = BoardCollection {
            dashboards: vec![dashboard],
        };
        assert!(collection.dashboard(&id).is_some());
        collection.dashboard_mut(&id).unwrap().title = "Renamed".into();
        assert_eq!(collection.dashboards[0].title, "Renamed");
        assert!(collection.dashboard(&DashboardId::new("missing")).is_none());
    }
}
