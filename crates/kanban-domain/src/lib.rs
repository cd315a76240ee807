pub mod card;
pub mod collection;
pub mod column;
pub mod commands;
pub mod dashboard;
pub mod field_update;
pub mod ids;
pub mod placement;

pub use card::{
    Attachment, AttachmentKind, Card, CardMember, CardUpdate, Checklist, ChecklistItem, Comment,
    Label,
};
pub use collection::BoardCollection;
pub use column::Column;
pub use dashboard::{Dashboard, DashboardSettings, DashboardUpdate, User, STARTER_DASHBOARD_TITLE};
pub use field_update::FieldUpdate;
pub use ids::{CardId, ColumnId, DashboardId};
