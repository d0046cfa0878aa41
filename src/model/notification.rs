use super::{ProfileId, ReagentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for in-app notifications.
    NotificationId,
    "notification"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LowStock,
    Expiry,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: ProfileId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub reagent_id: Option<ReagentId>,
    pub is_read: bool,
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// An outstanding low-stock alert for this user and reagent suppresses new ones.
    pub fn is_unread_low_stock(&self, user_id: ProfileId, reagent_id: ReagentId) -> bool {
        !self.is_read
            && self.kind == NotificationKind::LowStock
            && self.user_id == user_id
            && self.reagent_id == Some(reagent_id)
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub user_id: ProfileId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub reagent_id: Option<ReagentId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationUpdate {
    pub is_read: Option<bool>,
    pub email_sent: Option<bool>,
}
