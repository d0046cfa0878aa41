//! # Notification Inbox
//!
//! The signed-in user's notifications. Users only ever see and touch their own rows. Reading a
//! low-stock alert re-arms alerting for that reagent: the next withdrawal below the minimum will
//! notify again.

use crate::clients::NotificationClient;
use crate::error::{InventoryError, Result};
use crate::model::{Notification, NotificationId};
use crate::session::Session;
use actor_framework::ActorClient;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InboxService {
    notifications: NotificationClient,
}

impl InboxService {
    pub fn new(notifications: NotificationClient) -> Self {
        Self { notifications }
    }

    /// Newest first.
    pub async fn list(&self, session: &Session) -> Result<Vec<Notification>> {
        self.notifications.for_user(session.profile_id).await
    }

    pub async fn unread_count(&self, session: &Session) -> Result<usize> {
        Ok(self
            .notifications
            .unread_for_user(session.profile_id)
            .await?
            .len())
    }

    #[instrument(skip(self, session), fields(user_id = %session.profile_id))]
    pub async fn mark_read(&self, session: &Session, id: NotificationId) -> Result<Notification> {
        self.owned(session, id).await?;
        self.notifications.mark_read(id).await
    }

    /// Returns how many notifications changed.
    #[instrument(skip(self, session), fields(user_id = %session.profile_id))]
    pub async fn mark_all_read(&self, session: &Session) -> Result<usize> {
        let unread = self
            .notifications
            .unread_for_user(session.profile_id)
            .await?;
        for notification in &unread {
            self.notifications.mark_read(notification.id).await?;
        }
        debug!(count = unread.len(), "Marked all read");
        Ok(unread.len())
    }

    #[instrument(skip(self, session), fields(user_id = %session.profile_id))]
    pub async fn delete(&self, session: &Session, id: NotificationId) -> Result<()> {
        self.owned(session, id).await?;
        self.notifications.delete(id).await
    }

    async fn owned(&self, session: &Session, id: NotificationId) -> Result<Notification> {
        let notification = self
            .notifications
            .get(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        if notification.user_id != session.profile_id {
            return Err(InventoryError::Auth(format!(
                "{id} belongs to another user"
            )));
        }
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NotificationKind, ProfileId, Role};
    use actor_framework::mock::MockClient;
    use chrono::Utc;

    fn owned_by(user: u32) -> Notification {
        Notification {
            id: NotificationId(1),
            user_id: ProfileId(user),
            kind: NotificationKind::System,
            title: "Welcome".into(),
            message: String::new(),
            reagent_id: None,
            is_read: false,
            email_sent: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn other_users_notifications_are_off_limits() {
        let mut mock = MockClient::<Notification>::new();
        mock.expect_get(NotificationId(1)).return_ok(Some(owned_by(2)));
        mock.expect_get(NotificationId(1)).return_ok(Some(owned_by(2)));

        let inbox = InboxService::new(NotificationClient::new(mock.client()));
        let session = Session {
            profile_id: ProfileId(1),
            role: Role::Admin,
        };

        assert!(matches!(
            inbox.mark_read(&session, NotificationId(1)).await,
            Err(InventoryError::Auth(_))
        ));
        assert!(matches!(
            inbox.delete(&session, NotificationId(1)).await,
            Err(InventoryError::Auth(_))
        ));
        mock.verify();
    }
}
