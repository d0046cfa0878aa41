//! # Low-Stock Notifier
//!
//! Fans a low-stock alert out to every active administrator: one in-app notification each, then
//! an email. An admin who still has an unread alert for the same reagent is skipped, so repeated
//! withdrawals below the minimum don't pile up duplicates. Email is best-effort.

use crate::clients::{NotificationClient, ProfileClient};
use crate::error::Result;
use crate::mailer::{template, EmailMessage, Mailer};
use crate::model::{NotificationCreate, NotificationKind, ReagentSnapshot};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct LowStockNotifier {
    profiles: ProfileClient,
    notifications: NotificationClient,
    mailer: Arc<dyn Mailer>,
}

impl LowStockNotifier {
    pub fn new(
        profiles: ProfileClient,
        notifications: NotificationClient,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            profiles,
            notifications,
            mailer,
        }
    }

    /// Returns the number of admins considered, including the ones skipped because an unread
    /// alert was already outstanding.
    ///
    /// Store failures abort the call; email failures don't.
    #[instrument(skip(self, reagent), fields(reagent_id = %reagent.reagent_id))]
    pub async fn notify_low_stock(&self, reagent: &ReagentSnapshot) -> Result<usize> {
        let admins = self.profiles.active_admins().await?;
        if admins.is_empty() {
            info!("No admins to notify");
            return Ok(0);
        }

        let message = template::low_stock_message(reagent);
        let subject = template::low_stock_subject(reagent);
        let html = template::low_stock_html(reagent);

        for admin in &admins {
            let created = self
                .notifications
                .create_low_stock(NotificationCreate {
                    user_id: admin.id,
                    kind: NotificationKind::LowStock,
                    title: template::LOW_STOCK_TITLE.to_string(),
                    message: message.clone(),
                    reagent_id: Some(reagent.reagent_id),
                })
                .await?;

            let Some(notification_id) = created else {
                debug!(admin_id = %admin.id, "Unread alert outstanding, skipped");
                continue;
            };

            let email = EmailMessage {
                to: admin.email.clone(),
                subject: subject.clone(),
                html: html.clone(),
            };
            match self.mailer.send(&email).await {
                Ok(()) => {
                    if let Err(e) = self.notifications.mark_email_sent(notification_id).await {
                        warn!(%notification_id, error = %e, "Could not record email delivery");
                    }
                }
                Err(e) => {
                    warn!(admin_id = %admin.id, error = %e, "Low-stock email not delivered");
                }
            }
        }

        info!(admins = admins.len(), "Low-stock alert processed");
        Ok(admins.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::mailer::MemoryMailer;
    use crate::model::{Notification, NotificationId, Profile, ProfileId, ReagentId, Role};
    use actor_framework::mock::MockClient;
    use actor_framework::FrameworkError;
    use chrono::Utc;

    fn snapshot() -> ReagentSnapshot {
        ReagentSnapshot {
            reagent_id: ReagentId(1),
            name: "CBC Diluent".into(),
            category_name: "Hematology".into(),
            machine_name: None,
            current_stock: 4,
            minimum_stock: 5,
            unit: "bottles".into(),
        }
    }

    fn admin(id: u32) -> Profile {
        Profile {
            id: ProfileId(id),
            email: format!("admin{id}@lab.org"),
            full_name: format!("Admin {id}"),
            role: Role::Admin,
            phone: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn notification(id: u32) -> Notification {
        Notification {
            id: NotificationId(id),
            user_id: ProfileId(id),
            kind: NotificationKind::LowStock,
            title: "Low Stock Alert".into(),
            message: String::new(),
            reagent_id: Some(ReagentId(1)),
            is_read: false,
            email_sent: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn no_admins_means_no_work() {
        let mut profiles = MockClient::<Profile>::new();
        let notifications = MockClient::<Notification>::new();
        profiles.expect_list().return_ok(vec![]);

        let mailer = Arc::new(MemoryMailer::new());
        let notifier = LowStockNotifier::new(
            ProfileClient::new(profiles.client()),
            NotificationClient::new(notifications.client()),
            mailer.clone(),
        );

        assert_eq!(notifier.notify_low_stock(&snapshot()).await.unwrap(), 0);
        assert_eq!(mailer.attempts(), 0);
        profiles.verify();
        notifications.verify();
    }

    #[tokio::test]
    async fn skipped_admins_still_count() {
        let mut profiles = MockClient::<Profile>::new();
        let mut notifications = MockClient::<Notification>::new();
        profiles.expect_list().return_ok(vec![admin(1), admin(2)]);
        notifications
            .expect_create_unique()
            .return_ok(Some(NotificationId(1)));
        notifications
            .expect_update(NotificationId(1))
            .return_ok(notification(1));
        // Admin 2 already has an unread alert
        notifications.expect_create_unique().return_ok(None);

        let mailer = Arc::new(MemoryMailer::new());
        let notifier = LowStockNotifier::new(
            ProfileClient::new(profiles.client()),
            NotificationClient::new(notifications.client()),
            mailer.clone(),
        );

        assert_eq!(notifier.notify_low_stock(&snapshot()).await.unwrap(), 2);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "admin1@lab.org");
        assert_eq!(sent[0].subject, "⚠️ Low Stock Alert: CBC Diluent");
        profiles.verify();
        notifications.verify();
    }

    #[tokio::test]
    async fn email_failure_is_swallowed() {
        let mut profiles = MockClient::<Profile>::new();
        let mut notifications = MockClient::<Notification>::new();
        profiles.expect_list().return_ok(vec![admin(1)]);
        notifications
            .expect_create_unique()
            .return_ok(Some(NotificationId(1)));

        let mailer = Arc::new(MemoryMailer::new());
        mailer.fail_deliveries(true);
        let notifier = LowStockNotifier::new(
            ProfileClient::new(profiles.client()),
            NotificationClient::new(notifications.client()),
            mailer.clone(),
        );

        // No email_sent update is expected
        assert_eq!(notifier.notify_low_stock(&snapshot()).await.unwrap(), 1);
        assert_eq!(mailer.attempts(), 1);
        notifications.verify();
    }

    #[tokio::test]
    async fn store_failure_aborts() {
        let mut profiles = MockClient::<Profile>::new();
        let notifications = MockClient::<Notification>::new();
        profiles.expect_list().return_err(FrameworkError::ActorClosed);

        let notifier = LowStockNotifier::new(
            ProfileClient::new(profiles.client()),
            NotificationClient::new(notifications.client()),
            Arc::new(MemoryMailer::new()),
        );

        assert!(matches!(
            notifier.notify_low_stock(&snapshot()).await,
            Err(InventoryError::Store(_))
        ));
    }
}
