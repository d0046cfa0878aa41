use crate::error::{InventoryError, Result};
use crate::model::{
    Notification, NotificationCreate, NotificationId, NotificationKind, NotificationUpdate,
    ProfileId,
};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Notification actor.
#[derive(Clone)]
pub struct NotificationClient {
    inner: ResourceClient<Notification>,
}

#[async_trait]
impl ActorClient<Notification> for NotificationClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<Notification> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        InventoryError::from(e)
    }
}

impl NotificationClient {
    pub fn new(inner: ResourceClient<Notification>) -> Self {
        Self { inner }
    }

    /// Inserts a low-stock notification unless the same user already has an unread one for the
    /// same reagent. Returns `None` when suppressed.
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn create_low_stock(
        &self,
        params: NotificationCreate,
    ) -> Result<Option<NotificationId>> {
        debug!("Sending request");
        let reagent_id = params.reagent_id.ok_or_else(|| {
            InventoryError::validation("low-stock notifications need a reagent")
        })?;
        let user_id = params.user_id;
        let params = NotificationCreate {
            kind: NotificationKind::LowStock,
            ..params
        };
        self.inner
            .create_unique(
                params,
                Filter::new(move |n: &Notification| n.is_unread_low_stock(user_id, reagent_id)),
            )
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn mark_email_sent(&self, id: NotificationId) -> Result<Notification> {
        debug!("Sending request");
        self.update_flags(
            id,
            NotificationUpdate {
                email_sent: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: NotificationId) -> Result<Notification> {
        debug!("Sending request");
        self.update_flags(
            id,
            NotificationUpdate {
                is_read: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: ProfileId) -> Result<Vec<Notification>> {
        let mut rows = self
            .list(Filter::new(move |n: &Notification| n.user_id == user_id))
            .await?;
        rows.reverse();
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn unread_for_user(&self, user_id: ProfileId) -> Result<Vec<Notification>> {
        self.list(Filter::new(move |n: &Notification| {
            n.user_id == user_id && !n.is_read
        }))
        .await
    }

    async fn update_flags(
        &self,
        id: NotificationId,
        update: NotificationUpdate,
    ) -> Result<Notification> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
