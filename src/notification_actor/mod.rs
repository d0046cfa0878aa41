//! # Notification Actor
//!
//! Owns the `notifications` table. The "one unread low-stock alert per admin and reagent" rule
//! is enforced at insert time through `create_unique`, so two alerts racing for the same pair
//! can't both land.

use crate::error::{required, InventoryError};
use crate::model::{Notification, NotificationCreate, NotificationId, NotificationUpdate};
use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;

/// Creates a new Notification actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Notification>, ResourceClient<Notification>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl ActorEntity for Notification {
    type Id = NotificationId;
    type Create = NotificationCreate;
    type Update = NotificationUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(
        id: NotificationId,
        params: NotificationCreate,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            user_id: params.user_id,
            kind: params.kind,
            title: required("title", &params.title)?,
            message: params.message,
            reagent_id: params.reagent_id,
            is_read: false,
            email_sent: false,
            created_at: Utc::now(),
        })
    }

    async fn on_update(
        &mut self,
        update: NotificationUpdate,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        if let Some(is_read) = update.is_read {
            self.is_read = is_read;
        }
        if let Some(email_sent) = update.email_sent {
            self.email_sent = email_sent;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
