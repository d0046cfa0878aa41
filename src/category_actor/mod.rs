//! # Category Actor
//!
//! Owns the `categories` table. Soft delete only.

use crate::error::{required, InventoryError};
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
use async_trait::async_trait;

/// Creates a new Category actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Category>, ResourceClient<Category>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl ActorEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: required("category name", &params.name)?,
            description: params.description,
            has_machines: params.has_machines,
            color: params.color,
            is_active: true,
        })
    }

    async fn on_update(&mut self, update: CategoryUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let name = update
            .name
            .as_deref()
            .map(|name| required("category name", name))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(has_machines) = update.has_machines {
            self.has_machines = has_machines;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(InventoryError::validation(
            "categories are deactivated, not deleted",
        ))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
