//! # Machine Actor
//!
//! Owns the `machines` table. Whether a machine may belong to a category is checked by the
//! catalog service, which can see both tables.

use crate::error::{required, InventoryError};
use crate::model::{Machine, MachineCreate, MachineId, MachineUpdate};
use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
use async_trait::async_trait;

/// Creates a new Machine actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Machine>, ResourceClient<Machine>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl ActorEntity for Machine {
    type Id = MachineId;
    type Create = MachineCreate;
    type Update = MachineUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(id: MachineId, params: MachineCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: required("machine name", &params.name)?,
            category_id: params.category_id,
            description: params.description,
            is_active: true,
        })
    }

    async fn on_update(&mut self, update: MachineUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let name = update
            .name
            .as_deref()
            .map(|name| required("machine name", name))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(InventoryError::validation(
            "machines are deactivated, not deleted",
        ))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
