use crate::error::{InventoryError, Result};
use crate::model::{CategoryId, Machine, MachineCreate, MachineId, MachineUpdate};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Machine actor.
#[derive(Clone)]
pub struct MachineClient {
    inner: ResourceClient<Machine>,
}

#[async_trait]
impl ActorClient<Machine> for MachineClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<Machine> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        InventoryError::from(e)
    }
}

impl MachineClient {
    pub fn new(inner: ResourceClient<Machine>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_machine(&self, params: MachineCreate) -> Result<MachineId> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_machine(&self, id: MachineId, update: MachineUpdate) -> Result<Machine> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<Vec<Machine>> {
        self.list(Filter::new(|m: &Machine| m.is_active)).await
    }

    #[instrument(skip(self))]
    pub async fn active_for_category(&self, category_id: CategoryId) -> Result<Vec<Machine>> {
        self.list(Filter::new(move |m: &Machine| {
            m.is_active && m.category_id == category_id
        }))
        .await
    }
}
