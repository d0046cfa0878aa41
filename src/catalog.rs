//! # Catalog
//!
//! Categories, machines and reagent metadata. Mutations are admin-only; reads return active rows
//! sorted by name. Nothing here touches `current_stock`.

use crate::clients::{CategoryClient, MachineClient, ReagentClient};
use crate::error::{InventoryError, Result};
use crate::model::{
    Category, CategoryCreate, CategoryId, CategoryUpdate, Machine, MachineCreate, MachineId,
    MachineUpdate, Reagent, ReagentCreate, ReagentId, ReagentSnapshot, ReagentUpdate,
};
use crate::session::Session;
use actor_framework::{ActorClient, Filter};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Resolves a reagent id to an active reagent.
#[async_trait]
pub trait ReagentLookup: Send + Sync {
    async fn active_reagent(&self, id: ReagentId) -> Result<Reagent>;
}

#[derive(Clone)]
pub struct CatalogService {
    categories: CategoryClient,
    machines: MachineClient,
    reagents: ReagentClient,
}

#[async_trait]
impl ReagentLookup for CatalogService {
    async fn active_reagent(&self, id: ReagentId) -> Result<Reagent> {
        self.reagents.get_active(id).await
    }
}

impl CatalogService {
    pub fn new(
        categories: CategoryClient,
        machines: MachineClient,
        reagents: ReagentClient,
    ) -> Self {
        Self {
            categories,
            machines,
            reagents,
        }
    }

    // --- Categories ---

    #[instrument(skip(self, admin))]
    pub async fn create_category(
        &self,
        admin: &Session,
        params: CategoryCreate,
    ) -> Result<CategoryId> {
        admin.require_admin()?;
        let id = self.categories.create_category(params).await?;
        info!(%id, "Category created");
        Ok(id)
    }

    #[instrument(skip(self, admin))]
    pub async fn update_category(
        &self,
        admin: &Session,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category> {
        admin.require_admin()?;
        self.categories.update_category(id, update).await
    }

    #[instrument(skip(self, admin))]
    pub async fn deactivate_category(&self, admin: &Session, id: CategoryId) -> Result<Category> {
        self.update_category(
            admin,
            id,
            CategoryUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.categories.active().await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    // --- Machines ---

    #[instrument(skip(self, admin))]
    pub async fn create_machine(
        &self,
        admin: &Session,
        params: MachineCreate,
    ) -> Result<MachineId> {
        admin.require_admin()?;
        self.machine_category(params.category_id).await?;
        let id = self.machines.create_machine(params).await?;
        info!(%id, "Machine created");
        Ok(id)
    }

    #[instrument(skip(self, admin))]
    pub async fn update_machine(
        &self,
        admin: &Session,
        id: MachineId,
        update: MachineUpdate,
    ) -> Result<Machine> {
        admin.require_admin()?;
        if let Some(category_id) = update.category_id {
            self.machine_category(category_id).await?;
            let machine = self
                .machines
                .get(id)
                .await?
                .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
            if machine.category_id != category_id {
                self.ensure_no_reagents_on(id).await?;
            }
        }
        self.machines.update_machine(id, update).await
    }

    #[instrument(skip(self, admin))]
    pub async fn deactivate_machine(&self, admin: &Session, id: MachineId) -> Result<Machine> {
        admin.require_admin()?;
        self.machines
            .update_machine(
                id,
                MachineUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn list_machines(&self, category_id: Option<CategoryId>) -> Result<Vec<Machine>> {
        let mut machines = match category_id {
            Some(category_id) => self.machines.active_for_category(category_id).await?,
            None => self.machines.active().await?,
        };
        machines.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(machines)
    }

    // --- Reagents ---

    /// New reagents start with zero stock.
    #[instrument(skip(self, admin))]
    pub async fn create_reagent(
        &self,
        admin: &Session,
        params: ReagentCreate,
    ) -> Result<ReagentId> {
        admin.require_admin()?;
        self.active_category(params.category_id).await?;
        if let Some(machine_id) = params.machine_id {
            self.machine_in(machine_id, params.category_id).await?;
        }
        let id = self.reagents.create_reagent(params).await?;
        info!(%id, "Reagent created");
        Ok(id)
    }

    #[instrument(skip(self, admin))]
    pub async fn update_reagent(
        &self,
        admin: &Session,
        id: ReagentId,
        update: ReagentUpdate,
    ) -> Result<Reagent> {
        admin.require_admin()?;
        if let Some(Some(machine_id)) = update.machine_id {
            let reagent = self
                .reagents
                .get(id)
                .await?
                .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
            self.machine_in(machine_id, reagent.category_id).await?;
        }
        self.reagents.update_reagent(id, update).await
    }

    #[instrument(skip(self, admin))]
    pub async fn deactivate_reagent(&self, admin: &Session, id: ReagentId) -> Result<Reagent> {
        admin.require_admin()?;
        self.reagents
            .update_reagent(
                id,
                ReagentUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn list_reagents(
        &self,
        category_id: CategoryId,
        machine_id: Option<MachineId>,
    ) -> Result<Vec<Reagent>> {
        let mut reagents = self.reagents.active_in(category_id, machine_id).await?;
        reagents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(reagents)
    }

    /// Resolve category and machine names for an alert.
    pub async fn snapshot(&self, reagent: &Reagent) -> Result<ReagentSnapshot> {
        let category_name = self
            .categories
            .get(reagent.category_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| "Unknown".to_string());
        let machine_name = match reagent.machine_id {
            Some(machine_id) => self.machines.get(machine_id).await?.map(|m| m.name),
            None => None,
        };

        Ok(ReagentSnapshot {
            reagent_id: reagent.id,
            name: reagent.name.clone(),
            category_name,
            machine_name,
            current_stock: reagent.current_stock,
            minimum_stock: reagent.minimum_stock,
            unit: reagent.unit.clone(),
        })
    }

    async fn active_category(&self, id: CategoryId) -> Result<Category> {
        self.categories
            .get(id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }

    /// A category that machines can be filed under.
    async fn machine_category(&self, id: CategoryId) -> Result<Category> {
        let category = self.active_category(id).await?;
        if !category.has_machines {
            return Err(InventoryError::Validation(format!(
                "{} does not group reagents by machine",
                category.name
            )));
        }
        Ok(category)
    }

    /// A machine can only change category while no reagent, active or not, is filed under it.
    async fn ensure_no_reagents_on(&self, machine_id: MachineId) -> Result<()> {
        let attached = self
            .reagents
            .list(Filter::new(move |r: &Reagent| {
                r.machine_id == Some(machine_id)
            }))
            .await?;
        if !attached.is_empty() {
            return Err(InventoryError::Validation(format!(
                "{machine_id} still has {} reagent(s) filed under it",
                attached.len()
            )));
        }
        Ok(())
    }

    async fn machine_in(&self, machine_id: MachineId, category_id: CategoryId) -> Result<Machine> {
        let machine = self
            .machines
            .get(machine_id)
            .await?
            .filter(|m| m.is_active)
            .ok_or_else(|| InventoryError::NotFound(machine_id.to_string()))?;
        if machine.category_id != category_id {
            return Err(InventoryError::Validation(format!(
                "{machine_id} does not belong to {category_id}"
            )));
        }
        Ok(machine)
    }
}
