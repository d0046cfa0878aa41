#![allow(dead_code)]

use lab_inventory::config::InventoryConfig;
use lab_inventory::lifecycle::InventorySystem;
use lab_inventory::mailer::MemoryMailer;
use lab_inventory::model::{
    CategoryCreate, CategoryId, MachineCreate, MachineId, ProfileId, ReagentCreate, ReagentId,
    ReagentUpdate, Role, TransactionKind,
};
use lab_inventory::session::{NewUser, Session};
use std::sync::Arc;

/// A running system with one admin, one technician and a Hematology category with one analyser.
pub struct Lab {
    pub system: InventorySystem,
    pub mailer: Arc<MemoryMailer>,
    pub admin_id: ProfileId,
    pub admin: Session,
    pub tech_id: ProfileId,
    pub tech: Session,
    pub hematology: CategoryId,
    pub analyser: MachineId,
}

pub fn new_user(name: &str, email: &str, role: Role) -> NewUser {
    NewUser {
        full_name: name.to_string(),
        email: email.to_string(),
        role: Some(role),
        phone: None,
    }
}

pub async fn start() -> Lab {
    start_with(InventoryConfig::default()).await
}

pub async fn start_with(mut config: InventoryConfig) -> Lab {
    config.alerts.retry_backoff_ms = 0;

    let mailer = Arc::new(MemoryMailer::new());
    let system = InventorySystem::new(&config, mailer.clone());

    let admin_id = system
        .identity
        .bootstrap_admin(new_user("Head of Lab", "head@lab.org", Role::Admin))
        .await
        .unwrap();
    let admin = system.identity.authenticate(admin_id).await.unwrap();

    let tech_id = system
        .identity
        .create_user(&admin, new_user("Ana Ruiz", "ana@lab.org", Role::Technician))
        .await
        .unwrap();
    let tech = system.identity.authenticate(tech_id).await.unwrap();

    let hematology = system
        .catalog
        .create_category(
            &admin,
            CategoryCreate {
                name: "Hematology".into(),
                description: None,
                has_machines: true,
                color: "#dc2626".into(),
            },
        )
        .await
        .unwrap();
    let analyser = system
        .catalog
        .create_machine(
            &admin,
            MachineCreate {
                name: "Sysmex XN-1000".into(),
                category_id: hematology,
                description: None,
            },
        )
        .await
        .unwrap();

    Lab {
        system,
        mailer,
        admin_id,
        admin,
        tech_id,
        tech,
        hematology,
        analyser,
    }
}

impl Lab {
    /// A reagent on the analyser, restocked by the admin to `stock`.
    pub async fn reagent(&self, name: &str, minimum_stock: u32, stock: u32) -> ReagentId {
        let id = self
            .system
            .catalog
            .create_reagent(
                &self.admin,
                ReagentCreate {
                    name: name.into(),
                    category_id: self.hematology,
                    machine_id: Some(self.analyser),
                    unit: "bottles".into(),
                    minimum_stock,
                    storage_condition: "Room temperature".into(),
                    expiry_date: None,
                    lot_number: None,
                    remarks: None,
                },
            )
            .await
            .unwrap();
        if stock > 0 {
            self.system
                .ledger
                .record_transaction(id, self.admin_id, TransactionKind::Add, stock.into(), None)
                .await
                .unwrap();
        }
        id
    }

    pub async fn stock(&self, id: ReagentId) -> u32 {
        use lab_inventory::catalog::ReagentLookup;
        self.system
            .catalog
            .active_reagent(id)
            .await
            .unwrap()
            .current_stock
    }

    pub async fn deactivate(&self, id: ReagentId) {
        self.system
            .catalog
            .update_reagent(
                &self.admin,
                id,
                ReagentUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    pub async fn withdraw(
        &self,
        id: ReagentId,
        quantity: i64,
    ) -> lab_inventory::Result<lab_inventory::ledger::StockReceipt> {
        self.system
            .ledger
            .record_transaction(id, self.tech_id, TransactionKind::Withdraw, quantity, None)
            .await
    }
}
