use crate::catalog::CatalogService;
use crate::clients::{
    CategoryClient, MachineClient, NotificationClient, ProfileClient, ReagentClient,
    TransactionClient,
};
use crate::config::InventoryConfig;
use crate::dispatch::{AlertDispatcher, AlertQueue};
use crate::error::{InventoryError, Result};
use crate::inbox::InboxService;
use crate::ledger::StockLedger;
use crate::mailer::Mailer;
use crate::notifier::LowStockNotifier;
use crate::reports::ReportService;
use crate::session::IdentityService;
use crate::{
    category_actor, machine_actor, notification_actor, profile_actor, reagent_actor,
    transaction_actor,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Every actor and service of a running inventory.
pub struct InventorySystem {
    pub identity: IdentityService,
    pub catalog: CatalogService,
    pub ledger: StockLedger,
    pub notifier: LowStockNotifier,
    pub inbox: InboxService,
    pub reports: ReportService,
    pub alerts: AlertQueue,
    handles: Vec<JoinHandle<()>>,
}

impl InventorySystem {
    /// Start the system. Must be called inside a Tokio runtime.
    pub fn new(config: &InventoryConfig, mailer: Arc<dyn Mailer>) -> Self {
        let buffer = config.actor_buffer.max(1);

        // 1. Create actors (no dependencies yet)
        let (profile_actor, profile_client) = profile_actor::new(buffer);
        let (category_actor, category_client) = category_actor::new(buffer);
        let (machine_actor, machine_client) = machine_actor::new(buffer);
        let (reagent_actor, reagent_client) = reagent_actor::new(buffer);
        let (transaction_actor, transaction_client) = transaction_actor::new(buffer);
        let (notification_actor, notification_client) = notification_actor::new(buffer);
        let (dispatcher, alerts) = AlertDispatcher::new(&config.alerts);

        let profiles = ProfileClient::new(profile_client);
        let categories = CategoryClient::new(category_client);
        let machines = MachineClient::new(machine_client);
        let reagents = ReagentClient::new(reagent_client);
        let transactions = TransactionClient::new(transaction_client);
        let notifications = NotificationClient::new(notification_client);

        let notifier = LowStockNotifier::new(profiles.clone(), notifications.clone(), mailer);

        // 2. Start actors with their dependencies injected
        let handles = vec![
            tokio::spawn(profile_actor.run(())),
            tokio::spawn(category_actor.run(())),
            tokio::spawn(machine_actor.run(())),
            tokio::spawn(transaction_actor.run(())),
            tokio::spawn(notification_actor.run(())),
            tokio::spawn(reagent_actor.run(transactions.clone())),
            tokio::spawn(dispatcher.run(notifier.clone())),
        ];

        // 3. Services
        let identity = IdentityService::new(profiles.clone());
        let catalog = CatalogService::new(categories.clone(), machines.clone(), reagents.clone());
        let ledger = StockLedger::new(
            identity.clone(),
            catalog.clone(),
            reagents.clone(),
            alerts.clone(),
        );
        let inbox = InboxService::new(notifications);
        let reports = ReportService::new(
            transactions,
            reagents,
            categories,
            machines,
            profiles,
            config.report.limit,
        );

        info!(actors = handles.len(), "Inventory system started");

        Self {
            identity,
            catalog,
            ledger,
            notifier,
            inbox,
            reports,
            alerts,
            handles,
        }
    }

    /// Drain pending alerts, drop every client and wait for all tasks to finish.
    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down inventory system");
        // Pending alerts still need the actors, so let them finish first.
        self.alerts.flush().await?;

        drop(self.identity);
        drop(self.catalog);
        drop(self.ledger);
        drop(self.notifier);
        drop(self.inbox);
        drop(self.reports);
        drop(self.alerts);

        for handle in self.handles {
            handle
                .await
                .map_err(|e| InventoryError::Store(format!("actor task failed: {e}")))?;
        }

        info!("Inventory system shut down");
        Ok(())
    }
}
