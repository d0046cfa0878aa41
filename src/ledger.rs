//! # Stock Ledger
//!
//! The only way stock changes. A call resolves the acting user, checks their capability, looks
//! the reagent up through [`ReagentLookup`], and sends a single `RecordMovement` action to the
//! reagent's actor, which appends the ledger entry and moves the counter in one step (see
//! [`crate::reagent_actor`]).
//!
//! A withdrawal that leaves the reagent at or below its minimum queues a low-stock alert. The
//! alert is fire-and-forget: the movement has already happened and stays recorded whatever
//! becomes of the alert.

use crate::catalog::{CatalogService, ReagentLookup};
use crate::clients::ReagentClient;
use crate::dispatch::AlertQueue;
use crate::error::{InventoryError, Result};
use crate::model::{ProfileId, ReagentId, TransactionKind};
use crate::reagent_actor::MovementRequest;
use crate::session::IdentityService;
use tracing::{info, instrument, warn};

pub use crate::reagent_actor::{StockReceipt, StockReconciliation};

#[derive(Clone)]
pub struct StockLedger {
    identity: IdentityService,
    catalog: CatalogService,
    reagents: ReagentClient,
    alerts: AlertQueue,
}

impl StockLedger {
    pub fn new(
        identity: IdentityService,
        catalog: CatalogService,
        reagents: ReagentClient,
        alerts: AlertQueue,
    ) -> Self {
        Self {
            identity,
            catalog,
            reagents,
            alerts,
        }
    }

    /// Withdrawals are open to every active user; additions need an administrator.
    #[instrument(skip(self, reason))]
    pub async fn record_transaction(
        &self,
        reagent_id: ReagentId,
        actor_id: ProfileId,
        kind: TransactionKind,
        quantity: i64,
        reason: Option<String>,
    ) -> Result<StockReceipt> {
        let session = self.identity.authenticate(actor_id).await?;
        if kind == TransactionKind::Add {
            session.require_admin()?;
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                InventoryError::Validation(format!(
                    "quantity must be a positive whole number, got {quantity}"
                ))
            })?;

        // A concurrent deactivation can still win; the reagent actor has the final say.
        self.catalog.active_reagent(reagent_id).await?;

        let receipt = self
            .reagents
            .record_movement(
                reagent_id,
                MovementRequest {
                    user_id: session.profile_id,
                    kind,
                    quantity,
                    reason,
                },
            )
            .await?;

        if kind == TransactionKind::Withdraw && receipt.low_stock {
            self.raise_alert(&receipt).await;
        }
        Ok(receipt)
    }

    /// Compare a reagent's counter with a replay of its ledger. Admin only, read-only.
    #[instrument(skip(self))]
    pub async fn reconcile(
        &self,
        actor_id: ProfileId,
        reagent_id: ReagentId,
    ) -> Result<StockReconciliation> {
        self.identity.authenticate(actor_id).await?.require_admin()?;
        let report = self.reagents.reconcile(reagent_id).await?;
        if !report.is_consistent() {
            warn!(
                recorded = report.recorded_stock,
                derived = report.derived_stock,
                "Stock counter disagrees with the ledger"
            );
        }
        Ok(report)
    }

    async fn raise_alert(&self, receipt: &StockReceipt) {
        let reagent_id = receipt.reagent.id;
        let snapshot = match self.catalog.snapshot(&receipt.reagent).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(%reagent_id, error = %e, "Low-stock alert dropped, snapshot failed");
                return;
            }
        };

        match self.alerts.submit(snapshot) {
            Ok(()) => info!(
                %reagent_id,
                new_stock = receipt.new_stock,
                minimum_stock = receipt.reagent.minimum_stock,
                "Low-stock alert queued"
            ),
            Err(e) => warn!(%reagent_id, error = %e, "Low-stock alert not queued"),
        }
    }
}
