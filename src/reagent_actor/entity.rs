use super::actions::{
    MovementRequest, ReagentAction, ReagentActionResult, StockReceipt, StockReconciliation,
};
use crate::clients::TransactionClient;
use crate::error::{required, InventoryError};
use crate::model::{
    Reagent, ReagentCreate, ReagentId, ReagentUpdate, StockMovement, TransactionKind,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

#[async_trait]
impl ActorEntity for Reagent {
    type Id = ReagentId;
    type Create = ReagentCreate;
    type Update = ReagentUpdate;
    type Action = ReagentAction;
    type ActionResult = ReagentActionResult;
    type Context = TransactionClient;
    type Error = InventoryError;

    // New reagents always start empty; stock arrives through an `add` movement.
    fn from_create_params(id: ReagentId, params: ReagentCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: required("reagent name", &params.name)?,
            category_id: params.category_id,
            machine_id: params.machine_id,
            unit: required("unit", &params.unit)?,
            current_stock: 0,
            minimum_stock: params.minimum_stock,
            storage_condition: params.storage_condition,
            expiry_date: params.expiry_date,
            lot_number: params.lot_number,
            remarks: params.remarks,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    async fn on_update(
        &mut self,
        update: ReagentUpdate,
        _ctx: &TransactionClient,
    ) -> Result<(), Self::Error> {
        let name = update
            .name
            .as_deref()
            .map(|name| required("reagent name", name))
            .transpose()?;
        let unit = update
            .unit
            .as_deref()
            .map(|unit| required("unit", unit))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(unit) = unit {
            self.unit = unit;
        }
        if let Some(machine_id) = update.machine_id {
            self.machine_id = machine_id;
        }
        if let Some(minimum_stock) = update.minimum_stock {
            self.minimum_stock = minimum_stock;
        }
        if let Some(storage_condition) = update.storage_condition {
            self.storage_condition = storage_condition;
        }
        if let Some(expiry_date) = update.expiry_date {
            self.expiry_date = Some(expiry_date);
        }
        if let Some(lot_number) = update.lot_number {
            self.lot_number = Some(lot_number);
        }
        if let Some(remarks) = update.remarks {
            self.remarks = Some(remarks);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &TransactionClient) -> Result<(), Self::Error> {
        Err(InventoryError::validation(
            "reagents with a ledger are deactivated, not deleted",
        ))
    }

    async fn handle_action(
        &mut self,
        action: ReagentAction,
        transactions: &TransactionClient,
    ) -> Result<ReagentActionResult, Self::Error> {
        match action {
            ReagentAction::RecordMovement(movement) => self
                .record_movement(movement, transactions)
                .await
                .map(ReagentActionResult::RecordMovement),
            ReagentAction::Reconcile => self
                .reconcile(transactions)
                .await
                .map(ReagentActionResult::Reconcile),
        }
    }
}

impl Reagent {
    async fn record_movement(
        &mut self,
        movement: MovementRequest,
        transactions: &TransactionClient,
    ) -> Result<StockReceipt, InventoryError> {
        if movement.quantity == 0 {
            return Err(InventoryError::validation(
                "quantity must be greater than zero",
            ));
        }
        if !self.is_active {
            return Err(InventoryError::NotFound(format!("{} is inactive", self.id)));
        }

        let previous_stock = self.current_stock;
        let new_stock = movement
            .kind
            .apply(previous_stock, movement.quantity)
            .ok_or_else(|| match movement.kind {
                TransactionKind::Withdraw => InventoryError::InsufficientStock {
                    requested: movement.quantity,
                    available: previous_stock,
                },
                TransactionKind::Add => {
                    InventoryError::validation("stock level would overflow")
                }
            })?;

        let reason = movement
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| movement.kind.default_reason().to_string());

        // The counter only moves once the ledger entry exists.
        let transaction_id = transactions
            .append(StockMovement {
                reagent_id: self.id,
                user_id: movement.user_id,
                kind: movement.kind,
                quantity: movement.quantity,
                previous_stock,
                new_stock,
                reason: Some(reason),
            })
            .await?;
        self.current_stock = new_stock;

        info!(
            reagent_id = %self.id,
            %transaction_id,
            kind = %movement.kind,
            previous_stock,
            new_stock,
            "Stock moved"
        );

        Ok(StockReceipt {
            transaction_id,
            kind: movement.kind,
            quantity: movement.quantity,
            previous_stock,
            new_stock,
            low_stock: self.is_low_stock(),
            reagent: self.clone(),
        })
    }

    async fn reconcile(
        &self,
        transactions: &TransactionClient,
    ) -> Result<StockReconciliation, InventoryError> {
        let entries = transactions.for_reagent(self.id).await?;
        let derived_stock = entries
            .iter()
            .map(|entry| match entry.kind {
                TransactionKind::Add => i64::from(entry.quantity),
                TransactionKind::Withdraw => -i64::from(entry.quantity),
            })
            .sum();

        Ok(StockReconciliation {
            reagent_id: self.id,
            recorded_stock: self.current_stock,
            derived_stock,
            transaction_count: entries.len(),
        })
    }
}
