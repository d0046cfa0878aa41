//! # Transaction Actor
//!
//! Owns the append-only `stock_transactions` table. Rows are created by the reagent actor while it
//! holds the reagent's stock counter, so `previous_stock` always matches the counter at write
//! time. Updates and deletes are refused.

use crate::error::InventoryError;
use crate::model::{StockMovement, StockTransaction, TransactionId};
use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;

/// Creates a new Transaction actor and its client.
pub fn new(
    buffer_size: usize,
) -> (ResourceActor<StockTransaction>, ResourceClient<StockTransaction>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl ActorEntity for StockTransaction {
    type Id = TransactionId;
    type Create = StockMovement;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(id: TransactionId, params: StockMovement) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(InventoryError::validation(
                "quantity must be greater than zero",
            ));
        }
        if params.kind.apply(params.previous_stock, params.quantity) != Some(params.new_stock) {
            return Err(InventoryError::Validation(format!(
                "{} of {} does not take stock from {} to {}",
                params.kind, params.quantity, params.previous_stock, params.new_stock
            )));
        }

        Ok(Self {
            id,
            reagent_id: params.reagent_id,
            user_id: params.user_id,
            kind: params.kind,
            quantity: params.quantity,
            previous_stock: params.previous_stock,
            new_stock: params.new_stock,
            reason: params.reason,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(InventoryError::validation("stock transactions are immutable"))
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(InventoryError::validation("stock transactions are immutable"))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProfileId, ReagentId, TransactionKind};

    fn movement(kind: TransactionKind, quantity: u32, previous: u32, new: u32) -> StockMovement {
        StockMovement {
            reagent_id: ReagentId(1),
            user_id: ProfileId(1),
            kind,
            quantity,
            previous_stock: previous,
            new_stock: new,
            reason: None,
        }
    }

    #[test]
    fn entries_must_balance() {
        assert!(StockTransaction::from_create_params(
            TransactionId(1),
            movement(TransactionKind::Withdraw, 6, 10, 4)
        )
        .is_ok());
        assert!(StockTransaction::from_create_params(
            TransactionId(1),
            movement(TransactionKind::Add, 6, 10, 4)
        )
        .is_err());
        assert!(StockTransaction::from_create_params(
            TransactionId(1),
            movement(TransactionKind::Add, 0, 4, 4)
        )
        .is_err());
    }

    #[tokio::test]
    async fn log_is_append_only() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        let id = client
            .create(movement(TransactionKind::Add, 20, 4, 24))
            .await
            .unwrap();

        assert!(client.update(id, ()).await.is_err());
        assert!(client.delete(id).await.is_err());

        let row = client.get(id).await.unwrap().unwrap();
        assert_eq!((row.previous_stock, row.new_stock), (4, 24));
    }
}
