//! # Reagent Client
//!
//! High-level API for the Reagent actor: catalog reads and writes, plus the stock actions.
use crate::error::{InventoryError, Result};
use crate::model::{CategoryId, MachineId, Reagent, ReagentCreate, ReagentId, ReagentUpdate};
use crate::reagent_actor::{
    MovementRequest, ReagentAction, ReagentActionResult, StockReceipt, StockReconciliation,
};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Reagent actor.
#[derive(Clone)]
pub struct ReagentClient {
    inner: ResourceClient<Reagent>,
}

#[async_trait]
impl ActorClient<Reagent> for ReagentClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<Reagent> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        InventoryError::from(e)
    }
}

impl ReagentClient {
    pub fn new(inner: ResourceClient<Reagent>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_reagent(&self, params: ReagentCreate) -> Result<ReagentId> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_reagent(&self, id: ReagentId, update: ReagentUpdate) -> Result<Reagent> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Look up an active reagent. Missing and inactive reagents are both `NotFound`.
    #[instrument(skip(self))]
    pub async fn get_active(&self, id: ReagentId) -> Result<Reagent> {
        self.get(id)
            .await?
            .filter(|r| r.is_active)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<Vec<Reagent>> {
        self.list(Filter::new(|r: &Reagent| r.is_active)).await
    }

    /// Active reagents in a category, optionally narrowed to one machine.
    #[instrument(skip(self))]
    pub async fn active_in(
        &self,
        category_id: CategoryId,
        machine_id: Option<MachineId>,
    ) -> Result<Vec<Reagent>> {
        self.list(Filter::new(move |r: &Reagent| {
            r.is_active
                && r.category_id == category_id
                && machine_id.map_or(true, |m| r.machine_id == Some(m))
        }))
        .await
    }

    /// Record one stock movement. See [`crate::reagent_actor`] for the guarantees.
    #[instrument(skip(self, movement), fields(kind = %movement.kind, quantity = movement.quantity))]
    pub async fn record_movement(
        &self,
        id: ReagentId,
        movement: MovementRequest,
    ) -> Result<StockReceipt> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ReagentAction::RecordMovement(movement))
            .await
            .map_err(Self::map_error)?
        {
            ReagentActionResult::RecordMovement(receipt) => Ok(receipt),
            other => Err(InventoryError::Store(format!(
                "unexpected reply to RecordMovement: {other:?}"
            ))),
        }
    }

    /// Replay the ledger for `id` and compare it with the stored counter. Read-only.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, id: ReagentId) -> Result<StockReconciliation> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ReagentAction::Reconcile)
            .await
            .map_err(Self::map_error)?
        {
            ReagentActionResult::Reconcile(report) => Ok(report),
            other => Err(InventoryError::Store(format!(
                "unexpected reply to Reconcile: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProfileId, TransactionId, TransactionKind};
    use actor_framework::mock::{create_mock_client, expect_action, MockClient};
    use chrono::Utc;

    fn reagent(current_stock: u32, is_active: bool) -> Reagent {
        Reagent {
            id: ReagentId(1),
            name: "Lyse".into(),
            category_id: CategoryId(1),
            machine_id: None,
            unit: "L".into(),
            current_stock,
            minimum_stock: 5,
            storage_condition: "2-8°C".into(),
            expiry_date: None,
            lot_number: None,
            remarks: None,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn record_movement_sends_one_action() {
        let (client, mut receiver) = create_mock_client::<Reagent>(10);
        let reagents = ReagentClient::new(client);

        let task = tokio::spawn(async move {
            reagents
                .record_movement(
                    ReagentId(1),
                    MovementRequest {
                        user_id: ProfileId(4),
                        kind: TransactionKind::Withdraw,
                        quantity: 6,
                        reason: None,
                    },
                )
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ReagentId(1));
        match action {
            ReagentAction::RecordMovement(m) => assert_eq!(m.quantity, 6),
            other => panic!("Expected RecordMovement, got {other:?}"),
        }

        responder
            .send(Ok(ReagentActionResult::RecordMovement(StockReceipt {
                transaction_id: TransactionId(1),
                kind: TransactionKind::Withdraw,
                quantity: 6,
                previous_stock: 10,
                new_stock: 4,
                low_stock: true,
                reagent: reagent(4, true),
            })))
            .unwrap();

        let receipt = task.await.unwrap().unwrap();
        assert_eq!((receipt.previous_stock, receipt.new_stock), (10, 4));
        assert!(receipt.low_stock);
    }

    #[tokio::test]
    async fn insufficient_stock_is_recovered_typed() {
        let mut mock = MockClient::<Reagent>::new();
        mock.expect_action(ReagentId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                InventoryError::InsufficientStock {
                    requested: 5,
                    available: 3,
                },
            )));

        let reagents = ReagentClient::new(mock.client());
        let err = reagents
            .record_movement(
                ReagentId(1),
                MovementRequest {
                    user_id: ProfileId(1),
                    kind: TransactionKind::Withdraw,
                    quantity: 5,
                    reason: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                requested: 5,
                available: 3
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn get_active_hides_inactive_rows() {
        let mut mock = MockClient::<Reagent>::new();
        mock.expect_get(ReagentId(1)).return_ok(Some(reagent(3, false)));
        mock.expect_get(ReagentId(1)).return_ok(None);

        let reagents = ReagentClient::new(mock.client());
        assert!(matches!(
            reagents.get_active(ReagentId(1)).await,
            Err(InventoryError::NotFound(_))
        ));
        assert!(matches!(
            reagents.get_active(ReagentId(1)).await,
            Err(InventoryError::NotFound(_))
        ));
        mock.verify();
    }
}
