use crate::error::{InventoryError, Result};
use crate::model::{ProfileId, ReagentId, StockMovement, StockTransaction, TransactionId};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the append-only transaction log.
///
/// Only the reagent actor appends; everything else reads.
#[derive(Clone)]
pub struct TransactionClient {
    inner: ResourceClient<StockTransaction>,
}

#[async_trait]
impl ActorClient<StockTransaction> for TransactionClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<StockTransaction> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        InventoryError::from(e)
    }
}

impl TransactionClient {
    pub fn new(inner: ResourceClient<StockTransaction>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, movement), fields(reagent_id = %movement.reagent_id))]
    pub async fn append(&self, movement: StockMovement) -> Result<TransactionId> {
        debug!("Sending request");
        self.inner.create(movement).await.map_err(Self::map_error)
    }

    /// Oldest first.
    #[instrument(skip(self))]
    pub async fn for_reagent(&self, reagent_id: ReagentId) -> Result<Vec<StockTransaction>> {
        self.list(Filter::new(move |t: &StockTransaction| {
            t.reagent_id == reagent_id
        }))
        .await
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: ProfileId) -> Result<Vec<StockTransaction>> {
        let mut rows = self
            .list(Filter::new(move |t: &StockTransaction| t.user_id == user_id))
            .await?;
        rows.reverse();
        Ok(rows)
    }

    /// At most `limit` entries, newest first.
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: usize) -> Result<Vec<StockTransaction>> {
        let rows = self.list(Filter::all()).await?;
        Ok(rows.into_iter().rev().take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionKind;
    use actor_framework::mock::{create_mock_client, expect_create};

    #[tokio::test]
    async fn append_forwards_the_movement() {
        let (client, mut receiver) = create_mock_client::<StockTransaction>(10);
        let transactions = TransactionClient::new(client);

        let append_task = tokio::spawn(async move {
            transactions
                .append(StockMovement {
                    reagent_id: ReagentId(3),
                    user_id: ProfileId(2),
                    kind: TransactionKind::Withdraw,
                    quantity: 6,
                    previous_stock: 10,
                    new_stock: 4,
                    reason: Some("Daily QC".into()),
                })
                .await
        });

        let (movement, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(movement.reagent_id, ReagentId(3));
        assert_eq!((movement.previous_stock, movement.new_stock), (10, 4));
        responder.send(Ok(TransactionId(7))).unwrap();

        assert_eq!(append_task.await.unwrap().unwrap(), TransactionId(7));
    }
}
