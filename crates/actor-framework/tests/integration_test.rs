use actor_framework::{ActorEntity, Filter, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Batch {
    id: u32,
    lot: String,
    units: u32,
    sealed: bool,
}

#[derive(Debug)]
struct BatchCreate {
    lot: String,
    units: u32,
}

#[derive(Debug)]
struct BatchUpdate {
    lot: Option<String>,
}

#[derive(Debug)]
enum BatchAction {
    Take(u32),
    Seal,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum BatchError {
    #[error("lot number is required")]
    MissingLot,
    #[error("only {available} units left")]
    Short { available: u32 },
    #[error("sealed batches can't be deleted")]
    Sealed,
}

#[async_trait]
impl ActorEntity for Batch {
    type Id = u32;
    type Create = BatchCreate;
    type Update = BatchUpdate;
    type Action = BatchAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BatchError;

    fn from_create_params(id: u32, params: BatchCreate) -> Result<Self, Self::Error> {
        if params.lot.is_empty() {
            return Err(BatchError::MissingLot);
        }
        Ok(Self {
            id,
            lot: params.lot,
            units: params.units,
            sealed: false,
        })
    }

    async fn on_update(&mut self, update: BatchUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(lot) = update.lot {
            self.lot = lot;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.sealed {
            return Err(BatchError::Sealed);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: BatchAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            BatchAction::Take(n) => {
                if n > self.units {
                    return Err(BatchError::Short {
                        available: self.units,
                    });
                }
                self.units -= n;
                Ok(self.units)
            }
            BatchAction::Seal => {
                self.sealed = true;
                Ok(self.units)
            }
        }
    }
}

fn create(lot: &str, units: u32) -> BatchCreate {
    BatchCreate {
        lot: lot.to_string(),
        units,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(create("L-100", 10)).await.unwrap();
    assert_eq!(id, 1); // First ID should be 1

    // 2. Action
    let left = client.perform_action(id, BatchAction::Take(4)).await.unwrap();
    assert_eq!(left, 6);

    // 3. Typed error from an action leaves the row untouched
    let err = client
        .perform_action(id, BatchAction::Take(7))
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity_error::<BatchError>().unwrap(),
        BatchError::Short { available: 6 }
    );
    let batch: Batch = client.get(id).await.unwrap().unwrap();
    assert_eq!(batch.units, 6);

    // 4. Update
    let updated = client
        .update(
            id,
            BatchUpdate {
                lot: Some("L-101".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.lot, "L-101");

    // 5. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_create_does_not_consume_an_id() {
    let (actor, client) = ResourceActor::<Batch>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(create("", 1)).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<BatchError>().unwrap(),
        BatchError::MissingLot
    );

    assert_eq!(client.create(create("L-1", 1)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_filters_in_id_order() {
    let (actor, client) = ResourceActor::<Batch>::new(10);
    tokio::spawn(actor.run(()));

    for (lot, units) in [("A", 5), ("B", 0), ("C", 12), ("D", 3)] {
        client.create(create(lot, units)).await.unwrap();
    }

    let stocked = client
        .list(Filter::new(|b: &Batch| b.units > 0))
        .await
        .unwrap();
    let lots: Vec<_> = stocked.iter().map(|b| b.lot.as_str()).collect();
    assert_eq!(lots, vec!["A", "C", "D"]);

    assert_eq!(client.list(Filter::all()).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_unique_suppresses_conflicts() {
    let (actor, client) = ResourceActor::<Batch>::new(10);
    tokio::spawn(actor.run(()));

    let same_lot = |lot: &'static str| Filter::new(move |b: &Batch| b.lot == lot);

    let first = client
        .create_unique(create("L-7", 1), same_lot("L-7"))
        .await
        .unwrap();
    assert_eq!(first, Some(1));

    let second = client
        .create_unique(create("L-7", 2), same_lot("L-7"))
        .await
        .unwrap();
    assert_eq!(second, None);

    // Suppressed inserts don't consume ids either
    let third = client
        .create_unique(create("L-8", 1), same_lot("L-8"))
        .await
        .unwrap();
    assert_eq!(third, Some(2));
}

#[tokio::test]
async fn test_concurrent_conditional_inserts_keep_one_row() {
    let (actor, client) = ResourceActor::<Batch>::new(64);
    tokio::spawn(actor.run(()));

    let mut handles = vec![];
    for _ in 0..20 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .create_unique(create("shared", 1), Filter::new(|b: &Batch| b.lot == "shared"))
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(client.list(Filter::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_on_delete_can_reject() {
    let (actor, client) = ResourceActor::<Batch>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(create("L-9", 3)).await.unwrap();
    client.perform_action(id, BatchAction::Seal).await.unwrap();

    let err = client.delete(id).await.unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));
    assert!(client.get(id).await.unwrap().is_some());

    assert!(matches!(
        client.delete(99).await,
        Err(FrameworkError::NotFound(id)) if id == "99"
    ));
}

#[tokio::test]
async fn test_dropping_clients_stops_the_actor() {
    let (actor, client) = ResourceActor::<Batch>::new(10);
    let handle = tokio::spawn(actor.run(()));

    client.create(create("L-1", 1)).await.unwrap();
    drop(client);

    handle.await.unwrap();
}
