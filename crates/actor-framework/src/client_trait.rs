//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default `get`, `list` and `delete` built on top
//! of a generic `ResourceClient`, with framework errors mapped into the client's own error type.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read/delete operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, Filter, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Freezer { id: u32, celsius: i32 }
/// #[derive(Debug)] struct FreezerCreate;
/// #[derive(Debug)] struct FreezerUpdate;
/// #[derive(Debug)] enum FreezerAction {}
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct FreezerError(String);
///
/// impl From<String> for FreezerError {
///     fn from(s: String) -> Self { FreezerError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Freezer {
///     type Id = u32;
///     type Create = FreezerCreate;
///     type Update = FreezerUpdate;
///     type Action = FreezerAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = FreezerError;
///
///     fn from_create_params(id: u32, _: FreezerCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, celsius: -20 })
///     }
///     async fn on_update(&mut self, _: FreezerUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: FreezerAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct FreezerClient {
///     inner: ResourceClient<Freezer>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Freezer> for FreezerClient {
///     type Error = FreezerError;
///
///     fn inner(&self) -> &ResourceClient<Freezer> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         FreezerError(e.to_string())
///     }
/// }
///
/// async fn usage(client: FreezerClient) {
///     // get(), list() and delete() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list(Filter::new(|f: &Freezer| f.celsius < -70)).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `filter`, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: Filter<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
