//! # Actor Framework
//!
//! Foundational building blocks for type-safe, concurrent resource actors. Each kind of stored
//! row (a table, in database terms) is owned by one [`ResourceActor`] running on its own Tokio
//! task; everything else talks to it through a cloneable [`ResourceClient`].
//!
//! ## Why resource actors?
//!
//! - **Uniform surface**: every resource gets Create / CreateUnique / Get / List / Update /
//!   Delete, plus an `Action` channel for domain operations that don't fit CRUD.
//! - **Serialized mutation**: an actor processes one message at a time, so a read-check-write
//!   sequence inside one message can't interleave with another writer. No locks are involved.
//! - **Late binding**: dependencies are injected when the actor starts (`run(context)`), not when it
//!   is constructed, so actors may depend on each other's clients without construction cycles.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the row type, its DTOs, hooks and actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and the ordered in-memory store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, Filter, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Rack { id: u32, slots: u32, label: String }
//!
//! #[derive(Debug)] struct RackCreate { slots: u32, label: String }
//! #[derive(Debug)] struct RackUpdate { label: Option<String> }
//! #[derive(Debug)] enum RackAction { Fill(u32) }
//! #[derive(Debug, thiserror::Error)]
//! #[error("rack has only {0} free slots")]
//! struct RackFull(u32);
//!
//! #[async_trait]
//! impl ActorEntity for Rack {
//!     type Id = u32;
//!     type Create = RackCreate;
//!     type Update = RackUpdate;
//!     type Action = RackAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = RackFull;
//!
//!     fn from_create_params(id: u32, params: RackCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, slots: params.slots, label: params.label })
//!     }
//!
//!     async fn on_update(&mut self, update: RackUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(label) = update.label { self.label = label; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: RackAction, _ctx: &()) -> Result<u32, Self::Error> {
//!         match action {
//!             RackAction::Fill(n) if n > self.slots => Err(RackFull(self.slots)),
//!             RackAction::Fill(n) => { self.slots -= n; Ok(self.slots) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Rack>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(RackCreate { slots: 8, label: "A".into() }).await.unwrap();
//!     assert_eq!(client.perform_action(id, RackAction::Fill(3)).await.unwrap(), 5);
//!
//!     // Domain errors come back boxed; recover the typed one.
//!     let err = client.perform_action(id, RackAction::Fill(9)).await.unwrap_err();
//!     assert_eq!(err.into_entity_error::<RackFull>().unwrap().0, 5);
//!
//!     // Conditional insert: a second rack labelled "A" is suppressed.
//!     let dup = client
//!         .create_unique(
//!             RackCreate { slots: 4, label: "A".into() },
//!             Filter::new(|r: &Rack| r.label == "A"),
//!         )
//!         .await
//!         .unwrap();
//!     assert!(dup.is_none());
//!     assert_eq!(client.list(Filter::all()).await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Multiple actors run in **parallel**
//! - No shared mutable state (message passing only)
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from a queue of expectations, so client
//! wrappers and services can be unit tested without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
