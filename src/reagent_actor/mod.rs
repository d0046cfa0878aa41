//! # Reagent Actor
//!
//! Owns the `reagents` table, and with it every stock counter.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Reagent`]
//! - [`actions`] - [`ReagentAction`] and [`ReagentActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Stock movements
//!
//! A movement is one `RecordMovement` message. While handling it the actor validates the request,
//! appends the ledger entry through the [`TransactionClient`](crate::clients::TransactionClient)
//! in its context, and only then moves the counter. Because the actor handles one message at a
//! time, two withdrawals against the same reagent can't both read the same `previous_stock`, and
//! a failed append leaves the counter where it was.
//!
//! ```rust,ignore
//! let (transaction_actor, transactions) = transaction_actor::new(32);
//! let (reagent_actor, reagents) = reagent_actor::new(32);
//! let transactions = TransactionClient::new(transactions);
//!
//! tokio::spawn(transaction_actor.run(()));
//! tokio::spawn(reagent_actor.run(transactions));
//! ```

pub mod actions;
pub mod entity;

pub use actions::*;

use crate::model::Reagent;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Reagent actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Reagent>, ResourceClient<Reagent>) {
    ResourceActor::new(buffer_size)
}
