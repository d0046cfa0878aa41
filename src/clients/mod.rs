//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient), one per table.
//!
//! Every wrapper implements [`ActorClient`](actor_framework::ActorClient), so `get`, `list` and
//! `delete` come for free, and maps framework errors into
//! [`InventoryError`](crate::error::InventoryError).

pub mod category_client;
pub mod machine_client;
pub mod notification_client;
pub mod profile_client;
pub mod reagent_client;
pub mod transaction_client;

pub use category_client::*;
pub use machine_client::*;
pub use notification_client::*;
pub use profile_client::*;
pub use reagent_client::*;
pub use transaction_client::*;
