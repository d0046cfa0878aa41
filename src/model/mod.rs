//! Row types for every table, with their create/update DTOs and typed ids.
//!
//! Each type implements [`ActorEntity`](actor_framework::ActorEntity) in its actor module
//! (see [`crate::reagent_actor`] and friends).

/// Declares a `u32` id newtype that displays as `{prefix}_{n}`.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod category;
pub mod machine;
pub mod notification;
pub mod profile;
pub mod reagent;
pub mod transaction;

pub use category::*;
pub use machine::*;
pub use notification::*;
pub use profile::*;
pub use reagent::*;
pub use transaction::*;
