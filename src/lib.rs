//! # Lab Inventory
//!
//! Reagent-inventory tracking for a hospital laboratory. Staff withdraw reagents, administrators
//! restock them and manage the catalog, and every administrator hears about it when a reagent
//! runs low.
//!
//! ## Architecture
//!
//! Each table (profiles, categories, machines, reagents, stock transactions, notifications) is
//! owned by one [`ResourceActor`](actor_framework::ResourceActor) from the `actor-framework`
//! crate. Services talk to the actors through the typed wrappers in [`clients`].
//!
//! - [`ledger`] - the only way stock changes ([`StockLedger`](ledger::StockLedger))
//! - [`notifier`] and [`dispatch`] - low-stock alerts, in-app and by email
//! - [`session`] - sign-in and the admin capability check
//! - [`catalog`], [`inbox`], [`reports`] - everything around the ledger
//! - [`lifecycle`] - starts, wires and stops the whole system
//!
//! ## Stock consistency
//!
//! A movement is a single message to the reagent's actor: validate, append to the transaction
//! log, then move the counter. Movements against one reagent are therefore serialized, the
//! counter never goes negative, and a failed append leaves the counter untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lab_inventory::config::InventoryConfig;
//! use lab_inventory::lifecycle::InventorySystem;
//! use lab_inventory::mailer::MemoryMailer;
//! use lab_inventory::model::{ReagentId, TransactionKind};
//! use lab_inventory::session::NewUser;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = InventorySystem::new(&InventoryConfig::default(), Arc::new(MemoryMailer::new()));
//!
//!     let admin = system
//!         .identity
//!         .bootstrap_admin(NewUser {
//!             full_name: "Head of Lab".into(),
//!             email: "head@lab.org".into(),
//!             role: None,
//!             phone: None,
//!         })
//!         .await?;
//!
//!     let receipt = system
//!         .ledger
//!         .record_transaction(ReagentId(1), admin, TransactionKind::Add, 20, None)
//!         .await?;
//!     println!("stock is now {}", receipt.new_stock);
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod inbox;
pub mod ledger;
pub mod lifecycle;
pub mod mailer;
pub mod model;
pub mod notifier;
pub mod reports;
pub mod session;

pub mod category_actor;
pub mod machine_actor;
pub mod notification_actor;
pub mod profile_actor;
pub mod reagent_actor;
pub mod transaction_actor;

pub use error::{InventoryError, Result};
