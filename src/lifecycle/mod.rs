//! # System Lifecycle & Orchestration
//!
//! [`InventorySystem`] creates every table actor, wires them together through context injection,
//! starts the alert dispatcher and builds the services on top.
//!
//! ## Wiring
//!
//! ```text
//! profiles, categories, machines, notifications, transactions   context = ()
//! reagents                                                       context = TransactionClient
//! alert dispatcher                                               runs with LowStockNotifier
//! ```
//!
//! The dependency graph is acyclic, so shutdown is just "drop every client, await every task":
//! the reagent actor stops first and releases its `TransactionClient`, the dispatcher stops once
//! the ledger's `AlertQueue` is gone and releases the notifier's clients.

pub mod inventory_system;

pub use inventory_system::InventorySystem;
