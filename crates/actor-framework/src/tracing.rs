//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber. Actors log their lifecycle and every
//! request with an `entity_type` field; clients add `#[instrument]` spans, so a single stock
//! withdrawal reads as one hierarchy:
//!
//! ```text
//! INFO record_transaction{reagent_id=reagent_1 kind=Withdraw quantity=6}: Sending request
//! INFO Created entity_type="StockTransaction" id=transaction_1 size=1
//! INFO Action ok entity_type="Reagent" id=reagent_1
//! INFO Low-stock alert queued reagent_id=reagent_1 new_stock=4 minimum_stock=5
//! ```
//!
//! ```bash
//! RUST_LOG=info cargo run                        # compact
//! RUST_LOG=debug cargo run                       # payloads
//! RUST_LOG=lab_inventory=debug,actor_framework=info cargo run
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Filtering comes from `RUST_LOG` (default `info`). Output is the compact formatter without
/// module targets; actors identify themselves through `entity_type` instead.
///
/// Safe to call more than once: later calls leave the first subscriber in place, which keeps
/// test binaries that share a process from panicking.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
