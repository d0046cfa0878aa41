//! # Lab Inventory demo
//!
//! Starts the system, seeds a small catalog, restocks a reagent, withdraws enough of it to trip
//! the low-stock alert, prints the transaction report as CSV and shuts down.
//!
//! Email goes out through Resend when `LAB_INVENTORY__EMAIL__API_KEY` or `RESEND_API_KEY` is set,
//! otherwise it is logged and skipped.

use actor_framework::tracing::setup_tracing;
use lab_inventory::config::InventoryConfig;
use lab_inventory::lifecycle::InventorySystem;
use lab_inventory::mailer;
use lab_inventory::model::{CategoryCreate, MachineCreate, ReagentCreate, Role, TransactionKind};
use lab_inventory::reports::{export_csv, ReportFilter};
use lab_inventory::session::NewUser;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = InventoryConfig::load().map_err(|e| e.to_string())?;
    let mailer = mailer::from_config(&config.email).map_err(|e| e.to_string())?;

    info!("Starting lab inventory");
    let system = InventorySystem::new(&config, mailer);

    let admin_id = system
        .identity
        .bootstrap_admin(NewUser {
            full_name: "Head of Lab".to_string(),
            email: "head@lab.example".to_string(),
            role: None,
            phone: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    let admin = system
        .identity
        .authenticate(admin_id)
        .await
        .map_err(|e| e.to_string())?;

    let tech_id = system
        .identity
        .create_user(
            &admin,
            NewUser {
                full_name: "Ana Ruiz".to_string(),
                email: "ana.ruiz@lab.example".to_string(),
                role: Some(Role::Technician),
                phone: None,
            },
        )
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("catalog_seed");
    let reagent_id = async {
        let hematology = system
            .catalog
            .create_category(
                &admin,
                CategoryCreate {
                    name: "Hematology".to_string(),
                    description: Some("Blood counts".to_string()),
                    has_machines: true,
                    color: "#dc2626".to_string(),
                },
            )
            .await?;
        let analyser = system
            .catalog
            .create_machine(
                &admin,
                MachineCreate {
                    name: "Sysmex XN-1000".to_string(),
                    category_id: hematology,
                    description: None,
                },
            )
            .await?;
        system
            .catalog
            .create_reagent(
                &admin,
                ReagentCreate {
                    name: "CBC Diluent".to_string(),
                    category_id: hematology,
                    machine_id: Some(analyser),
                    unit: "bottles".to_string(),
                    minimum_stock: 5,
                    storage_condition: "Room temperature".to_string(),
                    expiry_date: None,
                    lot_number: Some("LOT-2291".to_string()),
                    remarks: None,
                },
            )
            .await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("stock_movements");
    async {
        let receipt = system
            .ledger
            .record_transaction(reagent_id, admin_id, TransactionKind::Add, 10, None)
            .await?;
        info!(new_stock = receipt.new_stock, "Restocked");

        let receipt = system
            .ledger
            .record_transaction(
                reagent_id,
                tech_id,
                TransactionKind::Withdraw,
                6,
                Some("Morning QC".to_string()),
            )
            .await?;
        info!(
            new_stock = receipt.new_stock,
            low_stock = receipt.low_stock,
            "Withdrawn"
        );

        // More than is left: refused, nothing recorded
        if let Err(e) = system
            .ledger
            .record_transaction(reagent_id, tech_id, TransactionKind::Withdraw, 50, None)
            .await
        {
            error!(error = %e, "Withdrawal refused");
        }
        Ok::<_, lab_inventory::InventoryError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    system.alerts.flush().await.map_err(|e| e.to_string())?;
    let unread = system
        .inbox
        .unread_count(&admin)
        .await
        .map_err(|e| e.to_string())?;
    info!(unread, "Admin inbox");

    let rows = system
        .reports
        .transaction_report(&admin, &ReportFilter::default())
        .await
        .map_err(|e| e.to_string())?;
    print!("{}", export_csv(&rows).map_err(|e| e.to_string())?);

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Lab inventory stopped");
    Ok(())
}
