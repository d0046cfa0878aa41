use crate::model::{ProfileId, Reagent, ReagentId, TransactionId, TransactionKind};
use serde::Serialize;

/// One stock movement, as requested by the ledger.
#[derive(Debug, Clone)]
pub struct MovementRequest {
    pub user_id: ProfileId,
    pub kind: TransactionKind,
    pub quantity: u32,
    pub reason: Option<String>,
}

#[derive(Debug)]
pub enum ReagentAction {
    /// Validate, append the ledger entry, then move the counter.
    RecordMovement(MovementRequest),
    /// Replay the ledger for this reagent and compare with the counter.
    Reconcile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReagentActionResult {
    RecordMovement(StockReceipt),
    Reconcile(StockReconciliation),
}

/// Outcome of a successful movement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReceipt {
    pub transaction_id: TransactionId,
    pub kind: TransactionKind,
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    /// `new_stock` is at or below the reagent's minimum.
    pub low_stock: bool,
    /// The reagent as it stands after the movement.
    pub reagent: Reagent,
}

/// Counter vs. ledger replay for one reagent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReconciliation {
    pub reagent_id: ReagentId,
    pub recorded_stock: u32,
    pub derived_stock: i64,
    pub transaction_count: usize,
}

impl StockReconciliation {
    pub fn is_consistent(&self) -> bool {
        i64::from(self.recorded_stock) == self.derived_stock
    }
}
