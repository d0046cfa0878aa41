use super::{ProfileId, ReagentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for ledger entries.
    TransactionId,
    "transaction"
);

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Withdraw,
    Add,
}

impl TransactionKind {
    /// Stock after moving `quantity`, or `None` if it would go below zero (or overflow).
    pub fn apply(self, stock: u32, quantity: u32) -> Option<u32> {
        match self {
            TransactionKind::Withdraw => stock.checked_sub(quantity),
            TransactionKind::Add => stock.checked_add(quantity),
        }
    }

    pub fn default_reason(self) -> &'static str {
        match self {
            TransactionKind::Withdraw => "Stock withdrawal",
            TransactionKind::Add => "Stock addition",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Withdraw => f.write_str("withdraw"),
            TransactionKind::Add => f.write_str("add"),
        }
    }
}

/// One immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: TransactionId,
    pub reagent_id: ReagentId,
    pub user_id: ProfileId,
    pub kind: TransactionKind,
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create payload for the transaction log.
#[derive(Debug, Clone)]
pub struct StockMovement {
    pub reagent_id: ReagentId,
    pub user_id: ProfileId,
    pub kind: TransactionKind,
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    pub reason: Option<String>,
}
