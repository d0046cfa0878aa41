//! Represents a stocked lab consumable.
//!
//! # Actor Framework
//! [`Reagent`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`crate::reagent_actor`]. Catalog edits go through [`ReagentUpdate`], which has no stock
//! field: `current_stock` only moves through the `RecordMovement` action.
use super::{CategoryId, MachineId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for reagents.
    ReagentId,
    "reagent"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reagent {
    pub id: ReagentId,
    pub name: String,
    pub category_id: CategoryId,
    pub machine_id: Option<MachineId>,
    pub unit: String,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub storage_condition: String,
    pub expiry_date: Option<NaiveDate>,
    pub lot_number: Option<String>,
    pub remarks: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Reagent {
    /// Stock at or below the minimum counts as low.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}

#[derive(Debug, Clone)]
pub struct ReagentCreate {
    pub name: String,
    pub category_id: CategoryId,
    pub machine_id: Option<MachineId>,
    pub unit: String,
    pub minimum_stock: u32,
    pub storage_condition: String,
    pub expiry_date: Option<NaiveDate>,
    pub lot_number: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReagentUpdate {
    pub name: Option<String>,
    /// `Some(None)` detaches the reagent from its machine.
    pub machine_id: Option<Option<MachineId>>,
    pub unit: Option<String>,
    pub minimum_stock: Option<u32>,
    pub storage_condition: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub lot_number: Option<String>,
    pub remarks: Option<String>,
    pub is_active: Option<bool>,
}

/// Everything an alert needs to describe a reagent, with catalog names already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentSnapshot {
    pub reagent_id: ReagentId,
    pub name: String,
    pub category_name: String,
    pub machine_name: Option<String>,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub unit: String,
}
