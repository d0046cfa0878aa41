use super::CategoryId;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for analysers.
    MachineId,
    "machine"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
    pub category_id: CategoryId,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct MachineCreate {
    pub name: String,
    pub category_id: CategoryId,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachineUpdate {
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
