use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for reagent categories.
    CategoryId,
    "category"
);

/// Top level of the catalog (e.g. "Hematology"). Some categories group their reagents by
/// analyser, which is what `has_machines` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub has_machines: bool,
    pub color: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub has_machines: bool,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub has_machines: Option<bool>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}
