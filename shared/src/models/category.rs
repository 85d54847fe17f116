//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity (catalog store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category id (uuid, also the record key in the catalog store)
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Parent category id for hierarchical catalogs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<String>,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<String>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<String>,
}
