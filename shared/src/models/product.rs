//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity (catalog store)
///
/// Products live in the document store and are addressed by SKU, not by a
/// relational foreign key. Price is an exact decimal; binary floats are
/// never used for money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stock-keeping unit, the stable identifier used across stores
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price (non-negative exact decimal)
    pub price: Decimal,
    /// Units on hand (never negative)
    pub stock_quantity: i64,
    pub is_active: bool,
    /// Category references (category ids)
    #[serde(default)]
    pub categories: Vec<String>,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
    /// Last update timestamp (epoch millis)
    pub updated_at: i64,
}

impl Product {
    /// Whether at least one unit is available
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i64,
    pub is_active: Option<bool>,
    pub categories: Option<Vec<String>>,
}

/// Update product payload
///
/// `None` fields are left untouched. Serialization skips `None` so the
/// patch can be merged directly into the stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Stamped by the repository on every update (epoch millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}
