//! Denormalized product snapshot and enriched line-item views
//!
//! [`ProductSnapshot`] is the value copied out of the catalog when an
//! order is committed. It is immutable once written: the "price paid"
//! side of an order never tracks later catalog edits. The enriched view
//! pairs that historical copy with the catalog's *current* state, when
//! the SKU still resolves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable name/price copy embedded in an order item at commit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product name at order time
    pub product_name: String,
    /// Unit price at order time (exact decimal)
    pub unit_price: Decimal,
}

/// Live catalog state for a SKU referenced by a historical order item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentProductView {
    pub current_name: String,
    pub current_price: Decimal,
    pub is_active: bool,
    pub current_stock: i64,
    pub in_stock: bool,
}

/// One line of an enriched order read
///
/// The historical side is always present. `current` is `None` when the
/// SKU no longer exists in the catalog (or the lookup failed) - an
/// informational gap, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedOrderItem {
    pub order_item_id: String,
    pub product_sku: String,
    /// Historical name at order time
    pub product_name: String,
    pub quantity: i64,
    /// Historical unit price paid
    pub unit_price_at_order: Decimal,
    /// quantity x unit_price_at_order
    pub subtotal: Decimal,
    /// Live catalog state, absent when the SKU no longer resolves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentProductView>,
}
