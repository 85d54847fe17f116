//! Order domain types
//!
//! Orders live in the relational ledger. Each line item carries an
//! immutable [`ProductSnapshot`] copied from the catalog at order time,
//! so later catalog changes never alter historical orders.

pub mod snapshot;

pub use snapshot::{CurrentProductView, EnrichedOrderItem, ProductSnapshot};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status
///
/// The value set is closed but transitions are unrestricted: any
/// authorized actor may set any enumerated value. Terminal states
/// (delivered, cancelled, refunded) are terminal by convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            other => Err(format!("invalid order status: {}", other)),
        }
    }
}

/// Order entity (relational ledger)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order id (uuid)
    pub order_id: String,
    /// Owning user id
    pub user_id: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Derived: sum of all line item subtotals (exact decimal)
    pub total_amount: Decimal,
    pub shipping_address_id: String,
    pub billing_address_id: String,
    /// Line items (populated on detail reads; empty on list reads)
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Order line item (relational ledger, cascade-owned by its order)
///
/// References its product by SKU value only - the product lives in a
/// different store. A SKU can appear at most once per order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Line item id (uuid)
    pub order_item_id: String,
    pub order_id: String,
    pub product_sku: String,
    /// Immutable name/price copy taken at order time
    #[serde(flatten)]
    pub snapshot: ProductSnapshot,
    /// Ordered quantity (positive)
    pub quantity: i64,
    /// Zero-based input position, preserved for stable ordering
    pub position: i64,
}

impl OrderItem {
    /// Line subtotal: quantity x snapshot unit price (never the live price)
    pub fn subtotal(&self) -> Decimal {
        self.snapshot.unit_price * Decimal::from(self.quantity)
    }
}
