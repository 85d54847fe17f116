//! Enriched order reads
//!
//! Joins the immutable ledger record with the catalog's current state.
//! The historical side (name, price paid, subtotal) always renders; the
//! current side is best-effort and goes absent when the SKU no longer
//! resolves or the catalog lookup fails.

use crate::db::catalog::ProductRepository;
use crate::db::ledger::OrderRepository;
use crate::orders::error::OrderError;
use crate::orders::RequestUser;
use serde::Serialize;
use shared::order::{CurrentProductView, EnrichedOrderItem, Order, OrderItem};

/// An order with every line item joined against the live catalog
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub enriched_items: Vec<EnrichedOrderItem>,
}

pub struct OrderEnricher {
    products: ProductRepository,
    orders: OrderRepository,
}

impl OrderEnricher {
    pub fn new(products: ProductRepository, orders: OrderRepository) -> Self {
        Self { products, orders }
    }

    /// Fetch an order with per-item catalog state
    ///
    /// Scoping: owners and admins only. A non-owned order reads exactly
    /// like a nonexistent one, so order ids cannot be probed.
    pub async fn enriched_order(
        &self,
        user: &RequestUser,
        order_id: &str,
    ) -> Result<EnrichedOrder, OrderError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .filter(|order| user.can_access(&order.user_id))
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id}")))?;

        // Per-item catalog lookups are independent, run them concurrently
        let enriched_items =
            futures::future::join_all(order.items.iter().map(|item| self.enrich_item(item))).await;

        let mut order = order;
        order.items.clear();
        Ok(EnrichedOrder {
            order,
            enriched_items,
        })
    }

    async fn enrich_item(&self, item: &OrderItem) -> EnrichedOrderItem {
        let current = match self.products.find_by_sku(&item.product_sku).await {
            Ok(Some(product)) => Some(CurrentProductView {
                current_name: product.name.clone(),
                current_price: product.price,
                is_active: product.is_active,
                current_stock: product.stock_quantity,
                in_stock: product.in_stock(),
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    sku = %item.product_sku,
                    error = %err,
                    "Catalog lookup failed during enrichment"
                );
                None
            }
        };

        EnrichedOrderItem {
            order_item_id: item.order_item_id.clone(),
            product_sku: item.product_sku.clone(),
            product_name: item.snapshot.product_name.clone(),
            quantity: item.quantity,
            unit_price_at_order: item.snapshot.unit_price,
            subtotal: item.subtotal(),
            current,
        }
    }
}
