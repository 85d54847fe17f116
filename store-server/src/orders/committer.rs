//! Order commit - the one place both stores are written
//!
//! The catalog has no transactions, so the commit protocol is:
//!
//! 1. Open a ledger transaction; insert the order row and its items.
//! 2. Take stock from the catalog with one conditional decrement per
//!    item. A decrement that reports insufficient stock aborts: every
//!    decrement already applied is compensated with an increment, the
//!    ledger transaction rolls back, and the caller gets
//!    [`OrderError::InsufficientStock`].
//! 3. Log each applied decrement as a stock movement row, then commit
//!    the ledger transaction.
//!
//! The conditional decrement is what closes the race two concurrent
//! orders would otherwise have on the last units of stock: the catalog
//! applies it atomically, so at most one of them wins.

use crate::db::catalog::ProductRepository;
use crate::db::ledger::OrderRepository;
use crate::orders::error::OrderError;
use crate::orders::validator::ValidatedItem;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::order::{Order, OrderItem, OrderStatus, ProductSnapshot};
use uuid::Uuid;

/// Order-level fields resolved before commit
#[derive(Debug, Clone)]
pub struct OrderMeta {
    pub user_id: String,
    pub shipping_address_id: String,
    pub billing_address_id: String,
}

pub struct OrderCommitter {
    products: ProductRepository,
    orders: OrderRepository,
}

impl OrderCommitter {
    pub fn new(products: ProductRepository, orders: OrderRepository) -> Self {
        Self { products, orders }
    }

    /// Persist a validated order, taking stock as part of the commit
    pub async fn commit(
        &self,
        meta: OrderMeta,
        items: Vec<ValidatedItem>,
    ) -> Result<Order, OrderError> {
        let order_id = Uuid::new_v4().to_string();
        let order_items: Vec<OrderItem> = items
            .iter()
            .enumerate()
            .map(|(position, item)| OrderItem {
                order_item_id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_sku: item.sku.clone(),
                snapshot: ProductSnapshot {
                    product_name: item.name.clone(),
                    unit_price: item.unit_price,
                },
                quantity: item.quantity,
                position: position as i64,
            })
            .collect();
        let total_amount: Decimal = order_items.iter().map(|item| item.subtotal()).sum();

        let order = Order {
            order_id: order_id.clone(),
            user_id: meta.user_id,
            order_date: Utc::now(),
            status: OrderStatus::Pending,
            total_amount,
            shipping_address_id: meta.shipping_address_id,
            billing_address_id: meta.billing_address_id,
            items: order_items,
        };

        let mut tx = self.orders.pool().begin().await.map_err(crate::db::RepoError::from)?;
        self.orders.insert_order(&mut tx, &order).await?;
        for item in &order.items {
            if let Err(err) = self.orders.insert_item(&mut tx, item).await {
                let _ = tx.rollback().await;
                return Err(match err {
                    crate::db::RepoError::Duplicate(_) => {
                        OrderError::DuplicateSku(item.product_sku.clone())
                    }
                    other => other.into(),
                });
            }
        }

        // Catalog writes happen while the ledger transaction is open so a
        // failed decrement can still roll the whole order back.
        let mut applied: Vec<(&str, i64)> = Vec::with_capacity(order.items.len());
        for item in &order.items {
            match self
                .products
                .decrement_stock(&item.product_sku, item.quantity)
                .await
            {
                Ok(Some(_)) => applied.push((item.product_sku.as_str(), item.quantity)),
                Ok(None) => {
                    let available = self
                        .products
                        .find_by_sku(&item.product_sku)
                        .await
                        .ok()
                        .flatten()
                        .map(|p| p.stock_quantity)
                        .unwrap_or(0);
                    self.compensate(&order.order_id, &applied).await;
                    let _ = tx.rollback().await;
                    return Err(OrderError::InsufficientStock {
                        sku: item.product_sku.clone(),
                        available,
                    });
                }
                Err(err) => {
                    self.compensate(&order.order_id, &applied).await;
                    let _ = tx.rollback().await;
                    return Err(err.into());
                }
            }
        }

        for (sku, quantity) in &applied {
            if let Err(err) = self
                .orders
                .insert_stock_movement(&mut tx, &order.order_id, sku, *quantity)
                .await
            {
                // The catalog was already debited for every applied item.
                self.compensate(&order.order_id, &applied).await;
                let _ = tx.rollback().await;
                return Err(err.into());
            }
        }

        if let Err(err) = tx.commit().await {
            // Ledger commit failed after the catalog was already debited.
            self.compensate(&order.order_id, &applied).await;
            return Err(crate::db::RepoError::from(err).into());
        }

        tracing::info!(
            order_id = %order.order_id,
            user_id = %order.user_id,
            total = %order.total_amount,
            items = order.items.len(),
            "Order committed"
        );
        Ok(order)
    }

    /// Return already-taken stock after a mid-commit failure
    ///
    /// Compensation failures are logged, not propagated: the order is
    /// already failing and a louder error would not make the catalog any
    /// more consistent.
    async fn compensate(&self, order_id: &str, applied: &[(&str, i64)]) {
        for (sku, quantity) in applied {
            if let Err(err) = self.products.increment_stock(sku, *quantity).await {
                tracing::error!(
                    order_id = %order_id,
                    sku = %sku,
                    quantity = %quantity,
                    error = %err,
                    "Failed to compensate stock decrement"
                );
            }
        }
    }
}
