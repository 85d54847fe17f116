//! Order validation against the live catalog
//!
//! Read-only pass over the requested items. Every problem is collected
//! before reporting, so the caller sees all of them at once. Passing
//! validation is advisory only: stock can still vanish before commit,
//! and the committer re-checks with a conditional decrement.

use crate::db::catalog::ProductRepository;
use crate::orders::error::{ItemIssue, OrderError};
use crate::orders::ItemRequest;
use rust_decimal::Decimal;

/// A requested item the catalog agreed to at validation time
///
/// Carries the name/price copy the committer will freeze into the order,
/// and the stock level observed (informational only).
#[derive(Debug, Clone)]
pub struct ValidatedItem {
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    pub stock_on_hand: i64,
}

pub struct OrderValidator {
    products: ProductRepository,
}

impl OrderValidator {
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Check every requested item against the catalog
    ///
    /// Returns the items in their input order when all pass, or the full
    /// issue list when any fail. Never mutates the catalog.
    pub async fn validate(&self, items: &[ItemRequest]) -> Result<Vec<ValidatedItem>, OrderError> {
        let mut validated = Vec::with_capacity(items.len());
        let mut issues = Vec::new();

        for item in items {
            let Some(product) = self.products.find_by_sku(&item.product_sku).await? else {
                issues.push(ItemIssue::not_found(&item.product_sku));
                continue;
            };
            if !product.is_active {
                issues.push(ItemIssue::not_active(&item.product_sku));
                continue;
            }
            if product.stock_quantity < item.quantity {
                issues.push(ItemIssue::insufficient_stock(
                    &item.product_sku,
                    product.stock_quantity,
                ));
                continue;
            }
            validated.push(ValidatedItem {
                sku: product.sku,
                name: product.name,
                unit_price: product.price,
                quantity: item.quantity,
                stock_on_hand: product.stock_quantity,
            });
        }

        if issues.is_empty() {
            Ok(validated)
        } else {
            Err(OrderError::Validation(issues))
        }
    }
}
