//! Order service - the facade the API layer talks to
//!
//! Owns the validator/committer/enricher trio plus the address and order
//! repositories, and enforces the request-shape and ownership rules that
//! sit in front of catalog validation.

use crate::db::catalog::ProductRepository;
use crate::db::ledger::{AddressRepository, OrderRepository};
use crate::orders::committer::{OrderCommitter, OrderMeta};
use crate::orders::enricher::{EnrichedOrder, OrderEnricher};
use crate::orders::error::OrderError;
use crate::orders::validator::OrderValidator;
use crate::orders::{ItemRequest, RequestUser};
use serde::Deserialize;
use shared::models::Address;
use shared::order::{Order, OrderStatus};
use sqlx::SqlitePool;
use std::collections::HashSet;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Order creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub shipping_address_id: String,
    pub billing_address_id: String,
    pub items: Vec<ItemRequest>,
}

/// Which order role an address is being asked to fill
enum AddressRole {
    Shipping,
    Billing,
}

pub struct OrderService {
    validator: OrderValidator,
    committer: OrderCommitter,
    enricher: OrderEnricher,
    addresses: AddressRepository,
    orders: OrderRepository,
}

impl OrderService {
    pub fn new(catalog: Surreal<Db>, ledger: SqlitePool) -> Self {
        let products = ProductRepository::new(catalog);
        let orders = OrderRepository::new(ledger.clone());
        Self {
            validator: OrderValidator::new(products.clone()),
            committer: OrderCommitter::new(products.clone(), orders.clone()),
            enricher: OrderEnricher::new(products, orders.clone()),
            addresses: AddressRepository::new(ledger),
            orders,
        }
    }

    /// Validate and commit a new order for the authenticated user
    pub async fn create_order(
        &self,
        user: &RequestUser,
        request: OrderRequest,
    ) -> Result<Order, OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let mut seen = HashSet::new();
        for item in &request.items {
            if item.quantity < 1 {
                return Err(OrderError::InvalidQuantity(item.product_sku.clone()));
            }
            if !seen.insert(item.product_sku.as_str()) {
                return Err(OrderError::DuplicateSku(item.product_sku.clone()));
            }
        }

        self.resolve_address(user, &request.shipping_address_id, AddressRole::Shipping)
            .await?;
        self.resolve_address(user, &request.billing_address_id, AddressRole::Billing)
            .await?;

        let validated = self.validator.validate(&request.items).await?;
        self.committer
            .commit(
                OrderMeta {
                    user_id: user.id.clone(),
                    shipping_address_id: request.shipping_address_id,
                    billing_address_id: request.billing_address_id,
                },
                validated,
            )
            .await
    }

    /// Fetch an order with line items; non-owned reads as nonexistent
    pub async fn get_order(&self, user: &RequestUser, order_id: &str) -> Result<Order, OrderError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .filter(|order| user.can_access(&order.user_id))
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id}")))
    }

    pub async fn get_enriched_order(
        &self,
        user: &RequestUser,
        order_id: &str,
    ) -> Result<EnrichedOrder, OrderError> {
        self.enricher.enriched_order(user, order_id).await
    }

    /// List orders: admins see all, everyone else only their own
    pub async fn list_orders(&self, user: &RequestUser) -> Result<Vec<Order>, OrderError> {
        let orders = if user.is_admin {
            self.orders.find_all().await?
        } else {
            self.orders.find_for_user(&user.id).await?
        };
        Ok(orders)
    }

    /// Set an order's status (admin only)
    pub async fn set_status(
        &self,
        user: &RequestUser,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        if !user.is_admin {
            return Err(OrderError::Forbidden(
                "Admin privileges required to update order status".into(),
            ));
        }
        self.orders.set_status(order_id, status).await?;
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id}")))
    }

    /// Resolve an address for an order role, enforcing ownership and type
    async fn resolve_address(
        &self,
        user: &RequestUser,
        address_id: &str,
        role: AddressRole,
    ) -> Result<Address, OrderError> {
        let address = self
            .addresses
            .find_by_id(address_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Address {address_id}")))?;

        if address.user_id != user.id {
            return Err(OrderError::Forbidden(
                "Address must belong to the authenticated user".into(),
            ));
        }

        let role_ok = match role {
            AddressRole::Shipping => address.address_type.supports_shipping(),
            AddressRole::Billing => address.address_type.supports_billing(),
        };
        if !role_ok {
            let role_name = match role {
                AddressRole::Shipping => "shipping",
                AddressRole::Billing => "billing",
            };
            return Err(OrderError::Forbidden(format!(
                "Address {address_id} cannot be used as a {role_name} address"
            )));
        }
        Ok(address)
    }
}
