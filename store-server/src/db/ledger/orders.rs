//! Order repository
//!
//! Reads return domain types; the transactional insert helpers take an
//! open sqlite transaction so the commit pipeline can group the order
//! row, its items, and the stock movement log into one atomic write.

use crate::db::ledger::parse_decimal;
use crate::db::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::order::{Order, OrderItem, OrderStatus, ProductSnapshot};
use sqlx::{Sqlite, SqlitePool, Transaction};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    order_date: DateTime<Utc>,
    status: String,
    total_amount: String,
    shipping_address_id: String,
    billing_address_id: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepoError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e: String| RepoError::Database(e))?;
        Ok(Order {
            order_id: row.id,
            user_id: row.user_id,
            order_date: row.order_date,
            status,
            total_amount: parse_decimal(&row.total_amount)?,
            shipping_address_id: row.shipping_address_id,
            billing_address_id: row.billing_address_id,
            items: Vec::new(),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    order_id: String,
    product_sku: String,
    product_name: String,
    unit_price: String,
    quantity: i64,
    position: i64,
}

impl TryFrom<ItemRow> for OrderItem {
    type Error = RepoError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(OrderItem {
            order_item_id: row.id,
            order_id: row.order_id,
            product_sku: row.product_sku,
            snapshot: ProductSnapshot {
                product_name: row.product_name,
                unit_price: parse_decimal(&row.unit_price)?,
            },
            quantity: row.quantity,
            position: row.position,
        })
    }
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert the order row inside an open transaction
    pub async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: &Order,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO orders \
             (id, user_id, order_date, status, total_amount, shipping_address_id, billing_address_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.order_id)
        .bind(&order.user_id)
        .bind(order.order_date)
        .bind(order.status.as_str())
        .bind(order.total_amount.to_string())
        .bind(&order.shipping_address_id)
        .bind(&order.billing_address_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Insert one line item inside an open transaction
    ///
    /// The UNIQUE(order_id, product_sku) constraint surfaces duplicate
    /// SKUs here as [`RepoError::Duplicate`].
    pub async fn insert_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: &OrderItem,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO order_items \
             (id, order_id, product_sku, product_name, unit_price, quantity, position) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.order_item_id)
        .bind(&item.order_id)
        .bind(&item.product_sku)
        .bind(&item.snapshot.product_name)
        .bind(item.snapshot.unit_price.to_string())
        .bind(item.quantity)
        .bind(item.position)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Log one applied stock decrement inside an open transaction
    pub async fn insert_stock_movement(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order_id: &str,
        product_sku: &str,
        quantity: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO stock_movements (order_id, product_sku, quantity, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(product_sku)
        .bind(quantity)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Fetch an order with its line items
    pub async fn find_by_id(&self, order_id: &str) -> RepoResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut order = Order::try_from(row)?;
        order.items = self.find_items(order_id).await?;
        Ok(Some(order))
    }

    /// Line items of an order, in their original input order
    pub async fn find_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let rows: Vec<ItemRow> =
            sqlx::query_as("SELECT * FROM order_items WHERE order_id = ? ORDER BY position")
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(OrderItem::try_from).collect()
    }

    /// A user's orders, newest first, without line items
    pub async fn find_for_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let rows: Vec<OrderRow> =
            sqlx::query_as("SELECT * FROM orders WHERE user_id = ? ORDER BY order_date DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    /// All orders, newest first, without line items (admin)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let rows: Vec<OrderRow> =
            sqlx::query_as("SELECT * FROM orders ORDER BY order_date DESC")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    pub async fn set_status(&self, order_id: &str, status: OrderStatus) -> RepoResult<()> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Order {order_id}")));
        }
        Ok(())
    }

    /// Stock decrements logged for an order
    pub async fn stock_movements(&self, order_id: &str) -> RepoResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT product_sku, quantity FROM stock_movements WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ledger::{AddressRepository, open_in_memory};
    use shared::models::{AddressCreate, AddressType};
    use uuid::Uuid;

    async fn seed_address(pool: &SqlitePool, user_id: &str) -> String {
        AddressRepository::new(pool.clone())
            .create(
                user_id,
                AddressCreate {
                    street: "1 Main St".into(),
                    city: "Springfield".into(),
                    state: "IL".into(),
                    zip_code: "62701".into(),
                    country: "US".into(),
                    address_type: AddressType::Both,
                    is_default: true,
                },
            )
            .await
            .unwrap()
            .address_id
    }

    fn sample_order(user_id: &str, address_id: &str, total: Decimal) -> Order {
        Order {
            order_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            order_date: Utc::now(),
            status: OrderStatus::Pending,
            total_amount: total,
            shipping_address_id: address_id.to_string(),
            billing_address_id: address_id.to_string(),
            items: Vec::new(),
        }
    }

    fn sample_item(order_id: &str, sku: &str, position: i64) -> OrderItem {
        OrderItem {
            order_item_id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            product_sku: sku.to_string(),
            snapshot: ProductSnapshot {
                product_name: format!("Product {sku}"),
                unit_price: "12.50".parse().unwrap(),
            },
            quantity: 2,
            position,
        }
    }

    #[tokio::test]
    async fn insert_and_read_back_with_items() {
        let pool = open_in_memory().await.unwrap();
        let repo = OrderRepository::new(pool.clone());
        let address_id = seed_address(&pool, "user-1").await;

        let order = sample_order("user-1", &address_id, "25.00".parse().unwrap());
        let item_a = sample_item(&order.order_id, "SKU-A", 0);
        let item_b = sample_item(&order.order_id, "SKU-B", 1);

        let mut tx = pool.begin().await.unwrap();
        repo.insert_order(&mut tx, &order).await.unwrap();
        repo.insert_item(&mut tx, &item_a).await.unwrap();
        repo.insert_item(&mut tx, &item_b).await.unwrap();
        repo.insert_stock_movement(&mut tx, &order.order_id, "SKU-A", 2)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let fetched = repo.find_by_id(&order.order_id).await.unwrap().unwrap();
        assert_eq!(fetched.total_amount, order.total_amount);
        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].product_sku, "SKU-A");
        assert_eq!(fetched.items[1].product_sku, "SKU-B");

        let movements = repo.stock_movements(&order.order_id).await.unwrap();
        assert_eq!(movements, vec![("SKU-A".to_string(), 2)]);
    }

    #[tokio::test]
    async fn duplicate_sku_in_one_order_is_rejected() {
        let pool = open_in_memory().await.unwrap();
        let repo = OrderRepository::new(pool.clone());
        let address_id = seed_address(&pool, "user-1").await;

        let order = sample_order("user-1", &address_id, "25.00".parse().unwrap());
        let mut tx = pool.begin().await.unwrap();
        repo.insert_order(&mut tx, &order).await.unwrap();
        repo.insert_item(&mut tx, &sample_item(&order.order_id, "SKU-A", 0))
            .await
            .unwrap();
        let err = repo
            .insert_item(&mut tx, &sample_item(&order.order_id, "SKU-A", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        tx.rollback().await.unwrap();

        assert!(repo.find_by_id(&order.order_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn status_update_and_scoped_listing() {
        let pool = open_in_memory().await.unwrap();
        let repo = OrderRepository::new(pool.clone());
        let addr_1 = seed_address(&pool, "user-1").await;
        let addr_2 = seed_address(&pool, "user-2").await;

        let mine = sample_order("user-1", &addr_1, Decimal::ZERO);
        let theirs = sample_order("user-2", &addr_2, Decimal::ZERO);
        for order in [&mine, &theirs] {
            let mut tx = pool.begin().await.unwrap();
            repo.insert_order(&mut tx, order).await.unwrap();
            tx.commit().await.unwrap();
        }

        repo.set_status(&mine.order_id, OrderStatus::Shipped)
            .await
            .unwrap();
        let fetched = repo.find_by_id(&mine.order_id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Shipped);

        assert_eq!(repo.find_for_user("user-1").await.unwrap().len(), 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);

        assert!(matches!(
            repo.set_status("missing", OrderStatus::Cancelled)
                .await
                .unwrap_err(),
            RepoError::NotFound(_)
        ));
    }
}
