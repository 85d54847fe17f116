//! Product repository
//!
//! Products live in the `product` table keyed by SKU, so `select` /
//! `update` address records directly without a lookup query. Stock
//! adjustments for committed orders go through [`decrement_stock`],
//! which only succeeds when enough stock is on hand.
//!
//! [`decrement_stock`]: ProductRepository::decrement_stock

use crate::db::catalog::map_create_err;
use crate::db::{RepoError, RepoResult};
use rust_decimal::Decimal;
use shared::models::{Product, ProductCreate, ProductUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    db: Surreal<Db>,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Create a product keyed by its SKU
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        validate_product_fields(&data.sku, &data.name, data.price, data.stock_quantity)?;

        let now = chrono::Utc::now().timestamp_millis();
        let product = Product {
            sku: data.sku.clone(),
            name: data.name,
            description: data.description.unwrap_or_default(),
            price: data.price,
            stock_quantity: data.stock_quantity,
            is_active: data.is_active.unwrap_or(true),
            categories: data.categories.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self
            .db
            .create((PRODUCT_TABLE, data.sku.as_str()))
            .content(product)
            .await
            .map_err(|e| map_create_err(&format!("Product with SKU {}", data.sku), e))?;

        created.ok_or_else(|| RepoError::Database("Product creation returned no record".into()))
    }

    /// All products, optionally including inactive ones
    pub async fn find_all(&self, include_inactive: bool) -> RepoResult<Vec<Product>> {
        let sql = if include_inactive {
            "SELECT * FROM product ORDER BY name"
        } else {
            "SELECT * FROM product WHERE is_active = true ORDER BY name"
        };
        let mut response = self.db.query(sql).await?;
        let products: Vec<Product> = response.take(0)?;
        Ok(products)
    }

    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.db.select((PRODUCT_TABLE, sku)).await?;
        Ok(product)
    }

    /// Like [`find_by_sku`] but a missing product is an error
    ///
    /// [`find_by_sku`]: ProductRepository::find_by_sku
    pub async fn get_by_sku(&self, sku: &str) -> RepoResult<Product> {
        self.find_by_sku(sku)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product with SKU {sku}")))
    }

    /// Active products carrying the given category id
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<Product>> {
        let mut response = self
            .db
            .query(
                "SELECT * FROM product \
                 WHERE is_active = true AND categories CONTAINS $category \
                 ORDER BY name",
            )
            .bind(("category", category_id.to_string()))
            .await?;
        let products: Vec<Product> = response.take(0)?;
        Ok(products)
    }

    /// Case-insensitive substring search over name and description
    pub async fn search(&self, term: &str) -> RepoResult<Vec<Product>> {
        let mut response = self
            .db
            .query(
                "SELECT * FROM product \
                 WHERE is_active = true \
                 AND (string::lowercase(name) CONTAINS $term \
                      OR string::lowercase(description) CONTAINS $term) \
                 ORDER BY name",
            )
            .bind(("term", term.to_lowercase()))
            .await?;
        let products: Vec<Product> = response.take(0)?;
        Ok(products)
    }

    /// Active products whose stock has fallen below the threshold
    pub async fn find_low_stock(&self, threshold: i64) -> RepoResult<Vec<Product>> {
        let mut response = self
            .db
            .query(
                "SELECT * FROM product \
                 WHERE is_active = true AND stock_quantity < $threshold \
                 ORDER BY stock_quantity",
            )
            .bind(("threshold", threshold))
            .await?;
        let products: Vec<Product> = response.take(0)?;
        Ok(products)
    }

    /// Merge a partial update into an existing product
    pub async fn update(&self, sku: &str, mut data: ProductUpdate) -> RepoResult<Product> {
        if let Some(price) = data.price
            && price < Decimal::ZERO
        {
            return Err(RepoError::Validation("Price cannot be negative".into()));
        }
        if let Some(stock) = data.stock_quantity
            && stock < 0
        {
            return Err(RepoError::Validation(
                "Stock quantity cannot be negative".into(),
            ));
        }
        data.updated_at = Some(chrono::Utc::now().timestamp_millis());

        let updated: Option<Product> = self.db.update((PRODUCT_TABLE, sku)).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product with SKU {sku}")))
    }

    pub async fn delete(&self, sku: &str) -> RepoResult<()> {
        let deleted: Option<Product> = self.db.delete((PRODUCT_TABLE, sku)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Product with SKU {sku}")));
        }
        Ok(())
    }

    /// Set the absolute stock level (admin restock/correction)
    pub async fn update_stock(&self, sku: &str, quantity: i64) -> RepoResult<Product> {
        if quantity < 0 {
            return Err(RepoError::Validation(
                "Stock quantity cannot be negative".into(),
            ));
        }
        self.update(
            sku,
            ProductUpdate {
                stock_quantity: Some(quantity),
                ..Default::default()
            },
        )
        .await
    }

    /// Conditionally take `quantity` units of stock
    ///
    /// A single conditional UPDATE: the decrement applies only when the
    /// product still holds at least `quantity` units, and the statement
    /// is atomic, so two concurrent callers can never both succeed on
    /// the last units. Returns the post-decrement product on success,
    /// `None` when stock was insufficient or the product is gone.
    pub async fn decrement_stock(&self, sku: &str, quantity: i64) -> RepoResult<Option<Product>> {
        if quantity <= 0 {
            return Err(RepoError::Validation(
                "Decrement quantity must be positive".into(),
            ));
        }
        let mut response = self
            .db
            .query(
                "UPDATE type::thing('product', $sku) \
                 SET stock_quantity -= $qty, updated_at = $now \
                 WHERE stock_quantity >= $qty \
                 RETURN AFTER",
            )
            .bind(("sku", sku.to_string()))
            .bind(("qty", quantity))
            .bind(("now", chrono::Utc::now().timestamp_millis()))
            .await?;
        let updated: Vec<Product> = response.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Return previously taken stock (compensation for a failed commit)
    pub async fn increment_stock(&self, sku: &str, quantity: i64) -> RepoResult<Option<Product>> {
        if quantity <= 0 {
            return Err(RepoError::Validation(
                "Increment quantity must be positive".into(),
            ));
        }
        let mut response = self
            .db
            .query(
                "UPDATE type::thing('product', $sku) \
                 SET stock_quantity += $qty, updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("sku", sku.to_string()))
            .bind(("qty", quantity))
            .bind(("now", chrono::Utc::now().timestamp_millis()))
            .await?;
        let updated: Vec<Product> = response.take(0)?;
        Ok(updated.into_iter().next())
    }
}

fn validate_product_fields(
    sku: &str,
    name: &str,
    price: Decimal,
    stock_quantity: i64,
) -> RepoResult<()> {
    if sku.trim().is_empty() {
        return Err(RepoError::Validation("SKU cannot be empty".into()));
    }
    if name.trim().is_empty() {
        return Err(RepoError::Validation("Product name cannot be empty".into()));
    }
    if price < Decimal::ZERO {
        return Err(RepoError::Validation("Price cannot be negative".into()));
    }
    if stock_quantity < 0 {
        return Err(RepoError::Validation(
            "Stock quantity cannot be negative".into(),
        ));
    }
    Ok(())
}
