//! Catalog store - embedded SurrealDB holding products and categories
//!
//! Products are keyed by SKU, categories by a generated uuid. The store
//! has no transactional envelope spanning multiple records: every
//! mutation is an independent, irrevocable operation once issued. The
//! one concurrency guarantee the order pipeline relies on is that a
//! single `UPDATE ... WHERE` statement is atomic, which is what makes
//! the conditional stock decrement safe.

pub mod categories;
pub mod products;

pub use categories::CategoryRepository;
pub use products::ProductRepository;

use crate::db::{RepoError, RepoResult};
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "store";
const DATABASE: &str = "catalog";

/// Open the on-disk catalog store and apply schema definitions
pub async fn open(path: &Path) -> RepoResult<Surreal<Db>> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    define_schema(&db).await?;
    tracing::info!("Catalog store opened at {}", path.display());
    Ok(db)
}

/// Open an in-memory catalog store (tests)
pub async fn open_in_memory() -> RepoResult<Surreal<Db>> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    define_schema(&db).await?;
    Ok(db)
}

async fn define_schema(db: &Surreal<Db>) -> RepoResult<()> {
    db.query(
        "DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
         DEFINE INDEX IF NOT EXISTS product_sku ON TABLE product COLUMNS sku UNIQUE;
         DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
         DEFINE INDEX IF NOT EXISTS category_name ON TABLE category COLUMNS name UNIQUE;",
    )
    .await?
    .check()?;
    Ok(())
}

/// Whether a catalog store error is a duplicate-record/index violation
pub(crate) fn is_duplicate(err: &surrealdb::Error) -> bool {
    let msg = err.to_string();
    msg.contains("already exists") || msg.contains("already contains")
}

/// Map a duplicate-record error to [`RepoError::Duplicate`], everything
/// else to [`RepoError::Database`]
pub(crate) fn map_create_err(resource: &str, err: surrealdb::Error) -> RepoError {
    if is_duplicate(&err) {
        RepoError::Duplicate(resource.to_string())
    } else {
        RepoError::Database(err.to_string())
    }
}
