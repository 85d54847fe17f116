//! Relational ledger - SQLite store for addresses, orders, and stock movements
//!
//! The ledger is the transactional half of the system: order rows, their
//! line items, and the stock movement log commit or roll back together.
//! Money columns are stored as TEXT holding exact decimal strings, never
//! as floats. Schema lives in `migrations/` and is applied on open.

pub mod addresses;
pub mod orders;

pub use addresses::AddressRepository;
pub use orders::OrderRepository;

use crate::db::{RepoError, RepoResult};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

/// Open the on-disk ledger and run pending migrations
pub async fn open(path: &Path) -> RepoResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    tracing::info!("Ledger opened at {}", path.display());
    Ok(pool)
}

/// Open an in-memory ledger (tests)
///
/// Single connection: an in-memory sqlite database lives and dies with
/// its connection, so the pool must never rotate it out.
pub async fn open_in_memory() -> RepoResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> RepoResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepoError::Database(format!("migration failed: {e}")))
}

/// Parse a decimal TEXT column back into an exact [`Decimal`]
pub(crate) fn parse_decimal(raw: &str) -> RepoResult<Decimal> {
    raw.parse()
        .map_err(|_| RepoError::Database(format!("invalid decimal in ledger: {raw}")))
}
