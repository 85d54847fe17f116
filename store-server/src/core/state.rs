use sqlx::SqlitePool;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::catalog::{CategoryRepository, ProductRepository};
use crate::db::ledger::AddressRepository;
use crate::db::{catalog, ledger};
use crate::orders::OrderService;
use crate::utils::{AppError, AppResult};

/// Shared server state - configuration plus handles to both stores
///
/// Cloning is cheap: the catalog handle and the sqlite pool are both
/// internally reference-counted, and the order service is behind an Arc.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Catalog store (embedded SurrealDB)
    pub catalog: Surreal<Db>,
    /// Relational ledger (SQLite pool)
    pub ledger: SqlitePool,
    orders: Arc<OrderService>,
}

impl ServerState {
    pub fn new(config: Config, catalog: Surreal<Db>, ledger: SqlitePool) -> Self {
        let orders = Arc::new(OrderService::new(catalog.clone(), ledger.clone()));
        Self {
            config,
            catalog,
            ledger,
            orders,
        }
    }

    /// Open both stores under the configured work directory
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let catalog = catalog::open(&config.catalog_path()).await?;
        let ledger = ledger::open(&config.ledger_path()).await?;

        Ok(Self::new(config.clone(), catalog, ledger))
    }

    /// In-memory state for tests
    pub async fn initialize_in_memory(config: Config) -> AppResult<Self> {
        let catalog = catalog::open_in_memory().await?;
        let ledger = ledger::open_in_memory().await?;
        Ok(Self::new(config, catalog, ledger))
    }

    pub fn order_service(&self) -> &OrderService {
        &self.orders
    }

    pub fn product_repository(&self) -> ProductRepository {
        ProductRepository::new(self.catalog.clone())
    }

    pub fn category_repository(&self) -> CategoryRepository {
        CategoryRepository::new(self.catalog.clone())
    }

    pub fn address_repository(&self) -> AddressRepository {
        AddressRepository::new(self.ledger.clone())
    }
}
