//! Store Server - two-store e-commerce backend
//!
//! A single-process backend built on two embedded stores:
//!
//! - **Catalog** (`db::catalog`): products and categories in embedded
//!   SurrealDB, optimized for flexible product data and fast reads.
//! - **Ledger** (`db::ledger`): addresses, orders, and the stock
//!   movement log in SQLite, where multi-row writes need transactions.
//!
//! The order pipeline (`orders`) is the seam between the two: it
//! validates carts against the catalog, commits orders to the ledger
//! while taking stock through atomic conditional decrements, and
//! enriches historical order reads with live catalog state.
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/     # config, state, HTTP server
//! ├── api/      # routes and handlers
//! ├── orders/   # validation, commit, enrichment
//! ├── db/       # catalog + ledger repositories
//! └── utils/    # logging, result types
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use crate::orders::{OrderService, RequestUser};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Load .env and initialize logging
pub fn setup_environment() {
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    let log_dir = config.log_dir();
    init_logger_with_file(Some(&config.log_level), log_dir.to_str());
}
