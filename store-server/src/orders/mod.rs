//! Order subsystem - validation, commit, and enrichment across two stores
//!
//! The pipeline for creating an order:
//!
//! 1. [`OrderValidator`] reads the catalog and reports every problem with
//!    the requested items at once, mutating nothing.
//! 2. [`OrderCommitter`] writes the order to the ledger and takes stock
//!    from the catalog via conditional decrements, compensating the
//!    catalog if anything fails midway.
//! 3. [`OrderEnricher`] joins historical order reads with the catalog's
//!    current state.
//!
//! [`OrderService`] wires the three together behind ownership and
//! address checks; it is the only entry point the API layer uses.

pub mod committer;
pub mod enricher;
pub mod error;
pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

pub use committer::{OrderCommitter, OrderMeta};
pub use enricher::{EnrichedOrder, OrderEnricher};
pub use error::{ItemIssue, OrderError};
pub use service::{OrderRequest, OrderService};
pub use validator::{OrderValidator, ValidatedItem};

use serde::Deserialize;

/// Authenticated caller identity, resolved by the external auth layer
#[derive(Debug, Clone)]
pub struct RequestUser {
    pub id: String,
    pub is_admin: bool,
}

impl RequestUser {
    /// Whether this caller may read resources owned by `owner_id`
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin || self.id == owner_id
    }
}

/// One requested order line as submitted by the client
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    #[serde(alias = "sku")]
    pub product_sku: String,
    pub quantity: i64,
}
