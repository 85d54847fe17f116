//! Order pipeline errors
//!
//! Validation failures carry the full list of per-item issues so a
//! client can fix a whole cart in one round trip instead of discovering
//! problems one at a time.

use crate::db::RepoError;
use serde::Serialize;
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Why a requested item cannot be ordered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IssueReason {
    NotFound,
    NotActive,
    InsufficientStock { available: i64 },
}

/// One validation problem, tied to the SKU that caused it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemIssue {
    pub sku: String,
    #[serde(flatten)]
    pub reason: IssueReason,
    pub message: String,
}

impl ItemIssue {
    pub fn not_found(sku: &str) -> Self {
        Self {
            sku: sku.to_string(),
            reason: IssueReason::NotFound,
            message: format!("Product with SKU {sku} not found"),
        }
    }

    pub fn not_active(sku: &str) -> Self {
        Self {
            sku: sku.to_string(),
            reason: IssueReason::NotActive,
            message: format!("Product {sku} is not active"),
        }
    }

    pub fn insufficient_stock(sku: &str, available: i64) -> Self {
        Self {
            sku: sku.to_string(),
            reason: IssueReason::InsufficientStock { available },
            message: format!("Insufficient stock for product {sku}. Available: {available}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OrderError {
    /// One or more requested items failed catalog validation
    #[error("Order validation failed")]
    Validation(Vec<ItemIssue>),

    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Quantity for product {0} must be at least 1")]
    InvalidQuantity(String),

    #[error("Product {0} appears more than once in the order")]
    DuplicateSku(String),

    /// Stock ran out between validation and commit
    #[error("Insufficient stock for product {sku}. Available: {available}")]
    InsufficientStock { sku: String, available: i64 },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Store(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(issues) => {
                let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
                AppError::with_message(ErrorCode::OrderValidationFailed, messages.join("; "))
                    .with_detail("items", json!(issues))
            }
            OrderError::EmptyOrder => {
                AppError::with_message(ErrorCode::OrderEmpty, err.to_string())
            }
            OrderError::InvalidQuantity(sku) => {
                AppError::with_message(
                    ErrorCode::InvalidQuantity,
                    format!("Quantity for product {sku} must be at least 1"),
                )
                .with_detail("sku", sku)
            }
            OrderError::DuplicateSku(sku) => {
                AppError::with_message(
                    ErrorCode::DuplicateOrderItem,
                    format!("Product {sku} appears more than once in the order"),
                )
                .with_detail("sku", sku)
            }
            OrderError::InsufficientStock { ref sku, available } => {
                AppError::with_message(ErrorCode::InsufficientStock, err.to_string())
                    .with_detail("sku", sku.as_str())
                    .with_detail("available", available)
            }
            OrderError::NotFound(resource) => AppError::not_found(resource),
            OrderError::Forbidden(msg) => AppError::permission_denied(msg),
            OrderError::Store(repo) => repo.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_all_issues() {
        let err = OrderError::Validation(vec![
            ItemIssue::not_found("A-1"),
            ItemIssue::insufficient_stock("B-2", 3),
        ]);
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderValidationFailed);
        assert!(app.message.contains("Product with SKU A-1 not found"));
        assert!(
            app.message
                .contains("Insufficient stock for product B-2. Available: 3")
        );
        let items = app.details.unwrap().remove("items").unwrap();
        assert_eq!(items.as_array().unwrap().len(), 2);
    }

    #[test]
    fn commit_race_maps_to_insufficient_stock() {
        let app: AppError = OrderError::InsufficientStock {
            sku: "W-1".into(),
            available: 0,
        }
        .into();
        assert_eq!(app.code, ErrorCode::InsufficientStock);
    }
}
