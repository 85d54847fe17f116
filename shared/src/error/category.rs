//! Error categories for classification and logging

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// High-level classification of an error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General request/validation errors
    General,
    /// Authentication errors
    Auth,
    /// Permission errors
    Permission,
    /// Order processing errors
    Order,
    /// Catalog (product/category) errors
    Catalog,
    /// Address errors
    Address,
    /// System/infrastructure errors
    System,
}

impl ErrorCode {
    /// Get the category this error code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            4000..=4999 => ErrorCategory::Order,
            6000..=6999 => ErrorCategory::Catalog,
            7000..=7999 => ErrorCategory::Address,
            _ => ErrorCategory::System,
        }
    }
}
