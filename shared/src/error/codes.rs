//! Unified error codes for the store backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Product and category errors
//! - 7xxx: Address errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// One or more order items failed validation
    OrderValidationFailed = 4001,
    /// Order contains no items
    OrderEmpty = 4002,
    /// The same SKU appears more than once in one order
    DuplicateOrderItem = 4003,
    /// Not enough stock to cover the requested quantity
    InsufficientStock = 4004,
    /// Order not found (or not visible to the requester)
    OrderNotFound = 4005,
    /// Status value outside the allowed set
    InvalidOrderStatus = 4006,
    /// Item quantity must be a positive integer
    InvalidQuantity = 4007,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product exists but is not active
    ProductInactive = 6002,
    /// SKU already taken by another product
    SkuAlreadyExists = 6003,
    /// Category not found
    CategoryNotFound = 6004,
    /// Category name already taken
    CategoryNameExists = 6005,

    // ==================== 7xxx: Address ====================
    /// Address not found
    AddressNotFound = 7001,
    /// Address type tag does not permit this use (shipping vs billing)
    AddressTypeMismatch = 7002,
    /// Address belongs to a different user
    AddressNotOwned = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Authentication required",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin role required",

            Self::OrderValidationFailed => "Order validation failed",
            Self::OrderEmpty => "Order must contain at least one item",
            Self::DuplicateOrderItem => "Duplicate SKU within one order",
            Self::InsufficientStock => "Insufficient stock",
            Self::OrderNotFound => "Order not found",
            Self::InvalidOrderStatus => "Invalid order status",
            Self::InvalidQuantity => "Quantity must be a positive integer",

            Self::ProductNotFound => "Product not found",
            Self::ProductInactive => "Product is not active",
            Self::SkuAlreadyExists => "SKU already exists",
            Self::CategoryNotFound => "Category not found",
            Self::CategoryNameExists => "Category name already exists",

            Self::AddressNotFound => "Address not found",
            Self::AddressTypeMismatch => "Address type does not permit this use",
            Self::AddressNotOwned => "Address belongs to a different user",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unrecognized u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::NotAuthenticated,

            2001 => Self::PermissionDenied,
            2002 => Self::AdminRequired,

            4001 => Self::OrderValidationFailed,
            4002 => Self::OrderEmpty,
            4003 => Self::DuplicateOrderItem,
            4004 => Self::InsufficientStock,
            4005 => Self::OrderNotFound,
            4006 => Self::InvalidOrderStatus,
            4007 => Self::InvalidQuantity,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductInactive,
            6003 => Self::SkuAlreadyExists,
            6004 => Self::CategoryNotFound,
            6005 => Self::CategoryNameExists,

            7001 => Self::AddressNotFound,
            7002 => Self::AddressTypeMismatch,
            7003 => Self::AddressNotOwned,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::OrderValidationFailed,
            ErrorCode::InsufficientStock,
            ErrorCode::ProductNotFound,
            ErrorCode::AddressTypeMismatch,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(5555), Err(InvalidErrorCode(5555)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::InsufficientStock.to_string(), "E4004");
    }
}
