//! Shared types for the store backend
//!
//! Common types used across the workspace: the unified error system,
//! catalog and ledger domain models, and the order value types
//! (including the immutable product snapshot embedded in order items).

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
