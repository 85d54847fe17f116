//! Utility module - common helpers and type re-exports
//!
//! - [`AppError`] / [`AppResult`] - application error types (from `shared::error`)
//! - logging setup

pub mod logger;
pub mod result;

pub use result::AppResult;
pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
