//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`products`] - product catalog endpoints
//! - [`categories`] - category management endpoints
//! - [`addresses`] - user address book endpoints
//! - [`orders`] - order creation and reads
//!
//! Identity arrives on every request as `X-User-Id` / `X-User-Role`
//! headers set by the auth gateway in front of this service; [`auth`]
//! turns them into a [`RequestUser`] extractor.
//!
//! [`RequestUser`]: crate::orders::RequestUser

pub mod auth;

pub mod addresses;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
