//! Product API Handlers
//!
//! Reads are public. Writes and the low-stock report are admin only.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::auth::require_admin;
use crate::core::ServerState;
use crate::orders::RequestUser;
use crate::utils::AppResult;
use shared::models::{Product, ProductCreate, ProductUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Include inactive products (admin only)
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/products - list products
pub async fn list(
    State(state): State<ServerState>,
    user: Option<RequestUser>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Product>>> {
    let include_inactive =
        params.include_inactive && user.as_ref().is_some_and(|u| u.is_admin);
    let products = state.product_repository().find_all(include_inactive).await?;
    Ok(Json(products))
}

/// GET /api/products/{sku}
pub async fn get_by_sku(
    State(state): State<ServerState>,
    Path(sku): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.product_repository().get_by_sku(&sku).await?;
    Ok(Json(product))
}

/// GET /api/products/by-category/{category_id}
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.product_repository().find_by_category(&category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/search/{term}
pub async fn search(
    State(state): State<ServerState>,
    Path(term): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.product_repository().search(&term).await?;
    Ok(Json(products))
}

/// GET /api/products/low-stock/{threshold} - restock report (admin)
pub async fn list_low_stock(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(threshold): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    require_admin(&user)?;
    let products = state.product_repository().find_low_stock(threshold).await?;
    Ok(Json(products))
}

/// POST /api/products - create a product (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: RequestUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    require_admin(&user)?;
    let product = state.product_repository().create(payload).await?;
    tracing::info!(sku = %product.sku, "Product created");
    Ok(Json(product))
}

/// PUT /api/products/{sku} - update a product (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(sku): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    require_admin(&user)?;
    let product = state.product_repository().update(&sku, payload).await?;
    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub quantity: i64,
}

/// PUT /api/products/{sku}/stock - set the absolute stock level (admin)
pub async fn update_stock(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(sku): Path<String>,
    Json(payload): Json<StockUpdate>,
) -> AppResult<Json<Product>> {
    require_admin(&user)?;
    let product = state
        .product_repository()
        .update_stock(&sku, payload.quantity)
        .await?;
    tracing::info!(sku = %sku, quantity = payload.quantity, "Stock level set");
    Ok(Json(product))
}

/// DELETE /api/products/{sku} - remove a product (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(sku): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&user)?;
    state.product_repository().delete(&sku).await?;
    Ok(Json(serde_json::json!({ "deleted": sku })))
}
