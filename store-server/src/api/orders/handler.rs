//! Order API Handlers
//!
//! Thin layer over [`OrderService`]: extract identity, hand off, map the
//! pipeline error into the response envelope.
//!
//! [`OrderService`]: crate::orders::OrderService

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::enricher::EnrichedOrder;
use crate::orders::{OrderRequest, RequestUser};
use crate::utils::{AppError, AppResult};
use shared::order::{Order, OrderStatus};

/// POST /api/orders - validate and commit a new order
pub async fn create(
    State(state): State<ServerState>,
    user: RequestUser,
    Json(payload): Json<OrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state
        .order_service()
        .create_order(&user, payload)
        .await
        .map_err(AppError::from)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - the caller's orders (all orders for admins)
pub async fn list(
    State(state): State<ServerState>,
    user: RequestUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state
        .order_service()
        .list_orders(&user)
        .await
        .map_err(AppError::from)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - order with line items
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_service()
        .get_order(&user, &id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(order))
}

/// GET /api/orders/{id}/enriched - order joined with current catalog state
pub async fn get_enriched(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> AppResult<Json<EnrichedOrder>> {
    let enriched = state
        .order_service()
        .get_enriched_order(&user, &id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(enriched))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// PUT /api/orders/{id}/status - set order status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_service()
        .set_status(&user, &id, payload.status)
        .await
        .map_err(AppError::from)?;
    tracing::info!(order_id = %id, status = %payload.status, "Order status updated");
    Ok(Json(order))
}
