//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::auth::require_admin;
use crate::core::ServerState;
use crate::orders::RequestUser;
use crate::utils::AppResult;
use shared::models::{Category, CategoryCreate, CategoryUpdate};

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.category_repository().find_all().await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let category = state.category_repository().get_by_id(&id).await?;
    Ok(Json(category))
}

/// GET /api/categories/{id}/subcategories
pub async fn list_subcategories(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Category>>> {
    // 404 for unknown parents rather than an empty list
    state.category_repository().get_by_id(&id).await?;
    let children = state.category_repository().find_subcategories(&id).await?;
    Ok(Json(children))
}

/// POST /api/categories (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: RequestUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    require_admin(&user)?;
    let category = state.category_repository().create(payload).await?;
    tracing::info!(category_id = %category.category_id, name = %category.name, "Category created");
    Ok(Json(category))
}

/// PUT /api/categories/{id} (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    require_admin(&user)?;
    let category = state.category_repository().update(&id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id} (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&user)?;
    state.category_repository().delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
