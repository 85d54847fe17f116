//! Address API Handlers
//!
//! Every route is scoped to the authenticated caller. Reads of another
//! user's address answer 404, not 403, so address ids cannot be probed;
//! admins see everything.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::orders::RequestUser;
use crate::utils::{AppError, AppResult};
use shared::models::{Address, AddressCreate, AddressUpdate};

/// Fetch an address the caller is allowed to see
async fn owned_address(
    state: &ServerState,
    user: &RequestUser,
    address_id: &str,
) -> AppResult<Address> {
    state
        .address_repository()
        .find_by_id(address_id)
        .await?
        .filter(|a| user.can_access(&a.user_id))
        .ok_or_else(|| AppError::not_found(format!("Address {address_id}")))
}

/// GET /api/addresses - the caller's address book
pub async fn list(
    State(state): State<ServerState>,
    user: RequestUser,
) -> AppResult<Json<Vec<Address>>> {
    let addresses = state.address_repository().find_for_user(&user.id).await?;
    Ok(Json(addresses))
}

/// GET /api/addresses/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> AppResult<Json<Address>> {
    let address = owned_address(&state, &user, &id).await?;
    Ok(Json(address))
}

/// POST /api/addresses
pub async fn create(
    State(state): State<ServerState>,
    user: RequestUser,
    Json(payload): Json<AddressCreate>,
) -> AppResult<Json<Address>> {
    let address = state.address_repository().create(&user.id, payload).await?;
    Ok(Json(address))
}

/// PUT /api/addresses/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
    Json(payload): Json<AddressUpdate>,
) -> AppResult<Json<Address>> {
    owned_address(&state, &user, &id).await?;
    let address = state.address_repository().update(&id, payload).await?;
    Ok(Json(address))
}

/// DELETE /api/addresses/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    owned_address(&state, &user, &id).await?;
    state.address_repository().delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
