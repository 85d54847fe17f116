//! Health check routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    /// Whether the relational ledger answers a trivial query
    ledger_ok: bool,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let ledger_ok = sqlx::query("SELECT 1")
        .fetch_one(&state.ledger)
        .await
        .is_ok();

    Json(HealthResponse {
        status: if ledger_ok { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        ledger_ok,
    })
}
