//! Product API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{sku}",
            get(handler::get_by_sku)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{sku}/stock", put(handler::update_stock))
        .route("/by-category/{category_id}", get(handler::list_by_category))
        .route("/search/{term}", get(handler::search))
        .route("/low-stock/{threshold}", get(handler::list_low_stock))
}
