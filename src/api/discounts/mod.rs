//! Discounts API module

mod handler;

use axum::{Router, routing::post};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/discounts", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/validate", post(handler::validate))
        .route("/redeem", post(handler::redeem))
}
