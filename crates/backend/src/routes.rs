use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::shared::app_state::AppState;

/// All application routes
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/fire_district",
            get(handlers::a001_fire_district::list_all).post(handlers::a001_fire_district::save),
        )
        .route(
            "/api/fire_district/:id",
            delete(handlers::a001_fire_district::delete),
        )
        .route(
            "/api/fire_district/export/:format",
            post(handlers::a001_fire_district::export),
        )
        .with_state(state)
}
